//! Consultation requests with double opt-in.
//!
//! ```text
//! [pending] --confirm(known token)--> [confirmed]
//! [pending] --confirm(unknown token)--> NotFound, no change
//! [confirmed] --confirm(same token)--> Conflict, no change
//! ```
//!
//! Pending requests are kept forever; there is no expiry or cancellation.

use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use log::error;
use log::info;
use serde::Serialize;
use uuid::Uuid;

use crate::model::ConsultationModel;
use crate::model::ConsultationStatus;
use crate::notifier::ConfirmationNotice;
use crate::notifier::Notifier;
use crate::notifier::confirm_url;
use crate::repository::Repository;
use crate::repository::table::Table;
use crate::service::contact_service::ContactForm;
use crate::service::error::ServiceError;
use crate::validation;

pub const CHECK_EMAIL_MESSAGE: &str =
    "Consultation request received. Please check your email to confirm your request.";
pub const INVALID_TOKEN: &str = "Invalid confirmation token";
pub const ALREADY_CONFIRMED: &str = "Consultation already confirmed";

/// Acknowledgement of a new request. Carries no token.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ConsultationReceipt {
    pub id: Uuid,
    pub status: &'static str,
    pub message: &'static str,
}

/// Public view of a confirmed request.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedConsultation {
    pub id: Uuid,
    pub email: String,
    pub status: &'static str,
    pub confirmed_at: DateTime<Utc>,
}

pub struct ConsultationService {
    db: Arc<Repository>,
    notifier: Arc<dyn Notifier>,
    public_url: String,
}

impl ConsultationService {
    pub fn new(db: Arc<Repository>, notifier: Arc<dyn Notifier>, public_url: impl Into<String>) -> Self {
        Self {
            db,
            notifier,
            public_url: public_url.into(),
        }
    }

    /// Stores a pending request and sends its confirmation link.
    ///
    /// `email`, `subject` and `message` are required; `name`, `phone` and
    /// `company` are optional. When the notifier fails the request stays
    /// stored as pending and [`ServiceError::Notification`] is returned.
    pub async fn request(&self, form: &ContactForm) -> Result<ConsultationReceipt, ServiceError> {
        let email = validation::email(form.email.as_deref())?;
        let subject = validation::required("subject", form.subject.as_deref())?;
        let message = validation::required("message", form.message.as_deref())?;

        let consultation = ConsultationModel {
            id: Uuid::new_v4(),
            token: Uuid::new_v4().to_string(),
            name: validation::optional(form.name.as_deref()),
            email,
            phone: validation::optional(form.phone.as_deref()),
            company: validation::optional(form.company.as_deref()),
            subject,
            message,
            status: ConsultationStatus::Pending,
            submitted_at: Utc::now(),
        };

        self.db.consultation.insert(&consultation).await?;
        info!("New consultation request {}", consultation.id);

        let notice = ConfirmationNotice {
            consultation_id: consultation.id,
            email: consultation.email.clone(),
            subject: consultation.subject.clone(),
            confirm_url: confirm_url(&self.public_url, &consultation.token),
        };
        if let Err(err) = self.notifier.send_confirmation(notice).await {
            error!("Consultation {} left pending: {}", consultation.id, err);
            return Err(err.into());
        }

        Ok(ConsultationReceipt {
            id: consultation.id,
            status: consultation.status.as_str(),
            message: CHECK_EMAIL_MESSAGE,
        })
    }

    /// Confirms the request holding `token`.
    ///
    /// Not idempotent: a second call with the same token fails with
    /// [`ServiceError::Conflict`] and leaves `confirmedAt` unchanged.
    pub async fn confirm(&self, token: &str) -> Result<ConfirmedConsultation, ServiceError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ServiceError::Validation {
                field: "token".to_string(),
                message: "Confirmation token is required".to_string(),
            });
        }

        let now = Utc::now();
        let outcome = self
            .db
            .consultation
            .update_by_token(token, |c| c.confirm(now).map(|()| c.clone()))
            .await?;

        match outcome {
            None => Err(ServiceError::NotFound {
                message: INVALID_TOKEN.to_string(),
            }),
            Some(Err(_)) => Err(ServiceError::Conflict {
                message: ALREADY_CONFIRMED.to_string(),
            }),
            Some(Ok(consultation)) => {
                info!("Consultation {} confirmed", consultation.id);
                Ok(ConfirmedConsultation {
                    id: consultation.id,
                    email: consultation.email,
                    status: consultation.status.as_str(),
                    confirmed_at: now,
                })
            }
        }
    }

    pub async fn get(&self, id: &Uuid) -> Result<Option<ConsultationModel>, ServiceError> {
        Ok(self.db.consultation.select(id).await?)
    }
}
