//! Contact form submissions.

use std::sync::Arc;

use chrono::Utc;
use log::info;
use serde::Deserialize;
use uuid::Uuid;

use crate::model::ContactModel;
use crate::repository::Repository;
use crate::repository::table::Table;
use crate::service::error::ServiceError;
use crate::validation;

/// Body of a contact or consultation request.
///
/// Every field is optional at the serde level so that a missing field is
/// reported by name instead of as a generic parse failure.
#[derive(Deserialize, Default, Clone, Debug)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

pub struct ContactService {
    db: Arc<Repository>,
}

impl ContactService {
    pub fn new(db: Arc<Repository>) -> Self {
        Self { db }
    }

    /// Validates and stores a contact message. `name`, `email`, `subject` and
    /// `message` are required.
    pub async fn submit(&self, form: &ContactForm) -> Result<ContactModel, ServiceError> {
        let contact = ContactModel {
            id: Uuid::new_v4(),
            name: validation::required("name", form.name.as_deref())?,
            email: validation::email(form.email.as_deref())?,
            phone: validation::optional(form.phone.as_deref()),
            company: validation::optional(form.company.as_deref()),
            subject: validation::required("subject", form.subject.as_deref())?,
            message: validation::required("message", form.message.as_deref())?,
            submitted_at: Utc::now(),
        };

        self.db.contact.insert(&contact).await?;
        info!("New contact message {}", contact.id);
        Ok(contact)
    }
}
