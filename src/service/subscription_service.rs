//! Newsletter subscriptions (single opt-in).

use std::sync::Arc;

use chrono::Utc;
use log::info;
use serde::Deserialize;
use uuid::Uuid;

use crate::model::SubscriptionModel;
use crate::repository::Repository;
use crate::repository::error::DatabaseError;
use crate::repository::table::Table;
use crate::service::error::ServiceError;
use crate::validation;

pub const ALREADY_SUBSCRIBED: &str = "This email is already subscribed";

/// Body of a subscription request.
#[derive(Deserialize, Default, Clone, Debug)]
pub struct SubscriptionForm {
    #[serde(default)]
    pub email: Option<String>,
}

pub struct SubscriptionService {
    db: Arc<Repository>,
}

impl SubscriptionService {
    pub fn new(db: Arc<Repository>) -> Self {
        Self { db }
    }

    /// Stores a new subscription.
    ///
    /// A second request for the same address fails with
    /// [`ServiceError::Conflict`] and stores nothing. The uniqueness check and
    /// the insert run under one table lock.
    pub async fn subscribe(&self, form: &SubscriptionForm) -> Result<SubscriptionModel, ServiceError> {
        let email = validation::email(form.email.as_deref())?;

        let subscription = SubscriptionModel {
            id: Uuid::new_v4(),
            email,
            subscribed_at: Utc::now(),
        };

        match self.db.subscription.insert(&subscription).await {
            Ok(_) => {
                info!("New subscription {}", subscription.id);
                Ok(subscription)
            }
            Err(DatabaseError::UniqueViolation { field }) if field == "email" => {
                Err(ServiceError::Conflict {
                    message: ALREADY_SUBSCRIBED.to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn is_subscribed(&self, email: &str) -> Result<bool, ServiceError> {
        Ok(self.db.subscription.select_by_email(email).await?.is_some())
    }
}
