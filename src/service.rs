//! Business logic services for the catalog and the intake forms.

use std::sync::Arc;

use crate::notifier::Notifier;
use crate::repository::Repository;
use crate::service::catalog_service::CatalogService;
use crate::service::consultation_service::ConsultationService;
use crate::service::contact_service::ContactService;
use crate::service::subscription_service::SubscriptionService;

pub mod catalog_service;
pub mod consultation_service;
pub mod contact_service;
pub mod error;
pub mod subscription_service;

/// Container for all application services.
pub struct Services {
    pub catalog: Arc<CatalogService>,
    pub subscription: Arc<SubscriptionService>,
    pub contact: Arc<ContactService>,
    pub consultation: Arc<ConsultationService>,
}

impl Services {
    /// Creates all services over one shared repository.
    pub fn new(db: Arc<Repository>, notifier: Arc<dyn Notifier>, public_url: &str) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(db.clone())),
            subscription: Arc::new(SubscriptionService::new(db.clone())),
            contact: Arc::new(ContactService::new(db.clone())),
            consultation: Arc::new(ConsultationService::new(db, notifier, public_url)),
        }
    }
}
