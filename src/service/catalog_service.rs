//! Read-only catalog listings.

use std::cmp::Reverse;
use std::sync::Arc;

use crate::model::AttorneyModel;
use crate::model::EventModel;
use crate::model::NewsItemModel;
use crate::model::NewsletterModel;
use crate::model::OfficeModel;
use crate::model::PracticeAreaModel;
use crate::repository::Repository;
use crate::repository::table::Table;
use crate::service::error::ServiceError;

/// Lists catalog records in display order.
pub struct CatalogService {
    db: Arc<Repository>,
}

impl CatalogService {
    pub fn new(db: Arc<Repository>) -> Self {
        Self { db }
    }

    /// Ascending by `order`.
    pub async fn practice_areas(&self) -> Result<Vec<PracticeAreaModel>, ServiceError> {
        let mut rows = self.db.practice_area.select_all().await?;
        rows.sort_by_key(|r| r.order);
        Ok(rows)
    }

    /// Most recent first.
    pub async fn news(&self) -> Result<Vec<NewsItemModel>, ServiceError> {
        let mut rows = self.db.news_item.select_all().await?;
        rows.sort_by_key(|r| Reverse(r.date));
        Ok(rows)
    }

    /// Most recent first.
    pub async fn newsletters(&self) -> Result<Vec<NewsletterModel>, ServiceError> {
        let mut rows = self.db.newsletter.select_all().await?;
        rows.sort_by_key(|r| Reverse(r.date));
        Ok(rows)
    }

    /// Most recent first.
    pub async fn events(&self) -> Result<Vec<EventModel>, ServiceError> {
        let mut rows = self.db.event.select_all().await?;
        rows.sort_by_key(|r| Reverse(r.date));
        Ok(rows)
    }

    pub async fn attorneys(&self) -> Result<Vec<AttorneyModel>, ServiceError> {
        Ok(self.db.attorney.select_all().await?)
    }

    pub async fn offices(&self) -> Result<Vec<OfficeModel>, ServiceError> {
        Ok(self.db.office.select_all().await?)
    }
}
