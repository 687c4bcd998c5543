//! In-memory storage seeded at startup.

use log::debug;
use log::info;

use crate::model::Record;
use crate::repository::error::DatabaseError;
use crate::repository::seed::CatalogSeed;
use crate::repository::table::AttorneyTable;
use crate::repository::table::ConsultationTable;
use crate::repository::table::ContactTable;
use crate::repository::table::EventTable;
use crate::repository::table::NewsItemTable;
use crate::repository::table::NewsletterTable;
use crate::repository::table::OfficeTable;
use crate::repository::table::PracticeAreaTable;
use crate::repository::table::SubscriptionTable;
use crate::repository::table::Table;
use crate::repository::table::TableBase;

pub mod error;
pub mod seed;
pub mod table;

/// Main storage struct containing all table handlers.
///
/// Built once per process (or per test) and shared behind an `Arc`.
pub struct Repository {
    pub practice_area: PracticeAreaTable,
    pub news_item: NewsItemTable,
    pub newsletter: NewsletterTable,
    pub attorney: AttorneyTable,
    pub office: OfficeTable,
    pub event: EventTable,
    pub subscription: SubscriptionTable,
    pub contact: ContactTable,
    pub consultation: ConsultationTable,
}

impl Repository {
    /// Creates empty tables.
    pub fn new() -> Self {
        Self {
            practice_area: PracticeAreaTable::new("practice_area"),
            news_item: NewsItemTable::new("news_item"),
            newsletter: NewsletterTable::new("newsletter"),
            attorney: AttorneyTable::new("attorney"),
            office: OfficeTable::new("office"),
            event: EventTable::new("event"),
            subscription: SubscriptionTable::new(),
            contact: ContactTable::new("contact"),
            consultation: ConsultationTable::new(),
        }
    }

    /// Creates tables and fills the catalog from `seed`.
    pub async fn seeded(seed: CatalogSeed) -> Result<Self, DatabaseError> {
        let repo = Self::new();
        repo.load_catalog(seed).await?;
        Ok(repo)
    }

    /// Inserts every record of `seed` into the catalog tables.
    pub async fn load_catalog(&self, seed: CatalogSeed) -> Result<(), DatabaseError> {
        debug!("Loading catalog seed...");
        insert_all(&self.practice_area, seed.practice_areas).await?;
        insert_all(&self.news_item, seed.news).await?;
        insert_all(&self.newsletter, seed.newsletters).await?;
        insert_all(&self.attorney, seed.attorneys).await?;
        insert_all(&self.office, seed.offices).await?;
        insert_all(&self.event, seed.events).await?;
        Ok(())
    }
}

async fn insert_all<T, TB>(table: &TB, rows: Vec<T>) -> Result<(), DatabaseError>
where
    T: Record + Send + Sync,
    TB: Table<T, uuid::Uuid> + Sync,
{
    for row in &rows {
        table.insert(row).await?;
    }
    info!("Seeded {} {} rows.", table.count().await?, table.name());
    Ok(())
}
