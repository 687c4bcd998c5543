//! Catalog seed documents.
//!
//! A seed is a JSON object with one array per catalog. Records carry no ids;
//! each one gets a fresh UUID when parsed.

use std::path::Path;

use serde::Deserialize;

use crate::model::AttorneyModel;
use crate::model::EventModel;
use crate::model::NewsItemModel;
use crate::model::NewsletterModel;
use crate::model::OfficeModel;
use crate::model::PracticeAreaModel;
use crate::repository::error::DatabaseError;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSeed {
    #[serde(default)]
    pub practice_areas: Vec<PracticeAreaModel>,
    #[serde(default)]
    pub news: Vec<NewsItemModel>,
    #[serde(default)]
    pub newsletters: Vec<NewsletterModel>,
    #[serde(default)]
    pub attorneys: Vec<AttorneyModel>,
    #[serde(default)]
    pub offices: Vec<OfficeModel>,
    #[serde(default)]
    pub events: Vec<EventModel>,
}

impl CatalogSeed {
    /// The firm data shipped with the binary.
    pub fn builtin() -> Result<Self, DatabaseError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, DatabaseError> {
        serde_json::from_str(json).map_err(|e| DatabaseError::InternalError {
            message: format!("Invalid catalog seed: {e}"),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, DatabaseError> {
        let json = std::fs::read_to_string(path).map_err(|e| DatabaseError::InternalError {
            message: format!("Failed to read catalog seed '{}': {e}", path.display()),
        })?;
        Self::from_json(&json)
    }
}
