//! Records served and stored by the site.
//!
//! Display text comes in bilingual pairs: every `*_ko` field has an `*_en`
//! counterpart. JSON field names are camelCase to match the front end.

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Types that are keyed by a generated identifier.
pub trait Record {
    fn id(&self) -> Uuid;
}

macro_rules! impl_record {
    ($($model:ty),+ $(,)?) => {
        $(
            impl Record for $model {
                fn id(&self) -> Uuid {
                    self.id
                }
            }
        )+
    };
}

// CATALOG

/// A legal service line shown on the home page.
///
/// Listed in ascending `order`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PracticeAreaModel {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title_ko: String,
    pub title_en: String,
    pub description_ko: String,
    pub description_en: String,
    pub image_url: String,
    pub order: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsItemModel {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title_ko: String,
    pub title_en: String,
    #[serde(default)]
    pub description_ko: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    /// Free-form label, eg "Awards" or "Firm"
    pub category: String,
    pub date: NaiveDate,
    pub image_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterModel {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title_ko: String,
    pub title_en: String,
    pub content_ko: String,
    pub content_en: String,
    pub date: NaiveDate,
    pub image_url: String,
}

/// A lawyer profile card.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttorneyModel {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name_ko: String,
    pub name_en: String,
    pub title_ko: String,
    pub title_en: String,
    pub practice_areas_ko: Vec<String>,
    pub practice_areas_en: Vec<String>,
    pub image_url: String,
    /// Office name in English, eg "Seoul"
    pub office: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfficeModel {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name_ko: String,
    pub name_en: String,
    pub address_ko: String,
    pub address_en: String,
    /// "Headquarters", "Domestic" or "International"
    pub r#type: String,
}

/// A seminar, workshop or webinar hosted by the firm.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventModel {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title_ko: String,
    pub title_en: String,
    pub description_ko: String,
    pub description_en: String,
    pub date: NaiveDate,
    /// Display range, eg "14:00 - 17:00"
    pub time: String,
    pub location: String,
    pub r#type: String,
    pub image_url: String,
    #[serde(default)]
    pub registration_url: Option<String>,
}

// INTAKE

/// A newsletter subscription. Single opt-in, never changes after creation.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionModel {
    pub id: Uuid,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

/// A message sent through the contact form.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Confirmation state of a consultation request.
///
/// The confirmation time lives inside the `Confirmed` variant, so a
/// confirmed request always has one and a pending request never does.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ConsultationStatus {
    Pending,
    Confirmed {
        #[serde(rename = "confirmedAt")]
        confirmed_at: DateTime<Utc>,
    },
}

impl ConsultationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationStatus::Pending => "pending",
            ConsultationStatus::Confirmed { .. } => "confirmed",
        }
    }

    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ConsultationStatus::Pending => None,
            ConsultationStatus::Confirmed { confirmed_at } => Some(*confirmed_at),
        }
    }
}

/// Returned by [`ConsultationModel::confirm`] when the request was confirmed
/// before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyConfirmed {
    pub confirmed_at: DateTime<Utc>,
}

/// A consultation request awaiting (or past) double opt-in.
///
/// `token` is only ever sent out through the confirmation link. It is not
/// serialized.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationModel {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub token: String,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    #[serde(flatten)]
    pub status: ConsultationStatus,
    pub submitted_at: DateTime<Utc>,
}

impl ConsultationModel {
    /// Moves a pending request to confirmed. A confirmed request is left
    /// untouched.
    pub fn confirm(&mut self, at: DateTime<Utc>) -> Result<(), AlreadyConfirmed> {
        match self.status {
            ConsultationStatus::Pending => {
                self.status = ConsultationStatus::Confirmed { confirmed_at: at };
                Ok(())
            }
            ConsultationStatus::Confirmed { confirmed_at } => {
                Err(AlreadyConfirmed { confirmed_at })
            }
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.status, ConsultationStatus::Confirmed { .. })
    }
}

impl_record!(
    PracticeAreaModel,
    NewsItemModel,
    NewsletterModel,
    AttorneyModel,
    OfficeModel,
    EventModel,
    SubscriptionModel,
    ContactModel,
    ConsultationModel,
);
