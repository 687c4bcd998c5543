//! HTTP handlers. Each one delegates to a service and maps its error.

use axum::Json;
use axum::extract::Query;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::model::AttorneyModel;
use crate::model::ContactModel;
use crate::model::EventModel;
use crate::model::NewsItemModel;
use crate::model::NewsletterModel;
use crate::model::OfficeModel;
use crate::model::PracticeAreaModel;
use crate::model::SubscriptionModel;
use crate::server::error::ApiError;
use crate::server::state::AppState;
use crate::service::consultation_service::ConfirmedConsultation;
use crate::service::consultation_service::ConsultationReceipt;
use crate::service::contact_service::ContactForm;
use crate::service::subscription_service::SubscriptionForm;

pub const CONFIRMED_MESSAGE: &str = "Consultation confirmed successfully";

type ApiResult<T> = Result<T, ApiError>;

// CATALOG

pub async fn practice_areas_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PracticeAreaModel>>> {
    Ok(Json(state.services.catalog.practice_areas().await?))
}

pub async fn news_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<NewsItemModel>>> {
    Ok(Json(state.services.catalog.news().await?))
}

pub async fn newsletters_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<NewsletterModel>>> {
    Ok(Json(state.services.catalog.newsletters().await?))
}

pub async fn attorneys_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AttorneyModel>>> {
    Ok(Json(state.services.catalog.attorneys().await?))
}

pub async fn offices_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<OfficeModel>>> {
    Ok(Json(state.services.catalog.offices().await?))
}

pub async fn events_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<EventModel>>> {
    Ok(Json(state.services.catalog.events().await?))
}

// INTAKE

pub async fn subscribe_handler(
    State(state): State<AppState>,
    payload: Result<Json<SubscriptionForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SubscriptionModel>)> {
    let Json(form) = payload?;
    let subscription = state.services.subscription.subscribe(&form).await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

pub async fn contact_handler(
    State(state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ContactModel>)> {
    let Json(form) = payload?;
    let contact = state.services.contact.submit(&form).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

// CONSULTATION

pub async fn consultation_handler(
    State(state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ConsultationReceipt>)> {
    let Json(form) = payload?;
    let receipt = state.services.consultation.request(&form).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[derive(Deserialize, Default)]
pub struct ConfirmQuery {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Serialize)]
pub struct ConfirmResponse {
    success: bool,
    message: &'static str,
    consultation: ConfirmedConsultation,
}

pub async fn confirm_handler(
    State(state): State<AppState>,
    query: Result<Query<ConfirmQuery>, QueryRejection>,
) -> ApiResult<Json<ConfirmResponse>> {
    let Query(query) = query?;
    let token = query.token.unwrap_or_default();

    let consultation = state
        .services
        .consultation
        .confirm(&token)
        .await
        .map_err(ApiError::from_confirmation)?;

    Ok(Json(ConfirmResponse {
        success: true,
        message: CONFIRMED_MESSAGE,
        consultation,
    }))
}
