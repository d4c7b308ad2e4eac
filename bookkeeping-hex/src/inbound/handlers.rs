//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use bookkeeping_types::{
    AppError, BookkeepingRepository, CreateUserRequest, UpdateCustomExchangeRateRequest,
};

use crate::ExchangeRateService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: BookkeepingRepository> {
    pub service: ExchangeRateService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UpstreamFailed => StatusCode::BAD_GATEWAY,
            AppError::OperationFailed | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match self.0 {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Internal(msg) => msg,
            e => e.to_string(),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_uid(uid: &str) -> Result<i64, AppError> {
    uid.parse()
        .map_err(|_| AppError::BadRequest("Invalid user ID".into()))
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

/// Create a user.
#[tracing::instrument(skip(state), fields(username = %req.username))]
pub async fn create_user<R: BookkeepingRepository>(
    State(state): State<Arc<AppState<R>>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.service.create_user(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get user by uid.
#[tracing::instrument(skip(state))]
pub async fn get_user<R: BookkeepingRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.service.get_user(parse_uid(&uid)?).await?;
    Ok(Json(user))
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange rates
// ─────────────────────────────────────────────────────────────────────────────

/// Latest exchange rates from the configured provider.
#[tracing::instrument(skip(state))]
pub async fn latest_exchange_rates<R: BookkeepingRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rates = state
        .service
        .latest_exchange_rates(parse_uid(&uid)?)
        .await?;
    Ok(Json(rates))
}

/// List a user's custom exchange rates.
#[tracing::instrument(skip(state))]
pub async fn list_custom_exchange_rates<R: BookkeepingRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rates = state
        .service
        .list_custom_exchange_rates(parse_uid(&uid)?)
        .await?;
    Ok(Json(rates))
}

/// Add or replace a custom exchange rate.
#[tracing::instrument(skip(state), fields(currency = %req.currency))]
pub async fn update_custom_exchange_rate<R: BookkeepingRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(uid): Path<String>,
    Json(req): Json<UpdateCustomExchangeRateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let rate = state
        .service
        .update_custom_exchange_rate(parse_uid(&uid)?, req)
        .await?;
    Ok(Json(rate))
}

/// Delete a custom exchange rate.
#[tracing::instrument(skip(state))]
pub async fn delete_custom_exchange_rate<R: BookkeepingRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path((uid, currency)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .service
        .delete_custom_exchange_rate(parse_uid(&uid)?, &currency)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
