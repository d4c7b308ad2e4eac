//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use bookkeeping_types::dto::{
    CreateUserRequest, UpdateCustomExchangeRateRequest, UserCustomExchangeRateInfoResponse,
};
use bookkeeping_types::{
    CurrencyCode, LatestExchangeRate, LatestExchangeRateResponse, UserBasicInfo,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserBasicInfo),
        (status = 400, description = "Invalid username or currency"),
        (status = 409, description = "Username already exists")
    )
)]
async fn create_user() {}

/// Get a user
#[utoipa::path(
    get,
    path = "/api/users/{uid}",
    tag = "users",
    params(("uid" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserBasicInfo),
        (status = 404, description = "User not found")
    )
)]
async fn get_user() {}

/// Latest exchange rates from the configured data source
#[utoipa::path(
    get,
    path = "/api/users/{uid}/exchange_rates/latest",
    tag = "exchange_rates",
    params(("uid" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Latest exchange rates", body = LatestExchangeRateResponse),
        (status = 404, description = "User not found (user custom data source)"),
        (status = 500, description = "Operation failed"),
        (status = 502, description = "Failed to request third party api")
    )
)]
async fn latest_exchange_rates() {}

/// List custom exchange rates
#[utoipa::path(
    get,
    path = "/api/users/{uid}/exchange_rates/custom",
    tag = "exchange_rates",
    params(("uid" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Stored custom exchange rates", body = Vec<UserCustomExchangeRateInfoResponse>),
        (status = 404, description = "User not found")
    )
)]
async fn list_custom_exchange_rates() {}

/// Add or replace a custom exchange rate
#[utoipa::path(
    post,
    path = "/api/users/{uid}/exchange_rates/custom",
    tag = "exchange_rates",
    params(("uid" = i64, Path, description = "User ID")),
    request_body = UpdateCustomExchangeRateRequest,
    responses(
        (status = 200, description = "Custom exchange rate saved", body = UserCustomExchangeRateInfoResponse),
        (status = 400, description = "Invalid currency or rate"),
        (status = 404, description = "User not found")
    )
)]
async fn update_custom_exchange_rate() {}

/// Delete a custom exchange rate
#[utoipa::path(
    delete,
    path = "/api/users/{uid}/exchange_rates/custom/{currency}",
    tag = "exchange_rates",
    params(
        ("uid" = i64, Path, description = "User ID"),
        ("currency" = String, Path, description = "Three-letter currency code")
    ),
    responses(
        (status = 204, description = "Custom exchange rate deleted"),
        (status = 404, description = "User or custom exchange rate not found")
    )
)]
async fn delete_custom_exchange_rate() {}

/// OpenAPI documentation for the Bookkeeping API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookkeeping API",
        version = "1.0.0",
        description = "Users, custom exchange rates and the latest exchange rates from the configured data source.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_user,
        get_user,
        latest_exchange_rates,
        list_custom_exchange_rates,
        update_custom_exchange_rate,
        delete_custom_exchange_rate,
    ),
    components(
        schemas(
            CreateUserRequest,
            UserBasicInfo,
            UpdateCustomExchangeRateRequest,
            UserCustomExchangeRateInfoResponse,
            LatestExchangeRateResponse,
            LatestExchangeRate,
            CurrencyCode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management"),
        (name = "exchange_rates", description = "Latest and custom exchange rates"),
    )
)]
pub struct ApiDoc;
