//! User domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use exchange_rates::CurrencyCode;

use crate::error::DomainError;

const MAX_USERNAME_LENGTH: usize = 32;

/// A registered user. `uid` is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: i64,
    pub username: String,
    /// Base currency of the user's custom exchange rates and reports.
    pub default_currency: CurrencyCode,
    pub created_unix_time: i64,
    pub updated_unix_time: i64,
}

impl User {
    /// Validates and normalizes a username.
    ///
    /// # Validation
    /// - Cannot be empty after trimming
    /// - At most 32 characters
    /// - Letters, digits, `_`, `-` and `.` only
    pub fn validate_username(username: &str) -> Result<String, DomainError> {
        let username = username.trim();

        if username.is_empty() {
            return Err(DomainError::ValidationError(
                "Username cannot be empty".into(),
            ));
        }

        if username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(DomainError::ValidationError(format!(
                "Username cannot be longer than {} characters",
                MAX_USERNAME_LENGTH
            )));
        }

        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(DomainError::ValidationError(
                "Username contains invalid characters".into(),
            ));
        }

        Ok(username.to_string())
    }

    pub fn to_basic_info(&self) -> UserBasicInfo {
        UserBasicInfo {
            uid: self.uid,
            username: self.username.clone(),
            default_currency: self.default_currency,
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBasicInfo {
    #[schema(example = 1)]
    pub uid: i64,
    #[schema(example = "alice")]
    pub username: String,
    pub default_currency: CurrencyCode,
}
