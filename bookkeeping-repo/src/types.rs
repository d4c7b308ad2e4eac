//! Database row structs and their conversion into domain types.

use sqlx::FromRow;

use bookkeeping_types::{CurrencyCode, RepoError, User, UserCustomExchangeRate};

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// User row from database.
#[derive(FromRow)]
pub struct DbUser {
    pub uid: i64,
    pub username: String,
    pub default_currency: String,
    pub created_unix_time: i64,
    pub updated_unix_time: i64,
}

/// Custom exchange rate row from database.
#[derive(FromRow)]
pub struct DbUserCustomExchangeRate {
    pub uid: i64,
    pub currency: String,
    pub rate: i64,
    pub created_unix_time: i64,
    pub updated_unix_time: i64,
    pub deleted: bool,
    pub deleted_unix_time: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn parse_currency(s: &str) -> Result<CurrencyCode, RepoError> {
    CurrencyCode::parse_code(s)
        .ok_or_else(|| RepoError::Database(format!("Unknown currency: {}", s)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion
// ─────────────────────────────────────────────────────────────────────────────

impl DbUser {
    /// Convert database row to domain User.
    pub fn into_domain(self) -> Result<User, RepoError> {
        Ok(User {
            uid: self.uid,
            username: self.username,
            default_currency: parse_currency(&self.default_currency)?,
            created_unix_time: self.created_unix_time,
            updated_unix_time: self.updated_unix_time,
        })
    }
}

impl DbUserCustomExchangeRate {
    /// Convert database row to domain UserCustomExchangeRate.
    pub fn into_domain(self) -> Result<UserCustomExchangeRate, RepoError> {
        Ok(UserCustomExchangeRate {
            uid: self.uid,
            currency: parse_currency(&self.currency)?,
            rate: self.rate,
            created_unix_time: self.created_unix_time,
            updated_unix_time: self.updated_unix_time,
            deleted: self.deleted,
            deleted_unix_time: self.deleted_unix_time,
        })
    }
}
