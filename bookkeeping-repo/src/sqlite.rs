//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use bookkeeping_types::{
    CurrencyCode, RepoError, User, UserCustomExchangeRate, UserCustomExchangeRateRepository,
    UserRepository,
};

use crate::types::{DbUser, DbUserCustomExchangeRate};

const MIGRATIONS: &[(&str, &str)] = &[
    (
        "0001_create_users",
        include_str!("../migrations/0001_create_users.sql"),
    ),
    (
        "0002_create_user_custom_exchange_rates",
        include_str!("../migrations/0002_create_user_custom_exchange_rates.sql"),
    ),
];

const CUSTOM_RATE_COLUMNS: &str =
    "uid, currency, rate, created_unix_time, updated_unix_time, deleted, deleted_unix_time";

fn db_error(e: sqlx::Error) -> RepoError {
    RepoError::Database(e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        for (name, ddl) in MIGRATIONS {
            sqlx::query(ddl).execute(&pool).await?;
            tracing::debug!(migration = name, "Applied migration");
        }

        Ok(Self { pool })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl UserRepository for SqliteRepo {
    async fn create_user(
        &self,
        username: &str,
        default_currency: CurrencyCode,
        now: i64,
    ) -> Result<User, RepoError> {
        let row: DbUser = sqlx::query_as(
            r#"INSERT INTO users (username, default_currency, created_unix_time, updated_unix_time)
               VALUES (?, ?, ?, ?)
               RETURNING uid, username, default_currency, created_unix_time, updated_unix_time"#,
        )
        .bind(username)
        .bind(default_currency.code())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepoError::Conflict(format!("Username already exists: {}", username))
            }
            e => db_error(e),
        })?;

        row.into_domain()
    }

    async fn get_user(&self, uid: i64) -> Result<Option<User>, RepoError> {
        let row: Option<DbUser> = sqlx::query_as(
            r#"SELECT uid, username, default_currency, created_unix_time, updated_unix_time
               FROM users WHERE uid = ?"#,
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(DbUser::into_domain).transpose()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Custom exchange rates
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl UserCustomExchangeRateRepository for SqliteRepo {
    async fn get_all_custom_exchange_rates(
        &self,
        uid: i64,
    ) -> Result<Vec<UserCustomExchangeRate>, RepoError> {
        let rows: Vec<DbUserCustomExchangeRate> = sqlx::query_as(&format!(
            "SELECT {CUSTOM_RATE_COLUMNS} FROM user_custom_exchange_rates
             WHERE uid = ? AND deleted = 0 ORDER BY currency"
        ))
        .bind(uid)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter()
            .map(DbUserCustomExchangeRate::into_domain)
            .collect()
    }

    async fn upsert_custom_exchange_rate(
        &self,
        uid: i64,
        currency: CurrencyCode,
        rate: i64,
        now: i64,
    ) -> Result<UserCustomExchangeRate, RepoError> {
        let row: DbUserCustomExchangeRate = sqlx::query_as(&format!(
            "INSERT INTO user_custom_exchange_rates ({CUSTOM_RATE_COLUMNS})
             VALUES (?, ?, ?, ?, ?, 0, 0)
             ON CONFLICT (uid, currency) DO UPDATE SET
                 rate = excluded.rate,
                 created_unix_time = CASE WHEN user_custom_exchange_rates.deleted = 1
                     THEN excluded.created_unix_time
                     ELSE user_custom_exchange_rates.created_unix_time END,
                 updated_unix_time = excluded.updated_unix_time,
                 deleted = 0,
                 deleted_unix_time = 0
             RETURNING {CUSTOM_RATE_COLUMNS}"
        ))
        .bind(uid)
        .bind(currency.code())
        .bind(rate)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        row.into_domain()
    }

    async fn delete_custom_exchange_rate(
        &self,
        uid: i64,
        currency: CurrencyCode,
        now: i64,
    ) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"UPDATE user_custom_exchange_rates SET deleted = 1, deleted_unix_time = ?
               WHERE uid = ? AND currency = ? AND deleted = 0"#,
        )
        .bind(now)
        .bind(uid)
        .bind(currency.code())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
