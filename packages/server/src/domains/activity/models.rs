use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

type Result<T> = std::result::Result<T, sqlx::Error>;

/// Activity types the history endpoint accepts.
pub const VALID_ACTIVITY_TYPES: &[&str] = &[
    "tool_view",
    "vault_save",
    "vault_share",
    "ai_interaction",
    "runway_view",
];

/// One telemetry row in a user's activity history.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_type: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    pub async fn insert(
        user_id: Uuid,
        activity_type: &str,
        metadata: &serde_json::Value,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO activity_history (user_id, activity_type, metadata)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(user_id)
        .bind(activity_type)
        .bind(metadata)
        .fetch_one(pool)
        .await
    }

    /// One page of history plus the unpaged total, newest first
    pub async fn find_page(
        user_id: Uuid,
        activity_type: Option<&str>,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<(Vec<Self>, i64)> {
        match activity_type {
            Some(kind) => {
                let entries = sqlx::query_as::<_, Self>(
                    "SELECT * FROM activity_history
                     WHERE user_id = $1 AND activity_type = $2
                     ORDER BY created_at DESC
                     LIMIT $3 OFFSET $4",
                )
                .bind(user_id)
                .bind(kind)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?;

                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM activity_history
                     WHERE user_id = $1 AND activity_type = $2",
                )
                .bind(user_id)
                .bind(kind)
                .fetch_one(pool)
                .await?;

                Ok((entries, total))
            }
            None => {
                let entries = sqlx::query_as::<_, Self>(
                    "SELECT * FROM activity_history
                     WHERE user_id = $1
                     ORDER BY created_at DESC
                     LIMIT $2 OFFSET $3",
                )
                .bind(user_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?;

                let total = Self::count_for_user(user_id, pool).await?;

                Ok((entries, total))
            }
        }
    }

    pub async fn count_for_user(user_id: Uuid, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM activity_history WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Clear history, optionally only rows older than `before`
    pub async fn delete_for_user(
        user_id: Uuid,
        before: Option<DateTime<Utc>>,
        pool: &PgPool,
    ) -> Result<u64> {
        let result = match before {
            Some(cutoff) => {
                sqlx::query("DELETE FROM activity_history WHERE user_id = $1 AND created_at < $2")
                    .bind(user_id)
                    .bind(cutoff)
                    .execute(pool)
                    .await?
            }
            None => {
                sqlx::query("DELETE FROM activity_history WHERE user_id = $1")
                    .bind(user_id)
                    .execute(pool)
                    .await?
            }
        };

        Ok(result.rows_affected())
    }

    /// Best-effort telemetry write. Failures are logged and swallowed;
    /// losing a telemetry row must never fail the operation it records.
    pub async fn log(
        user_id: Uuid,
        activity_type: &str,
        metadata: serde_json::Value,
        pool: &PgPool,
    ) {
        if let Err(e) = Self::insert(user_id, activity_type, &metadata, pool).await {
            warn!(error = %e, activity_type, "activity log write failed");
        }
    }
}
