use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

type Result<T> = std::result::Result<T, sqlx::Error>;

/// Most rows one vault listing returns
const LIST_CAP: i64 = 50;

/// One saved generation in a user's vault.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Generation {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Which studio feature produced it ("deconstructor", "architect")
    pub tool_kind: String,
    pub input_data: serde_json::Value,
    pub output_text: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl Generation {
    pub async fn insert(
        user_id: Uuid,
        tool_kind: &str,
        input_data: &serde_json::Value,
        output_text: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO generations (user_id, tool_kind, input_data, output_text)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(user_id)
        .bind(tool_kind)
        .bind(input_data)
        .bind(output_text)
        .fetch_one(pool)
        .await
    }

    /// The owner's vault, newest first, capped
    pub async fn find_by_owner(user_id: Uuid, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM generations
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(LIST_CAP)
        .fetch_all(pool)
        .await
    }

    /// Flip a generation public. Scoped to the owner: sharing someone
    /// else's row (or a missing id) matches nothing.
    pub async fn share(id: Uuid, user_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE generations
             SET is_public = TRUE
             WHERE id = $1 AND user_id = $2
             RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Rows removed; owner-scoped like `share`
    pub async fn delete_by_owner(id: Uuid, user_id: Uuid, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM generations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Unauthenticated fetch path: only explicitly shared rows resolve
    pub async fn find_public_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM generations WHERE id = $1 AND is_public = TRUE",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
