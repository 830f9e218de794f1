use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

type Result<T> = std::result::Result<T, sqlx::Error>;

/// A user profile. The id is the auth service's user id.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub preferences: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Write preferences, creating the profile row on first touch
    pub async fn upsert_preferences(
        id: Uuid,
        preferences: &serde_json::Value,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO profiles (id, preferences)
             VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET
                 preferences = EXCLUDED.preferences,
                 updated_at = NOW()
             RETURNING *",
        )
        .bind(id)
        .bind(preferences)
        .fetch_one(pool)
        .await
    }
}
