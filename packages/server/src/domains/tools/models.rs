use chrono::{DateTime, Utc};
use enrichment::{PlatformLink, PricingTier, ToolDraft};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

type Result<T> = std::result::Result<T, sqlx::Error>;

/// One directory entry for an external AI product or service.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Tool {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub pricing: PricingTier,
    pub platforms: Json<Vec<PlatformLink>>,
    pub image: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Tool {
    /// Full directory, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM tools ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM tools WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Idempotent write keyed by id: an unseen id inserts, a known id
    /// replaces every field except `created_at`.
    ///
    /// Takes an executor so curation can run its writes inside one
    /// transaction.
    pub async fn upsert_draft<'e, E>(draft: &ToolDraft, executor: E) -> Result<Self>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_as::<_, Self>(
            "INSERT INTO tools (id, name, description, tags, pricing, platforms, image, featured)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (id) DO UPDATE SET
                 name = EXCLUDED.name,
                 description = EXCLUDED.description,
                 tags = EXCLUDED.tags,
                 pricing = EXCLUDED.pricing,
                 platforms = EXCLUDED.platforms,
                 image = EXCLUDED.image,
                 featured = EXCLUDED.featured
             RETURNING *",
        )
        .bind(draft.id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(&draft.tags)
        .bind(draft.pricing)
        .bind(Json(&draft.platforms))
        .bind(&draft.image)
        .bind(draft.featured)
        .fetch_one(executor)
        .await
    }

    /// Rows removed; 0 when the id was never there
    pub async fn delete_by_id(id: Uuid, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tools WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Lowercased names of every stored tool, the curation dedup snapshot
    pub async fn existing_names(pool: &PgPool) -> Result<HashSet<String>> {
        let names: Vec<String> = sqlx::query_scalar("SELECT LOWER(name) FROM tools")
            .fetch_all(pool)
            .await?;

        Ok(names.into_iter().collect())
    }

    /// Draft view of a stored row, used when re-enriching in place
    pub fn to_draft(&self) -> ToolDraft {
        ToolDraft {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            pricing: self.pricing,
            platforms: self.platforms.0.clone(),
            image: self.image.clone(),
            featured: self.featured,
        }
    }

    /// Primary web URL, when one exists
    pub fn primary_url(&self) -> Option<&str> {
        self.platforms
            .0
            .iter()
            .find(|p| p.kind == enrichment::PlatformKind::Web)
            .map(|p| p.url.as_str())
    }
}
