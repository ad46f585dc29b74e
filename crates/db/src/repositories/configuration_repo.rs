//! Repository for the `configurations` table.

use sqlx::PgExecutor;
use crm_core::configuration::search_pattern;
use crm_core::types::DbId;

use crate::models::configuration::{
    Configuration, ConfigurationFilter, CreateConfiguration, UpdateConfiguration,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, label, description, category, is_hidden, is_disabled, created_at, updated_at";

/// Provides CRUD operations for configuration entries.
pub struct ConfigurationRepo;

impl ConfigurationRepo {
    /// Insert a new entry. Defaults must already be applied to `label` and
    /// `description`; the flags default to `false`.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        category: &str,
        label: &str,
        description: &str,
        input: &CreateConfiguration,
    ) -> Result<Configuration, sqlx::Error> {
        let query = format!(
            "INSERT INTO configurations (category, label, description, is_hidden, is_disabled)
             VALUES ($1, $2, $3, COALESCE($4, false), COALESCE($5, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Configuration>(&query)
            .bind(category)
            .bind(label)
            .bind(description)
            .bind(input.is_hidden)
            .bind(input.is_disabled)
            .fetch_one(executor)
            .await
    }

    /// Find an entry by ID, regardless of its hidden/disabled flags.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Configuration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM configurations WHERE id = $1");
        sqlx::query_as::<_, Configuration>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List entries matching `filter`, oldest first.
    ///
    /// `query` matches label or description case-insensitively.
    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
        filter: &ConfigurationFilter,
    ) -> Result<Vec<Configuration>, sqlx::Error> {
        let pattern = filter
            .query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .map(search_pattern);
        let query = format!(
            "SELECT {COLUMNS} FROM configurations
             WHERE ($1 OR NOT is_hidden)
               AND ($2 OR NOT is_disabled)
               AND ($3::TEXT IS NULL OR category = $3)
               AND ($4::TEXT IS NULL OR label ILIKE $4 OR description ILIKE $4)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Configuration>(&query)
            .bind(filter.include_hidden)
            .bind(filter.include_disabled)
            .bind(&filter.category)
            .bind(pattern)
            .fetch_all(executor)
            .await
    }

    /// Every entry, including hidden and disabled ones. Used to build label
    /// lookups for import and export.
    pub async fn list_all<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<Configuration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM configurations ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, Configuration>(&query)
            .fetch_all(executor)
            .await
    }

    /// Update an entry. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateConfiguration,
    ) -> Result<Option<Configuration>, sqlx::Error> {
        let query = format!(
            "UPDATE configurations SET
                label = COALESCE($2, label),
                description = COALESCE($3, description),
                is_hidden = COALESCE($4, is_hidden),
                is_disabled = COALESCE($5, is_disabled)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Configuration>(&query)
            .bind(id)
            .bind(&input.label)
            .bind(&input.description)
            .bind(input.is_hidden)
            .bind(input.is_disabled)
            .fetch_optional(executor)
            .await
    }

    /// Delete an entry by ID. Returns `true` if a row was removed.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM configurations WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
