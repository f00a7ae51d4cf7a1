// Data access for short links
use async_trait::async_trait;
use log::debug;
use sqlx::PgPool;

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::ShortLink;

type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepositoryTrait {
    /// Atomically inserts a new short link under `code`.
    ///
    /// The unique constraint on `short_code` is the reservation primitive:
    /// the insert either claims the code and commits the full record, or
    /// fails as a whole. There is no separate existence pre-check anywhere.
    ///
    /// ### Errors
    /// * `RepositoryError::Conflict` - If the code is already taken
    /// * `RepositoryError::Database` - If any other database error occurs
    async fn insert_with_code(&self, original_url: &str, code: &str) -> Result<ShortLink>;

    /// Returns all short links, newest first.
    ///
    /// ### Errors
    /// * `RepositoryError::Database` - If a database error occurs
    async fn find_all(&self) -> Result<Vec<ShortLink>>;

    /// Looks up a short link by code and increments its click counter in
    /// the same statement, so concurrent resolves never lose updates.
    ///
    /// ### Returns
    /// * `Result<Option<ShortLink>>` - The link with the incremented count,
    ///   or `None` if the code was never issued (nothing is written then)
    ///
    /// ### Errors
    /// * `RepositoryError::Database` - If a database error occurs
    async fn resolve_and_count(&self, code: &str) -> Result<Option<ShortLink>>;
}

// Implementation using actual database
pub struct ShortLinkRepository {
    pool: PgPool,
}

impl ShortLinkRepository {
    pub fn new(db: Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl ShortLinkRepositoryTrait for ShortLinkRepository {
    async fn insert_with_code(&self, original_url: &str, code: &str) -> Result<ShortLink> {
        debug!("Inserting short link with code '{}'", code);

        // Single statement, so commit is all-or-nothing; a duplicate code
        // surfaces as a 23505 unique violation mapped to Conflict
        let record = sqlx::query_as::<_, ShortLink>(
            r#"
            INSERT INTO short_links (original_url, short_code)
            VALUES ($1, $2)
            RETURNING id, original_url, short_code, clicks, created_at
            "#,
        )
        .bind(original_url)
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<ShortLink>> {
        let records = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, original_url, short_code, clicks, created_at
            FROM short_links
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(records)
    }

    async fn resolve_and_count(&self, code: &str) -> Result<Option<ShortLink>> {
        // Atomic increment; a plain read-modify-write would lose updates
        // under concurrent resolves of the same code
        let record = sqlx::query_as::<_, ShortLink>(
            r#"
            UPDATE short_links
            SET clicks = clicks + 1
            WHERE short_code = $1
            RETURNING id, original_url, short_code, clicks, created_at
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(record)
    }
}
