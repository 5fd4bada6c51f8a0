use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::map_sqlx_error;
use crate::domain::author::{Author, UserName};
use crate::domain::repositories::AuthorRepository;
use crate::domain::{RepositoryError, RepositoryResult};

#[derive(Debug, FromRow)]
struct AuthorRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    user_name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuthorRow> for Author {
    type Error = RepositoryError;

    fn try_from(r: AuthorRow) -> Result<Self, Self::Error> {
        let user_name = UserName::new(r.user_name).map_err(|e| {
            RepositoryError::Storage(format!("Invalid user name from database: {}", e))
        })?;

        Ok(Author::from_persistence(
            r.id,
            r.first_name,
            r.last_name,
            user_name,
            r.created_at,
        ))
    }
}

/// PostgreSQL implementation of AuthorRepository
///
/// The unique index on `user_name` backs the uniqueness rule.
pub struct PostgresAuthorRepository {
    pool: PgPool,
}

impl PostgresAuthorRepository {
    /// Creates a new PostgresAuthorRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn create(&self, author: &Author) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO authors (id, first_name, last_name, user_name, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(author.id())
        .bind(author.first_name())
        .bind(author.last_name())
        .bind(author.user_name().as_str())
        .bind(author.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create author", e))?;

        Ok(())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, last_name, user_name, created_at
            FROM authors
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list authors", e))?;

        rows.into_iter().map(Author::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, last_name, user_name, created_at
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to find author by id", e))?;

        row.map(Author::try_from).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> RepositoryResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, last_name, user_name, created_at
            FROM authors
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to find author by user name", e))?;

        row.map(Author::try_from).transpose()
    }

    async fn update(&self, author: &Author) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE authors
            SET first_name = $2, last_name = $3, user_name = $4
            WHERE id = $1
            "#,
        )
        .bind(author.id())
        .bind(author.first_name())
        .bind(author.last_name())
        .bind(author.user_name().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update author", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete author", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
