use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::map_sqlx_error;
use crate::domain::post::{AuthorRef, Comment, Post};
use crate::domain::repositories::PostRepository;
use crate::domain::{RepositoryError, RepositoryResult};

const SELECT_POSTS: &str = r#"
    SELECT
        p.id, p.title, p.content, p.created, p.comments,
        a.id AS author_id,
        a.first_name AS author_first_name,
        a.last_name AS author_last_name
    FROM posts p
    JOIN authors a ON a.id = p.author_id
"#;

#[derive(Debug, FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    created: DateTime<Utc>,
    comments: Json<Vec<Comment>>,
    author_id: Uuid,
    author_first_name: String,
    author_last_name: String,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Post::from_persistence(
            r.id,
            r.title,
            r.content,
            AuthorRef {
                id: r.author_id,
                first_name: r.author_first_name,
                last_name: r.author_last_name,
            },
            r.created,
            r.comments.0,
        )
    }
}

/// PostgreSQL implementation of PostRepository
///
/// Comments are kept as a JSONB array on the post row. The author's name
/// is joined in on every read.
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    /// Creates a new PostgresPostRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: &Post) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, content, author_id, comments, created)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id())
        .bind(post.title())
        .bind(post.content())
        .bind(post.author().id)
        .bind(Json(post.comments().to_vec()))
        .bind(post.created())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create post", e))?;

        Ok(())
    }

    async fn find_all(&self, limit: Option<usize>) -> RepositoryResult<Vec<Post>> {
        // LIMIT NULL means no limit in PostgreSQL
        let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));
        let query = format!("{} ORDER BY p.created, p.id LIMIT $1", SELECT_POSTS);

        let rows = sqlx::query_as::<_, PostRow>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to list posts", e))?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Post>> {
        let query = format!("{} WHERE p.id = $1", SELECT_POSTS);

        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find post by id", e))?;

        Ok(row.map(Post::from))
    }

    async fn update(&self, post: &Post) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, content = $3
            WHERE id = $1
            "#,
        )
        .bind(post.id())
        .bind(post.title())
        .bind(post.content())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update post", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn append_comment(&self, post_id: Uuid, comment: &Comment) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET comments = comments || $2
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .bind(Json(vec![comment.clone()]))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to append comment", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete post", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_by_author(&self, author_id: Uuid) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE author_id = $1")
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete posts by author", e))?;

        Ok(result.rows_affected())
    }
}
