//! Application state - shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::repositories::{AuthorRepository, PostRepository};
use crate::infrastructure::repositories::{
    InMemoryBlogStore, PostgresAuthorRepository, PostgresPostRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    pub posts_page_limit: Option<usize>,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>, authors: Arc<dyn AuthorRepository>) -> Self {
        Self {
            posts,
            authors,
            posts_page_limit: None,
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PostgresPostRepository::new(pool.clone())),
            Arc::new(PostgresAuthorRepository::new(pool)),
        )
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryBlogStore::new());
        Self::new(store.clone(), store)
    }

    /// Caps the number of posts returned by `GET /posts`
    pub fn with_posts_page_limit(mut self, limit: Option<usize>) -> Self {
        self.posts_page_limit = limit;
        self
    }
}
