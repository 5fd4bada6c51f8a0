// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_blog_store;
pub mod postgres_author_repository;
pub mod postgres_post_repository;

pub use in_memory_blog_store::InMemoryBlogStore;
pub use postgres_author_repository::PostgresAuthorRepository;
pub use postgres_post_repository::PostgresPostRepository;

use crate::domain::RepositoryError;

const UNIQUE_VIOLATION: &str = "23505";

/// Converts a sqlx error into a repository error
///
/// Unique violations become `Conflict` so callers can tell a duplicate
/// apart from a broken connection.
pub(crate) fn map_sqlx_error(context: &str, err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return RepositoryError::Conflict(db_err.message().to_string());
        }
    }
    RepositoryError::Storage(format!("{}: {}", context, err))
}
