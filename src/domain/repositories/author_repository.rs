use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::author::{Author, UserName};
use crate::domain::errors::RepositoryResult;

/// Repository trait for authors
///
/// User names are unique. Implementations must reject a write that would
/// duplicate one with `RepositoryError::Conflict`, even when the caller
/// already checked with `find_by_user_name`.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Insert a new author
    async fn create(&self, author: &Author) -> RepositoryResult<()>;

    /// List authors in creation order
    async fn find_all(&self) -> RepositoryResult<Vec<Author>>;

    /// Find an author by ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Author>>;

    /// Find an author by user name
    async fn find_by_user_name(&self, user_name: &UserName) -> RepositoryResult<Option<Author>>;

    /// Persist the mutable fields of an existing author
    async fn update(&self, author: &Author) -> RepositoryResult<()>;

    /// Delete an author by ID
    ///
    /// Does not touch the author's posts; callers remove those first.
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}
