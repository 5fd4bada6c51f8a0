use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryResult;
use crate::domain::post::{Comment, Post};

/// Repository trait for posts
///
/// Posts persist a reference to their author; implementations resolve the
/// author's current name when loading.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post
    async fn create(&self, post: &Post) -> RepositoryResult<()>;

    /// List posts in creation order, capped at `limit` when given
    async fn find_all(&self, limit: Option<usize>) -> RepositoryResult<Vec<Post>>;

    /// Find a post by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Post>>;

    /// Persist title and content of an existing post
    ///
    /// Returns `RepositoryError::NotFound` if the post does not exist.
    async fn update(&self, post: &Post) -> RepositoryResult<()>;

    /// Append a comment to the end of a post's thread
    ///
    /// Returns `RepositoryError::NotFound` if the post does not exist.
    async fn append_comment(&self, post_id: Uuid, comment: &Comment) -> RepositoryResult<()>;

    /// Delete a post by ID
    ///
    /// Returns `RepositoryError::NotFound` if the post does not exist.
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    /// Delete every post written by an author, returning how many were removed
    async fn delete_by_author(&self, author_id: Uuid) -> RepositoryResult<u64>;
}
