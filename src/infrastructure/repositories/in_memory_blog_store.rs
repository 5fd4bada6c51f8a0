use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::author::{Author, UserName};
use crate::domain::post::{AuthorRef, Comment, Post};
use crate::domain::repositories::{AuthorRepository, PostRepository};
use crate::domain::{RepositoryError, RepositoryResult};

/// Post as stored: only the author id is kept, names are joined on read
#[derive(Debug, Clone)]
struct StoredPost {
    id: Uuid,
    title: String,
    content: String,
    author_id: Uuid,
    created: DateTime<Utc>,
    comments: Vec<Comment>,
}

#[derive(Debug, Default)]
struct Collections {
    authors: Vec<Author>,
    posts: Vec<StoredPost>,
}

impl Collections {
    fn author(&self, id: Uuid) -> Option<&Author> {
        self.authors.iter().find(|a| a.id() == id)
    }

    fn user_name_taken(&self, user_name: &UserName, except: Option<Uuid>) -> bool {
        self.authors
            .iter()
            .any(|a| a.user_name() == user_name && Some(a.id()) != except)
    }

    /// Joins a stored post with its author; posts whose author is gone are skipped
    fn resolve(&self, stored: &StoredPost) -> Option<Post> {
        let author = self.author(stored.author_id)?;
        Some(Post::from_persistence(
            stored.id,
            stored.title.clone(),
            stored.content.clone(),
            AuthorRef::from(author),
            stored.created,
            stored.comments.clone(),
        ))
    }
}

/// Process-local store implementing both repository traits
///
/// Used when no database is configured and by the HTTP tests. Both
/// collections sit behind one lock so the author join and the user name
/// check see a consistent view. Vectors keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBlogStore {
    inner: RwLock<Collections>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn create(&self, post: &Post) -> RepositoryResult<()> {
        let mut inner = self.inner.write().await;
        if inner.author(post.author().id).is_none() {
            return Err(RepositoryError::Storage(format!(
                "Author {} does not exist",
                post.author().id
            )));
        }
        if inner.posts.iter().any(|p| p.id == post.id()) {
            return Err(RepositoryError::Conflict(format!(
                "Post {} already exists",
                post.id()
            )));
        }

        inner.posts.push(StoredPost {
            id: post.id(),
            title: post.title().to_string(),
            content: post.content().to_string(),
            author_id: post.author().id,
            created: post.created(),
            comments: post.comments().to_vec(),
        });
        Ok(())
    }

    async fn find_all(&self, limit: Option<usize>) -> RepositoryResult<Vec<Post>> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .iter()
            .filter_map(|p| inner.resolve(p))
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Post>> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| inner.resolve(p)))
    }

    async fn update(&self, post: &Post) -> RepositoryResult<()> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .posts
            .iter_mut()
            .find(|p| p.id == post.id())
            .ok_or(RepositoryError::NotFound)?;

        stored.title = post.title().to_string();
        stored.content = post.content().to_string();
        Ok(())
    }

    async fn append_comment(&self, post_id: Uuid, comment: &Comment) -> RepositoryResult<()> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(RepositoryError::NotFound)?;

        stored.comments.push(comment.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.posts.len();
        inner.posts.retain(|p| p.id != id);
        if inner.posts.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_by_author(&self, author_id: Uuid) -> RepositoryResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.posts.len();
        inner.posts.retain(|p| p.author_id != author_id);
        Ok((before - inner.posts.len()) as u64)
    }
}

#[async_trait]
impl AuthorRepository for InMemoryBlogStore {
    async fn create(&self, author: &Author) -> RepositoryResult<()> {
        let mut inner = self.inner.write().await;
        if inner.user_name_taken(author.user_name(), None) {
            return Err(RepositoryError::Conflict(format!(
                "User name {} already exists",
                author.user_name()
            )));
        }
        inner.authors.push(author.clone());
        Ok(())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Author>> {
        Ok(self.inner.read().await.authors.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Author>> {
        Ok(self.inner.read().await.author(id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> RepositoryResult<Option<Author>> {
        let inner = self.inner.read().await;
        Ok(inner
            .authors
            .iter()
            .find(|a| a.user_name() == user_name)
            .cloned())
    }

    async fn update(&self, author: &Author) -> RepositoryResult<()> {
        let mut inner = self.inner.write().await;
        if inner.user_name_taken(author.user_name(), Some(author.id())) {
            return Err(RepositoryError::Conflict(format!(
                "User name {} already exists",
                author.user_name()
            )));
        }

        let stored = inner
            .authors
            .iter_mut()
            .find(|a| a.id() == author.id())
            .ok_or(RepositoryError::NotFound)?;
        *stored = author.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.authors.len();
        inner.authors.retain(|a| a.id() != id);
        if inner.authors.len() == before {
            return Err(RepositoryError::NotFound);
        }
        // Posts cannot outlive their author
        inner.posts.retain(|p| p.author_id != id);
        Ok(())
    }
}
