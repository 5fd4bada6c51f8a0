use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::comment::Comment;
use crate::domain::author::Author;
use crate::domain::errors::{required, DomainError};

/// Resolved reference from a post to its author
///
/// Posts persist only the author id; repositories fill in the names when
/// loading so the serialized post always shows the author's current name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl AuthorRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&Author> for AuthorRef {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id(),
            first_name: author.first_name().to_string(),
            last_name: author.last_name().to_string(),
        }
    }
}

/// Post record
///
/// # Invariants
/// - Title cannot be empty
/// - Content cannot be empty
/// - Always references an author that existed at creation time
/// - Comments keep insertion order
///
/// # Example
/// ```
/// use blog_api::domain::author::Author;
/// use blog_api::domain::post::Post;
///
/// let author = Author::new("Ada", "Lovelace", "ada").expect("valid author");
/// let post = Post::new("Notes", "On the analytical engine", &author).expect("valid post");
///
/// assert_eq!(post.serialize().author, "Ada Lovelace");
/// assert!(post.comments().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    id: Uuid,
    title: String,
    content: String,
    author: AuthorRef,
    created: DateTime<Utc>,
    comments: Vec<Comment>,
}

/// Allow-listed post fields that a PUT may change
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Wire representation of a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub comments: Vec<Comment>,
}

impl Post {
    /// Creates a new Post
    ///
    /// # Arguments
    /// * `title` - Post title (cannot be empty)
    /// * `content` - Post body (cannot be empty)
    /// * `author` - The existing author the post belongs to
    ///
    /// # Returns
    /// * `Ok(Post)` - New post stamped with the current time (microsecond
    ///   precision, as stored) and no comments
    /// * `Err(DomainError)` - If title or content is empty
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: &Author,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let content = content.into();
        Self::check_fields(&title, &content)?;

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            content,
            author: AuthorRef::from(author),
            created: Utc::now().trunc_subsecs(6),
            comments: Vec::new(),
        })
    }

    /// Checks title and content without building a post
    ///
    /// Lets callers reject a bad request before resolving the author.
    pub fn check_fields(title: &str, content: &str) -> Result<(), DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::EmptyField("title"));
        }
        if content.trim().is_empty() {
            return Err(DomainError::EmptyField("content"));
        }
        Ok(())
    }

    /// Applies a partial update of title and/or content
    ///
    /// Both fields are validated before either is written.
    pub fn apply_update(&mut self, update: PostUpdate) -> Result<(), DomainError> {
        let title = update.title.map(|v| required(v, "title")).transpose()?;
        let content = update.content.map(|v| required(v, "content")).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }

        Ok(())
    }

    /// Projects the post into its wire form
    ///
    /// `author` is rendered as the author's full name; the author id is
    /// not exposed.
    pub fn serialize(&self) -> PostView {
        PostView {
            id: self.id,
            title: self.title.clone(),
            author: self.author.full_name(),
            content: self.content.clone(),
            created: self.created,
            comments: self.comments.clone(),
        }
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &AuthorRef {
        &self.author
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Reconstructs a Post from persistence layer data
    ///
    /// This method bypasses validation since the data was validated
    /// before it was stored.
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: Uuid,
        title: String,
        content: String,
        author: AuthorRef,
        created: DateTime<Utc>,
        comments: Vec<Comment>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            author,
            created,
            comments,
        }
    }
}
