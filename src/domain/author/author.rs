use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::UserName;
use crate::domain::errors::{required, DomainError};

/// Author record
///
/// Authors own posts by reference. The author's display name is derived
/// from the first and last name and is never stored.
///
/// # Invariants
/// - First and last name cannot be empty
/// - User name cannot be empty (uniqueness is enforced by the repository)
///
/// # Example
/// ```
/// use blog_api::domain::author::Author;
///
/// let author = Author::new("Ada", "Lovelace", "ada").expect("valid author");
///
/// assert_eq!(author.full_name(), "Ada Lovelace");
/// assert_eq!(author.user_name().as_str(), "ada");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    id: Uuid,
    first_name: String,
    last_name: String,
    user_name: UserName,
    created_at: DateTime<Utc>,
}

/// Allow-listed author fields that a PUT may change
#[derive(Debug, Clone, Default)]
pub struct AuthorUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

/// Wire representation of an author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: Uuid,
    pub name: String,
    pub user_name: String,
}

impl Author {
    /// Creates a new Author
    ///
    /// # Arguments
    /// * `first_name` - Given name (cannot be empty)
    /// * `last_name` - Family name (cannot be empty)
    /// * `user_name` - Handle, unique across authors (cannot be empty)
    ///
    /// # Returns
    /// * `Ok(Author)` - New author with a fresh id
    /// * `Err(DomainError)` - If any field is empty
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let first_name = required(first_name.into(), "firstName")?;
        let last_name = required(last_name.into(), "lastName")?;
        let user_name = UserName::new(user_name)?;

        Ok(Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            user_name,
            created_at: Utc::now().trunc_subsecs(6),
        })
    }

    /// Applies a partial update
    ///
    /// Every present field is validated before any of them is written, so a
    /// rejected update leaves the author untouched.
    pub fn apply_update(&mut self, update: AuthorUpdate) -> Result<(), DomainError> {
        let first_name = update
            .first_name
            .map(|v| required(v, "firstName"))
            .transpose()?;
        let last_name = update
            .last_name
            .map(|v| required(v, "lastName"))
            .transpose()?;
        let user_name = update.user_name.map(UserName::new).transpose()?;

        if let Some(first_name) = first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.last_name = last_name;
        }
        if let Some(user_name) = user_name {
            self.user_name = user_name;
        }

        Ok(())
    }

    /// Projects the author into its wire form: `{id, name, userName}`
    pub fn serialize(&self) -> AuthorView {
        AuthorView {
            id: self.id,
            name: self.full_name(),
            user_name: self.user_name.to_string(),
        }
    }

    /// Returns `first_name + " " + last_name`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs an Author from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: Uuid,
        first_name: String,
        last_name: String,
        user_name: UserName,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            user_name,
            created_at,
        }
    }
}
