use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::DomainError;

/// User name value object
///
/// # Invariants
/// - Not empty after trimming surrounding whitespace
/// - Stored trimmed, so `" ada "` and `"ada"` collide
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Creates a new UserName value object
    ///
    /// # Returns
    /// * `Ok(UserName)` - If the name is non-empty
    /// * `Err(DomainError)` - If the name is empty or whitespace-only
    ///
    /// # Example
    /// ```
    /// use blog_api::domain::author::UserName;
    ///
    /// let name = UserName::new("  ada  ").expect("valid user name");
    /// assert_eq!(name.as_str(), "ada");
    /// ```
    pub fn new(user_name: impl Into<String>) -> Result<Self, DomainError> {
        let user_name = user_name.into();
        let trimmed = user_name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyField("userName"));
        }
        Ok(UserName(trimmed.to_string()))
    }

    /// Returns the user name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserName::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
