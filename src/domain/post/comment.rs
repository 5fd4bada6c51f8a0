use serde::{Deserialize, Serialize};

use crate::domain::errors::{required, DomainError};

/// Comment embedded in a post
///
/// Comments have no identity of their own; they live and die with the
/// post that holds them and keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    content: String,
}

impl Comment {
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            content: required(content.into(), "content")?,
        })
    }
}
