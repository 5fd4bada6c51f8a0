use thiserror::Error;

/// Errors raised while constructing or mutating domain records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required field was empty or whitespace-only
    #[error("`{0}` cannot be empty")]
    EmptyField(&'static str),
}

/// Errors surfaced by repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    /// A uniqueness constraint rejected the write
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Rejects empty or whitespace-only values for a named field
pub(crate) fn required(value: String, field: &'static str) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_message_names_the_field() {
        let err = DomainError::EmptyField("title");
        assert_eq!(err.to_string(), "`title` cannot be empty");
    }

    #[test]
    fn required_rejects_whitespace_only() {
        assert_eq!(
            required(" \t".to_string(), "title"),
            Err(DomainError::EmptyField("title"))
        );
        assert_eq!(required("x".to_string(), "title"), Ok("x".to_string()));
    }

    #[test]
    fn storage_error_keeps_detail() {
        let err = RepositoryError::Storage("connection reset".to_string());
        assert!(err.to_string().contains("connection reset"));
    }
}
