// Domain layer module exports
// Records, their invariants and the persistence contracts.
// Nothing in here knows about HTTP or SQL.

pub mod author;
pub mod errors;
pub mod post;
pub mod repositories;

pub use errors::{DomainError, RepositoryError, RepositoryResult};
