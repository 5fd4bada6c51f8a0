// Repository contracts (ports)
// Implemented by adapters in the infrastructure layer

pub mod author_repository;
pub mod post_repository;

pub use author_repository::AuthorRepository;
pub use post_repository::PostRepository;
