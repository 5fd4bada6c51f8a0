// Infrastructure layer module
// Contains database adapters and connection setup
// Follows Hexagonal Architecture

pub mod database;
pub mod repositories;
