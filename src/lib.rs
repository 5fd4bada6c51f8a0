//! Blog API Library
//!
//! REST endpoints over posts, authors and embedded comments, with the
//! domain records, repository contracts and their PostgreSQL and
//! in-memory adapters.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
