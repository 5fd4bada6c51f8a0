// Post domain module
// Contains the post record, its resolved author reference and embedded comments

#![allow(clippy::module_inception)]

pub mod comment;
pub mod post;

pub use comment::Comment;
pub use post::{AuthorRef, Post, PostUpdate, PostView};
