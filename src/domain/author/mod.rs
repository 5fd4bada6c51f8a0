// Author domain module
// Contains the author record and the user name value object

#![allow(clippy::module_inception)]

pub mod author;
pub mod value_objects;

pub use author::{Author, AuthorUpdate, AuthorView};
pub use value_objects::UserName;
