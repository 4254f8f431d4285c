pub mod model;
pub mod slug;
pub mod time;
pub mod validate;

pub use model::{NewPost, Post, PostInput, PostStatus};
pub use validate::{validate_for_create, validate_for_update, ValidationError};
