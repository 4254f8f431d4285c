//! Content lifecycle engine for the blog admin.
//!
//! Owns the post model and its draft/scheduled/published state machine,
//! timestamp normalization for the heterogeneous date encodings upstream
//! producers send, upload validation for cover images, and the persistence
//! contracts the HTTP layer consumes. No HTTP types leak into this crate.

pub mod asset;
pub mod post;
pub mod repository;
pub mod storage;
