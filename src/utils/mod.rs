//! Utility functions and helpers.

pub mod log;
pub mod slug;

pub use slug::{compose_slug, slugify};
