//! Core domain entities.
//!
//! - [`Link`] - A stored link record
//! - [`NewLink`] - Input for creating a link record

pub mod link;

pub use link::{Link, NewLink, dynamic_url_for};
