//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Field names follow the camelCase JSON contract the
//! dashboard consumes.

pub mod generate;
pub mod health;
pub mod links;
pub mod pagination;
