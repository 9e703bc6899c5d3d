//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - SQLite database and repository implementations
//! - [`qr`] - QR image rendering with the `qrcode` crate

pub mod persistence;
pub mod qr;
