//! QR image rendering.

pub mod code_renderer;

pub use code_renderer::{CodeRenderer, QrImageFormat};
