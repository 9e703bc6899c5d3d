//! QR image rendering contract.

/// Errors raised while rendering a QR image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to encode QR code: {0}")]
    Encode(String),

    #[error("Failed to write image: {0}")]
    Image(String),
}

/// Turns text into an image payload suitable for embedding in a web page.
///
/// Rendering is a one-shot call: failures are reported to the caller and
/// never retried.
#[cfg_attr(test, mockall::automock)]
pub trait QrRenderer: Send + Sync {
    /// Renders `text` as a QR code and returns it as a `data:` URI.
    fn render_data_uri(&self, text: &str) -> Result<String, RenderError>;
}
