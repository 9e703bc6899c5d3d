//! QR rendering backed by the `qrcode` crate.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use qrcode::render::svg;
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use crate::domain::qr_renderer::{QrRenderer, RenderError};

/// Image encoding of the rendered QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrImageFormat {
    #[default]
    Png,
    Svg,
}

impl QrImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            QrImageFormat::Png => "image/png",
            QrImageFormat::Svg => "image/svg+xml",
        }
    }
}

impl FromStr for QrImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(QrImageFormat::Png),
            "svg" => Ok(QrImageFormat::Svg),
            other => Err(format!("unsupported QR image format '{other}'")),
        }
    }
}

impl fmt::Display for QrImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QrImageFormat::Png => f.write_str("png"),
            QrImageFormat::Svg => f.write_str("svg"),
        }
    }
}

/// Renders QR codes as base64 `data:` URIs.
#[derive(Debug, Clone)]
pub struct CodeRenderer {
    format: QrImageFormat,
    min_dimension: u32,
}

impl CodeRenderer {
    pub fn new(format: QrImageFormat, min_dimension: u32) -> Self {
        Self {
            format,
            min_dimension,
        }
    }

    fn encode_png(&self, code: &QrCode) -> Result<Vec<u8>, RenderError> {
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.min_dimension, self.min_dimension)
            .quiet_zone(true)
            .build();

        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| RenderError::Image(e.to_string()))?;

        Ok(bytes)
    }

    fn encode_svg(&self, code: &QrCode) -> Vec<u8> {
        code.render::<svg::Color>()
            .min_dimensions(self.min_dimension, self.min_dimension)
            .quiet_zone(true)
            .build()
            .into_bytes()
    }
}

impl Default for CodeRenderer {
    fn default() -> Self {
        Self::new(QrImageFormat::Png, 200)
    }
}

impl QrRenderer for CodeRenderer {
    fn render_data_uri(&self, text: &str) -> Result<String, RenderError> {
        let code = QrCode::new(text.as_bytes()).map_err(|e| RenderError::Encode(e.to_string()))?;

        let bytes = match self.format {
            QrImageFormat::Png => self.encode_png(&code)?,
            QrImageFormat::Svg => self.encode_svg(&code),
        };

        Ok(format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            STANDARD.encode(bytes)
        ))
    }
}
