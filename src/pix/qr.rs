//! QR rendering of encoded payloads

use super::error::{PixError, Result};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

/// Options for SVG rendering
#[derive(Debug, Clone)]
pub struct QrOptions {
    /// Minimum width and height in pixels
    pub size: u32,
    /// Draw the quiet zone around the symbol
    pub quiet_zone: bool,
    /// Foreground color (e.g. "#000000")
    pub fg_color: String,
    /// Background color (e.g. "#FFFFFF")
    pub bg_color: String,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: 256,
            quiet_zone: true,
            fg_color: "#000000".to_string(),
            bg_color: "#FFFFFF".to_string(),
        }
    }
}

fn build_code(payload: &str) -> Result<QrCode> {
    // Banking apps expect medium error correction for static codes
    QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
        .map_err(|e| PixError::Render(e.to_string()))
}

/// Render a payload as an SVG document
pub fn render_svg(payload: &str, options: &QrOptions) -> Result<String> {
    let code = build_code(payload)?;
    Ok(code
        .render::<svg::Color<'_>>()
        .quiet_zone(options.quiet_zone)
        .min_dimensions(options.size, options.size)
        .dark_color(svg::Color(&options.fg_color))
        .light_color(svg::Color(&options.bg_color))
        .build())
}

/// Render a payload as text for terminal display
pub fn render_terminal(payload: &str) -> Result<String> {
    let code = build_code(payload)?;
    Ok(code
        .render::<char>()
        .quiet_zone(true)
        .module_dimensions(2, 1)
        .build())
}
