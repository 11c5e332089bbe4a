//! Visual-design data model for the extension icons
//!
//! The gradient, border and glyph layout are configuration data rather than
//! code: `IconStyle` is deserialized from an embedded JSON document, so the
//! renderer stays independent of the specific visual design. Colors are
//! written as CSS color strings and parsed with `css-color`.

use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// An RGBA color parsed from a CSS color string ("#0f2027",
/// "rgba(255, 255, 255, 0.3)", "white", ...).
///
/// The alpha component is kept so the data model round-trips the design
/// document, but the canvas is 3-channel RGB and the renderer ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub rgb: [u8; 3],
    pub alpha: u8,
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        let parsed = css_color::Srgb::from_str(&text)
            .map_err(|_| serde::de::Error::custom(format!("invalid CSS color: {text:?}")))?;
        Ok(Color {
            rgb: [
                (parsed.red * 255.) as u8,
                (parsed.green * 255.) as u8,
                (parsed.blue * 255.) as u8,
            ],
            alpha: (parsed.alpha * 255.) as u8,
        })
    }
}

/// Which resolved font a glyph is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontClass {
    /// Latin letters and arrow punctuation.
    Latin,
    /// CJK ideographs.
    Cjk,
}

/// Vertical gradient endpoints: `top` at row 0, `bottom` approached (never
/// exactly reached) at the last row.
#[derive(Debug, Clone, Deserialize)]
pub struct GradientSpec {
    pub top: Color,
    pub bottom: Color,
}

/// Inset rectangle outline drawn over the gradient.
///
/// `margin` and `width` are fractions of the icon size; the stroke width is
/// clamped to at least one pixel at render time.
#[derive(Debug, Clone, Deserialize)]
pub struct BorderSpec {
    pub margin: f32,
    pub width: f32,
    pub color: Color,
}

/// One text mark placed at a fixed relative position.
#[derive(Debug, Clone, Deserialize)]
pub struct GlyphSpec {
    pub text: String,
    pub font: FontClass,
    /// Center position as fractions of the icon size.
    pub x: f32,
    pub y: f32,
    /// Pixel size as a fraction of the icon size.
    pub size: f32,
    pub color: Color,
}

/// The complete visual design of one icon, independent of its pixel size.
#[derive(Debug, Clone, Deserialize)]
pub struct IconStyle {
    pub gradient: GradientSpec,
    pub border: BorderSpec,
    pub glyphs: Vec<GlyphSpec>,
}

impl IconStyle {
    /// The built-in design: dark blue-grey gradient, translucent white
    /// border, and the "A → 中" marks of the translator extension.
    pub fn builtin() -> IconStyle {
        let style_json = r##"
        {
          "gradient": { "top": "#0f2027", "bottom": "#2c5364" },
          "border":   { "margin": 0.05, "width": 0.015, "color": "rgba(255, 255, 255, 0.3)" },
          "glyphs": [
            { "text": "A",  "font": "latin", "x": 0.28, "y": 0.40, "size": 0.31, "color": "#ffffff" },
            { "text": "→", "font": "latin", "x": 0.50, "y": 0.50, "size": 0.23, "color": "#ffffff" },
            { "text": "中", "font": "cjk",   "x": 0.72, "y": 0.60, "size": 0.27, "color": "#ffffff" }
          ]
        }
        "##;

        serde_json::from_str(style_json).unwrap()
    }
}
