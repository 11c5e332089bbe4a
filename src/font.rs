//! Font resolution and glyph rasterization
//!
//! Each glyph class resolves to either a TrueType face found on the system
//! or the compiled-in bitmap font. Both variants expose the same capability:
//! measure a piece of text at a pixel size and draw it centered on a point.
//! Failing to find a usable face is never an error, it only changes which
//! variant a class resolves to.

use crate::style::FontClass;
use image::RgbImage;
use rusttype::{point, Font, GlyphId, Scale};
use std::fs;

/// Candidate faces for Latin letters and arrow punctuation, probed in order.
const LATIN_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Candidate faces for CJK ideographs, probed in order.
const CJK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/arphic/uming.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simsun.ttc",
];

/// A font a glyph class resolved to.
pub enum ResolvedFont {
    /// A TrueType face loaded from the system.
    Truetype(Font<'static>),
    /// The compiled-in 8×8 bitmap font.
    Builtin,
}

impl ResolvedFont {
    /// Draw `text` centered on `(cx, cy)` at `px` pixels, alpha-blending
    /// coverage over the existing canvas content.
    ///
    /// A TrueType face that turns out to lack one of the needed codepoints
    /// falls back to the bitmap font for this text.
    pub fn draw_centered(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        cx: f32,
        cy: f32,
        px: f32,
        color: [u8; 3],
    ) {
        match self {
            ResolvedFont::Truetype(font) if covers(font, text) => {
                draw_truetype(font, canvas, text, cx, cy, px, color)
            }
            _ => draw_builtin(canvas, text, cx, cy, px, color),
        }
    }
}

/// The fonts one render run draws with, resolved once up front.
pub struct Fonts {
    latin: ResolvedFont,
    cjk: ResolvedFont,
}

impl Fonts {
    /// Probe the candidate lists for each glyph class. Resolution is
    /// deterministic per environment: the lists are fixed and the first
    /// usable face wins.
    pub fn resolve() -> Fonts {
        Fonts {
            latin: load_first(LATIN_FONT_PATHS, &['A', '→']),
            cjk: load_first(CJK_FONT_PATHS, &['中']),
        }
    }

    /// A `Fonts` that skips system probing entirely.
    pub fn builtin_only() -> Fonts {
        Fonts {
            latin: ResolvedFont::Builtin,
            cjk: ResolvedFont::Builtin,
        }
    }

    pub fn for_class(&self, class: FontClass) -> &ResolvedFont {
        match class {
            FontClass::Latin => &self.latin,
            FontClass::Cjk => &self.cjk,
        }
    }
}

/// Load the first candidate that parses and covers all probe codepoints.
fn load_first(paths: &[&str], probes: &[char]) -> ResolvedFont {
    for path in paths {
        let Ok(data) = fs::read(path) else {
            continue;
        };
        let Some(font) = Font::try_from_vec(data) else {
            continue;
        };
        if probes.iter().all(|&c| font.glyph(c).id() != GlyphId(0)) {
            return ResolvedFont::Truetype(font);
        }
    }
    ResolvedFont::Builtin
}

fn covers(font: &Font<'_>, text: &str) -> bool {
    text.chars().all(|c| font.glyph(c).id() != GlyphId(0))
}

fn draw_truetype(
    font: &Font<'static>,
    canvas: &mut RgbImage,
    text: &str,
    cx: f32,
    cy: f32,
    px: f32,
    color: [u8; 3],
) {
    let scale = Scale::uniform(px);
    let glyphs: Vec<_> = font.layout(text, scale, point(0.0, 0.0)).collect();

    // Ink bounding box of the laid-out run; pure whitespace draws nothing.
    let mut bounds: Option<rusttype::Rect<i32>> = None;
    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            bounds = Some(match bounds {
                None => bb,
                Some(acc) => rusttype::Rect {
                    min: point(acc.min.x.min(bb.min.x), acc.min.y.min(bb.min.y)),
                    max: point(acc.max.x.max(bb.max.x), acc.max.y.max(bb.max.y)),
                },
            });
        }
    }
    let Some(bounds) = bounds else {
        return;
    };

    let dx = cx - (bounds.min.x + bounds.max.x) as f32 / 2.0;
    let dy = cy - (bounds.min.y + bounds.max.y) as f32 / 2.0;

    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let x = ((bb.min.x + gx as i32) as f32 + dx).round() as i32;
                let y = ((bb.min.y + gy as i32) as f32 + dy).round() as i32;
                blend_pixel(canvas, x, y, color, coverage);
            });
        }
    }
}

/// Side length, in cells, of a builtin bitmap glyph.
const BITMAP_DIM: usize = 8;

/// 8×8 bitmap glyphs, one byte per row, most significant bit leftmost.
/// Unknown characters render as the notdef box.
fn builtin_bitmap(c: char) -> [u8; BITMAP_DIM] {
    match c {
        'A' => [0x18, 0x3C, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x00],
        '→' => [0x00, 0x08, 0x0C, 0x7E, 0x0C, 0x08, 0x00, 0x00],
        '中' => [0x10, 0xFE, 0x92, 0x92, 0xFE, 0x10, 0x10, 0x00],
        _ => [0xFE, 0x82, 0x82, 0x82, 0x82, 0x82, 0xFE, 0x00],
    }
}

fn draw_builtin(canvas: &mut RgbImage, text: &str, cx: f32, cy: f32, px: f32, color: [u8; 3]) {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return;
    }

    // Whole-pixel cells keep the blocks crisp at small sizes.
    let cell = (px / BITMAP_DIM as f32).floor().max(1.0) as i32;
    let glyph_side = cell * BITMAP_DIM as i32;
    let x0 = (cx - (glyph_side * chars.len() as i32) as f32 / 2.0).round() as i32;
    let y0 = (cy - glyph_side as f32 / 2.0).round() as i32;

    for (i, &c) in chars.iter().enumerate() {
        let rows = builtin_bitmap(c);
        let gx0 = x0 + i as i32 * glyph_side;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..BITMAP_DIM {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                for dy in 0..cell {
                    for dx in 0..cell {
                        blend_pixel(
                            canvas,
                            gx0 + col as i32 * cell + dx,
                            y0 + row as i32 * cell + dy,
                            color,
                            1.0,
                        );
                    }
                }
            }
        }
    }
}

/// Composite one coverage sample over the canvas, clipping at the edges.
fn blend_pixel(canvas: &mut RgbImage, x: i32, y: i32, color: [u8; 3], coverage: f32) {
    if coverage <= 0.0 {
        return;
    }
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }
    let coverage = coverage.min(1.0);
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    for channel in 0..3 {
        let base = pixel.0[channel] as f32;
        pixel.0[channel] = (base + (color[channel] as f32 - base) * coverage) as u8;
    }
}
