//! Icon rendering
//!
//! One render call owns one canvas: gradient fill, border outline, glyph
//! marks, PNG encode, in that order. The fixed driver table at the bottom
//! produces the three files the extension manifest references.

use crate::font::Fonts;
use crate::style::{BorderSpec, GradientSpec, IconStyle};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgb, RgbImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// The extension's icon set: pixel size and output filename.
pub const ICON_SET: [(u32, &str); 3] = [(16, "icon16.png"), (48, "icon48.png"), (128, "icon128.png")];

/// Render all icons in [`ICON_SET`] into `out_dir`.
///
/// Fonts are resolved once and shared across the set. The first write
/// failure aborts the remaining icons.
pub fn generate_icons(out_dir: &Path) -> Result<()> {
    let style = IconStyle::builtin();
    let fonts = Fonts::resolve();

    for (size, filename) in ICON_SET {
        render_icon(size, &out_dir.join(filename), &style, &fonts)?;
    }

    Ok(())
}

/// Render one `size × size` icon and write it to `path`, overwriting any
/// existing file.
///
/// Deterministic for fixed inputs; the only propagated error is a failed
/// encode or write.
pub fn render_icon(size: u32, path: &Path, style: &IconStyle, fonts: &Fonts) -> Result<()> {
    if size == 0 {
        anyhow::bail!("icon size must be a positive number of pixels");
    }

    let mut canvas = RgbImage::new(size, size);

    fill_gradient(&mut canvas, &style.gradient);
    draw_border(&mut canvas, &style.border);

    for glyph in &style.glyphs {
        let px = ((size as f32 * glyph.size) as u32).max(1) as f32;
        fonts.for_class(glyph.font).draw_centered(
            &mut canvas,
            &glyph.text,
            size as f32 * glyph.x,
            size as f32 * glyph.y,
            px,
            glyph.color.rgb,
        );
    }

    write_png(&canvas, path)?;

    println!("✓ Generated {} ({size}x{size})", path.display());
    Ok(())
}

/// Paint the vertical gradient, one solid row per scanline.
///
/// The interpolation ratio is `y / size`, so the last row stays strictly
/// below 1 and the bottom endpoint is approached but never reached exactly.
/// Channel values are truncated, not rounded.
pub fn fill_gradient(canvas: &mut RgbImage, spec: &GradientSpec) {
    let size = canvas.height();
    for y in 0..size {
        let t = y as f32 / size as f32;
        let row = Rgb([
            lerp_channel(spec.top.rgb[0], spec.bottom.rgb[0], t),
            lerp_channel(spec.top.rgb[1], spec.bottom.rgb[1], t),
            lerp_channel(spec.top.rgb[2], spec.bottom.rgb[2], t),
        ]);
        for x in 0..canvas.width() {
            canvas.put_pixel(x, y, row);
        }
    }
}

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 + (to as f32 - from as f32) * t) as u8
}

/// Draw the inset rectangle outline, stroke grown inward from the rectangle
/// edge and clipped to the canvas.
///
/// The corner coordinates are inclusive, so at small sizes the right and
/// bottom edges can land on (or past) the canvas edge and get clipped. The
/// spec color's alpha has no effect on the 3-channel canvas; the stroke is
/// painted opaque.
pub fn draw_border(canvas: &mut RgbImage, spec: &BorderSpec) {
    let size = canvas.width();
    let margin = (size as f32 * spec.margin) as u32;
    let stroke = ((size as f32 * spec.width) as u32).max(1);

    let x0 = margin;
    let y0 = margin;
    let x1 = size - margin;
    let y1 = size - margin;
    let color = Rgb(spec.color.rgb);

    for y in 0..size {
        for x in 0..size {
            if x < x0 || x > x1 || y < y0 || y > y1 {
                continue;
            }
            let on_stroke = x < x0 + stroke
                || x + stroke > x1
                || y < y0 + stroke
                || y + stroke > y1;
            if on_stroke {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

/// Encode the canvas as a 24-bit RGB PNG with best compression.
fn write_png(canvas: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(canvas.as_raw(), canvas.width(), canvas.height(), ColorType::Rgb8)
        .with_context(|| format!("Failed to encode {}", path.display()))?;

    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
