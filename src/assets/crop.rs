use std::sync::Arc;

use image::imageops::FilterType;

use crate::{
    assets::store::PreparedImage,
    foundation::error::{CardError, CardResult},
    foundation::math,
};

/// Crop-to-fill an avatar into a `size x size` tile with a circular alpha
/// mask.
///
/// The source is scaled (Lanczos) so the shorter edge covers the tile,
/// center-cropped, then masked by an antialiased circle. Operates on
/// premultiplied pixels throughout, so the mask multiplies all four
/// channels.
pub fn circle_crop(src: &PreparedImage, size: u32) -> CardResult<PreparedImage> {
    let size = size.max(1);
    if src.width == 0 || src.height == 0 {
        return Ok(transparent_tile(size));
    }

    let scale = f64::max(
        f64::from(size) / f64::from(src.width),
        f64::from(size) / f64::from(src.height),
    );
    let scaled_w = ((f64::from(src.width) * scale).round() as u32).max(size);
    let scaled_h = ((f64::from(src.height) * scale).round() as u32).max(size);

    let buffer =
        image::RgbaImage::from_raw(src.width, src.height, src.rgba8_premul.as_ref().clone())
            .ok_or_else(|| CardError::render("prepared image byte length mismatch"))?;
    let resized = image::imageops::resize(&buffer, scaled_w, scaled_h, FilterType::Lanczos3);

    let x0 = (scaled_w - size) / 2;
    let y0 = (scaled_h - size) / 2;
    let center = f64::from(size) / 2.0;
    let radius = f64::from(size) / 2.0;

    let mut out = vec![0u8; size as usize * size as usize * 4];
    for y in 0..size {
        for x in 0..size {
            let dx = (f64::from(x) + 0.5) - center;
            let dy = (f64::from(y) + 0.5) - center;
            let dist = (dx * dx + dy * dy).sqrt();
            let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }

            let mask = (coverage * 255.0).round() as u16;
            let src_px = resized.get_pixel(x0 + x, y0 + y).0;
            let dst = &mut out[(y as usize * size as usize + x as usize) * 4..][..4];
            for (d, s) in dst.iter_mut().zip(src_px) {
                *d = math::mul_div255_u8(u16::from(s), mask);
            }
        }
    }

    Ok(PreparedImage {
        width: size,
        height: size,
        rgba8_premul: Arc::new(out),
    })
}

fn transparent_tile(size: u32) -> PreparedImage {
    PreparedImage {
        width: size,
        height: size,
        rgba8_premul: Arc::new(vec![0u8; size as usize * size as usize * 4]),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/crop.rs"]
mod tests;
