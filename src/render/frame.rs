/// A rendered card: RGBA8 pixels of exactly the configured dimensions.
///
/// Produced fresh per row; ownership moves to the caller, which is
/// responsible for encoding and persisting it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixel bytes.
    pub data: Vec<u8>,
    /// Whether `data` carries premultiplied alpha.
    pub premultiplied: bool,
}

impl CardFrame {
    /// Pixel bytes converted to straight alpha, as PNG encoders expect.
    ///
    /// Returns a copy of `data` unchanged when the frame is already
    /// straight-alpha.
    pub fn to_straight_alpha(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in px.iter_mut().take(3) {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
