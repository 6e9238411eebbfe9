pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Straight-alpha RGBA8 color.
///
/// Plans carry straight-alpha colors; premultiplication happens at the
/// rasterizer boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight).
    pub a: u8,
}

impl Rgba8 {
    /// Construct a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Return this color with its alpha replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Premultiply into raw channel bytes.
    pub fn premultiplied(self) -> [u8; 4] {
        use crate::foundation::math::mul_div255_u8;
        [
            mul_div255_u8(u16::from(self.r), u16::from(self.a)),
            mul_div255_u8(u16::from(self.g), u16::from(self.a)),
            mul_div255_u8(u16::from(self.b), u16::from(self.a)),
            self.a,
        ]
    }
}
