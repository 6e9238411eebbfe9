use std::sync::Arc;

use crate::{
    assets::store::PreparedImage,
    foundation::core::{BezPath, Canvas, Point, Rgba8},
    text::TextBrushRgba8,
};

/// A single draw operation in a [`CardPlan`].
///
/// Ops are applied strictly in order, later ops alpha-compositing over
/// earlier ones; the renderer never reads pixels back.
#[derive(Clone)]
pub enum DrawOp {
    /// Fill a closed path with a straight-alpha color.
    FillPath {
        /// Path in canvas coordinates.
        path: BezPath,
        /// Fill color.
        color: Rgba8,
    },
    /// Blit a prepared image at its natural size.
    Image {
        /// Premultiplied source pixels.
        image: Arc<PreparedImage>,
        /// Top-left corner in canvas coordinates.
        origin: Point,
    },
    /// Draw a shaped text layout.
    Text {
        /// Built Parley layout (brush colors baked in).
        layout: Arc<parley::Layout<TextBrushRgba8>>,
        /// Font bytes backing the layout's glyph ids.
        font: Arc<Vec<u8>>,
        /// Top-left corner of the layout box in canvas coordinates.
        origin: Point,
    },
}

impl DrawOp {
    /// Short tag for the op variant, used by plan-shape tests and tracing.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FillPath { .. } => "fill",
            Self::Image { .. } => "image",
            Self::Text { .. } => "text",
        }
    }
}

impl std::fmt::Debug for DrawOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FillPath { path, color } => f
                .debug_struct("FillPath")
                .field("elements", &path.elements().len())
                .field("color", color)
                .finish(),
            Self::Image { image, origin } => f
                .debug_struct("Image")
                .field("width", &image.width)
                .field("height", &image.height)
                .field("origin", origin)
                .finish(),
            Self::Text { layout, origin, .. } => f
                .debug_struct("Text")
                .field("layout_ptr", &Arc::as_ptr(layout))
                .field("origin", origin)
                .finish(),
        }
    }
}

/// Backend-agnostic plan for one card: canvas size plus ordered draw ops.
///
/// The op order is deterministic for a given input and is part of the
/// contract; golden tests diff plans without rasterizing.
#[derive(Clone, Debug)]
pub struct CardPlan {
    /// Output dimensions.
    pub canvas: Canvas,
    /// Ordered draw operations, back to front.
    pub ops: Vec<DrawOp>,
}

impl CardPlan {
    /// Op variant tags in order, for compact plan-shape assertions.
    pub fn op_kinds(&self) -> Vec<&'static str> {
        self.ops.iter().map(DrawOp::kind).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/plan.rs"]
mod tests;
