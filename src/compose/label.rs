use std::sync::Arc;

use crate::{
    compose::plan::DrawOp,
    foundation::core::{Point, Rgba8},
    text::{FontStore, TextLayoutEngine, layout_size},
};

/// How a text block is positioned relative to its anchor point.
#[derive(Clone, Copy, Debug)]
pub(crate) enum TextAnchor {
    /// Anchor at the horizontal and vertical center of the block.
    MiddleCenter(f64, f64),
    /// Anchor at the horizontal center of the block's top edge.
    TopCenter(f64, f64),
}

/// Shape `text` and append a [`DrawOp::Text`], degrading to a no-op when the
/// store has no usable face or shaping fails.
///
/// Best-effort rendering: a card with a missing label beats no card.
pub(crate) fn push_text(
    engine: &mut TextLayoutEngine,
    fonts: &FontStore,
    ops: &mut Vec<DrawOp>,
    text: &str,
    size_px: f64,
    bold: bool,
    color: Rgba8,
    anchor: TextAnchor,
    max_width_px: Option<f64>,
) {
    let Some(font) = fonts.bytes_for(bold) else {
        return;
    };
    if text.is_empty() || size_px < 1.0 {
        return;
    }

    let layout = match engine.layout(
        text,
        size_px as f32,
        bold,
        color.into(),
        max_width_px.map(|w| w as f32),
    ) {
        Ok(layout) => layout,
        Err(err) => {
            tracing::warn!(%err, text, "skipping text draw");
            return;
        }
    };

    let (w, h) = layout_size(&layout);
    let origin = match anchor {
        TextAnchor::MiddleCenter(cx, cy) => Point::new(cx - w / 2.0, cy - h / 2.0),
        TextAnchor::TopCenter(cx, top) => Point::new(cx - w / 2.0, top),
    };

    ops.push(DrawOp::Text {
        layout: Arc::new(layout),
        font,
        origin,
    });
}
