use std::sync::Arc;

use crate::foundation::{
    core::Rgba8,
    error::{CardError, CardResult},
};

/// RGBA8 brush color carried through Parley text layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

#[derive(Clone, Debug)]
struct Faces {
    family: String,
    regular: Arc<Vec<u8>>,
    bold: Option<Arc<Vec<u8>>>,
}

/// Read-only font registry prepared from caller-supplied font bytes.
///
/// Font IO is the data loader's job; the engine only ever sees bytes. A
/// bold face that fails to register falls back to the regular face with a
/// warning. An empty store is legal and renders cards without any text
/// layers (degenerate but never fatal).
#[derive(Clone, Debug, Default)]
pub struct FontStore {
    faces: Option<Faces>,
}

impl FontStore {
    /// Store with no faces; text draws are skipped.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a regular face and an optional bold face.
    ///
    /// Fails with [`CardError::Font`] only when the regular face cannot be
    /// registered; the render path itself never fails over fonts.
    pub fn prepare(regular: Vec<u8>, bold: Option<Vec<u8>>) -> CardResult<Self> {
        let mut font_ctx = parley::FontContext::default();

        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(regular.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CardError::font("no font families registered from regular face"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::font("registered font family has no name"))?
            .to_string();

        let bold = bold.and_then(|bytes| {
            let registered = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
            if registered.is_empty() {
                tracing::warn!("bold face failed to register; falling back to regular");
                None
            } else {
                Some(Arc::new(bytes))
            }
        });

        Ok(Self {
            faces: Some(Faces {
                family,
                regular: Arc::new(regular),
                bold,
            }),
        })
    }

    /// Whether any face is registered.
    pub fn has_faces(&self) -> bool {
        self.faces.is_some()
    }

    /// Backing bytes for the requested weight, bold falling back to regular.
    pub fn bytes_for(&self, bold: bool) -> Option<Arc<Vec<u8>>> {
        let faces = self.faces.as_ref()?;
        if bold {
            Some(faces.bold.clone().unwrap_or_else(|| faces.regular.clone()))
        } else {
            Some(faces.regular.clone())
        }
    }

    fn family(&self) -> Option<&str> {
        self.faces.as_ref().map(|f| f.family.as_str())
    }
}

/// Stateful helper for building Parley text layouts from a [`FontStore`].
///
/// One engine per compose call (or per worker thread); layouts it produces
/// stay valid after the engine is dropped.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: Option<String>,
}

impl TextLayoutEngine {
    /// Construct an engine with the store's faces registered.
    pub fn new(store: &FontStore) -> Self {
        let mut font_ctx = parley::FontContext::default();
        if let Some(faces) = &store.faces {
            font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(faces.regular.as_ref().clone()), None);
            if let Some(bold) = &faces.bold {
                font_ctx
                    .collection
                    .register_fonts(parley::fontique::Blob::from(bold.as_ref().clone()), None);
            }
        }
        Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family: store.family().map(str::to_string),
        }
    }

    /// Shape and lay out plain text at `size_px`.
    ///
    /// With `max_width_px` set, lines break to fit. Returns
    /// [`CardError::Font`] when the engine has no registered family.
    pub fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        bold: bool,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> CardResult<parley::Layout<TextBrushRgba8>> {
        let family = self
            .family
            .clone()
            .ok_or_else(|| CardError::font("no font faces registered"))?;
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation("text size_px must be finite and > 0"));
        }

        let weight = if bold {
            parley::style::FontWeight::BOLD
        } else {
            parley::style::FontWeight::NORMAL
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        if let Some(w) = max_width_px {
            layout.break_all_lines(Some(w));
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        } else {
            layout.break_all_lines(None);
        }

        Ok(layout)
    }
}

/// Measured extent of a built layout: widest line advance by total line
/// height.
pub fn layout_size(layout: &parley::Layout<TextBrushRgba8>) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    (w, h)
}

#[cfg(test)]
#[path = "../tests/unit/text.rs"]
mod tests;
