use std::{collections::HashMap, sync::Arc};

use crate::{
    compose::plan::{CardPlan, DrawOp},
    foundation::error::{CardError, CardResult},
    render::frame::CardFrame,
};

/// CPU rasterizer executing [`CardPlan`]s into premultiplied RGBA8 frames.
///
/// One renderer per thread; it holds no plan state between calls beyond a
/// cache of converted font blobs, so a renderer can be reused across rows.
#[derive(Default)]
pub struct CpuRenderer {
    font_cache: HashMap<usize, vello_cpu::peniko::FontData>,
}

impl CpuRenderer {
    /// Construct a renderer with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterize `plan` into a fresh transparent canvas.
    pub fn render(&mut self, plan: &CardPlan) -> CardResult<CardFrame> {
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| CardError::render("canvas width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| CardError::render("canvas height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        clear_pixmap(&mut pixmap);

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        for op in &plan.ops {
            self.draw_op(&mut ctx, op)?;
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(CardFrame {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_op(&mut self, ctx: &mut vello_cpu::RenderContext, op: &DrawOp) -> CardResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::FillPath { path, color } => {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    color.r, color.g, color.b, color.a,
                ));
                ctx.fill_path(&bezpath_to_cpu(path));
                Ok(())
            }
            DrawOp::Image { image, origin } => {
                let pixmap = image_premul_bytes_to_pixmap(
                    image.rgba8_premul.as_slice(),
                    image.width,
                    image.height,
                )?;
                let paint = vello_cpu::Image {
                    image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                    sampler: vello_cpu::peniko::ImageSampler::default(),
                };

                ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
                ctx.set_paint(paint);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(image.width),
                    f64::from(image.height),
                ));
                Ok(())
            }
            DrawOp::Text {
                layout,
                font,
                origin,
            } => {
                let font = self.font_data_for(font);
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));

                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };

                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));

                        let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(&font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
                Ok(())
            }
        }
    }

    fn font_data_for(&mut self, bytes: &Arc<Vec<u8>>) -> vello_cpu::peniko::FontData {
        let key = Arc::as_ptr(bytes) as usize;
        self.font_cache
            .entry(key)
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
                    0,
                )
            })
            .clone()
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&[0, 0, 0, 0]);
    }
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> CardResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CardError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CardError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(CardError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
