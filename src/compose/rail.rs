use std::sync::Arc;

use kurbo::Shape;

use crate::{
    assets::{crop::circle_crop, store::AvatarStore},
    compose::label::{TextAnchor, push_text},
    compose::plan::DrawOp,
    foundation::core::{Point, Rect, Rgba8},
    foundation::error::CardResult,
    geometry::{rounded_rect_path, star_path},
    model::{Favorites, RailMode, ScoreRow},
    score::{RowExtremes, classify, format_score},
    text::{FontStore, TextLayoutEngine},
};

const CHIP_FILL: Rgba8 = Rgba8::new(20, 20, 20, 200);
const CHIP_OUTLINE: Rgba8 = Rgba8::new(255, 255, 255, 40);
const CHIP_OUTLINE_WIDTH: f64 = 2.0;
const CHIP_RADIUS: f64 = 10.0;
const PLACEHOLDER_FILL: Rgba8 = Rgba8::new(50, 50, 50, 255);
const PLACEHOLDER_INK: Rgba8 = Rgba8::new(200, 200, 200, 255);
const NAME_INK: Rgba8 = Rgba8::new(230, 230, 230, 230);
const STAR_INK: Rgba8 = Rgba8::new(255, 255, 0, 255);

/// Which side of the card a rail hangs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RailSide {
    /// Chips anchored at the card's left edge, score boxes to their right.
    Left,
    /// Chips anchored at the card's right edge, score boxes to their left.
    Right,
}

/// Split participants across the rails.
///
/// Two-rail mode sends the first `ceil(n/2)` names (input order) left and
/// the remainder right; single-rail modes send everyone to the active side.
pub fn split_rails(participants: &[String], mode: RailMode) -> (&[String], &[String]) {
    match mode {
        RailMode::TwoRail => participants.split_at(participants.len().div_ceil(2)),
        RailMode::LeftOnly => (participants, &[][..]),
        RailMode::RightOnly => (&[][..], participants),
    }
}

/// Shared read-only inputs for laying out one rail.
pub(crate) struct RailCtx<'a> {
    pub(crate) row: &'a ScoreRow,
    pub(crate) avatars: &'a AvatarStore,
    pub(crate) favorites: &'a Favorites,
    pub(crate) fonts: &'a FontStore,
    pub(crate) extremes: RowExtremes,
    pub(crate) chip: f64,
    pub(crate) gap: f64,
    pub(crate) star_opacity: f32,
}

/// Emit draw ops for every participant on one rail, top to bottom.
///
/// Per participant, back to front: favorite star backdrop, avatar (or
/// placeholder tile with initial), score box outline and fill, score or `N`
/// label, display name. The vertical cursor advances by
/// `chip + floor(0.6 * chip) + gap`; entries past the canvas bottom simply
/// clip.
pub(crate) fn layout_rail(
    ctx: &RailCtx<'_>,
    engine: &mut TextLayoutEngine,
    side: RailSide,
    anchor_x: f64,
    start_y: f64,
    participants: &[String],
    ops: &mut Vec<DrawOp>,
) -> CardResult<()> {
    let chip = ctx.chip;
    let mut y = start_y;

    for name in participants {
        let class = classify(ctx.row, name, ctx.extremes);
        let ax = match side {
            RailSide::Left => anchor_x,
            RailSide::Right => anchor_x - chip,
        };

        if ctx.favorites.is_favorite(name, &ctx.row.song) {
            let star = 1.4 * chip;
            let sx = match side {
                RailSide::Left => anchor_x + 0.1 * chip,
                RailSide::Right => anchor_x - 1.5 * chip,
            };
            let sy = y + 0.1 * chip;
            let alpha = (255.0 * f64::from(ctx.star_opacity.clamp(0.0, 1.0))).round() as u8;
            ops.push(DrawOp::FillPath {
                path: star_path(
                    Point::new(sx + star / 2.0, sy + star / 2.0),
                    star / 2.0,
                    5,
                    0.5,
                ),
                color: STAR_INK.with_alpha(alpha),
            });
        }

        match ctx.avatars.get(name) {
            Some(avatar) => {
                let tile = circle_crop(avatar, chip as u32)?;
                ops.push(DrawOp::Image {
                    image: Arc::new(tile),
                    origin: Point::new(ax, y),
                });
            }
            None => {
                ops.push(DrawOp::FillPath {
                    path: Rect::new(ax, y, ax + chip, y + chip).to_path(0.1),
                    color: PLACEHOLDER_FILL,
                });
                if let Some(initial) = name.trim().chars().next() {
                    push_text(
                        engine,
                        ctx.fonts,
                        ops,
                        &initial.to_uppercase().to_string(),
                        0.5 * chip,
                        true,
                        PLACEHOLDER_INK,
                        TextAnchor::MiddleCenter(ax + chip / 2.0, y + chip / 2.0),
                        None,
                    );
                }
            }
        }

        let bx = match side {
            RailSide::Left => ax + 1.2 * chip,
            RailSide::Right => ax - 1.2 * chip,
        };
        let score_box = Rect::new(bx, y, bx + chip, y + chip);
        ops.push(DrawOp::FillPath {
            path: rounded_rect_path(score_box, CHIP_RADIUS),
            color: CHIP_OUTLINE,
        });
        ops.push(DrawOp::FillPath {
            path: rounded_rect_path(
                score_box.inset(-CHIP_OUTLINE_WIDTH),
                CHIP_RADIUS - CHIP_OUTLINE_WIDTH,
            ),
            color: CHIP_FILL,
        });

        let label = if ctx.row.is_submitter(name) {
            "N".to_string()
        } else {
            format_score(ctx.row.score_for(name))
        };
        push_text(
            engine,
            ctx.fonts,
            ops,
            &label,
            0.5 * chip,
            true,
            class.chip_color(),
            TextAnchor::MiddleCenter(bx + chip / 2.0, y + chip / 2.0),
            None,
        );

        push_text(
            engine,
            ctx.fonts,
            ops,
            name,
            0.28 * chip,
            false,
            NAME_INK,
            TextAnchor::TopCenter(ax + chip / 2.0, y + chip + 0.15 * chip),
            None,
        );

        y += chip + (0.6 * chip).floor() + ctx.gap;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/rail.rs"]
mod tests;
