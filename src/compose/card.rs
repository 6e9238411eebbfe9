use crate::{
    assets::store::AvatarStore,
    compose::label::{TextAnchor, push_text},
    compose::plan::{CardPlan, DrawOp},
    compose::rail::{RailCtx, RailSide, layout_rail, split_rails},
    foundation::core::{Canvas, Rect, Rgba8},
    foundation::error::CardResult,
    geometry::rounded_rect_path,
    model::{Favorites, RenderConfig, ScoreRow},
    score::row_extremes,
    text::{FontStore, TextLayoutEngine},
};

// Fixed proportional ratios of the card's visual language. Everything else
// derives from RenderConfig.
const TITLE_HEIGHT_RATIO: f64 = 0.18;
const RANK_PANEL_WIDTH_RATIO: f64 = 0.14;
const RANK_PANEL_HEIGHT_RATIO: f64 = 0.9;

const PANEL_RADIUS: f64 = 14.0;
const RANK_PANEL_RADIUS: f64 = 12.0;
const TITLE_TEXT_INSET: f64 = 16.0;

const TITLE_PANEL_FILL: Rgba8 = Rgba8::new(0, 0, 0, 170);
const RAILS_PANEL_FILL: Rgba8 = Rgba8::new(0, 0, 0, 150);
const RANK_PANEL_FILL: Rgba8 = Rgba8::new(255, 255, 255, 30);
const TITLE_INK: Rgba8 = Rgba8::new(240, 240, 240, 255);
const ARTIST_INK: Rgba8 = Rgba8::new(200, 200, 200, 255);
const RANK_INK: Rgba8 = Rgba8::new(230, 230, 230, 255);
const AVG_LABEL_INK: Rgba8 = Rgba8::new(210, 210, 210, 200);

/// Compose one row into a [`CardPlan`].
///
/// The plan is built in a fixed sequence — title panel, rank/average panel,
/// rails panel, left rail, right rail — and every draw strictly composites
/// over what came before. The only fatal condition is a row missing a
/// required field; everything else degrades.
#[tracing::instrument(skip_all, fields(song = %row.song, rank = row.rank))]
pub fn compose_card(
    row: &ScoreRow,
    participants: &[String],
    avatars: &AvatarStore,
    favorites: &Favorites,
    fonts: &FontStore,
    config: &RenderConfig,
) -> CardResult<CardPlan> {
    row.validate()?;

    let canvas = Canvas {
        width: clamp_dim(config.card_w),
        height: clamp_dim(config.card_h),
    };
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let pad = f64::from(config.padding)
        .min((w / 2.0 - 1.0).max(0.0))
        .min((h / 2.0 - 1.0).max(0.0));
    let chip = f64::from(config.chip_size.max(1));
    let gap = f64::from(config.chip_gap);

    if !fonts.has_faces() {
        tracing::warn!("font store has no faces; text layers will be skipped");
    }
    let mut engine = TextLayoutEngine::new(fonts);
    let mut ops = Vec::new();

    // Title panel.
    let title_h = h * TITLE_HEIGHT_RATIO;
    ops.push(DrawOp::FillPath {
        path: rounded_rect_path(Rect::new(pad, pad, w - pad, pad + title_h), PANEL_RADIUS),
        color: TITLE_PANEL_FILL,
    });

    let title_y = pad + title_h * 0.15;
    let title_max_w = (w - 2.0 * pad - 2.0 * TITLE_TEXT_INSET).max(1.0);
    push_text(
        &mut engine,
        fonts,
        &mut ops,
        &row.song,
        title_h * 0.42,
        true,
        TITLE_INK,
        TextAnchor::TopCenter(w / 2.0, title_y),
        Some(title_max_w),
    );
    push_text(
        &mut engine,
        fonts,
        &mut ops,
        &row.artist,
        title_h * 0.26,
        false,
        ARTIST_INK,
        TextAnchor::TopCenter(w / 2.0, title_y + title_h * 0.48),
        Some(title_max_w),
    );

    // Rank / average panel, top-right.
    let box_w = w * RANK_PANEL_WIDTH_RATIO;
    let box_h = title_h * RANK_PANEL_HEIGHT_RATIO;
    let box_x0 = w - pad - box_w;
    let box_y0 = pad + (title_h - box_h) / 2.0;
    ops.push(DrawOp::FillPath {
        path: rounded_rect_path(
            Rect::new(box_x0, box_y0, box_x0 + box_w, box_y0 + box_h),
            RANK_PANEL_RADIUS,
        ),
        color: RANK_PANEL_FILL,
    });
    if config.show_rank {
        push_text(
            &mut engine,
            fonts,
            &mut ops,
            &format!("#{}", row.rank),
            box_h * 0.44,
            true,
            RANK_INK,
            TextAnchor::MiddleCenter(box_x0 + box_w * 0.25, box_y0 + box_h * 0.25),
            None,
        );
    }
    if config.show_avg {
        push_text(
            &mut engine,
            fonts,
            &mut ops,
            "AVG",
            box_h * 0.22,
            true,
            AVG_LABEL_INK,
            TextAnchor::MiddleCenter(box_x0 + box_w * 0.72, box_y0 + box_h * 0.20),
            None,
        );
        push_text(
            &mut engine,
            fonts,
            &mut ops,
            &format!("{:.2}", row.average),
            box_h * 0.44,
            true,
            RANK_INK,
            TextAnchor::MiddleCenter(box_x0 + box_w * 0.72, box_y0 + box_h * 0.60),
            None,
        );
    }

    // Rails panel spanning the remaining vertical space.
    let rails_top = pad + title_h + gap;
    let rails_bottom = (h - pad).max(rails_top);
    ops.push(DrawOp::FillPath {
        path: rounded_rect_path(Rect::new(pad, rails_top, w - pad, rails_bottom), PANEL_RADIUS),
        color: RAILS_PANEL_FILL,
    });

    // Rails: left before right, each top to bottom.
    let (left, right) = split_rails(participants, config.rail_mode);
    let ctx = RailCtx {
        row,
        avatars,
        favorites,
        fonts,
        extremes: row_extremes(row, participants),
        chip,
        gap,
        star_opacity: config.star_opacity,
    };
    let start_y = rails_top + gap;
    if !left.is_empty() {
        layout_rail(
            &ctx,
            &mut engine,
            RailSide::Left,
            pad + gap,
            start_y,
            left,
            &mut ops,
        )?;
    }
    if !right.is_empty() {
        layout_rail(
            &ctx,
            &mut engine,
            RailSide::Right,
            w - pad - gap,
            start_y,
            right,
            &mut ops,
        )?;
    }

    tracing::debug!(ops = ops.len(), "composed card plan");
    Ok(CardPlan { canvas, ops })
}

fn clamp_dim(v: u32) -> u32 {
    v.clamp(1, u32::from(u16::MAX))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/card.rs"]
mod tests;
