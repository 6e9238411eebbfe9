//! Trackcard renders one illustrative "score card" image per row of a song
//! ranking dataset.
//!
//! Each card is a background-free (alpha-transparent) RGBA raster composed
//! from a title panel, a rank/average panel and up to two side rails of
//! participant avatar + score chips, color-coded by extremal value, with an
//! optional star marker behind a participant's chip when the row is their
//! declared favorite song.
//!
//! # Pipeline overview
//!
//! 1. **Classify**: [`classify_row`] tags each participant (submitter
//!    override, then row maximum, then row minimum, then neutral).
//! 2. **Compose**: [`compose_card`] turns a [`ScoreRow`] plus prepared
//!    stores into a backend-agnostic [`CardPlan`] of ordered draw ops.
//! 3. **Render**: [`CpuRenderer`] (or the one-shot [`render_card`])
//!    rasterizes the plan into a premultiplied RGBA8 [`CardFrame`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: composing and rendering are pure and
//!   stable for a given input; identical inputs produce identical pixels.
//! - **No IO in the engine**: avatar decoding and font registration are
//!   front-loaded into [`AvatarStore`] and [`FontStore`] snapshots, which
//!   concurrent renders share read-only.
//! - **Premultiplied RGBA8** end-to-end; [`CardFrame::to_straight_alpha`]
//!   converts for PNG encoders.
//! - **Best-effort rendering**: a row missing a required field is the only
//!   fatal error. Undecodable avatars fall back to placeholder tiles,
//!   non-numeric scores render as a dash, and missing fonts skip text
//!   layers rather than failing the card.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod foundation;
mod geometry;
mod model;
mod render;
mod score;
mod text;

pub use assets::crop::circle_crop;
pub use assets::decode::decode_image;
pub use assets::store::{AvatarStore, PreparedImage};
pub use compose::card::compose_card;
pub use compose::plan::{CardPlan, DrawOp};
pub use compose::rail::{RailSide, split_rails};
pub use foundation::core::{BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{CardError, CardResult};
pub use geometry::{circle_path, rounded_rect_path, star_path};
pub use model::{Favorites, RailMode, RenderConfig, ScoreRow, ScoreValue, assign_ranks};
pub use render::cpu::CpuRenderer;
pub use render::frame::CardFrame;
pub use render::pipeline::{RenderThreading, card_filename, render_card, render_cards};
pub use score::{
    RowExtremes, ScoreClass, WHOLE_NUMBER_EPSILON, classify, classify_row, format_score,
    row_extremes,
};
pub use text::{FontStore, TextBrushRgba8, TextLayoutEngine, layout_size};
