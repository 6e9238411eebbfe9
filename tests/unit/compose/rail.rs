use super::*;
use crate::{
    assets::store::PreparedImage,
    model::{RenderConfig, ScoreValue},
};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn row(submitter: &str, song: &str) -> ScoreRow {
    ScoreRow {
        song: song.to_string(),
        artist: "Artist".to_string(),
        submitter: submitter.to_string(),
        average: 5.0,
        rank: 1,
        scores: [("A".to_string(), ScoreValue::Number(5.0))]
            .into_iter()
            .collect(),
    }
}

fn ctx<'a>(
    row: &'a ScoreRow,
    avatars: &'a AvatarStore,
    favorites: &'a Favorites,
    fonts: &'a FontStore,
) -> RailCtx<'a> {
    let cfg = RenderConfig::default();
    RailCtx {
        row,
        avatars,
        favorites,
        fonts,
        extremes: crate::score::row_extremes(row, &names(&["A"])),
        chip: f64::from(cfg.chip_size),
        gap: f64::from(cfg.chip_gap),
        star_opacity: cfg.star_opacity,
    }
}

fn avatar_store_with(name: &str) -> AvatarStore {
    let mut store = AvatarStore::new();
    store.insert_decoded(
        name,
        PreparedImage {
            width: 8,
            height: 8,
            rgba8_premul: Arc::new(vec![255u8; 8 * 8 * 4]),
        },
    );
    store
}

#[test]
fn split_rails_is_left_heavy_and_order_preserving() {
    let people = names(&["A", "B", "C", "D", "E"]);
    let (left, right) = split_rails(&people, RailMode::TwoRail);
    assert_eq!(left, &["A", "B", "C"]);
    assert_eq!(right, &["D", "E"]);

    let (left, right) = split_rails(&people, RailMode::LeftOnly);
    assert_eq!(left.len(), 5);
    assert!(right.is_empty());

    let (left, right) = split_rails(&people, RailMode::RightOnly);
    assert!(left.is_empty());
    assert_eq!(right.len(), 5);
}

#[test]
fn split_rails_handles_small_counts() {
    let one = names(&["A"]);
    let (left, right) = split_rails(&one, RailMode::TwoRail);
    assert_eq!(left, &["A"]);
    assert!(right.is_empty());

    let none: Vec<String> = vec![];
    let (left, right) = split_rails(&none, RailMode::TwoRail);
    assert!(left.is_empty() && right.is_empty());
}

#[test]
fn placeholder_entry_emits_tile_then_chip_outline_then_fill() {
    let r = row("X", "Song");
    let avatars = AvatarStore::new();
    let favorites = Favorites::new();
    let fonts = FontStore::empty();
    let rail_ctx = ctx(&r, &avatars, &favorites, &fonts);

    let mut ops = Vec::new();
    let mut engine = TextLayoutEngine::new(&fonts);
    layout_rail(
        &rail_ctx,
        &mut engine,
        RailSide::Left,
        30.0,
        100.0,
        &names(&["A"]),
        &mut ops,
    )
    .unwrap();

    // Placeholder tile, chip outline, chip fill; text skipped without fonts.
    assert_eq!(
        ops.iter().map(DrawOp::kind).collect::<Vec<_>>(),
        vec!["fill", "fill", "fill"]
    );
    let DrawOp::FillPath { color, .. } = &ops[0] else {
        panic!("expected placeholder fill first");
    };
    assert_eq!(*color, Rgba8::new(50, 50, 50, 255));
}

#[test]
fn favorite_star_is_drawn_first_and_respects_opacity() {
    let r = row("X", "Song");
    let avatars = AvatarStore::new();
    let favorites: Favorites = [("A".to_string(), "Song".to_string())]
        .into_iter()
        .collect();
    let fonts = FontStore::empty();
    let rail_ctx = ctx(&r, &avatars, &favorites, &fonts);

    let mut ops = Vec::new();
    let mut engine = TextLayoutEngine::new(&fonts);
    layout_rail(
        &rail_ctx,
        &mut engine,
        RailSide::Left,
        30.0,
        100.0,
        &names(&["A"]),
        &mut ops,
    )
    .unwrap();

    assert_eq!(ops.len(), 4);
    let DrawOp::FillPath { color, .. } = &ops[0] else {
        panic!("expected star fill first");
    };
    // 0.35 star opacity over full yellow.
    assert_eq!(*color, Rgba8::new(255, 255, 0, 89));
}

#[test]
fn favorite_star_requires_exact_song_match() {
    let r = row("X", "Song");
    let avatars = AvatarStore::new();
    let favorites: Favorites = [("A".to_string(), "Another Song".to_string())]
        .into_iter()
        .collect();
    let fonts = FontStore::empty();
    let rail_ctx = ctx(&r, &avatars, &favorites, &fonts);

    let mut ops = Vec::new();
    let mut engine = TextLayoutEngine::new(&fonts);
    layout_rail(
        &rail_ctx,
        &mut engine,
        RailSide::Left,
        30.0,
        100.0,
        &names(&["A"]),
        &mut ops,
    )
    .unwrap();
    assert_eq!(ops.len(), 3);
}

#[test]
fn avatar_entries_blit_a_chip_sized_tile() {
    let r = row("X", "Song");
    let avatars = avatar_store_with("A");
    let favorites = Favorites::new();
    let fonts = FontStore::empty();
    let rail_ctx = ctx(&r, &avatars, &favorites, &fonts);

    let mut ops = Vec::new();
    let mut engine = TextLayoutEngine::new(&fonts);
    layout_rail(
        &rail_ctx,
        &mut engine,
        RailSide::Left,
        30.0,
        100.0,
        &names(&["A"]),
        &mut ops,
    )
    .unwrap();

    let DrawOp::Image { image, origin } = &ops[0] else {
        panic!("expected avatar blit first");
    };
    assert_eq!((image.width, image.height), (64, 64));
    assert_eq!((origin.x, origin.y), (30.0, 100.0));
}

#[test]
fn vertical_cursor_advances_by_chip_name_band_and_gap() {
    let r = row("X", "Song");
    let avatars = {
        let mut store = avatar_store_with("A");
        store.insert_decoded(
            "B",
            PreparedImage {
                width: 8,
                height: 8,
                rgba8_premul: Arc::new(vec![255u8; 8 * 8 * 4]),
            },
        );
        store
    };
    let favorites = Favorites::new();
    let fonts = FontStore::empty();
    let rail_ctx = ctx(&r, &avatars, &favorites, &fonts);

    let mut ops = Vec::new();
    let mut engine = TextLayoutEngine::new(&fonts);
    layout_rail(
        &rail_ctx,
        &mut engine,
        RailSide::Left,
        30.0,
        100.0,
        &names(&["A", "B"]),
        &mut ops,
    )
    .unwrap();

    let origins: Vec<f64> = ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Image { origin, .. } => Some(origin.y),
            _ => None,
        })
        .collect();
    // chip 64 + floor(0.6 * 64) = 38 + gap 10.
    assert_eq!(origins, vec![100.0, 212.0]);
}

#[test]
fn right_rail_places_score_box_left_of_avatar() {
    use kurbo::Shape;

    let r = row("X", "Song");
    let avatars = avatar_store_with("A");
    let favorites = Favorites::new();
    let fonts = FontStore::empty();
    let rail_ctx = ctx(&r, &avatars, &favorites, &fonts);

    let mut ops = Vec::new();
    let mut engine = TextLayoutEngine::new(&fonts);
    layout_rail(
        &rail_ctx,
        &mut engine,
        RailSide::Right,
        970.0,
        100.0,
        &names(&["A"]),
        &mut ops,
    )
    .unwrap();

    let DrawOp::Image { origin, .. } = &ops[0] else {
        panic!("expected avatar blit first");
    };
    assert_eq!(origin.x, 970.0 - 64.0);

    let DrawOp::FillPath { path, .. } = &ops[1] else {
        panic!("expected chip outline second");
    };
    let bbox = path.bounding_box();
    // Box anchored 1.2 chips left of the avatar's left edge.
    assert!((bbox.min_x() - (906.0 - 76.8)).abs() < 0.5);
    assert!(bbox.max_x() < origin.x);
}
