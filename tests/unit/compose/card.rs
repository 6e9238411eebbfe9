use super::*;
use crate::{
    assets::store::PreparedImage,
    model::{RailMode, ScoreValue},
};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn row() -> ScoreRow {
    ScoreRow {
        song: "Golden Hour".to_string(),
        artist: "JVKE".to_string(),
        submitter: "Nick".to_string(),
        average: 7.25,
        rank: 2,
        scores: [
            ("Nick".to_string(), ScoreValue::Number(8.0)),
            ("Jiho".to_string(), ScoreValue::Number(5.0)),
            ("Ana".to_string(), ScoreValue::Absent),
        ]
        .into_iter()
        .collect(),
    }
}

fn avatar(width: u32, height: u32) -> PreparedImage {
    PreparedImage {
        width,
        height,
        rgba8_premul: std::sync::Arc::new(vec![255u8; (width * height * 4) as usize]),
    }
}

#[test]
fn empty_card_is_three_panels_in_order() {
    let plan = compose_card(
        &row(),
        &[],
        &AvatarStore::new(),
        &Favorites::new(),
        &FontStore::empty(),
        &RenderConfig::default(),
    )
    .unwrap();

    // Title panel, rank/average panel, rails panel.
    assert_eq!(plan.op_kinds(), vec!["fill", "fill", "fill"]);
    assert_eq!(
        (plan.canvas.width, plan.canvas.height),
        (1000, 500)
    );
}

#[test]
fn panel_fills_use_the_reference_palette() {
    let plan = compose_card(
        &row(),
        &[],
        &AvatarStore::new(),
        &Favorites::new(),
        &FontStore::empty(),
        &RenderConfig::default(),
    )
    .unwrap();

    let colors: Vec<Rgba8> = plan
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::FillPath { color, .. } => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(
        colors,
        vec![
            Rgba8::new(0, 0, 0, 170),
            Rgba8::new(255, 255, 255, 30),
            Rgba8::new(0, 0, 0, 150),
        ]
    );
}

#[test]
fn two_rail_mode_splits_avatars_left_heavy() {
    let participants = names(&["Nick", "Jiho", "Ana", "Sam", "Lee"]);
    let mut avatars = AvatarStore::new();
    for name in &participants {
        avatars.insert_decoded(name, avatar(8, 8));
    }

    let cfg = RenderConfig::default();
    let plan = compose_card(
        &row(),
        &participants,
        &avatars,
        &Favorites::new(),
        &FontStore::empty(),
        &cfg,
    )
    .unwrap();

    let xs: Vec<f64> = plan
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Image { origin, .. } => Some(origin.x),
            _ => None,
        })
        .collect();
    assert_eq!(xs.len(), 5);
    // Left rail anchored at pad + gap; right rail avatars sit one chip left
    // of the right anchor. Left rail ops come first.
    assert_eq!(&xs[..3], &[30.0, 30.0, 30.0]);
    assert_eq!(&xs[3..], &[906.0, 906.0]);
}

#[test]
fn favorite_toggle_adds_and_removes_exactly_one_op() {
    let participants = names(&["Nick", "Jiho"]);
    let base = compose_card(
        &row(),
        &participants,
        &AvatarStore::new(),
        &Favorites::new(),
        &FontStore::empty(),
        &RenderConfig::default(),
    )
    .unwrap();

    let favorites: Favorites = [("Jiho".to_string(), "Golden Hour".to_string())]
        .into_iter()
        .collect();
    let starred = compose_card(
        &row(),
        &participants,
        &AvatarStore::new(),
        &favorites,
        &FontStore::empty(),
        &RenderConfig::default(),
    )
    .unwrap();
    assert_eq!(starred.ops.len(), base.ops.len() + 1);

    let other: Favorites = [("Jiho".to_string(), "Some Other Song".to_string())]
        .into_iter()
        .collect();
    let unstarred = compose_card(
        &row(),
        &participants,
        &AvatarStore::new(),
        &other,
        &FontStore::empty(),
        &RenderConfig::default(),
    )
    .unwrap();
    assert_eq!(unstarred.ops.len(), base.ops.len());
}

#[test]
fn compose_is_deterministic() {
    let participants = names(&["Nick", "Jiho", "Ana"]);
    let mut avatars = AvatarStore::new();
    avatars.insert_decoded("Jiho", avatar(10, 6));

    let a = compose_card(
        &row(),
        &participants,
        &avatars,
        &Favorites::new(),
        &FontStore::empty(),
        &RenderConfig::default(),
    )
    .unwrap();
    let b = compose_card(
        &row(),
        &participants,
        &avatars,
        &Favorites::new(),
        &FontStore::empty(),
        &RenderConfig::default(),
    )
    .unwrap();

    assert_eq!(a.op_kinds(), b.op_kinds());
    assert_eq!(format!("{:?}", a.ops), format!("{:?}", b.ops));
}

#[test]
fn missing_required_field_fails_fast() {
    let mut bad = row();
    bad.song = String::new();
    let err = compose_card(
        &bad,
        &[],
        &AvatarStore::new(),
        &Favorites::new(),
        &FontStore::empty(),
        &RenderConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, crate::CardError::Validation(_)));
}

#[test]
fn degenerate_dimensions_clamp_instead_of_failing() {
    let cfg = RenderConfig {
        card_w: 0,
        card_h: 80_000,
        ..RenderConfig::default()
    };
    let plan = compose_card(
        &row(),
        &[],
        &AvatarStore::new(),
        &Favorites::new(),
        &FontStore::empty(),
        &cfg,
    )
    .unwrap();
    assert_eq!(plan.canvas.width, 1);
    assert_eq!(plan.canvas.height, u32::from(u16::MAX));
}

#[test]
fn overflowing_participants_clip_without_error() {
    let participants: Vec<String> = (0..40).map(|i| format!("P{i}")).collect();
    let plan = compose_card(
        &row(),
        &participants,
        &AvatarStore::new(),
        &Favorites::new(),
        &FontStore::empty(),
        &RenderConfig::default(),
    )
    .unwrap();
    // 3 panels + 3 fills per placeholder entry, everyone laid out even
    // though most entries land past the canvas bottom.
    assert_eq!(plan.ops.len(), 3 + participants.len() * 3);
    assert_eq!(plan.canvas.height, 500);
}

#[test]
fn single_rail_modes_send_everyone_to_one_side() {
    let participants = names(&["Nick", "Jiho", "Ana"]);
    let mut avatars = AvatarStore::new();
    for name in &participants {
        avatars.insert_decoded(name, avatar(8, 8));
    }

    let cfg = RenderConfig {
        rail_mode: RailMode::RightOnly,
        ..RenderConfig::default()
    };
    let plan = compose_card(
        &row(),
        &participants,
        &avatars,
        &Favorites::new(),
        &FontStore::empty(),
        &cfg,
    )
    .unwrap();

    let xs: Vec<f64> = plan
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Image { origin, .. } => Some(origin.x),
            _ => None,
        })
        .collect();
    assert_eq!(xs, vec![906.0, 906.0, 906.0]);
}
