use super::*;
use crate::geometry::circle_path;

#[test]
fn op_kinds_tag_each_variant() {
    let fill = DrawOp::FillPath {
        path: circle_path(Point::new(0.0, 0.0), 1.0),
        color: Rgba8::new(1, 2, 3, 4),
    };
    let image = DrawOp::Image {
        image: Arc::new(PreparedImage {
            width: 1,
            height: 1,
            rgba8_premul: Arc::new(vec![0, 0, 0, 0]),
        }),
        origin: Point::new(2.0, 3.0),
    };

    assert_eq!(fill.kind(), "fill");
    assert_eq!(image.kind(), "image");

    let plan = CardPlan {
        canvas: Canvas {
            width: 10,
            height: 10,
        },
        ops: vec![fill, image],
    };
    assert_eq!(plan.op_kinds(), vec!["fill", "image"]);
}

#[test]
fn debug_output_stays_compact() {
    let fill = DrawOp::FillPath {
        path: circle_path(Point::new(0.0, 0.0), 1.0),
        color: Rgba8::new(9, 9, 9, 9),
    };
    let rendered = format!("{fill:?}");
    assert!(rendered.contains("FillPath"));
    assert!(rendered.contains("elements"));
}
