//! Pure path generators for the card's decorative shapes.
//!
//! Everything here returns a [`BezPath`] so the composer stays independent
//! of any particular raster backend.

use kurbo::{Circle, Point, Rect, RoundedRect, Shape};

use crate::foundation::core::BezPath;

const PATH_TOLERANCE: f64 = 0.1;

/// Regular star polygon with `points` outer vertices.
///
/// Vertices alternate between `r_outer` and `r_outer * inner_ratio` starting
/// from the top (the first outer vertex points straight up) and proceeding
/// clockwise. The returned path is closed.
pub fn star_path(center: Point, r_outer: f64, points: usize, inner_ratio: f64) -> BezPath {
    let mut path = BezPath::new();
    if points == 0 || r_outer <= 0.0 {
        return path;
    }

    let step = std::f64::consts::PI / points as f64;
    let r_inner = r_outer * inner_ratio;
    for i in 0..(points * 2) {
        let angle = -std::f64::consts::FRAC_PI_2 + i as f64 * step;
        let r = if i % 2 == 0 { r_outer } else { r_inner };
        let p = Point::new(center.x + r * angle.cos(), center.y + r * angle.sin());
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

/// Rounded rectangle as a filled path.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    RoundedRect::from_rect(rect, radius).to_path(PATH_TOLERANCE)
}

/// Circle as a filled path.
pub fn circle_path(center: Point, radius: f64) -> BezPath {
    Circle::new(center, radius).to_path(PATH_TOLERANCE)
}

#[cfg(test)]
#[path = "../tests/unit/geometry.rs"]
mod tests;
