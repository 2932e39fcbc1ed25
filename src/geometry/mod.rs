//! Plain 2D geometry used by shapes, selection and transforms.
//!
//! Points are [`Pos2`] and vectors are [`Vec2`]; everything here is pure.

pub mod hit_testing;
pub mod hull;

use egui::{Pos2, Rect, Vec2, pos2};

pub use hit_testing::{circles_touch, point_in_polygon, polygons_overlap};
pub use hull::{Orientation, convex_hull, orientation};

/// Areas smaller than this are treated as zero (collinear input).
const AREA_EPSILON: f64 = 1e-9;

/// Area-weighted centroid of a closed polygon (shoelace formula).
///
/// Returns `None` when the points enclose no area, e.g. fewer than three
/// points or all points collinear.
pub fn centroid(points: &[Pos2]) -> Option<Pos2> {
    if points.len() < 3 {
        return None;
    }

    let mut area = 0.0_f64;
    let mut cx = 0.0_f64;
    let mut cy = 0.0_f64;

    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        let (px, py) = (p.x as f64, p.y as f64);
        let (qx, qy) = (q.x as f64, q.y as f64);
        let cross = px * qy - qx * py;
        area += cross;
        cx += (px + qx) * cross;
        cy += (py + qy) * cross;
    }

    area *= 0.5;
    if area.abs() < AREA_EPSILON {
        return None;
    }

    Some(pos2((cx / (6.0 * area)) as f32, (cy / (6.0 * area)) as f32))
}

/// Rotate a vector about the origin given the sine and cosine of the angle.
pub fn rotate_point(v: Vec2, sin: f32, cos: f32) -> Vec2 {
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Rotate `p` about `pivot` by `angle` radians.
pub fn rotate_about(p: Pos2, pivot: Pos2, angle: f32) -> Pos2 {
    let (sin, cos) = angle.sin_cos();
    pivot + rotate_point(p - pivot, sin, cos)
}

/// Axis-aligned bounds of a point set, `Rect::NOTHING` when empty.
pub fn bounds(points: &[Pos2]) -> Rect {
    points.iter().fold(Rect::NOTHING, |rect, p| rect.union(Rect::from_min_max(*p, *p)))
}

/// The four corners of the rectangle spanned by two opposite corners.
pub fn rect_polygon(a: Pos2, b: Pos2) -> Vec<Pos2> {
    let rect = Rect::from_two_pos(a, b);
    vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_centroid_of_square() {
        let square = rect_polygon(pos2(0.0, 0.0), pos2(10.0, 10.0));
        let c = centroid(&square).unwrap();
        assert!((c.x - 5.0).abs() < 1e-4);
        assert!((c.y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_centroid_ignores_winding() {
        let mut square = rect_polygon(pos2(2.0, 4.0), pos2(6.0, 8.0));
        square.reverse();
        let c = centroid(&square).unwrap();
        assert!((c.x - 4.0).abs() < 1e-4);
        assert!((c.y - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_centroid_of_collinear_points_is_none() {
        let line = [pos2(0.0, 0.0), pos2(1.0, 1.0), pos2(2.0, 2.0)];
        assert!(centroid(&line).is_none());
        assert!(centroid(&[pos2(0.0, 0.0), pos2(1.0, 0.0)]).is_none());
    }

    #[test]
    fn test_rotate_about_quarter_turn() {
        let p = rotate_about(pos2(2.0, 1.0), pos2(1.0, 1.0), FRAC_PI_2);
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounds() {
        let rect = bounds(&[pos2(3.0, -1.0), pos2(-2.0, 4.0), pos2(0.0, 0.0)]);
        assert_eq!(rect.min, pos2(-2.0, -1.0));
        assert_eq!(rect.max, pos2(3.0, 4.0));
        assert_eq!(bounds(&[]), Rect::NOTHING);
    }
}
