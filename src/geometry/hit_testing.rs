use egui::{Pos2, Vec2};

/// Crossing-number point-in-polygon test.
///
/// Points exactly on an edge or vertex may go either way.
pub fn point_in_polygon(polygon: &[Pos2], p: Pos2) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Separating-axis overlap test between two polygons.
///
/// Exact for convex polygons; for concave outlines the result is the overlap
/// of their edge-normal projections, which may report false positives.
pub fn polygons_overlap(a: &[Pos2], b: &[Pos2]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    for polygon in [a, b] {
        for i in 0..polygon.len() {
            let edge = polygon[(i + 1) % polygon.len()] - polygon[i];
            let axis = Vec2::new(-edge.y, edge.x);
            if axis == Vec2::ZERO {
                continue;
            }

            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            if max_a < min_b || max_b < min_a {
                return false;
            }
        }
    }
    true
}

/// Fast circle approximation test used before the exact polygon checks.
pub fn circles_touch(center_a: Pos2, radius_a: f32, center_b: Pos2, radius_b: f32) -> bool {
    center_a.distance(center_b) <= radius_a + radius_b
}

fn project(polygon: &[Pos2], axis: Vec2) -> (f32, f32) {
    polygon.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), p| {
        let d = p.to_vec2().dot(axis);
        (min.min(d), max.max(d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rect_polygon;
    use egui::pos2;

    fn triangle(offset: Vec2) -> Vec<Pos2> {
        vec![pos2(0.0, 0.0) + offset, pos2(10.0, 0.0) + offset, pos2(0.0, 10.0) + offset]
    }

    #[test]
    fn test_point_in_polygon() {
        let square = rect_polygon(pos2(0.0, 0.0), pos2(10.0, 10.0));
        assert!(point_in_polygon(&square, pos2(5.0, 5.0)));
        assert!(!point_in_polygon(&square, pos2(15.0, 5.0)));
        assert!(!point_in_polygon(&square, pos2(-1.0, -1.0)));

        let tri = triangle(Vec2::ZERO);
        assert!(point_in_polygon(&tri, pos2(2.0, 2.0)));
        assert!(!point_in_polygon(&tri, pos2(8.0, 8.0)));
    }

    #[test]
    fn test_point_in_degenerate_polygon() {
        assert!(!point_in_polygon(&[], pos2(0.0, 0.0)));
        assert!(!point_in_polygon(&[pos2(0.0, 0.0), pos2(1.0, 1.0)], pos2(0.5, 0.5)));
    }

    #[test]
    fn test_overlap_and_separation() {
        let square = rect_polygon(pos2(0.0, 0.0), pos2(10.0, 10.0));
        let near = rect_polygon(pos2(5.0, 5.0), pos2(15.0, 15.0));
        let far = rect_polygon(pos2(20.0, 20.0), pos2(30.0, 30.0));
        assert!(polygons_overlap(&square, &near));
        assert!(!polygons_overlap(&square, &far));

        // Bounding boxes overlap, but the diagonal edge separates them.
        let tri = triangle(Vec2::ZERO);
        let corner = rect_polygon(pos2(8.0, 8.0), pos2(12.0, 12.0));
        assert!(!polygons_overlap(&tri, &corner));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let shapes = [
            rect_polygon(pos2(0.0, 0.0), pos2(10.0, 10.0)),
            rect_polygon(pos2(9.0, -3.0), pos2(20.0, 2.0)),
            triangle(Vec2::new(4.0, 4.0)),
            triangle(Vec2::new(30.0, 0.0)),
            vec![pos2(5.0, 5.0)],
        ];
        for a in &shapes {
            for b in &shapes {
                assert_eq!(polygons_overlap(a, b), polygons_overlap(b, a));
            }
        }
    }

    #[test]
    fn test_contained_polygon_overlaps() {
        let outer = rect_polygon(pos2(0.0, 0.0), pos2(100.0, 100.0));
        let inner = rect_polygon(pos2(40.0, 40.0), pos2(60.0, 60.0));
        assert!(polygons_overlap(&outer, &inner));
        assert!(polygons_overlap(&inner, &outer));
    }

    #[test]
    fn test_circles_touch() {
        assert!(circles_touch(pos2(0.0, 0.0), 5.0, pos2(8.0, 0.0), 3.0));
        assert!(!circles_touch(pos2(0.0, 0.0), 5.0, pos2(9.0, 0.0), 3.0));
    }
}
