use egui::Pos2;

/// Turn direction of the path `p -> q -> r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Classify the turn `p -> q -> r` by the sign of the cross product.
pub fn orientation(p: Pos2, q: Pos2, r: Pos2) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val == 0.0 {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Convex hull by Jarvis march (gift wrapping).
///
/// Returns hull vertices taken from `points`, starting at the leftmost point.
/// Degenerate input never loops: duplicates are dropped, fewer than three
/// distinct points are returned as-is, and collinear input yields its two
/// extreme points.
pub fn convex_hull(points: &[Pos2]) -> Vec<Pos2> {
    let mut distinct: Vec<Pos2> = Vec::with_capacity(points.len());
    for p in points {
        if !distinct.contains(p) {
            distinct.push(*p);
        }
    }

    let n = distinct.len();
    if n < 3 {
        return distinct;
    }

    let leftmost = (0..n)
        .min_by(|&a, &b| {
            let (pa, pb) = (distinct[a], distinct[b]);
            pa.x.total_cmp(&pb.x).then(pa.y.total_cmp(&pb.y))
        })
        .unwrap_or(0);

    let mut hull = Vec::new();
    let mut p = leftmost;

    // A hull can't have more vertices than the input; the bound guarantees
    // termination even if float rounding confuses the orientation test.
    for _ in 0..n {
        hull.push(distinct[p]);

        let mut q = (p + 1) % n;
        for i in 0..n {
            if i == p {
                continue;
            }
            match orientation(distinct[p], distinct[i], distinct[q]) {
                Orientation::CounterClockwise => q = i,
                Orientation::Collinear => {
                    // Prefer the farthest point so collinear edge points are skipped.
                    if distinct[p].distance_sq(distinct[i]) > distinct[p].distance_sq(distinct[q]) {
                        q = i;
                    }
                }
                Orientation::Clockwise => {}
            }
        }

        p = q;
        if p == leftmost {
            break;
        }
    }

    hull
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    /// True if `p` lies inside or on the boundary of the convex polygon.
    fn inside_or_on(hull: &[Pos2], p: Pos2) -> bool {
        let mut saw_cw = false;
        let mut saw_ccw = false;
        for i in 0..hull.len() {
            let a = hull[i];
            let b = hull[(i + 1) % hull.len()];
            let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
            if cross > 1e-4 {
                saw_ccw = true;
            } else if cross < -1e-4 {
                saw_cw = true;
            }
        }
        !(saw_cw && saw_ccw)
    }

    #[test]
    fn test_orientation() {
        let (p, q) = (pos2(0.0, 0.0), pos2(1.0, 0.0));
        assert_eq!(orientation(p, q, pos2(2.0, 0.0)), Orientation::Collinear);
        assert_ne!(orientation(p, q, pos2(1.0, 1.0)), orientation(p, q, pos2(1.0, -1.0)));
    }

    #[test]
    fn test_hull_of_square_with_interior_points() {
        let points = vec![
            pos2(0.0, 0.0),
            pos2(5.0, 5.0),
            pos2(10.0, 0.0),
            pos2(3.0, 7.0),
            pos2(10.0, 10.0),
            pos2(0.0, 10.0),
            pos2(5.0, 0.0), // on an edge
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert_eq!(hull[0], pos2(0.0, 0.0));
        for corner in [pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 10.0), pos2(0.0, 10.0)] {
            assert!(hull.contains(&corner));
        }
        for p in &points {
            assert!(inside_or_on(&hull, *p), "{p:?} outside hull");
        }
    }

    #[test]
    fn test_hull_is_subsequence_of_input() {
        let points: Vec<Pos2> = (0..40)
            .map(|i| {
                let t = i as f32 * 0.7;
                pos2(t.cos() * (10.0 + i as f32), t.sin() * (5.0 + (i % 7) as f32))
            })
            .collect();
        let hull = convex_hull(&points);
        assert!(hull.len() >= 3);
        for v in &hull {
            assert!(points.contains(v));
        }
        for p in &points {
            assert!(inside_or_on(&hull, *p), "{p:?} outside hull");
        }
    }

    #[test]
    fn test_degenerate_inputs_terminate() {
        assert!(convex_hull(&[]).is_empty());
        assert_eq!(convex_hull(&[pos2(1.0, 1.0)]), vec![pos2(1.0, 1.0)]);
        assert_eq!(convex_hull(&[pos2(1.0, 1.0), pos2(1.0, 1.0)]), vec![pos2(1.0, 1.0)]);
        assert_eq!(convex_hull(&[pos2(0.0, 0.0), pos2(3.0, 4.0)]).len(), 2);
    }

    #[test]
    fn test_collinear_points_yield_extremes() {
        let line = [pos2(2.0, 2.0), pos2(0.0, 0.0), pos2(1.0, 1.0), pos2(3.0, 3.0)];
        let hull = convex_hull(&line);
        assert_eq!(hull.len(), 2);
        assert!(hull.contains(&pos2(0.0, 0.0)));
        assert!(hull.contains(&pos2(3.0, 3.0)));
    }
}
