use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::element::{AxisLock, Element, ElementType, Polygon, rotation_angle, scale_factors};
use crate::geometry;

/// The three transform operations a gesture can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformKind {
    Move,
    Rotate,
    Scale,
}

impl TransformKind {
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Move => "move",
            TransformKind::Rotate => "rotate",
            TransformKind::Scale => "scale",
        }
    }
}

/// A move/rotate/scale driven by a drag vector.
///
/// The same value is used for the preview and for the commit, so what the
/// ghost layer shows is exactly what gets applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTransform {
    pub kind: TransformKind,
    pub delta: Vec2,
    pub lock: AxisLock,
}

impl GestureTransform {
    pub fn new(kind: TransformKind, start: Pos2, end: Pos2, lock: AxisLock) -> Self {
        Self {
            kind,
            delta: end - start,
            lock,
        }
    }

    /// Transform one shape about its own center.
    pub fn apply_to(&self, shape: &mut ElementType) {
        match self.kind {
            TransformKind::Move => shape.translate(self.delta),
            TransformKind::Rotate => shape.rotate(self.delta, self.lock),
            TransformKind::Scale => shape.scale(self.delta, self.lock),
        }
    }

    /// Transform several shapes rigidly about the center of `pivot`.
    ///
    /// Every shape receives the same angle or factors, and its center is
    /// carried along with the group, so distances between shapes change
    /// only by the scale factor.
    pub fn apply_grouped(&self, shapes: &mut [&mut ElementType], pivot: &Polygon) {
        let origin = pivot.center();
        match self.kind {
            TransformKind::Move => {
                for shape in shapes.iter_mut() {
                    shape.translate(self.delta);
                }
            }
            TransformKind::Rotate => {
                let angle = rotation_angle(self.delta);
                for shape in shapes.iter_mut() {
                    let center = shape.center();
                    shape.translate(geometry::rotate_about(center, origin, angle) - center);
                    shape.rotate_by(angle);
                }
            }
            TransformKind::Scale => {
                let factors = self.group_factors(shapes, pivot);
                for shape in shapes.iter_mut() {
                    let center = shape.center();
                    let offset = center - origin;
                    let target = origin + Vec2::new(offset.x * factors.x, offset.y * factors.y);
                    shape.translate(target - center);
                    shape.scale_by(factors);
                }
            }
        }
    }

    // The bound is the largest of the pivot's and every member's own bound,
    // so no member collapses even when the hull is much larger than it.
    fn group_factors(&self, shapes: &[&mut ElementType], pivot: &Polygon) -> Vec2 {
        let bound = shapes
            .iter()
            .map(|s| s.min_scale(self.lock))
            .fold(pivot.min_scale(self.lock), f32::max);
        scale_factors(self.delta, self.lock, bound)
    }

    /// Transformed copies of `shapes` for the ghost layer. The inputs are
    /// never touched.
    pub fn project(&self, shapes: &[&ElementType], pivot: Option<&Polygon>) -> Vec<ElementType> {
        let mut copies: Vec<ElementType> = shapes.iter().map(|s| (*s).clone()).collect();
        match pivot {
            Some(pivot) if copies.len() > 1 => {
                let mut refs: Vec<&mut ElementType> = copies.iter_mut().collect();
                self.apply_grouped(&mut refs, pivot);
            }
            _ => {
                for copy in copies.iter_mut() {
                    self.apply_to(copy);
                }
            }
        }
        copies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Style, factory};
    use egui::pos2;

    fn square(a: (f32, f32), b: (f32, f32)) -> ElementType {
        factory::create_square(pos2(a.0, a.1), pos2(b.0, b.1), Style::default(), 2.0).unwrap()
    }

    fn pivot_for(shapes: &[&ElementType]) -> Polygon {
        let outline: Vec<Pos2> = shapes.iter().flat_map(|s| s.polygon()).collect();
        Polygon::from_points(0, &geometry::convex_hull(&outline), Style::default()).unwrap()
    }

    #[test]
    fn test_single_move() {
        let mut s = square((0.0, 0.0), (10.0, 10.0));
        GestureTransform::new(TransformKind::Move, pos2(5.0, 5.0), pos2(35.0, 5.0), AxisLock::None).apply_to(&mut s);
        assert_eq!(s.position(), pos2(30.0, 0.0));
    }

    #[test]
    fn test_group_rotation_is_rigid() {
        let a = square((0.0, 0.0), (10.0, 10.0));
        let b = square((100.0, 0.0), (120.0, 20.0));
        let c = factory::create_circle(pos2(50.0, 80.0), pos2(60.0, 80.0), Style::default(), 2.0).unwrap();
        let before = [a.center(), b.center(), c.center()];
        let pivot = pivot_for(&[&a, &b, &c]);

        let t = GestureTransform::new(TransformKind::Rotate, pos2(0.0, 0.0), pos2(60.0, 0.0), AxisLock::None);
        let moved = t.project(&[&a, &b, &c], Some(&pivot));
        let after: Vec<Pos2> = moved.iter().map(|s| s.center()).collect();

        for i in 0..3 {
            for j in i + 1..3 {
                let d0 = before[i].distance(before[j]);
                let d1 = after[i].distance(after[j]);
                assert!((d0 - d1).abs() < 1e-2, "distance {i}-{j} changed: {d0} -> {d1}");
            }
            let r0 = before[i].distance(pivot.center());
            let r1 = after[i].distance(pivot.center());
            assert!((r0 - r1).abs() < 1e-2);
        }
        assert!((moved[0].rotation() - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_project_leaves_originals() {
        let a = square((0.0, 0.0), (10.0, 10.0));
        let original = a.polygon();
        let t = GestureTransform::new(TransformKind::Scale, pos2(0.0, 0.0), pos2(100.0, 0.0), AxisLock::None);
        let copies = t.project(&[&a], None);
        assert_eq!(a.polygon(), original);
        assert!((copies[0].rect().width() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_group_scale_spreads_from_pivot() {
        let a = square((0.0, 0.0), (10.0, 10.0));
        let b = square((90.0, 0.0), (100.0, 10.0));
        let pivot = pivot_for(&[&a, &b]);
        let t = GestureTransform::new(TransformKind::Scale, pos2(0.0, 0.0), pos2(100.0, 0.0), AxisLock::X);
        let scaled = t.project(&[&a, &b], Some(&pivot));

        assert!((scaled[0].center().x - -40.0).abs() < 1e-3);
        assert!((scaled[1].center().x - 140.0).abs() < 1e-3);
        assert!((scaled[0].center().y - 5.0).abs() < 1e-3);
        assert!((scaled[0].rect().width() - 20.0).abs() < 1e-3);
        assert!((scaled[0].rect().height() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_group_scale_never_collapses_members() {
        let a = square((0.0, 0.0), (4.0, 4.0));
        let b = square((500.0, 500.0), (600.0, 600.0));
        let pivot = pivot_for(&[&a, &b]);
        let t = GestureTransform::new(TransformKind::Scale, pos2(0.0, 0.0), pos2(-1.0e6, 0.0), AxisLock::None);
        for shape in t.project(&[&a, &b], Some(&pivot)) {
            assert!(shape.rect().width() > 0.0 && shape.rect().height() > 0.0);
        }
    }
}
