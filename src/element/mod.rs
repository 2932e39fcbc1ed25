use egui::{Pos2, Rect, Vec2};

// Re-export concrete implementations
mod common;
pub mod circle;
pub mod picture;
pub mod polygon;
pub mod square;

pub use circle::Circle;
pub use common::{
    AxisLock, CIRCLE_SEGMENTS, MIN_ELEMENT_SIZE, ROTATE_DIVISOR, SCALE_DIVISOR, Style, next_shape_id,
    rotation_angle, scale_factors, wrap_angle,
};
pub use picture::Picture;
pub use polygon::Polygon;
pub use square::Square;

use crate::geometry;
use crate::surface::Surface;

/// Common trait that all shapes must implement
pub trait Element {
    /// Get the unique identifier for this shape
    fn id(&self) -> usize;

    /// Get the shape type as a string
    fn element_type(&self) -> &'static str;

    fn style(&self) -> Style;

    fn set_style(&mut self, style: Style);

    /// Logical origin of the shape: top-left corner for squares, centroid
    /// for everything else.
    fn position(&self) -> Pos2;

    /// True geometric center, used as the rotation pivot and for radius tests.
    fn center(&self) -> Pos2;

    /// Radius of a circle around `center` that encloses the shape.
    fn radius(&self) -> f32;

    /// Accumulated rotation in radians, wrapped to `[0, 2π)`.
    fn rotation(&self) -> f32;

    /// Absolute outline, derived from the current position, rotation and payload.
    fn polygon(&self) -> Vec<Pos2>;

    /// Draw the shape with its own style
    fn render(&self, surface: &mut dyn Surface);

    /// Translate the shape by the given delta
    fn translate(&mut self, delta: Vec2);

    /// Rotate about `center` by `angle` radians.
    fn rotate_by(&mut self, angle: f32);

    /// Scale about `center`. Factors must be positive.
    fn scale_by(&mut self, factors: Vec2);

    /// Smallest uniform factor that keeps the shape at least one unit large
    /// along the scaled axes.
    fn min_scale(&self, lock: AxisLock) -> f32;

    /// Axis-aligned bounds of the outline
    fn rect(&self) -> Rect {
        geometry::bounds(&self.polygon())
    }

    /// Test if the shape contains the given position
    fn contains(&self, p: Pos2) -> bool {
        geometry::point_in_polygon(&self.polygon(), p)
    }

    /// Circle-approximation test against another center/radius pair.
    fn touching(&self, center: Pos2, radius: f32) -> bool {
        geometry::circles_touch(self.center(), self.radius(), center, radius)
    }

    /// Rotate for a drag vector. Rotation ignores the axis lock.
    fn rotate(&mut self, delta: Vec2, _lock: AxisLock) {
        self.rotate_by(rotation_angle(delta));
    }

    /// Scale for a drag vector, never below `min_scale`.
    fn scale(&mut self, delta: Vec2, lock: AxisLock) {
        let factors = scale_factors(delta, lock, self.min_scale(lock));
        self.scale_by(factors);
    }
}

/// Enumeration of all shape types on the canvas
#[derive(Debug, Clone)]
pub enum ElementType {
    Square(Square),
    Circle(Circle),
    Polygon(Polygon),
    Picture(Picture),
}

impl ElementType {
    fn as_element(&self) -> &dyn Element {
        match self {
            ElementType::Square(s) => s,
            ElementType::Circle(c) => c,
            ElementType::Polygon(p) => p,
            ElementType::Picture(p) => p,
        }
    }

    fn as_element_mut(&mut self) -> &mut dyn Element {
        match self {
            ElementType::Square(s) => s,
            ElementType::Circle(c) => c,
            ElementType::Polygon(p) => p,
            ElementType::Picture(p) => p,
        }
    }

    /// Deep copy under a new id, shifted by `offset`.
    pub fn duplicate(&self, id: usize, offset: Vec2) -> ElementType {
        let mut copy = self.clone();
        match &mut copy {
            ElementType::Square(s) => s.set_id(id),
            ElementType::Circle(c) => c.set_id(id),
            ElementType::Polygon(p) => p.set_id(id),
            ElementType::Picture(p) => p.set_id(id),
        }
        copy.translate(offset);
        copy
    }

    /// Copy of this shape drawn with a different style; the original is untouched.
    pub fn with_style(&self, style: Style) -> ElementType {
        let mut copy = self.clone();
        copy.set_style(style);
        copy
    }

    pub fn as_picture_mut(&mut self) -> Option<&mut Picture> {
        match self {
            ElementType::Picture(p) => Some(p),
            _ => None,
        }
    }
}

impl Element for ElementType {
    fn id(&self) -> usize {
        self.as_element().id()
    }

    fn element_type(&self) -> &'static str {
        self.as_element().element_type()
    }

    fn style(&self) -> Style {
        self.as_element().style()
    }

    fn set_style(&mut self, style: Style) {
        self.as_element_mut().set_style(style)
    }

    fn position(&self) -> Pos2 {
        self.as_element().position()
    }

    fn center(&self) -> Pos2 {
        self.as_element().center()
    }

    fn radius(&self) -> f32 {
        self.as_element().radius()
    }

    fn rotation(&self) -> f32 {
        self.as_element().rotation()
    }

    fn polygon(&self) -> Vec<Pos2> {
        self.as_element().polygon()
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.as_element().render(surface)
    }

    fn translate(&mut self, delta: Vec2) {
        self.as_element_mut().translate(delta)
    }

    fn rotate_by(&mut self, angle: f32) {
        self.as_element_mut().rotate_by(angle)
    }

    fn scale_by(&mut self, factors: Vec2) {
        self.as_element_mut().scale_by(factors)
    }

    fn min_scale(&self, lock: AxisLock) -> f32 {
        self.as_element().min_scale(lock)
    }

    fn contains(&self, p: Pos2) -> bool {
        self.as_element().contains(p)
    }
}

/// Factory functions for creating shapes from gesture endpoints
pub mod factory {
    use super::*;
    use crate::error::ShapeError;

    /// Square spanned by a drag from `start` to `end`.
    pub fn create_square(start: Pos2, end: Pos2, style: Style, min_size: f32) -> Result<ElementType, ShapeError> {
        Square::from_corners(next_shape_id(), start, end, style, min_size).map(ElementType::Square)
    }

    /// Circle centered on `start` passing through `end`.
    pub fn create_circle(start: Pos2, end: Pos2, style: Style, min_size: f32) -> Result<ElementType, ShapeError> {
        Circle::from_drag(next_shape_id(), start, end, style, min_size).map(ElementType::Circle)
    }

    /// Polygon through the given absolute vertices.
    pub fn create_polygon(points: &[Pos2], style: Style, min_size: f32) -> Result<ElementType, ShapeError> {
        let rect = geometry::bounds(points);
        if rect.width() < min_size && rect.height() < min_size {
            return Err(ShapeError::TooSmall {
                min: min_size,
                width: rect.width(),
                height: rect.height(),
            });
        }
        Polygon::from_points(next_shape_id(), points, style).map(ElementType::Polygon)
    }

    /// Empty picture frame spanned by a drag.
    pub fn create_picture(start: Pos2, end: Pos2, style: Style, min_size: f32) -> Result<ElementType, ShapeError> {
        Picture::from_corners(next_shape_id(), start, end, style, min_size).map(ElementType::Picture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn all_shapes() -> Vec<ElementType> {
        let style = Style::default();
        vec![
            factory::create_square(pos2(50.0, 50.0), pos2(150.0, 120.0), style, 2.0).unwrap(),
            factory::create_circle(pos2(200.0, 200.0), pos2(230.0, 200.0), style, 2.0).unwrap(),
            factory::create_polygon(
                &[pos2(0.0, 0.0), pos2(40.0, 10.0), pos2(35.0, 50.0), pos2(5.0, 30.0)],
                style,
                2.0,
            )
            .unwrap(),
            factory::create_picture(pos2(300.0, 10.0), pos2(360.0, 50.0), style, 2.0).unwrap(),
        ]
    }

    fn assert_close(a: &[Pos2], b: &[Pos2]) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b) {
            assert!(p.distance(*q) < 1e-2, "{p:?} != {q:?}");
        }
    }

    #[test]
    fn test_translate_moves_outline() {
        for mut shape in all_shapes() {
            let delta = Vec2::new(-17.5, 42.0);
            let expected: Vec<Pos2> = shape.polygon().iter().map(|p| *p + delta).collect();
            shape.translate(delta);
            assert_close(&shape.polygon(), &expected);
        }
    }

    #[test]
    fn test_rotate_round_trip_restores_outline() {
        for mut shape in all_shapes() {
            let original = shape.polygon();
            for theta in [0.3_f32, 2.0, -1.1, 7.0] {
                let drag = Vec2::new(theta * ROTATE_DIVISOR, 0.0);
                shape.rotate(drag, AxisLock::None);
                shape.rotate(-drag, AxisLock::None);
                assert_close(&shape.polygon(), &original);
            }
        }
    }

    #[test]
    fn test_scale_never_collapses() {
        for lock in [AxisLock::None, AxisLock::X, AxisLock::Y] {
            for mut shape in all_shapes() {
                for dx in [-1.0e9_f32, -500.0, -99.0, -100.0, 0.0, 250.0] {
                    shape.scale(Vec2::new(dx, 0.0), lock);
                    let rect = shape.rect();
                    assert!(rect.width() > 0.0 && rect.height() > 0.0, "{shape:?} collapsed");
                    assert!(shape.radius() > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_duplicate_is_independent() {
        for shape in all_shapes() {
            let id = next_shape_id();
            let mut copy = shape.duplicate(id, Vec2::ZERO);
            assert_eq!(copy.id(), id);
            assert_ne!(copy.id(), shape.id());
            assert_close(&copy.polygon(), &shape.polygon());

            copy.rotate_by(0.5);
            copy.scale_by(Vec2::new(2.0, 3.0));
            if !matches!(shape, ElementType::Circle(_)) {
                assert_ne!(copy.polygon(), shape.polygon());
            }
            assert_close(&shape.polygon(), &all_shapes_like(&shape).polygon());
        }
    }

    // Fresh copy of the same geometry, for comparing against after mutating a clone.
    fn all_shapes_like(shape: &ElementType) -> ElementType {
        all_shapes()
            .into_iter()
            .find(|s| s.element_type() == shape.element_type())
            .unwrap()
    }

    #[test]
    fn test_with_style_leaves_original() {
        let shape = &all_shapes()[0];
        let ghost = shape.with_style(Style::new(egui::Color32::RED, egui::Color32::GREEN));
        assert_eq!(ghost.style().stroke, egui::Color32::RED);
        assert_eq!(shape.style(), Style::default());
        assert_eq!(ghost.id(), shape.id());
    }

    #[test]
    fn test_ids_are_distinct() {
        let shapes = all_shapes();
        for (i, a) in shapes.iter().enumerate() {
            for b in &shapes[i + 1..] {
                assert_ne!(a.id(), b.id());
            }
        }
    }
}
