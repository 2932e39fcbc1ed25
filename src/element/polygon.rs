use egui::{Pos2, Vec2, pos2};

use super::Element;
use crate::element::common::{self, AxisLock, Style};
use crate::error::ShapeError;
use crate::surface::{Surface, trace_polygon};

/// Closed polygon stored as vertex offsets from its centroid.
///
/// Rotation is applied to the offsets directly; `rot` only records the
/// accumulated angle.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    id: usize,
    x: f32,
    y: f32,
    points: Vec<Vec2>,
    rot: f32,
    style: Style,
}

impl Polygon {
    /// Build from absolute vertices. Needs at least three points enclosing
    /// a non-zero area.
    pub fn from_points(id: usize, points: &[Pos2], style: Style) -> Result<Self, ShapeError> {
        if points.len() < 3 {
            return Err(ShapeError::Degenerate("polygon needs at least three points"));
        }
        let (center, offsets) = common::centered(points)?;
        Ok(Self {
            id,
            x: center.x,
            y: center.y,
            points: offsets,
            rot: 0.0,
            style,
        })
    }

    /// Vertex offsets relative to the centroid.
    pub fn offsets(&self) -> &[Vec2] {
        &self.points
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = id;
    }
}

impl Element for Polygon {
    fn id(&self) -> usize {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "polygon"
    }

    fn style(&self) -> Style {
        self.style
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn position(&self) -> Pos2 {
        pos2(self.x, self.y)
    }

    fn center(&self) -> Pos2 {
        pos2(self.x, self.y)
    }

    fn radius(&self) -> f32 {
        common::offsets_radius(&self.points)
    }

    fn rotation(&self) -> f32 {
        self.rot
    }

    fn polygon(&self) -> Vec<Pos2> {
        common::absolute_points(self.center(), &self.points)
    }

    fn render(&self, surface: &mut dyn Surface) {
        trace_polygon(surface, &self.polygon());
        self.style.paint(surface);
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    fn rotate_by(&mut self, angle: f32) {
        common::rotate_offsets(&mut self.points, angle);
        self.rot = common::wrap_angle(self.rot + angle);
    }

    fn scale_by(&mut self, factors: Vec2) {
        common::scale_offsets(&mut self.points, factors);
    }

    fn min_scale(&self, lock: AxisLock) -> f32 {
        common::offsets_min_scale(&self.points, lock)
    }
}
