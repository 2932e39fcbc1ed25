use egui::{Pos2, Rect, Vec2, pos2};

use super::Element;
use crate::element::common::{self, AxisLock, Style};
use crate::error::ShapeError;
use crate::geometry;
use crate::surface::{Surface, trace_polygon};

/// Axis-aligned rectangle rotated about its own center.
///
/// `x, y` is the top-left corner of the unrotated rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    id: usize,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    rot: f32,
    style: Style,
}

impl Square {
    pub fn new(id: usize, origin: Pos2, size: Vec2, style: Style) -> Self {
        Self {
            id,
            x: origin.x,
            y: origin.y,
            w: size.x,
            h: size.y,
            rot: 0.0,
            style,
        }
    }

    /// Build from the two opposite corners of a drag.
    pub fn from_corners(id: usize, a: Pos2, b: Pos2, style: Style, min_size: f32) -> Result<Self, ShapeError> {
        let rect = Rect::from_two_pos(a, b);
        common::validate_size(rect.width(), rect.height(), min_size)?;
        Ok(Self::new(id, rect.min, rect.size(), style))
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    fn local_corners(&self) -> [Pos2; 4] {
        let (hw, hh) = (self.w / 2.0, self.h / 2.0);
        [pos2(-hw, -hh), pos2(hw, -hh), pos2(hw, hh), pos2(-hw, hh)]
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = id;
    }
}

impl Element for Square {
    fn id(&self) -> usize {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "square"
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
        pos2(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    fn radius(&self) -> f32 {
        self.size().length() / 2.0
    }

    fn rotation(&self) -> f32 {
        self.rot
    }

    fn polygon(&self) -> Vec<Pos2> {
        let center = self.center();
        let (sin, cos) = self.rot.sin_cos();
        self.local_corners()
            .iter()
            .map(|c| center + geometry::rotate_point(c.to_vec2(), sin, cos))
            .collect()
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.translate(self.center().to_vec2());
        surface.rotate(self.rot);
        trace_polygon(surface, &self.local_corners());
        self.style.paint(surface);
        surface.reset_transform();
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    fn rotate_by(&mut self, angle: f32) {
        self.rot = common::wrap_angle(self.rot + angle);
    }

    fn scale_by(&mut self, factors: Vec2) {
        let center = self.center();
        self.w *= factors.x;
        self.h *= factors.y;
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    fn min_scale(&self, lock: AxisLock) -> f32 {
        match lock {
            AxisLock::None => (1.0 / self.w).max(1.0 / self.h),
            AxisLock::X => 1.0 / self.w,
            AxisLock::Y => 1.0 / self.h,
        }
    }
}
