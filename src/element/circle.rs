use std::f32::consts::TAU;

use egui::{Pos2, Vec2, pos2};

use super::Element;
use crate::element::common::{self, AxisLock, Style};
use crate::error::ShapeError;
use crate::surface::Surface;

/// Circle centered on `x, y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    id: usize,
    x: f32,
    y: f32,
    r: f32,
    rot: f32,
    style: Style,
}

impl Circle {
    pub fn new(id: usize, center: Pos2, radius: f32, style: Style) -> Self {
        Self {
            id,
            x: center.x,
            y: center.y,
            r: radius,
            rot: 0.0,
            style,
        }
    }

    /// Build from a drag starting at the center and ending on the rim.
    pub fn from_drag(id: usize, center: Pos2, rim: Pos2, style: Style, min_size: f32) -> Result<Self, ShapeError> {
        let radius = center.distance(rim);
        common::validate_size(radius, radius, min_size)?;
        Ok(Self::new(id, center, radius, style))
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = id;
    }
}

impl Element for Circle {
    fn id(&self) -> usize {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "circle"
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
        self.r
    }

    fn rotation(&self) -> f32 {
        self.rot
    }

    fn polygon(&self) -> Vec<Pos2> {
        common::circle_outline(self.center(), self.r, self.rot)
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.begin_path();
        surface.arc(self.center(), self.r, 0.0, TAU);
        surface.close_path();
        self.style.paint(surface);
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    fn rotate_by(&mut self, angle: f32) {
        self.rot = common::wrap_angle(self.rot + angle);
    }

    /// Circles stay circular: the scaled axis' factor applies to the radius.
    fn scale_by(&mut self, factors: Vec2) {
        let s = if factors.x != 1.0 { factors.x } else { factors.y };
        self.r *= s;
    }

    fn min_scale(&self, _lock: AxisLock) -> f32 {
        1.0 / self.r
    }

    // Exact distance test, consistent with `touching`.
    fn contains(&self, p: Pos2) -> bool {
        self.center().distance(p) <= self.r
    }
}
