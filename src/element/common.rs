use std::f32::consts::TAU;
use std::sync::atomic::{AtomicUsize, Ordering};

use egui::{Color32, Pos2, Vec2, pos2};
use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::geometry;
use crate::surface::Surface;

// Common constants for all shape types
pub const MIN_ELEMENT_SIZE: f32 = 2.0;
/// Horizontal drag distance (px) that rotates a shape by one radian.
pub const ROTATE_DIVISOR: f32 = 100.0;
/// Horizontal drag distance (px) that adds 1.0 to the scale factor.
pub const SCALE_DIVISOR: f32 = 100.0;
/// Vertices used when a circle is projected to a polygon.
pub const CIRCLE_SEGMENTS: usize = 24;

// Single static counter for all shapes; ids are never reused.
static NEXT_SHAPE_ID: AtomicUsize = AtomicUsize::new(1);

pub fn next_shape_id() -> usize {
    NEXT_SHAPE_ID.fetch_add(1, Ordering::SeqCst)
}

/// Stroke and fill colors of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Color32,
    pub fill: Color32,
}

impl Style {
    pub fn new(stroke: Color32, fill: Color32) -> Self {
        Self { stroke, fill }
    }

    /// Fill the current path, then stroke it.
    pub(crate) fn paint(&self, surface: &mut dyn Surface) {
        surface.set_fill_color(self.fill);
        surface.fill();
        surface.set_stroke_color(self.stroke);
        surface.stroke();
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Color32::BLACK, Color32::TRANSPARENT)
    }
}

/// Restricts a scale gesture to one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisLock {
    #[default]
    None,
    X,
    Y,
}

impl AxisLock {
    /// Pressing the same axis twice releases the lock.
    pub fn toggled(self, axis: AxisLock) -> AxisLock {
        if self == axis { AxisLock::None } else { axis }
    }
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

/// Rotation increment for a drag vector; only the x component counts.
pub fn rotation_angle(delta: Vec2) -> f32 {
    delta.x / ROTATE_DIVISOR
}

/// Per-axis scale factors for a drag vector.
///
/// The factor is `1 + Δx / SCALE_DIVISOR`, clamped from below by `min_bound`
/// so a shape can never collapse or invert. The locked-out axis stays at 1.
pub fn scale_factors(delta: Vec2, lock: AxisLock, min_bound: f32) -> Vec2 {
    let s = (1.0 + delta.x / SCALE_DIVISOR).max(min_bound);
    match lock {
        AxisLock::None => Vec2::splat(s),
        AxisLock::X => Vec2::new(s, 1.0),
        AxisLock::Y => Vec2::new(1.0, s),
    }
}

/// Rejects shapes whose width or height is below `min`.
pub(crate) fn validate_size(width: f32, height: f32, min: f32) -> Result<(), ShapeError> {
    if width < min || height < min {
        Err(ShapeError::TooSmall { min, width, height })
    } else {
        Ok(())
    }
}

// Offset-list helpers shared by shapes that store vertices relative to their centroid.

pub(crate) fn rotate_offsets(offsets: &mut [Vec2], angle: f32) {
    let (sin, cos) = angle.sin_cos();
    for offset in offsets {
        *offset = geometry::rotate_point(*offset, sin, cos);
    }
}

pub(crate) fn scale_offsets(offsets: &mut [Vec2], factors: Vec2) {
    for offset in offsets {
        offset.x *= factors.x;
        offset.y *= factors.y;
    }
}

/// `1 / max |coordinate|` over the axes being scaled, so the farthest vertex
/// never ends up closer than one unit to the centroid.
pub(crate) fn offsets_min_scale(offsets: &[Vec2], lock: AxisLock) -> f32 {
    let extent = offsets.iter().fold(0.0_f32, |m, o| match lock {
        AxisLock::None => m.max(o.x.abs()).max(o.y.abs()),
        AxisLock::X => m.max(o.x.abs()),
        AxisLock::Y => m.max(o.y.abs()),
    });
    if extent > 0.0 { 1.0 / extent } else { 1.0 }
}

pub(crate) fn offsets_radius(offsets: &[Vec2]) -> f32 {
    offsets.iter().fold(0.0_f32, |m, o| m.max(o.length()))
}

pub(crate) fn absolute_points(origin: Pos2, offsets: &[Vec2]) -> Vec<Pos2> {
    offsets.iter().map(|o| origin + *o).collect()
}

/// Split absolute points into their centroid and offsets relative to it.
pub(crate) fn centered(points: &[Pos2]) -> Result<(Pos2, Vec<Vec2>), ShapeError> {
    let center = geometry::centroid(points).ok_or(ShapeError::Degenerate("outline encloses no area"))?;
    Ok((center, points.iter().map(|p| *p - center).collect()))
}

pub(crate) fn circle_outline(center: Pos2, radius: f32, start_angle: f32) -> Vec<Pos2> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let t = start_angle + i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
            pos2(center.x + radius * t.cos(), center.y + radius * t.sin())
        })
        .collect()
}
