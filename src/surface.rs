use egui::{Color32, ColorImage, Pos2, Vec2};

/// Identifies a bitmap for texture caching: the owning shape and the
/// version of its pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitmapKey {
    pub shape_id: usize,
    pub version: u64,
}

/// An opaque 2D drawing context.
///
/// Mirrors a canvas-style API: a current path is built with `move_to` /
/// `line_to` / `arc` and then filled or stroked with the current colors.
/// `translate` and `rotate` compose onto the current transform until
/// `reset_transform`.
pub trait Surface {
    fn clear(&mut self);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Pos2);
    fn line_to(&mut self, p: Pos2);
    fn arc(&mut self, center: Pos2, radius: f32, start_angle: f32, end_angle: f32);
    fn close_path(&mut self);

    fn set_stroke_color(&mut self, color: Color32);
    fn set_fill_color(&mut self, color: Color32);
    fn set_line_width(&mut self, width: f32);
    fn stroke(&mut self);
    fn fill(&mut self);

    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
    fn reset_transform(&mut self);

    /// Blit `image` stretched into the quad given in clockwise corner order
    /// starting at the image's top-left.
    fn draw_bitmap(&mut self, key: BitmapKey, image: &ColorImage, quad: [Pos2; 4]);
}

/// Trace a closed polygon as the current path.
pub fn trace_polygon(surface: &mut dyn Surface, points: &[Pos2]) {
    surface.begin_path();
    if let Some((first, rest)) = points.split_first() {
        surface.move_to(*first);
        for p in rest {
            surface.line_to(*p);
        }
    }
    surface.close_path();
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Clear,
    BeginPath,
    MoveTo(Pos2),
    LineTo(Pos2),
    Arc { center: Pos2, radius: f32, start_angle: f32, end_angle: f32 },
    ClosePath,
    SetStrokeColor(Color32),
    SetFillColor(Color32),
    SetLineWidth(f32),
    Stroke,
    Fill,
    Translate(Vec2),
    Rotate(f32),
    ResetTransform,
    DrawBitmap { key: BitmapKey, size: [usize; 2], quad: [Pos2; 4] },
}

/// A surface that only records calls, for headless rendering and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Operations recorded since the last `clear`.
    pub fn visible_ops(&self) -> &[SurfaceOp] {
        match self.ops.iter().rposition(|op| *op == SurfaceOp::Clear) {
            Some(i) => &self.ops[i + 1..],
            None => &self.ops,
        }
    }

    pub fn count(&self, op: &SurfaceOp) -> usize {
        self.ops.iter().filter(|o| *o == op).count()
    }

    /// Stroke colors in effect at each visible `stroke` call.
    pub fn stroke_colors(&self) -> Vec<Color32> {
        let mut current = Color32::BLACK;
        let mut colors = Vec::new();
        for op in self.visible_ops() {
            match op {
                SurfaceOp::SetStrokeColor(c) => current = *c,
                SurfaceOp::Stroke => colors.push(current),
                _ => {}
            }
        }
        colors
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }

    fn move_to(&mut self, p: Pos2) {
        self.ops.push(SurfaceOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Pos2) {
        self.ops.push(SurfaceOp::LineTo(p));
    }

    fn arc(&mut self, center: Pos2, radius: f32, start_angle: f32, end_angle: f32) {
        self.ops.push(SurfaceOp::Arc { center, radius, start_angle, end_angle });
    }

    fn close_path(&mut self) {
        self.ops.push(SurfaceOp::ClosePath);
    }

    fn set_stroke_color(&mut self, color: Color32) {
        self.ops.push(SurfaceOp::SetStrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color32) {
        self.ops.push(SurfaceOp::SetFillColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.ops.push(SurfaceOp::SetLineWidth(width));
    }

    fn stroke(&mut self) {
        self.ops.push(SurfaceOp::Stroke);
    }

    fn fill(&mut self) {
        self.ops.push(SurfaceOp::Fill);
    }

    fn translate(&mut self, offset: Vec2) {
        self.ops.push(SurfaceOp::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.ops.push(SurfaceOp::Rotate(angle));
    }

    fn reset_transform(&mut self) {
        self.ops.push(SurfaceOp::ResetTransform);
    }

    fn draw_bitmap(&mut self, key: BitmapKey, image: &ColorImage, quad: [Pos2; 4]) {
        self.ops.push(SurfaceOp::DrawBitmap { key, size: image.size, quad });
    }
}
