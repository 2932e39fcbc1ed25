use std::f32::consts::TAU;

use egui::emath::Rot2;
use egui::epaint::{Mesh, Vertex};
use egui::{Color32, ColorImage, Painter, Pos2, Shape, Stroke, Vec2, pos2};
use log::warn;

use crate::document::Document;
use crate::element::{CIRCLE_SEGMENTS, Element};
use crate::selection::ghost_style;
use crate::state::{EditorContext, Preview};
use crate::surface::{BitmapKey, Surface};
use crate::texture_manager::TextureManager;

/// Repaints the two canvas layers.
///
/// The committed layer shows the document; the ghost layer shows the
/// selection highlight and the preview of the gesture in progress. Each
/// layer is cleared before it is drawn, and the committed layer is always
/// drawn first.
#[derive(Debug, Clone)]
pub struct Renderer {
    line_width: f32,
    ghost_alpha: f32,
    /// Outline color of the drag-select rectangle.
    area_color: Color32,
}

impl Renderer {
    pub fn new(line_width: f32, ghost_alpha: f32) -> Self {
        Self {
            line_width,
            ghost_alpha,
            area_color: Color32::from_rgb(30, 144, 255),
        }
    }

    /// Clear the committed layer and repaint every shape in paint order.
    pub fn render_committed(&self, surface: &mut dyn Surface, document: &Document) {
        surface.clear();
        surface.set_line_width(self.line_width);
        for element in document.elements() {
            element.render(surface);
        }
    }

    /// Clear the ghost layer and draw the highlight or gesture preview.
    pub fn render_ghost(&self, surface: &mut dyn Surface, editor: &EditorContext) {
        surface.clear();
        surface.set_line_width(self.line_width);

        match editor.preview() {
            Preview::None => editor.selection.ghost(surface, &editor.document, self.ghost_alpha),
            Preview::Shape(shape) => shape.render(surface),
            Preview::Path(points) => {
                trace_open_path(surface, &points);
                surface.set_stroke_color(editor.style.stroke);
                surface.stroke();
            }
            Preview::Area(area) => {
                editor.selection.ghost(surface, &editor.document, self.ghost_alpha);
                trace_open_path(
                    surface,
                    &[area.left_top(), area.right_top(), area.right_bottom(), area.left_bottom()],
                );
                surface.close_path();
                surface.set_stroke_color(self.area_color);
                surface.stroke();
            }
            Preview::Transformed(copies) => {
                for copy in copies {
                    copy.with_style(ghost_style(copy.style(), self.ghost_alpha)).render(surface);
                }
            }
        }
    }

    /// Both layers, committed first.
    pub fn render(&self, committed: &mut dyn Surface, ghost: &mut dyn Surface, editor: &EditorContext) {
        self.render_committed(committed, &editor.document);
        self.render_ghost(ghost, editor);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(2.0, 0.5)
    }
}

fn trace_open_path(surface: &mut dyn Surface, points: &[Pos2]) {
    surface.begin_path();
    if let Some((first, rest)) = points.split_first() {
        surface.move_to(*first);
        for p in rest {
            surface.line_to(*p);
        }
    }
}

/// [`Surface`] backed by an egui [`Painter`].
///
/// Paths are buffered in canvas coordinates and emitted as egui shapes on
/// `fill`/`stroke`. Fills use convex polygons, so concave outlines are
/// filled approximately. Bitmaps become textured meshes via the
/// [`TextureManager`].
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    textures: &'a mut TextureManager,
    /// Screen position of the canvas origin.
    origin: Vec2,
    /// Painted over the clip rect by `clear`; `None` leaves the layer transparent.
    background: Option<Color32>,
    path: Vec<Pos2>,
    closed: bool,
    stroke_color: Color32,
    fill_color: Color32,
    line_width: f32,
    offset: Vec2,
    rot: Rot2,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, textures: &'a mut TextureManager, origin: Pos2, background: Option<Color32>) -> Self {
        Self {
            painter,
            textures,
            origin: origin.to_vec2(),
            background,
            path: Vec::new(),
            closed: false,
            stroke_color: Color32::BLACK,
            fill_color: Color32::TRANSPARENT,
            line_width: 1.0,
            offset: Vec2::ZERO,
            rot: Rot2::IDENTITY,
        }
    }

    /// Canvas point under the current transform, in screen coordinates.
    fn to_screen(&self, p: Pos2) -> Pos2 {
        pos2(0.0, 0.0) + self.origin + self.offset + self.rot * p.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {
        if let Some(color) = self.background {
            self.painter.rect_filled(self.painter.clip_rect(), 0.0, color);
        }
        self.path.clear();
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.closed = false;
    }

    fn move_to(&mut self, p: Pos2) {
        self.path.clear();
        self.closed = false;
        self.path.push(self.to_screen(p));
    }

    fn line_to(&mut self, p: Pos2) {
        self.path.push(self.to_screen(p));
    }

    fn arc(&mut self, center: Pos2, radius: f32, start_angle: f32, end_angle: f32) {
        let sweep = end_angle - start_angle;
        let steps = ((sweep.abs() / TAU) * CIRCLE_SEGMENTS as f32 * 2.0).ceil().max(2.0) as usize;
        for i in 0..=steps {
            let t = start_angle + sweep * i as f32 / steps as f32;
            let p = pos2(center.x + radius * t.cos(), center.y + radius * t.sin());
            self.path.push(self.to_screen(p));
        }
    }

    fn close_path(&mut self) {
        self.closed = true;
    }

    fn set_stroke_color(&mut self, color: Color32) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color32) {
        self.fill_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn stroke(&mut self) {
        if self.path.len() < 2 {
            return;
        }
        let stroke = Stroke::new(self.line_width, self.stroke_color);
        let shape = if self.closed {
            Shape::closed_line(self.path.clone(), stroke)
        } else {
            Shape::line(self.path.clone(), stroke)
        };
        self.painter.add(shape);
    }

    fn fill(&mut self) {
        if self.path.len() < 3 || self.fill_color == Color32::TRANSPARENT {
            return;
        }
        self.painter
            .add(Shape::convex_polygon(self.path.clone(), self.fill_color, Stroke::NONE));
    }

    fn translate(&mut self, offset: Vec2) {
        self.offset += self.rot * offset;
    }

    fn rotate(&mut self, angle: f32) {
        self.rot = self.rot * Rot2::from_angle(angle);
    }

    fn reset_transform(&mut self) {
        self.offset = Vec2::ZERO;
        self.rot = Rot2::IDENTITY;
    }

    fn draw_bitmap(&mut self, key: BitmapKey, image: &ColorImage, quad: [Pos2; 4]) {
        let texture = match self.textures.get_or_create_texture(key, image, self.painter.ctx()) {
            Ok(texture) => texture,
            Err(err) => {
                warn!("Skipping bitmap of shape {}: {err}", key.shape_id);
                return;
            }
        };

        let uvs = [pos2(0.0, 0.0), pos2(1.0, 0.0), pos2(1.0, 1.0), pos2(0.0, 1.0)];
        let mut mesh = Mesh::with_texture(texture);
        for (corner, uv) in quad.iter().zip(uvs) {
            mesh.vertices.push(Vertex {
                pos: self.to_screen(*corner),
                uv,
                color: Color32::WHITE,
            });
        }
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        self.painter.add(Shape::mesh(mesh));
    }
}
