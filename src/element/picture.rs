use egui::{Color32, ColorImage, Pos2, Rect, Vec2, pos2};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use log::info;

use super::Element;
use crate::element::common::{self, AxisLock, Style};
use crate::error::{PictureError, ShapeError};
use crate::surface::{BitmapKey, Surface, trace_polygon};

/// Bitmap shown in a (possibly rotated and scaled) quad.
///
/// The picture owns an offscreen buffer of `dw x dh` pixels. Loaded images
/// are resampled into that buffer, so loading never changes the on-canvas
/// size of the shape.
#[derive(Clone)]
pub struct Picture {
    id: usize,
    x: f32,
    y: f32,
    /// Quad corners relative to the centroid: top-left, top-right,
    /// bottom-right, bottom-left of the bitmap.
    points: Vec<Vec2>,
    dw: usize,
    dh: usize,
    bitmap: ColorImage,
    has_bitmap: bool,
    bitmap_version: u64,
    rot: f32,
    style: Style,
}

// Custom Debug implementation so the pixel buffer isn't dumped
impl std::fmt::Debug for Picture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picture")
            .field("id", &self.id)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("points", &self.points)
            .field("buffer", &[self.dw, self.dh])
            .field("has_bitmap", &self.has_bitmap)
            .field("bitmap_version", &self.bitmap_version)
            .field("rot", &self.rot)
            .finish()
    }
}

impl Picture {
    /// Create an empty picture covering the rectangle spanned by `a` and `b`.
    pub fn from_corners(id: usize, a: Pos2, b: Pos2, style: Style, min_size: f32) -> Result<Self, ShapeError> {
        let rect = Rect::from_two_pos(a, b);
        common::validate_size(rect.width(), rect.height(), min_size)?;

        let (hw, hh) = (rect.width() / 2.0, rect.height() / 2.0);
        let dw = rect.width().round().max(1.0) as usize;
        let dh = rect.height().round().max(1.0) as usize;
        let center = rect.center();

        Ok(Self {
            id,
            x: center.x,
            y: center.y,
            points: vec![
                Vec2::new(-hw, -hh),
                Vec2::new(hw, -hh),
                Vec2::new(hw, hh),
                Vec2::new(-hw, hh),
            ],
            dw,
            dh,
            bitmap: ColorImage::new([dw, dh], Color32::TRANSPARENT),
            has_bitmap: false,
            bitmap_version: 0,
            rot: 0.0,
            style,
        })
    }

    /// Decode an encoded image (PNG, JPEG, ...) and draw it into the buffer.
    pub fn load_bitmap(&mut self, bytes: &[u8]) -> Result<(), PictureError> {
        let decoded = image::load_from_memory(bytes)?;
        self.draw_image(&decoded.to_rgba8())
    }

    /// Resample `source` to the buffer size and replace the current pixels.
    pub fn draw_image(&mut self, source: &RgbaImage) -> Result<(), PictureError> {
        if source.width() == 0 || source.height() == 0 {
            return Err(PictureError::EmptyBitmap);
        }

        let resized = imageops::resize(source, self.dw as u32, self.dh as u32, FilterType::Triangle);
        self.bitmap = ColorImage::from_rgba_unmultiplied([self.dw, self.dh], resized.as_raw());
        self.has_bitmap = true;
        self.bitmap_version += 1;

        info!(
            "Picture {} loaded {}x{} bitmap into {}x{} buffer",
            self.id,
            source.width(),
            source.height(),
            self.dw,
            self.dh
        );
        Ok(())
    }

    pub fn bitmap(&self) -> &ColorImage {
        &self.bitmap
    }

    pub fn has_bitmap(&self) -> bool {
        self.has_bitmap
    }

    pub fn bitmap_key(&self) -> BitmapKey {
        BitmapKey {
            shape_id: self.id,
            version: self.bitmap_version,
        }
    }

    /// Offscreen buffer size in pixels.
    pub fn buffer_size(&self) -> [usize; 2] {
        [self.dw, self.dh]
    }

    fn quad(&self) -> [Pos2; 4] {
        let c = self.center();
        [c + self.points[0], c + self.points[1], c + self.points[2], c + self.points[3]]
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = id;
    }
}

impl Element for Picture {
    fn id(&self) -> usize {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "picture"
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
        let quad = self.quad();
        if self.has_bitmap {
            surface.draw_bitmap(self.bitmap_key(), &self.bitmap, quad);
            trace_polygon(surface, &quad);
            surface.set_stroke_color(self.style.stroke);
            surface.stroke();
        } else {
            // Placeholder until a bitmap arrives
            trace_polygon(surface, &quad);
            self.style.paint(surface);
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SurfaceOp};
    use image::{DynamicImage, ImageFormat, Rgba};
    use std::io::Cursor;

    fn picture() -> Picture {
        Picture::from_corners(7, pos2(10.0, 20.0), pos2(50.0, 40.0), Style::default(), 2.0).unwrap()
    }

    fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_buffer_matches_initial_size() {
        let p = picture();
        assert_eq!(p.buffer_size(), [40, 20]);
        assert_eq!(p.center(), pos2(30.0, 30.0));
        assert!(!p.has_bitmap());
    }

    #[test]
    fn test_loading_keeps_on_canvas_size() {
        let mut p = picture();
        let before = p.rect();
        p.load_bitmap(&png_bytes(400, 100, [255, 0, 0, 255])).unwrap();

        assert!(p.has_bitmap());
        assert_eq!(p.rect(), before);
        assert_eq!(p.bitmap().size, [40, 20]);
        assert_eq!(p.bitmap().pixels[0], Color32::from_rgb(255, 0, 0));
        assert_eq!(p.bitmap_key().version, 1);
    }

    #[test]
    fn test_garbage_bytes_keep_previous_bitmap() {
        let mut p = picture();
        assert!(matches!(p.load_bitmap(b"not an image"), Err(PictureError::Decode(_))));
        assert!(!p.has_bitmap());
        assert_eq!(p.bitmap_key().version, 0);
    }

    #[test]
    fn test_render_blits_into_quad() {
        let mut p = picture();
        p.load_bitmap(&png_bytes(2, 2, [0, 0, 255, 255])).unwrap();
        let mut surface = RecordingSurface::new();
        p.render(&mut surface);

        match &surface.ops()[0] {
            SurfaceOp::DrawBitmap { key, size, quad } => {
                assert_eq!(key.shape_id, 7);
                assert_eq!(*size, [40, 20]);
                assert_eq!(quad[0], pos2(10.0, 20.0));
                assert_eq!(quad[2], pos2(50.0, 40.0));
            }
            other => panic!("expected bitmap blit, got {other:?}"),
        }
    }

    #[test]
    fn test_scaling_does_not_touch_buffer() {
        let mut p = picture();
        p.scale(Vec2::new(100.0, 0.0), AxisLock::X);
        assert_eq!(p.buffer_size(), [40, 20]);
        assert!((p.rect().width() - 80.0).abs() < 1e-4);
        assert!((p.rect().height() - 20.0).abs() < 1e-4);
    }
}
