use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};
use log::{info, warn};

/// An image file dropped onto the window.
#[derive(Debug, Clone)]
pub struct DroppedImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Collects image files dropped onto the window so their bytes can be
/// handed to picture shapes.
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take any newly dropped files from the UI context.
    /// Returns true if there is something to process.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files.extend(i.raw.dropped_files.iter().cloned());
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Drain the queue, returning the bytes of every readable image.
    pub fn take_images(&mut self) -> Vec<DroppedImage> {
        let mut images = Vec::new();
        for file in self.dropped_files.drain(..) {
            let name = file_name(&file);
            if !is_image_file(&file) {
                warn!("Dropped file is not a supported type: {name}");
                continue;
            }
            if let Some(bytes) = read_bytes(&file, &name) {
                info!("Dropped image {name} ({} bytes)", bytes.len());
                images.push(DroppedImage { name, bytes });
            }
        }
        images
    }

    /// Darken the window while files are dragged over it.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop an image onto a picture:\n".to_owned();
            for file in &i.raw.hovered_files {
                match &file.path {
                    Some(path) => text += &format!("\n{}", path.display()),
                    None => text += "\n(Path not available)",
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

fn file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = match &file.path {
        Some(path) => path.to_string_lossy().to_lowercase(),
        None => file.name.to_lowercase(),
    };
    [".png", ".jpg", ".jpeg", ".gif", ".webp", ".bmp"]
        .iter()
        .any(|ext| name.ends_with(ext))
}

fn read_bytes(file: &egui::DroppedFile, name: &str) -> Option<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Some(bytes.to_vec());
    }
    let path = file.path.as_ref()?;
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            warn!("Failed to read image file {name}: {err}");
            None
        }
    }
}
