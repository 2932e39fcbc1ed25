use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use thiserror::Error;

use crate::surface::BitmapKey;

/// Errors that can occur during texture upload
#[derive(Error, Debug, PartialEq)]
pub enum TextureError {
    #[error("Invalid texture dimensions {0:?}")]
    InvalidDimensions([usize; 2]),
}

/// GPU textures for picture bitmaps, keyed by shape id and bitmap version.
///
/// A new version of a shape's bitmap replaces the old texture; textures of
/// shapes that no longer exist are dropped by [`TextureManager::retain_shapes`].
pub struct TextureManager {
    texture_cache: HashMap<BitmapKey, TextureHandle>,
    /// Frame in which each texture was last drawn
    last_used: HashMap<BitmapKey, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

/// Pictures whose textures stay resident at once.
pub const DEFAULT_TEXTURE_CACHE: usize = 64;

impl Default for TextureManager {
    fn default() -> Self {
        Self::new(DEFAULT_TEXTURE_CACHE)
    }
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Texture for `key`, uploading `image` on a cache miss.
    pub fn get_or_create_texture(
        &mut self,
        key: BitmapKey,
        image: &ColorImage,
        ctx: &Context,
    ) -> Result<TextureId, TextureError> {
        if let Some(handle) = self.texture_cache.get(&key) {
            self.last_used.insert(key, self.current_frame);
            return Ok(handle.id());
        }

        if image.size[0] == 0 || image.size[1] == 0 {
            return Err(TextureError::InvalidDimensions(image.size));
        }

        // Older versions of this bitmap are never drawn again
        self.invalidate_shape(key.shape_id);
        self.prune_cache_if_needed();

        let name = format!("picture_{}_v{}", key.shape_id, key.version);
        let handle = ctx.load_texture(name, image.clone(), TextureOptions::LINEAR);
        let id = handle.id();
        self.texture_cache.insert(key, handle);
        self.last_used.insert(key, self.current_frame);
        Ok(id)
    }

    /// Drop every texture belonging to `shape_id`.
    pub fn invalidate_shape(&mut self, shape_id: usize) {
        self.texture_cache.retain(|key, _| key.shape_id != shape_id);
        self.last_used.retain(|key, _| key.shape_id != shape_id);
    }

    /// Keep only textures whose shape passes `is_live`.
    pub fn retain_shapes(&mut self, is_live: impl Fn(usize) -> bool) {
        self.texture_cache.retain(|key, _| is_live(key.shape_id));
        self.last_used.retain(|key, _| is_live(key.shape_id));
    }

    // Evict least recently used textures to make room for one more.
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() < self.max_cache_size {
            return;
        }

        let mut entries: Vec<(BitmapKey, u64)> = self.last_used.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len() + 1 - self.max_cache_size.max(1);
        for (key, _) in entries.iter().take(to_remove) {
            self.texture_cache.remove(key);
            self.last_used.remove(key);
        }
    }

    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    pub fn contains(&self, key: BitmapKey) -> bool {
        self.texture_cache.contains_key(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ColorImage {
        ColorImage::new([10, 10], egui::Color32::WHITE)
    }

    fn key(shape_id: usize, version: u64) -> BitmapKey {
        BitmapKey { shape_id, version }
    }

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);

        let first = manager.get_or_create_texture(key(1, 1), &image(), &ctx).unwrap();
        let second = manager.get_or_create_texture(key(1, 1), &image(), &ctx).unwrap();

        assert_eq!(first, second);
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn test_new_version_replaces_old() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);

        manager.get_or_create_texture(key(1, 1), &image(), &ctx).unwrap();
        manager.get_or_create_texture(key(1, 2), &image(), &ctx).unwrap();

        assert_eq!(manager.cache_size(), 1);
        assert!(!manager.contains(key(1, 1)));
        assert!(manager.contains(key(1, 2)));
    }

    #[test]
    fn test_lru_eviction() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);

        manager.get_or_create_texture(key(1, 1), &image(), &ctx).unwrap();
        manager.begin_frame();
        manager.get_or_create_texture(key(2, 1), &image(), &ctx).unwrap();
        manager.begin_frame();
        manager.get_or_create_texture(key(3, 1), &image(), &ctx).unwrap();

        assert_eq!(manager.cache_size(), 2);
        assert!(!manager.contains(key(1, 1)));
        assert!(manager.contains(key(2, 1)));
        assert!(manager.contains(key(3, 1)));
    }

    #[test]
    fn test_retain_drops_deleted_shapes() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        manager.get_or_create_texture(key(1, 1), &image(), &ctx).unwrap();
        manager.get_or_create_texture(key(2, 1), &image(), &ctx).unwrap();

        manager.retain_shapes(|id| id == 2);
        assert_eq!(manager.cache_size(), 1);
        assert!(manager.contains(key(2, 1)));
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let empty = ColorImage::new([0, 4], egui::Color32::WHITE);
        assert_eq!(
            manager.get_or_create_texture(key(1, 1), &empty, &ctx),
            Err(TextureError::InvalidDimensions([0, 4]))
        );
    }
}
