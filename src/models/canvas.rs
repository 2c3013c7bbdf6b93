// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas image state.
//!
//! The canvas shows exactly one image at a time. The texture built from
//! its decoded pixels is never painted into, so it doubles as the
//! pristine snapshot: overlays exist only as per-frame draw calls and
//! the undecorated image is always one redraw away. The whole state is
//! replaced wholesale when an upload, generate, or edit completes.

/// Decoded RGBA pixels delivered by a background job.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major, unmultiplied alpha.
    pub pixels: Vec<u8>,
}

/// The displayed bitmap at its natural dimensions.
pub struct CanvasImage {
    pub width: u32,
    pub height: u32,
    pub texture: egui::TextureHandle,
}

impl CanvasImage {
    /// Build the drawing surface for a freshly decoded image. The
    /// surface takes the image's natural dimensions.
    pub fn from_loaded(ctx: &egui::Context, name: &str, loaded: LoadedImage) -> Self {
        let texture = texture_from_loaded(ctx, name, &loaded);
        Self {
            width: loaded.width,
            height: loaded.height,
            texture,
        }
    }
}

/// Create an egui texture from decoded pixels.
pub fn texture_from_loaded(
    ctx: &egui::Context,
    name: &str,
    image: &LoadedImage,
) -> egui::TextureHandle {
    let size = [image.width as usize, image.height as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}
