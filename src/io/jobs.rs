// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background request jobs.
//!
//! Every backend operation runs on its own short-lived thread and posts
//! exactly one result back over an mpsc channel; the UI thread polls
//! `try_recv` each frame. Jobs carry a snapshot of their inputs taken
//! at submit time, so selection edits made while a request is outbound
//! do not affect it. Requests are not cancellable.

use crate::io::api::ApiClient;
use crate::models::canvas::LoadedImage;
use crate::models::selection::SelectionRect;
use anyhow::Context;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Receiver side of a spawned job. Delivers exactly one message.
pub type JobHandle<T> = Receiver<Result<T, String>>;

/// Result of a completed mask generation: the server's message plus the
/// decoded mask image for the preview panel.
pub struct MaskReady {
    pub message: String,
    pub image: LoadedImage,
}

fn spawn<T, F>(job: F) -> JobHandle<T>
where
    T: Send + 'static,
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
{
    let (sender, receiver) = channel();
    std::thread::spawn(move || {
        let result = job().map_err(|e| format!("{:#}", e));
        let _ = sender.send(result);
    });
    receiver
}

/// Decode a binary image payload into RGBA pixels.
pub fn decode_image(bytes: &[u8]) -> anyhow::Result<LoadedImage> {
    let decoded = image::load_from_memory(bytes).context("decoding image payload")?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Upload a local image file; the reply image replaces the canvas.
pub fn upload(base_url: String, path: PathBuf) -> JobHandle<LoadedImage> {
    spawn(move || {
        let client = ApiClient::new(&base_url)?;
        let bytes = client.upload(&path)?;
        log::info!("Uploaded {} ({} reply bytes)", path.display(), bytes.len());
        decode_image(&bytes)
    })
}

/// Generate an image from a prompt; the reply image replaces the canvas.
pub fn generate(base_url: String, prompt: String) -> JobHandle<LoadedImage> {
    spawn(move || {
        let client = ApiClient::new(&base_url)?;
        let bytes = client.generate(&prompt)?;
        log::info!("Generated image ({} reply bytes)", bytes.len());
        decode_image(&bytes)
    })
}

/// Ask the server to rasterize the given rectangles into an edit mask,
/// then fetch and decode the mask image for display.
pub fn generate_mask(base_url: String, coordinates: Vec<SelectionRect>) -> JobHandle<MaskReady> {
    spawn(move || {
        let client = ApiClient::new(&base_url)?;
        let (reply, mask_bytes) = client.generate_mask(&coordinates)?;
        log::info!(
            "Mask generated from {} rectangle(s): {}",
            coordinates.len(),
            reply.mask_path
        );
        let image = decode_image(&mask_bytes)?;
        Ok(MaskReady {
            message: reply.message,
            image,
        })
    })
}

/// Apply a prompt-driven edit through the server-side mask; the reply
/// image replaces the canvas.
pub fn edit(base_url: String, prompt: String) -> JobHandle<LoadedImage> {
    spawn(move || {
        let client = ApiClient::new(&base_url)?;
        let bytes = client.edit(&prompt)?;
        log::info!("Edit applied ({} reply bytes)", bytes.len());
        decode_image(&bytes)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_image_accepts_png_payload() {
        // Encode a tiny image in memory and decode it through the job path.
        let mut png = Vec::new();
        let buffer = image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]));
        image::DynamicImage::ImageRgba8(buffer)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let loaded = decode_image(&png).unwrap();
        assert_eq!((loaded.width, loaded.height), (3, 2));
        assert_eq!(loaded.pixels.len(), 3 * 2 * 4);
        assert_eq!(&loaded.pixels[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_image_rejects_garbage_payload() {
        assert!(decode_image(b"not an image").is_err());
    }
}
