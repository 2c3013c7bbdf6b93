// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate transformations between screen
//! positions on the aspect-fitted canvas and image pixel coordinates.

use crate::models::selection::SelectionRect;

/// Compute the aspect-preserving display rectangle for an image of the
/// given natural dimensions, centered inside the available area.
pub fn fit_rect(available: egui::Rect, image_width: u32, image_height: u32) -> egui::Rect {
    let img_aspect = image_width as f32 / image_height as f32;
    let avail = available.size();
    let available_aspect = avail.x / avail.y;

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Image is wider - fit to width
        (avail.x, avail.x / img_aspect)
    } else {
        // Image is taller - fit to height
        (avail.y * img_aspect, avail.y)
    };

    let offset = egui::vec2(
        (avail.x - display_width) / 2.0,
        (avail.y - display_height) / 2.0,
    );
    egui::Rect::from_min_size(
        available.min + offset,
        egui::vec2(display_width, display_height),
    )
}

/// Map a screen position inside the display rectangle to image pixel
/// coordinates. Returns None for positions outside the image.
pub fn image_pos_from_screen(
    pos: egui::Pos2,
    display: egui::Rect,
    image_width: u32,
    image_height: u32,
) -> Option<(f64, f64)> {
    if !display.contains(pos) {
        return None;
    }
    Some(scale_to_image(pos, display, image_width, image_height))
}

/// Map a screen position to image pixel coordinates, clamping positions
/// outside the display rectangle to its border. Used for drag updates,
/// where the pointer may leave the canvas mid-gesture.
pub fn image_pos_clamped(
    pos: egui::Pos2,
    display: egui::Rect,
    image_width: u32,
    image_height: u32,
) -> (f64, f64) {
    let clamped = pos.clamp(display.min, display.max);
    scale_to_image(clamped, display, image_width, image_height)
}

fn scale_to_image(
    pos: egui::Pos2,
    display: egui::Rect,
    image_width: u32,
    image_height: u32,
) -> (f64, f64) {
    let rel_x = (pos.x - display.min.x) as f64 / display.width() as f64;
    let rel_y = (pos.y - display.min.y) as f64 / display.height() as f64;
    (rel_x * image_width as f64, rel_y * image_height as f64)
}

/// Map an image-space selection rectangle to a screen rectangle on the
/// display area. Negative width/height are handled by spanning the two
/// corners, so the result is always a well-formed rectangle.
pub fn screen_rect_from_image(
    rect: &SelectionRect,
    display: egui::Rect,
    image_width: u32,
    image_height: u32,
) -> egui::Rect {
    let scale_x = display.width() as f64 / image_width as f64;
    let scale_y = display.height() as f64 / image_height as f64;

    let corner_a = egui::pos2(
        display.min.x + (rect.x * scale_x) as f32,
        display.min.y + (rect.y * scale_y) as f32,
    );
    let corner_b = egui::pos2(
        display.min.x + ((rect.x + rect.width) * scale_x) as f32,
        display.min.y + ((rect.y + rect.height) * scale_y) as f32,
    );
    egui::Rect::from_two_pos(corner_a, corner_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display_rect() -> egui::Rect {
        // A 200x200 image shown at half size, offset inside the panel.
        egui::Rect::from_min_size(egui::pos2(50.0, 30.0), egui::vec2(100.0, 100.0))
    }

    #[test]
    fn test_fit_rect_wide_image() {
        let available = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        let fitted = fit_rect(available, 200, 100);
        assert_eq!(fitted.width(), 100.0);
        assert_eq!(fitted.height(), 50.0);
        // Centered vertically
        assert_eq!(fitted.min.y, 25.0);
    }

    #[test]
    fn test_fit_rect_tall_image() {
        let available = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        let fitted = fit_rect(available, 100, 200);
        assert_eq!(fitted.width(), 50.0);
        assert_eq!(fitted.height(), 100.0);
        assert_eq!(fitted.min.x, 25.0);
    }

    #[test]
    fn test_screen_to_image_corners() {
        let display = display_rect();
        let top_left = image_pos_from_screen(egui::pos2(50.0, 30.0), display, 200, 200).unwrap();
        assert_eq!(top_left, (0.0, 0.0));

        let center = image_pos_from_screen(egui::pos2(100.0, 80.0), display, 200, 200).unwrap();
        assert_eq!(center, (100.0, 100.0));
    }

    #[test]
    fn test_screen_outside_display_is_rejected() {
        let display = display_rect();
        assert!(image_pos_from_screen(egui::pos2(10.0, 10.0), display, 200, 200).is_none());
        assert!(image_pos_from_screen(egui::pos2(151.0, 80.0), display, 200, 200).is_none());
    }

    #[test]
    fn test_clamped_position_stays_on_border() {
        let display = display_rect();
        let (x, y) = image_pos_clamped(egui::pos2(500.0, -40.0), display, 200, 200);
        assert_eq!(x, 200.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_image_rect_roundtrip_on_screen() {
        let display = display_rect();
        let rect = SelectionRect { x: 20.0, y: 40.0, width: 60.0, height: 80.0 };
        let on_screen = screen_rect_from_image(&rect, display, 200, 200);
        assert_eq!(on_screen.min, egui::pos2(60.0, 50.0));
        assert_eq!(on_screen.size(), egui::vec2(30.0, 40.0));
    }

    #[test]
    fn test_negative_rect_maps_to_well_formed_screen_rect() {
        let display = display_rect();
        let forward = SelectionRect { x: 20.0, y: 20.0, width: 60.0, height: 60.0 };
        let reverse = SelectionRect { x: 80.0, y: 80.0, width: -60.0, height: -60.0 };

        let a = screen_rect_from_image(&forward, display, 200, 200);
        let b = screen_rect_from_image(&reverse, display, 200, 200);
        assert_eq!(a, b);
        assert!(b.width() > 0.0 && b.height() > 0.0);
    }
}
