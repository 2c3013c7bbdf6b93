// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and region selection.
//!
//! This module renders the loaded image aspect-fitted into the central
//! panel, paints the translucent selection overlays on top, and maps
//! pointer gestures into canvas actions in image pixel coordinates.
//! All selection state lives in the app; this is the render step.

use crate::models::canvas::CanvasImage;
use crate::models::selection::SelectionState;
use crate::util::geometry;

/// Result of canvas interaction, in image pixel coordinates.
pub enum CanvasAction {
    None,
    /// A drag started at this position.
    PointerDown((f64, f64)),
    /// The pointer moved while dragging.
    PointerMoved((f64, f64)),
    /// The drag ended. Position is None when egui lost track of the
    /// pointer on the release frame.
    PointerReleased(Option<(f64, f64)>),
}

/// Fill used for committed and in-progress selections alike.
fn selection_fill() -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(255, 0, 0, 128)
}

/// Display the main canvas area and handle pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    image: &Option<CanvasImage>,
    selection: &SelectionState,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    // Create a frame for the canvas
    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        if let Some(canvas_image) = image {
            let panel = egui::Rect::from_min_size(ui.min_rect().min, ui.available_size());
            let display = geometry::fit_rect(panel, canvas_image.width, canvas_image.height);

            // Draw the pristine image
            ui.painter().image(
                canvas_image.texture.id(),
                display,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            // Pointer gestures over the image
            let response = ui.allocate_rect(display, egui::Sense::drag());
            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if let Some(image_pos) = geometry::image_pos_from_screen(
                        pos,
                        display,
                        canvas_image.width,
                        canvas_image.height,
                    ) {
                        action = CanvasAction::PointerDown(image_pos);
                    }
                }
            } else if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    action = CanvasAction::PointerMoved(geometry::image_pos_clamped(
                        pos,
                        display,
                        canvas_image.width,
                        canvas_image.height,
                    ));
                }
            } else if response.drag_stopped() {
                let pos = response.interact_pointer_pos().map(|pos| {
                    geometry::image_pos_clamped(
                        pos,
                        display,
                        canvas_image.width,
                        canvas_image.height,
                    )
                });
                action = CanvasAction::PointerReleased(pos);
            }

            // Overlay committed selections plus the drag in progress
            let painter = ui.painter();
            for rect in selection.rects() {
                painter.rect_filled(
                    geometry::screen_rect_from_image(
                        rect,
                        display,
                        canvas_image.width,
                        canvas_image.height,
                    ),
                    0.0,
                    selection_fill(),
                );
            }
            if let Some(candidate) = selection.in_progress() {
                painter.rect_filled(
                    geometry::screen_rect_from_image(
                        &candidate,
                        display,
                        canvas_image.width,
                        canvas_image.height,
                    ),
                    0.0,
                    selection_fill(),
                );
            }
        } else {
            // Show welcome message when no image is loaded
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.heading(
                        egui::RichText::new("REMASK")
                            .size(32.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                    ui.label(
                        egui::RichText::new("Region Edit Mask Studio")
                            .size(14.0)
                            .color(egui::Color32::from_gray(150)),
                    );
                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new("Upload or generate an image to begin selecting regions")
                            .color(egui::Color32::from_gray(180)),
                    );
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new("Drag on the image to mark areas to edit")
                            .weak()
                            .color(egui::Color32::from_gray(130)),
                    );
                });
            });
        }
    });

    // Display selection info at the bottom
    ui.separator();
    ui.horizontal(|ui| {
        match image {
            Some(canvas_image) => {
                ui.label(format!("{}x{} px", canvas_image.width, canvas_image.height));
                ui.separator();
                ui.label(format!("{} selected region(s)", selection.len()));
                if selection.is_dragging() {
                    ui.separator();
                    ui.label("Selecting...");
                }
            }
            None => {
                ui.label("No image loaded");
            }
        }
    });

    action
}
