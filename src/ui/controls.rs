// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Controls panel: backend address, image sources, mask and edit forms.
//!
//! Each operation is a form section whose submit button is disabled and
//! relabeled while its request is in flight. The panel only reports
//! what the user asked for; validation and job dispatch happen in the
//! app.

use crate::app::{PendingOps, StatusLine};
use std::path::PathBuf;

/// Result of controls panel interaction.
pub enum ControlsAction {
    None,
    /// Upload the chosen image file.
    Upload(PathBuf),
    /// Generate an image from the prompt.
    Generate(String),
    /// Build a mask from the current selections.
    GenerateMask,
    /// Drop all selections and hide the mask preview.
    ClearSelections,
    /// Apply a masked edit with the prompt.
    Edit(String),
}

/// Display the controls panel and report the requested operation.
pub fn show(
    ui: &mut egui::Ui,
    server_url: &mut String,
    generate_prompt: &mut String,
    edit_prompt: &mut String,
    pending: PendingOps,
    selection_count: usize,
    mask_texture: &Option<egui::TextureHandle>,
    status: &Option<StatusLine>,
) -> ControlsAction {
    let mut action = ControlsAction::None;

    ui.add_space(4.0);
    ui.heading("Backend");
    ui.horizontal(|ui| {
        ui.label("Server:");
        ui.text_edit_singleline(server_url);
    });

    ui.separator();

    ui.heading("Image");
    let upload_label = if pending.upload { "Uploading..." } else { "Upload Image..." };
    if ui
        .add_enabled(!pending.upload, egui::Button::new(upload_label))
        .clicked()
    {
        // Open native file picker
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "webp"])
            .pick_file()
        {
            action = ControlsAction::Upload(path);
        }
    }

    ui.add_space(8.0);
    ui.label("Generation prompt:");
    ui.add(
        egui::TextEdit::multiline(generate_prompt)
            .desired_rows(2)
            .hint_text("A watercolor lighthouse at dusk"),
    );
    let generate_label = if pending.generate { "Generating..." } else { "Generate" };
    if ui
        .add_enabled(!pending.generate, egui::Button::new(generate_label))
        .clicked()
    {
        action = ControlsAction::Generate(generate_prompt.clone());
    }

    ui.separator();

    ui.heading("Selections");
    ui.label(format!("{} region(s) selected", selection_count));
    ui.horizontal(|ui| {
        let mask_label = if pending.mask { "Generating..." } else { "Generate Mask" };
        if ui
            .add_enabled(!pending.mask, egui::Button::new(mask_label))
            .clicked()
        {
            action = ControlsAction::GenerateMask;
        }
        if ui.button("Clear").clicked() {
            action = ControlsAction::ClearSelections;
        }
    });

    ui.separator();

    ui.heading("Edit");
    ui.label("Edit prompt:");
    ui.add(
        egui::TextEdit::multiline(edit_prompt)
            .desired_rows(2)
            .hint_text("Replace the selected area with a red door"),
    );
    let edit_label = if pending.edit { "Editing..." } else { "Apply Edit" };
    if ui
        .add_enabled(!pending.edit, egui::Button::new(edit_label))
        .clicked()
    {
        action = ControlsAction::Edit(edit_prompt.clone());
    }

    ui.separator();

    // Status line for validation and request outcomes
    if let Some(line) = status {
        let color = if line.is_error {
            egui::Color32::LIGHT_RED
        } else {
            egui::Color32::LIGHT_GREEN
        };
        ui.label(egui::RichText::new(&line.text).color(color));
    }

    // Mask preview, shown until selections are cleared
    if let Some(texture) = mask_texture {
        ui.separator();
        ui.label("Mask preview:");
        ui.add(egui::Image::new(texture).max_width(ui.available_width()));
    }

    action
}
