// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, coordinating the selection state machine, the
//! canvas image, and the background request jobs against the backend.

use crate::io::jobs::{self, JobHandle, MaskReady};
use crate::models::canvas::{texture_from_loaded, CanvasImage, LoadedImage};
use crate::models::selection::SelectionState;
use crate::ui::{canvas, controls};

/// Default backend address, overridable via REMASK_SERVER.
const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

/// Which operations currently have a request outbound. Each one only
/// disables its own triggering control; distinct operations may overlap.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingOps {
    pub upload: bool,
    pub generate: bool,
    pub mask: bool,
    pub edit: bool,
}

impl PendingOps {
    pub fn any(&self) -> bool {
        self.upload || self.generate || self.mask || self.edit
    }
}

/// One-line status message shown in the controls panel.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// Main application state.
pub struct RemaskApp {
    /// Selection rectangles and drag state for the current image
    selection: SelectionState,

    /// Currently displayed image (pristine snapshot + texture)
    canvas_image: Option<CanvasImage>,

    /// Most recent server-generated mask, shown in the controls panel
    mask_texture: Option<egui::TextureHandle>,

    /// Backend base URL, snapshotted per submitted request
    server_url: String,

    /// Prompt for image generation
    generate_prompt: String,

    /// Prompt for masked edits
    edit_prompt: String,

    /// Outbound requests, one slot per operation
    upload_job: Option<JobHandle<LoadedImage>>,
    generate_job: Option<JobHandle<LoadedImage>>,
    mask_job: Option<JobHandle<MaskReady>>,
    edit_job: Option<JobHandle<LoadedImage>>,

    /// Validation and request-outcome message
    status: Option<StatusLine>,
}

impl Default for RemaskApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Take the job result out of its slot if one has arrived.
fn poll_job<T>(slot: &mut Option<JobHandle<T>>) -> Option<Result<T, String>> {
    let result = slot.as_ref().and_then(|receiver| receiver.try_recv().ok());
    if result.is_some() {
        *slot = None;
    }
    result
}

impl RemaskApp {
    /// Create a new REMASK application instance.
    pub fn new() -> Self {
        let server_url =
            std::env::var("REMASK_SERVER").unwrap_or_else(|_| DEFAULT_SERVER.to_string());
        Self {
            selection: SelectionState::new(),
            canvas_image: None,
            mask_texture: None,
            server_url,
            generate_prompt: String::new(),
            edit_prompt: String::new(),
            upload_job: None,
            generate_job: None,
            mask_job: None,
            edit_job: None,
            status: None,
        }
    }

    fn pending_ops(&self) -> PendingOps {
        PendingOps {
            upload: self.upload_job.is_some(),
            generate: self.generate_job.is_some(),
            mask: self.mask_job.is_some(),
            edit: self.edit_job.is_some(),
        }
    }

    fn set_status(&mut self, text: String) {
        self.status = Some(StatusLine { text, is_error: false });
    }

    fn set_error(&mut self, text: String) {
        self.status = Some(StatusLine { text, is_error: true });
    }

    /// Start an upload request for the chosen file.
    fn start_upload(&mut self, path: std::path::PathBuf) {
        log::info!("Uploading {}", path.display());
        self.upload_job = Some(jobs::upload(self.server_url.clone(), path));
    }

    /// Start a generation request, or reject an empty prompt locally.
    fn start_generate(&mut self, prompt: &str) {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            self.set_error("Please enter a prompt first.".to_string());
            return;
        }
        log::info!("Generating image from prompt ({} chars)", prompt.len());
        self.generate_job = Some(jobs::generate(self.server_url.clone(), prompt.to_string()));
    }

    /// Start a mask request from the current selections, or reject an
    /// empty selection list locally without any network call.
    fn start_generate_mask(&mut self) {
        if self.selection.is_empty() {
            self.set_error("Please select at least one area on the image first.".to_string());
            return;
        }
        // Snapshot at submit time; later selection edits do not affect
        // the outbound request.
        let coordinates = self.selection.rects().to_vec();
        log::info!("Requesting mask for {} rectangle(s)", coordinates.len());
        self.mask_job = Some(jobs::generate_mask(self.server_url.clone(), coordinates));
    }

    /// Start an edit request, or reject missing prompt/selections locally.
    fn start_edit(&mut self, prompt: &str) {
        let prompt = prompt.trim();
        if self.selection.is_empty() {
            self.set_error(
                "Please select at least one area and generate a mask before editing.".to_string(),
            );
            return;
        }
        if prompt.is_empty() {
            self.set_error("Please enter an edit prompt first.".to_string());
            return;
        }
        log::info!("Submitting edit ({} chars)", prompt.len());
        self.edit_job = Some(jobs::edit(self.server_url.clone(), prompt.to_string()));
    }

    /// Drop all selections and hide the mask preview.
    fn clear_selections(&mut self) {
        self.selection.clear();
        self.mask_texture = None;
        log::info!("Cleared selections");
    }

    /// Install a freshly decoded image as the canvas content. The new
    /// image invalidates all prior selections, including any that were
    /// drawn while the request was outbound.
    fn finish_image_job(
        &mut self,
        ctx: &egui::Context,
        result: Result<LoadedImage, String>,
        what: &str,
    ) {
        match result {
            Ok(loaded) => {
                log::info!("{} complete: {}x{} image", what, loaded.width, loaded.height);
                self.canvas_image = Some(CanvasImage::from_loaded(ctx, "canvas_image", loaded));
                self.selection.clear();
                self.set_status(format!("{} complete", what));
            }
            Err(e) => {
                log::error!("{} failed: {}", what, e);
                self.set_error(format!("{} failed: {}", what, e));
            }
        }
    }

    fn finish_mask_job(&mut self, ctx: &egui::Context, result: Result<MaskReady, String>) {
        match result {
            Ok(ready) => {
                log::info!(
                    "Mask ready: {}x{} image",
                    ready.image.width,
                    ready.image.height
                );
                self.mask_texture = Some(texture_from_loaded(ctx, "mask_image", &ready.image));
                self.set_status(ready.message);
            }
            Err(e) => {
                log::error!("Mask generation failed: {}", e);
                self.set_error(format!("Mask generation failed: {}", e));
            }
        }
    }
}

impl eframe::App for RemaskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background requests
        if let Some(result) = poll_job(&mut self.upload_job) {
            self.finish_image_job(ctx, result, "Upload");
        }
        if let Some(result) = poll_job(&mut self.generate_job) {
            self.finish_image_job(ctx, result, "Generation");
        }
        if let Some(result) = poll_job(&mut self.edit_job) {
            self.finish_image_job(ctx, result, "Edit");
        }
        if let Some(result) = poll_job(&mut self.mask_job) {
            self.finish_mask_job(ctx, result);
        }

        // Keep repainting while requests are outbound so completions
        // are picked up promptly
        if self.pending_ops().any() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let can_upload = self.upload_job.is_none();
                    if ui
                        .add_enabled(can_upload, egui::Button::new("Upload Image..."))
                        .clicked()
                    {
                        // Open native file picker
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "webp"])
                            .pick_file()
                        {
                            self.start_upload(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Controls panel (right side)
        let pending = self.pending_ops();
        let selection_count = self.selection.len();
        let controls_action = egui::SidePanel::right("controls")
            .default_width(300.0)
            .show(ctx, |ui| {
                controls::show(
                    ui,
                    &mut self.server_url,
                    &mut self.generate_prompt,
                    &mut self.edit_prompt,
                    pending,
                    selection_count,
                    &self.mask_texture,
                    &self.status,
                )
            })
            .inner;

        // Handle controls panel actions
        match controls_action {
            controls::ControlsAction::Upload(path) => self.start_upload(path),
            controls::ControlsAction::Generate(prompt) => self.start_generate(&prompt),
            controls::ControlsAction::GenerateMask => self.start_generate_mask(),
            controls::ControlsAction::ClearSelections => self.clear_selections(),
            controls::ControlsAction::Edit(prompt) => self.start_edit(&prompt),
            controls::ControlsAction::None => {}
        }

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show(ui, &self.canvas_image, &self.selection))
            .inner;

        // Handle canvas actions
        match canvas_action {
            canvas::CanvasAction::PointerDown(pos) => {
                self.selection.pointer_down(pos);
            }
            canvas::CanvasAction::PointerMoved(pos) => {
                self.selection.pointer_moved(pos);
            }
            canvas::CanvasAction::PointerReleased(pos) => {
                if let Some(pos) = pos {
                    self.selection.pointer_moved(pos);
                }
                if let Some(rect) = self.selection.pointer_up() {
                    log::info!(
                        "Committed selection at ({:.1}, {:.1}) size {:.1}x{:.1}, total: {}",
                        rect.x,
                        rect.y,
                        rect.width,
                        rect.height,
                        self.selection.len()
                    );
                }
            }
            canvas::CanvasAction::None => {}
        }
    }
}
