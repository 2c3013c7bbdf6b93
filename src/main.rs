// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! REMASK - Region Edit Mask Studio
//!
//! A cross-platform desktop front-end for an AI image backend: generate
//! or upload an image, drag rectangular selections over it, have the
//! server build an edit mask from them, and apply prompt-driven edits.

mod app;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::RemaskApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("REMASK - Region Edit Mask Studio"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "REMASK",
        options,
        Box::new(|_cc| Ok(Box::new(RemaskApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
