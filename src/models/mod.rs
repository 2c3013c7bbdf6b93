// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for the canvas image and region selections.

pub mod canvas;
pub mod selection;
