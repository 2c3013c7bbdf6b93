// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Backend API access and background request jobs.

pub mod api;
pub mod jobs;
