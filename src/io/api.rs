// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! HTTP client for the image backend.
//!
//! The backend exposes four POST endpoints: upload an existing image,
//! generate one from a prompt, rasterize the selection rectangles into
//! an edit mask, and apply a prompt-driven edit through that mask. The
//! mask endpoint replies with JSON naming the generated mask image; the
//! other three reply with raw image bytes. All calls are blocking and
//! run on worker threads, never on the UI thread.

use crate::models::selection::SelectionRect;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// JSON body for the mask generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskRequest {
    pub coordinates: Vec<SelectionRect>,
}

/// JSON reply from the mask generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskResponse {
    pub message: String,
    pub mask_path: String,
}

/// Blocking client bound to one backend base URL.
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("remask/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(120))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /upload: multipart form with the image file as part `file`.
    /// Returns the binary image the server echoes back.
    pub fn upload(&self, path: &Path) -> Result<Vec<u8>> {
        let form = reqwest::blocking::multipart::Form::new()
            .file("file", path)
            .with_context(|| format!("reading {}", path.display()))?;
        let response = self
            .http
            .post(self.endpoint("/upload"))
            .multipart(form)
            .send()
            .context("sending upload request")?
            .error_for_status()
            .context("upload request failed")?;
        Ok(response.bytes().context("reading upload response")?.to_vec())
    }

    /// POST /generate: form field `prompt`. Returns the generated image.
    pub fn generate(&self, prompt: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .post(self.endpoint("/generate"))
            .form(&[("prompt", prompt)])
            .send()
            .context("sending generate request")?
            .error_for_status()
            .context("generate request failed")?;
        Ok(response
            .bytes()
            .context("reading generate response")?
            .to_vec())
    }

    /// POST /generate_mask: the rectangle list, serialized verbatim (no
    /// coordinate transformation). On success, also fetches the mask
    /// image named by the reply so the caller can display it.
    pub fn generate_mask(&self, coordinates: &[SelectionRect]) -> Result<(MaskResponse, Vec<u8>)> {
        let request = MaskRequest {
            coordinates: coordinates.to_vec(),
        };
        let reply: MaskResponse = self
            .http
            .post(self.endpoint("/generate_mask"))
            .json(&request)
            .send()
            .context("sending mask request")?
            .error_for_status()
            .context("mask request failed")?
            .json()
            .context("parsing mask response")?;

        let mask_url = if reply.mask_path.starts_with("http") {
            reply.mask_path.clone()
        } else {
            self.endpoint(&reply.mask_path)
        };
        let mask_bytes = self
            .http
            .get(&mask_url)
            .send()
            .context("fetching mask image")?
            .error_for_status()
            .context("mask image fetch failed")?
            .bytes()
            .context("reading mask image")?
            .to_vec();
        Ok((reply, mask_bytes))
    }

    /// POST /edit: multipart form with the edit prompt. The mask
    /// reference is implicit on the server side. Returns the edited
    /// image.
    pub fn edit(&self, prompt: &str) -> Result<Vec<u8>> {
        let form = reqwest::blocking::multipart::Form::new().text("prompt", prompt.to_string());
        let response = self
            .http
            .post(self.endpoint("/edit"))
            .multipart(form)
            .send()
            .context("sending edit request")?
            .error_for_status()
            .context("edit request failed")?;
        Ok(response.bytes().context("reading edit response")?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_request_wire_shape() {
        let request = MaskRequest {
            coordinates: vec![SelectionRect {
                x: 10.0,
                y: 10.0,
                width: 50.0,
                height: 50.0,
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "coordinates": [{"x": 10.0, "y": 10.0, "width": 50.0, "height": 50.0}]
            })
        );
    }

    #[test]
    fn test_mask_request_roundtrip_preserves_exact_fields() {
        let original = MaskRequest {
            coordinates: vec![
                SelectionRect { x: 10.0, y: 10.0, width: 50.0, height: 50.0 },
                SelectionRect { x: 80.5, y: 80.25, width: -60.0, height: -60.75 },
            ],
        };
        let json = serde_json::to_string(&original).unwrap();
        let decoded: MaskRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.coordinates, original.coordinates);
    }

    #[test]
    fn test_mask_response_parses_server_reply() {
        let reply: MaskResponse = serde_json::from_str(
            r#"{"message": "Mask generated successfully", "mask_path": "/static/img/mask.png"}"#,
        )
        .unwrap();
        assert_eq!(reply.message, "Mask generated successfully");
        assert_eq!(reply.mask_path, "/static/img/mask.png");
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(
            client.endpoint("/generate_mask"),
            "http://127.0.0.1:5000/generate_mask"
        );
    }
}
