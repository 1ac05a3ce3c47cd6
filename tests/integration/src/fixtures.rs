//! Test fixtures and data generators

use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};

use image::{ImageFormat, Rgb, RgbImage};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use uuid::Uuid;

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A distinct client address per call
pub fn unique_client_ip() -> String {
    let n = unique_suffix();
    format!("10.{}.{}.{}", (n >> 16) & 0xFF, (n >> 8) & 0xFF, n & 0xFF)
}

/// Encoded PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([16, 185, 129]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .unwrap_or_else(|e| panic!("encode fixture png: {e}"));
    out.into_inner()
}

/// Multipart upload form
pub fn upload_form(department: &str, title: &str, bytes: Vec<u8>, mime: &str) -> Form {
    let file = Part::bytes(bytes)
        .file_name("photo.png")
        .mime_str(mime)
        .unwrap_or_else(|e| panic!("mime {mime}: {e}"));
    Form::new()
        .part("file", file)
        .text("departmentName", department.to_string())
        .text("title", title.to_string())
        .text("description", format!("{title} at the office"))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub photo_id: Uuid,
    pub nickname: String,
    pub content: String,
}

impl CreateComment {
    pub fn new(photo_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            photo_id,
            nickname: format!("guest{}", unique_suffix()),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeBody {
    pub is_liked: bool,
}

impl LikeBody {
    pub fn like() -> Self {
        Self { is_liked: true }
    }

    pub fn unlike() -> Self {
        Self { is_liked: false }
    }
}
