//! I/O helpers for RGB images and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned 8-bit RGB buffer.
//! - `save_rgb_f32`: write an `RgbImageF32` to disk, clamping to 8 bits.
//! - `save_rgb_u8`: write an owned 8-bit RGB buffer to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{RgbImageF32, RgbImageU8};
use crate::error::{RegrainError, Result};
use image::{DynamicImage, ImageBuffer, Rgb};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned, tightly packed 8-bit RGB buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct RgbBufferU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbBufferU8 {
    /// Construct an owned buffer from `width * height * 3` raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(RegrainError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `RgbImageU8` view
    pub fn as_view(&self) -> RgbImageU8<'_> {
        RgbImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width * 3,
            data: &self.data,
        }
    }
}

/// Load an image from disk and convert it to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbBufferU8> {
    let img = image::open(path)
        .map_err(|e| RegrainError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    RgbBufferU8::new(width, height, img.into_raw())
}

/// Save a float image, mapping `[0, 1]` to `[0, 255]` with clamping.
pub fn save_rgb_f32(image: &RgbImageF32, path: &Path) -> Result<()> {
    let buffer = RgbBufferU8::new(image.w, image.h, image.to_u8_clamped())?;
    save_rgb_u8(&buffer, path)
}

/// Save an 8-bit RGB buffer; the format follows the file extension.
pub fn save_rgb_u8(buffer: &RgbBufferU8, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(buffer.width as u32, buffer.height as u32, buffer.data.clone())
            .ok_or_else(|| encode_error(path, "Failed to create image buffer"))?;
    DynamicImage::ImageRgb8(image)
        .save(path)
        .map_err(|e| encode_error(path, e))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| encode_error(path, e))?;
    fs::write(path, json).map_err(|e| encode_error(path, e))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| encode_error(parent, e))?;
        }
    }
    Ok(())
}

fn encode_error(path: &Path, err: impl ToString) -> RegrainError {
    RegrainError::Encode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
