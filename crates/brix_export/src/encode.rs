//! Image encoding and file export.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::frame::Frame;

/// Fallback JPEG quality when the caller's value is out of range.
const DEFAULT_JPEG_QUALITY: u8 = 50;

/// Encoded image formats supported by chart export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }

    fn has_matching_extension(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        match self {
            Self::Png => lower.ends_with(".png"),
            Self::Jpeg => lower.ends_with(".jpg") || lower.ends_with(".jpeg"),
            Self::Webp => lower.ends_with(".webp"),
        }
    }

    /// Append this format's extension to `name` unless it already has it.
    pub fn ensure_extension(&self, name: &str) -> String {
        if self.has_matching_extension(name) {
            name.to_string()
        } else {
            format!("{name}.{}", self.extension())
        }
    }
}

/// Clamp a JPEG quality to the valid range, falling back to the
/// default when the caller's value is out of range.
pub fn effective_quality(quality: i32) -> u8 {
    if (0..=100).contains(&quality) {
        quality as u8
    } else {
        DEFAULT_JPEG_QUALITY
    }
}

/// Encode a frame to image bytes.
///
/// `quality` only affects JPEG; PNG and WEBP use lossless paths.
pub fn encode(frame: &Frame, format: ImageFormat, quality: i32) -> Result<Vec<u8>> {
    let image: RgbaImage =
        RgbaImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or(ExportError::ZeroSize {
                width: frame.width(),
                height: frame.height(),
            })?;

    let mut bytes = Vec::new();
    match format {
        ImageFormat::Png => {
            PngEncoder::new(Cursor::new(&mut bytes)).write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )?;
        }
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel; flatten first.
            let rgb = image::DynamicImage::ImageRgba8(image).to_rgb8();
            JpegEncoder::new_with_quality(Cursor::new(&mut bytes), effective_quality(quality))
                .write_image(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    ExtendedColorType::Rgb8,
                )?;
        }
        ImageFormat::Webp => {
            WebPEncoder::new_lossless(Cursor::new(&mut bytes)).write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )?;
        }
    }
    debug!(
        bytes = bytes.len(),
        mime = format.mime_type(),
        "frame encoded"
    );
    Ok(bytes)
}

/// Encode `frame` and write it to `path`. Parent directories are
/// created as needed. Returns the written path.
pub fn save_to_path(
    frame: &Frame,
    format: ImageFormat,
    quality: i32,
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(ExportError::PathInvalid {
            path: path.to_path_buf(),
        });
    }
    let bytes = encode(frame, format, quality)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ExportError::from_io(parent, e))?;
        }
    }
    fs::write(path, &bytes).map_err(|e| ExportError::from_io(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "frame written");
    Ok(path.to_path_buf())
}
