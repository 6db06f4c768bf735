//! CPU text rasterization via fontdue.
//!
//! Export runs without a GPU text atlas, so glyphs are rasterized
//! directly from a system font. If no usable font is found the store
//! stays empty and text commands are skipped (warned once) — shapes
//! still render.

use std::sync::atomic::{AtomicBool, Ordering};

use fontdue::{Font, FontSettings};
use tracing::{debug, warn};

#[cfg(target_os = "linux")]
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
];

#[cfg(target_os = "macos")]
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
];

#[cfg(target_os = "windows")]
const SYSTEM_FONT_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const SYSTEM_FONT_PATHS: &[&str] = &[];

/// A single grayscale-rasterized line of text.
///
/// `coverage` is row-major `width * height` alpha in 0.0..=1.0;
/// `baseline` is the distance from the top row to the text baseline.
pub struct RasterLine {
    pub coverage: Vec<f32>,
    pub width: usize,
    pub height: usize,
    pub baseline: f32,
}

/// Holds the export font, if one could be resolved.
pub struct FontStore {
    font: Option<Font>,
    warned: AtomicBool,
}

impl FontStore {
    /// Try well-known system font locations in order.
    pub fn load_system() -> Self {
        for &path in SYSTEM_FONT_PATHS {
            if let Ok(bytes) = std::fs::read(path) {
                match Font::from_bytes(bytes, FontSettings::default()) {
                    Ok(font) => {
                        debug!(path, "export font loaded");
                        return Self {
                            font: Some(font),
                            warned: AtomicBool::new(false),
                        };
                    }
                    Err(err) => debug!(path, err, "font candidate rejected"),
                }
            }
        }
        Self {
            font: None,
            warned: AtomicBool::new(false),
        }
    }

    /// Build a store from explicit font bytes (tests, bundled fonts).
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        Font::from_bytes(bytes, FontSettings::default())
            .ok()
            .map(|font| Self {
                font: Some(font),
                warned: AtomicBool::new(false),
            })
    }

    pub fn is_available(&self) -> bool {
        self.font.is_some()
    }

    /// Advance width of `text` at `size` px, 0.0 without a font.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let Some(font) = &self.font else {
            return 0.0;
        };
        text.chars()
            .map(|ch| font.metrics(ch, size).advance_width)
            .sum()
    }

    /// Rasterize one line of text. `None` when no font is available
    /// (warns on first miss) or the text is empty.
    pub fn rasterize_line(&self, text: &str, size: f32) -> Option<RasterLine> {
        let Some(font) = &self.font else {
            if !self.warned.swap(true, Ordering::Relaxed) {
                warn!("no system font found; text is skipped in exported images");
            }
            return None;
        };
        if text.is_empty() {
            return None;
        }

        let line = font.horizontal_line_metrics(size)?;
        let ascent = line.ascent.ceil();
        let descent = (-line.descent).ceil().max(0.0);
        let height = (ascent + descent) as usize + 1;
        let width = self.measure(text, size).ceil() as usize + 1;
        if width == 0 || height == 0 {
            return None;
        }

        let mut coverage = vec![0.0f32; width * height];
        let mut pen = 0.0f32;
        for ch in text.chars() {
            let (metrics, bitmap) = font.rasterize(ch, size);
            let origin_x = (pen + metrics.xmin as f32).round() as i64;
            // fontdue's ymin is the bitmap bottom relative to the
            // baseline, positive up.
            let origin_y = ascent as i64 - metrics.height as i64 - metrics.ymin as i64;
            for row in 0..metrics.height {
                let fy = origin_y + row as i64;
                if fy < 0 || fy >= height as i64 {
                    continue;
                }
                for col in 0..metrics.width {
                    let fx = origin_x + col as i64;
                    if fx < 0 || fx >= width as i64 {
                        continue;
                    }
                    let a = bitmap[row * metrics.width + col] as f32 / 255.0;
                    let dst = &mut coverage[fy as usize * width + fx as usize];
                    *dst = dst.max(a);
                }
            }
            pen += metrics.advance_width;
        }

        Some(RasterLine {
            coverage,
            width,
            height,
            baseline: ascent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_measures_zero() {
        let store = FontStore {
            font: None,
            warned: AtomicBool::new(false),
        };
        assert_eq!(store.measure("hello", 16.0), 0.0);
        assert!(store.rasterize_line("hello", 16.0).is_none());
    }

    #[test]
    fn system_font_renders_nonblank_line() {
        let store = FontStore::load_system();
        if !store.is_available() {
            // Host without any known system font; nothing to assert.
            return;
        }
        let line = store.rasterize_line("Ag", 16.0).unwrap();
        assert!(line.width > 0 && line.height > 0);
        assert!(line.coverage.iter().any(|&a| a > 0.5));
    }
}
