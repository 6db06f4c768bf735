//! Brix Export
//!
//! Headless capture and image export for Brix widgets.
//!
//! # Pipeline
//!
//! 1. A widget records [`brix_paint::PaintCommand`]s.
//! 2. [`Rasterizer`] executes them into an RGBA8 [`Frame`].
//! 3. [`encode`] turns the frame into PNG/JPEG/WEBP bytes.
//! 4. Bytes go to an arbitrary path ([`save_to_path`]) or into a
//!    [`MediaGallery`] with a metadata record.
//!
//! Every failure is a structured [`ExportError`] — permission, full
//! disk, bad path, and encoder faults stay distinguishable.

mod encode;
mod error;
mod frame;
mod gallery;
mod raster;
mod text;

pub use encode::{effective_quality, encode, save_to_path, ImageFormat};
pub use error::{ExportError, Result};
pub use frame::Frame;
pub use gallery::{MediaGallery, MediaRecord};
pub use raster::Rasterizer;
pub use text::FontStore;
