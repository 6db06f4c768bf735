//! Brix Paint/Canvas API
//!
//! A 2D drawing API for widget painting.
//!
//! # Features
//!
//! - Straight-line path drawing (polylines, polygons)
//! - Shape primitives (rect, circle)
//! - Solid-color fills and strokes
//! - Text commands with alignment and rotation
//! - Rect clipping
//!
//! Widgets record commands into a [`PaintContext`]; a renderer executes
//! them. This keeps the widget model independent of any rendering
//! backend.

pub mod color;
pub mod context;
pub mod path;
pub mod primitives;

pub use color::Color;
pub use context::{FillStyle, PaintCommand, PaintContext, StrokeStyle, TextAlign};
pub use path::{Path, PathBuilder, PathCommand, Point};
pub use primitives::*;
