//! The runtime chart widget.
//!
//! One instance per placed component. Event-handler blocks call the
//! data operations; the host calls `paint` when the widget reports it
//! needs a redraw, and the export operations capture the current
//! contents headlessly.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use brix_export::{Frame, ImageFormat, MediaGallery, MediaRecord, Rasterizer};
use brix_paint::{Color, PaintContext};
use serde::{Deserialize, Serialize};

use crate::series::{Result, SeriesTable};

/// Maximum settable text size.
const TEXT_SIZE_MAX: u32 = 999;

/// Designer-configurable properties, as stored in the designer
/// document. Colors are packed 0xAARRGGBB, matching the block
/// runtime's color representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartProperties {
    pub background_color: u32,
    pub text_color: u32,
    pub text_size: u32,
    pub show_legend: bool,
    pub show_point_labels: bool,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ChartProperties {
    fn default() -> Self {
        Self {
            background_color: 0xFFFFFFFF,
            text_color: 0xFF000000,
            text_size: 22,
            show_legend: false,
            show_point_labels: false,
            title: "Title".to_string(),
            x_label: "X Axis".to_string(),
            y_label: "Y Axis".to_string(),
        }
    }
}

/// The chart component's runtime state.
pub struct ChartWidget {
    pub(crate) props: ChartProperties,
    pub(crate) table: SeriesTable,
    width: u32,
    height: u32,
    dirty: bool,
}

impl ChartWidget {
    pub fn new() -> Self {
        Self::with_properties(ChartProperties::default())
    }

    pub fn with_properties(props: ChartProperties) -> Self {
        let mut widget = Self {
            props: ChartProperties {
                text_size: 0, // set through the clamping setter below
                ..props.clone()
            },
            table: SeriesTable::new(),
            width: 0,
            height: 0,
            dirty: true,
        };
        widget.set_text_size(props.text_size);
        widget
    }

    pub fn properties(&self) -> &ChartProperties {
        &self.props
    }

    // === Layout ===

    /// Host-assigned size in px. 0x0 until laid out.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.dirty = true;
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    // === Redraw ===

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a redraw is pending.
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Consume the pending-redraw flag (host calls this each frame).
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // === Appearance properties ===

    pub fn background_color(&self) -> u32 {
        self.props.background_color
    }

    pub fn set_background_color(&mut self, argb: u32) {
        self.props.background_color = argb;
        self.mark_dirty();
    }

    pub fn text_color(&self) -> u32 {
        self.props.text_color
    }

    pub fn set_text_color(&mut self, argb: u32) {
        self.props.text_color = argb;
        self.mark_dirty();
    }

    pub fn text_size(&self) -> u32 {
        self.props.text_size
    }

    /// Clamped to 1..=999.
    pub fn set_text_size(&mut self, size: u32) {
        self.props.text_size = size.clamp(1, TEXT_SIZE_MAX);
        self.mark_dirty();
    }

    pub fn show_legend(&self) -> bool {
        self.props.show_legend
    }

    pub fn set_show_legend(&mut self, show: bool) {
        self.props.show_legend = show;
        self.mark_dirty();
    }

    pub fn show_point_labels(&self) -> bool {
        self.props.show_point_labels
    }

    pub fn set_show_point_labels(&mut self, show: bool) {
        self.props.show_point_labels = show;
        self.mark_dirty();
    }

    pub fn title(&self) -> &str {
        &self.props.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.props.title = title.into();
        self.mark_dirty();
    }

    pub fn x_label(&self) -> &str {
        &self.props.x_label
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.props.x_label = label.into();
        self.mark_dirty();
    }

    pub fn y_label(&self) -> &str {
        &self.props.y_label
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.props.y_label = label.into();
        self.mark_dirty();
    }

    // === Series data operations ===

    pub fn add_point(&mut self, series: &str, x: f32, y: f32) {
        self.table.add_point(series, x, y);
        self.mark_dirty();
    }

    pub fn push_value(&mut self, series: &str, y: f32) {
        self.table.push_value(series, y);
        self.mark_dirty();
    }

    pub fn push_values(&mut self, series: &str, values: &[f32]) {
        self.table.push_values(series, values);
        self.mark_dirty();
    }

    pub fn push_csv(&mut self, series: &str, csv: &str) -> Result<()> {
        // Elements before a malformed token stay applied, so the
        // widget is dirty either way.
        let result = self.table.push_csv(series, csv);
        self.mark_dirty();
        result
    }

    pub fn replace_value(&mut self, series: &str, y: f32) {
        self.table.replace_value(series, y);
        self.mark_dirty();
    }

    pub fn replace_values(&mut self, series: &str, values: &[f32]) {
        self.table.replace_values(series, values);
        self.mark_dirty();
    }

    pub fn replace_csv(&mut self, series: &str, csv: &str) -> Result<()> {
        self.table.replace_csv(series, csv)?;
        self.mark_dirty();
        Ok(())
    }

    pub fn clear_series(&mut self, series: &str) {
        if self.table.clear(series) {
            self.mark_dirty();
        }
    }

    pub fn clear_all(&mut self) {
        self.table.clear_all();
        self.mark_dirty();
    }

    pub fn series_names(&self) -> Vec<String> {
        self.table.names().map(str::to_string).collect()
    }

    pub fn series_color(&self, series: &str) -> Result<u32> {
        Ok(self.table.series_color(series)?.to_argb32())
    }

    pub fn set_series_color(&mut self, series: &str, argb: u32) -> Result<()> {
        self.table
            .set_series_color(series, Color::from_argb32(argb))?;
        self.mark_dirty();
        Ok(())
    }

    pub fn series_fill(&self, series: &str) -> Result<u32> {
        Ok(self.table.series_fill(series)?.1.to_argb32())
    }

    pub fn set_series_fill(&mut self, series: &str, fill: bool, argb: u32) -> Result<()> {
        self.table
            .set_series_fill(series, fill, Color::from_argb32(argb))?;
        self.mark_dirty();
        Ok(())
    }

    pub fn table(&self) -> &SeriesTable {
        &self.table
    }

    // === Export ===

    /// Capture the widget's current contents as an RGBA frame.
    ///
    /// The frame starts from the widget background color, so exports
    /// match what is on screen even over transparent hosts.
    pub fn snapshot(&self) -> brix_export::Result<Frame> {
        let mut ctx = PaintContext::new();
        self.paint(&mut ctx);
        let mut raster = Rasterizer::new(
            self.width,
            self.height,
            Color::from_argb32(self.props.background_color),
        )?;
        raster.run(ctx.commands());
        Ok(raster.finish())
    }

    /// Save the current chart as `<dir>/<name>.png`.
    pub fn save_to_path(
        &self,
        name: &str,
        dir: impl AsRef<Path>,
    ) -> brix_export::Result<PathBuf> {
        let frame = self.snapshot()?;
        let file = ImageFormat::Png.ensure_extension(name);
        brix_export::save_to_path(&frame, ImageFormat::Png, 100, dir.as_ref().join(file))
    }

    /// Save the current chart into a gallery with full metadata.
    pub fn save_to_gallery(
        &self,
        gallery: &MediaGallery,
        file_name: &str,
        subfolder: &str,
        description: &str,
        format: ImageFormat,
        quality: i32,
    ) -> brix_export::Result<MediaRecord> {
        let frame = self.snapshot()?;
        gallery.insert(&frame, file_name, subfolder, description, format, quality)
    }

    /// One-block export: JPEG at full quality under a timestamped name.
    pub fn export_chart(&self, gallery: &MediaGallery) -> brix_export::Result<MediaRecord> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.save_to_gallery(
            gallery,
            &format!("chart-{stamp}.jpg"),
            "",
            "Chart export",
            ImageFormat::Jpeg,
            100,
        )
    }
}

impl Default for ChartWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle for a chart widget.
///
/// Event handlers clone the handle and mutate the widget under the
/// lock; the host keeps one clone for layout and painting.
#[derive(Clone)]
pub struct ChartHandle(pub Arc<Mutex<ChartWidget>>);

impl ChartHandle {
    pub fn new(widget: ChartWidget) -> Self {
        Self(Arc::new(Mutex::new(widget)))
    }

    pub fn lock(&self) -> MutexGuard<'_, ChartWidget> {
        self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
