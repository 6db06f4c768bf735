//! The owned series registry.
//!
//! Plain value data is the source of truth: each named series holds a
//! sorted point list plus a style struct, and renderers derive their
//! geometry from it on demand. Nothing here touches a drawing backend.

use brix_paint::Color;
use indexmap::map::Entry;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use thiserror::Error;
use tracing::debug;

/// Chart model errors.
#[derive(Error, Debug)]
pub enum ChartError {
    /// A per-series operation named a series that does not exist
    #[error("no series named {name:?}")]
    SeriesNotFound { name: String },

    /// A data token could not be parsed as a number
    #[error("cannot parse {token:?} as a number")]
    InvalidNumber {
        token: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

/// Result type for chart model operations
pub type Result<T> = std::result::Result<T, ChartError>;

/// A single (x, y) data point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlotPoint {
    pub x: f32,
    pub y: f32,
}

impl PlotPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Visual styling for one series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    /// Stroke and marker color
    pub color: Color,
    pub line_width: f32,
    pub marker_radius: f32,
    /// Fill the area between the line and the x axis
    pub fill: bool,
    pub fill_color: Color,
    /// Text size for per-point value labels
    pub value_text_size: f32,
}

impl SeriesStyle {
    /// The fixed style new series receive, around a palette color.
    pub fn with_color(color: Color) -> Self {
        Self {
            color,
            line_width: 2.5,
            marker_radius: 4.5,
            fill: false,
            fill_color: color.with_alpha(0.35),
            value_text_size: 10.0,
        }
    }
}

/// Default palette assigned to new series, cycling.
pub fn palette_color(index: usize) -> Color {
    const PALETTE: [[u8; 3]; 5] = [
        [193, 37, 82],
        [255, 102, 0],
        [245, 199, 0],
        [106, 150, 31],
        [179, 100, 53],
    ];
    let [r, g, b] = PALETTE[index % PALETTE.len()];
    Color::from_rgba8(r, g, b, 255)
}

/// A named, ordered sequence of data points and its style.
///
/// Points are kept sorted by x, and x values are unique: inserting at
/// an occupied x replaces that point (last write wins).
#[derive(Clone, Debug)]
pub struct Series {
    points: Vec<PlotPoint>,
    pub style: SeriesStyle,
}

impl Series {
    fn with_style(style: SeriesStyle) -> Self {
        Self {
            points: Vec::new(),
            style,
        }
    }

    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Insert a point in sorted position, replacing any point with the
    /// same x.
    pub fn insert_point(&mut self, x: f32, y: f32) {
        match self.points.binary_search_by(|p| p.x.total_cmp(&x)) {
            Ok(i) => self.points[i] = PlotPoint::new(x, y),
            Err(i) => self.points.insert(i, PlotPoint::new(x, y)),
        }
    }

    /// Append a value using the running point count as its x.
    pub fn push_value(&mut self, y: f32) {
        let x = self.points.len() as f32;
        self.insert_point(x, y);
    }

    pub fn x_bounds(&self) -> Option<(f32, f32)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.x, last.x)),
            _ => None,
        }
    }

    pub fn y_bounds(&self) -> Option<(f32, f32)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.y, p.y)),
            Some((lo, hi)) => Some((lo.min(p.y), hi.max(p.y))),
        })
    }
}

/// Registry of series keyed by name, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct SeriesTable {
    series: IndexMap<String, Series, FxBuildHasher>,
    /// Count of series ever created; drives palette cycling
    created: usize,
}

impl SeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a series, creating it with the next palette style when
    /// it does not exist yet.
    fn ensure(&mut self, name: &str) -> &mut Series {
        let next = self.created;
        let entry = self.series.entry(name.to_string());
        let is_new = matches!(&entry, Entry::Vacant(_));
        let series =
            entry.or_insert_with(|| Series::with_style(SeriesStyle::with_color(palette_color(next))));
        if is_new {
            self.created += 1;
            debug!(series = name, "series created");
        }
        series
    }

    /// Add one (x, y) point; creates the series lazily.
    pub fn add_point(&mut self, name: &str, x: f32, y: f32) {
        self.ensure(name).insert_point(x, y);
    }

    /// Append a value with the series' running index as x.
    pub fn push_value(&mut self, name: &str, y: f32) {
        self.ensure(name).push_value(y);
    }

    /// Append each value in order.
    pub fn push_values(&mut self, name: &str, values: &[f32]) {
        for &y in values {
            self.push_value(name, y);
        }
    }

    /// Append values from a comma-separated string.
    ///
    /// Elements are applied in order; a malformed element stops the
    /// remaining ones and is reported, while elements already applied
    /// stay applied. Empty input is a no-op.
    pub fn push_csv(&mut self, name: &str, csv: &str) -> Result<()> {
        if csv.is_empty() {
            return Ok(());
        }
        for token in csv.split(',') {
            let y = parse_number(token)?;
            self.push_value(name, y);
        }
        Ok(())
    }

    /// Swap a series' points for `values` in one step (single redraw,
    /// no intermediate empty state). Style is preserved for an
    /// existing series.
    pub fn replace_values(&mut self, name: &str, values: &[f32]) {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &y)| PlotPoint::new(i as f32, y))
            .collect();
        self.ensure(name).points = points;
    }

    /// CSV form of [`Self::replace_values`]. The whole string is
    /// parsed before anything changes, so a malformed element leaves
    /// the existing series untouched.
    pub fn replace_csv(&mut self, name: &str, csv: &str) -> Result<()> {
        let mut values = Vec::new();
        if !csv.is_empty() {
            for token in csv.split(',') {
                values.push(parse_number(token)?);
            }
        }
        self.replace_values(name, &values);
        Ok(())
    }

    /// Replace the series with a single value.
    pub fn replace_value(&mut self, name: &str, y: f32) {
        self.replace_values(name, &[y]);
    }

    /// Remove one series. Removing an unknown name is a no-op;
    /// returns whether anything was removed.
    pub fn clear(&mut self, name: &str) -> bool {
        self.series.shift_remove(name).is_some()
    }

    /// Remove every series.
    pub fn clear_all(&mut self) {
        self.series.clear();
    }

    /// Series names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    fn get_known(&self, name: &str) -> Result<&Series> {
        self.series.get(name).ok_or_else(|| ChartError::SeriesNotFound {
            name: name.to_string(),
        })
    }

    fn get_known_mut(&mut self, name: &str) -> Result<&mut Series> {
        self.series
            .get_mut(name)
            .ok_or_else(|| ChartError::SeriesNotFound {
                name: name.to_string(),
            })
    }

    pub fn series_color(&self, name: &str) -> Result<Color> {
        Ok(self.get_known(name)?.style.color)
    }

    /// Set a series' stroke and marker color.
    pub fn set_series_color(&mut self, name: &str, color: Color) -> Result<()> {
        self.get_known_mut(name)?.style.color = color;
        Ok(())
    }

    pub fn series_fill(&self, name: &str) -> Result<(bool, Color)> {
        let style = &self.get_known(name)?.style;
        Ok((style.fill, style.fill_color))
    }

    pub fn set_series_fill(&mut self, name: &str, fill: bool, color: Color) -> Result<()> {
        let style = &mut self.get_known_mut(name)?.style;
        style.fill = fill;
        style.fill_color = color;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.series.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Bounding box over every point of every series.
    pub fn bounds(&self) -> Option<(PlotPoint, PlotPoint)> {
        let mut acc: Option<(PlotPoint, PlotPoint)> = None;
        for series in self.series.values() {
            let (Some((x0, x1)), Some((y0, y1))) = (series.x_bounds(), series.y_bounds()) else {
                continue;
            };
            acc = Some(match acc {
                None => (PlotPoint::new(x0, y0), PlotPoint::new(x1, y1)),
                Some((lo, hi)) => (
                    PlotPoint::new(lo.x.min(x0), lo.y.min(y0)),
                    PlotPoint::new(hi.x.max(x1), hi.y.max(y1)),
                ),
            });
        }
        acc
    }
}

fn parse_number(token: &str) -> Result<f32> {
    let trimmed = token.trim();
    trimmed
        .parse()
        .map_err(|source| ChartError::InvalidNumber {
            token: trimmed.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn n_adds_yield_n_points_in_order() {
        let mut table = SeriesTable::new();
        table.add_point("a", 3.0, 30.0);
        table.add_point("a", 1.0, 10.0);
        table.add_point("a", 2.0, 20.0);
        let points = table.get("a").unwrap().points();
        assert_eq!(points.len(), 3);
        assert_eq!(
            points,
            &[
                PlotPoint::new(1.0, 10.0),
                PlotPoint::new(2.0, 20.0),
                PlotPoint::new(3.0, 30.0)
            ]
        );
    }

    #[test]
    fn equal_x_replaces_instead_of_duplicating() {
        let mut table = SeriesTable::new();
        table.add_point("a", 1.0, 10.0);
        table.add_point("a", 1.0, 99.0);
        let points = table.get("a").unwrap().points();
        assert_eq!(points, &[PlotPoint::new(1.0, 99.0)]);
    }

    #[test]
    fn push_value_uses_running_index() {
        let mut table = SeriesTable::new();
        table.push_values("a", &[5.0, 6.0, 7.0]);
        let points = table.get("a").unwrap().points();
        assert_eq!(points[0], PlotPoint::new(0.0, 5.0));
        assert_eq!(points[2], PlotPoint::new(2.0, 7.0));
    }

    #[test]
    fn names_keep_insertion_order() {
        let mut table = SeriesTable::new();
        table.push_value("temp", 1.0);
        table.push_value("humidity", 2.0);
        table.push_value("pressure", 3.0);
        let names: Vec<_> = table.names().collect();
        assert_eq!(names, ["temp", "humidity", "pressure"]);
    }

    #[test]
    fn csv_appends_each_value() {
        let mut table = SeriesTable::new();
        table.push_csv("a", "1, 2,8,4").unwrap();
        let ys: Vec<f32> = table.get("a").unwrap().points().iter().map(|p| p.y).collect();
        assert_eq!(ys, [1.0, 2.0, 8.0, 4.0]);
    }

    #[test]
    fn csv_stops_at_bad_token_keeping_prefix() {
        let mut table = SeriesTable::new();
        let err = table.push_csv("a", "1,zap,3").unwrap_err();
        assert!(matches!(err, ChartError::InvalidNumber { ref token, .. } if token == "zap"));
        assert_eq!(table.get("a").unwrap().len(), 1);
    }

    #[test]
    fn empty_csv_is_noop() {
        let mut table = SeriesTable::new();
        table.push_csv("a", "").unwrap();
        assert!(table.get("a").is_none());
    }

    #[test]
    fn replace_csv_is_atomic_on_error() {
        let mut table = SeriesTable::new();
        table.push_values("a", &[1.0, 2.0]);
        let err = table.replace_csv("a", "7,bad").unwrap_err();
        assert!(matches!(err, ChartError::InvalidNumber { .. }));
        // Old points survive a failed replace.
        assert_eq!(table.get("a").unwrap().len(), 2);

        table.replace_csv("a", "7,8,9").unwrap();
        let ys: Vec<f32> = table.get("a").unwrap().points().iter().map(|p| p.y).collect();
        assert_eq!(ys, [7.0, 8.0, 9.0]);
    }

    #[test]
    fn replace_preserves_style() {
        let mut table = SeriesTable::new();
        table.push_value("a", 1.0);
        table.set_series_color("a", Color::from_argb32(0xFF123456)).unwrap();
        table.replace_values("a", &[9.0]);
        assert_eq!(
            table.series_color("a").unwrap().to_argb32(),
            0xFF123456
        );
    }

    #[test]
    fn clear_unknown_series_is_noop() {
        let mut table = SeriesTable::new();
        assert!(!table.clear("ghost"));
        table.push_value("a", 1.0);
        assert!(table.clear("a"));
        assert!(!table.clear("a"));
    }

    #[test]
    fn clear_all_empties_names() {
        let mut table = SeriesTable::new();
        table.push_value("a", 1.0);
        table.push_value("b", 2.0);
        table.clear_all();
        assert_eq!(table.names().count(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn color_round_trips() {
        let mut table = SeriesTable::new();
        table.push_value("a", 1.0);
        table.set_series_color("a", Color::from_argb32(0xFF00FF00)).unwrap();
        assert_eq!(table.series_color("a").unwrap().to_argb32(), 0xFF00FF00);
    }

    #[test]
    fn unknown_series_color_is_reported() {
        let table = SeriesTable::new();
        assert!(matches!(
            table.series_color("ghost"),
            Err(ChartError::SeriesNotFound { .. })
        ));
    }

    #[test]
    fn new_series_cycle_the_palette() {
        let mut table = SeriesTable::new();
        for i in 0..6 {
            table.push_value(&format!("s{i}"), 0.0);
        }
        let first = table.series_color("s0").unwrap();
        assert_eq!(table.series_color("s5").unwrap(), first);
        assert_ne!(table.series_color("s1").unwrap(), first);
    }

    #[test]
    fn palette_survives_clear_all() {
        // Recreated series keep advancing the palette rather than
        // resetting to the first entry.
        let mut table = SeriesTable::new();
        table.push_value("a", 1.0);
        let first = table.series_color("a").unwrap();
        table.clear_all();
        table.push_value("b", 1.0);
        assert_ne!(table.series_color("b").unwrap(), first);
    }

    #[test]
    fn bounds_span_all_series() {
        let mut table = SeriesTable::new();
        table.add_point("a", 0.0, -5.0);
        table.add_point("b", 10.0, 5.0);
        let (lo, hi) = table.bounds().unwrap();
        assert_eq!((lo.x, lo.y), (0.0, -5.0));
        assert_eq!((hi.x, hi.y), (10.0, 5.0));
    }
}
