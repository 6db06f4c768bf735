//! Data-domain to pixel-space mapping.

use brix_paint::Point;

use crate::series::SeriesTable;

/// 1D numeric domain (min..max).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain1D {
    pub min: f32,
    pub max: f32,
}

impl Domain1D {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }

    /// Widen a degenerate or invalid domain into something drawable.
    fn normalized(mut self) -> Self {
        if self.max.partial_cmp(&self.min) != Some(std::cmp::Ordering::Greater) {
            if self.min.is_finite() && self.max.is_finite() {
                self.min -= 1.0;
                self.max += 1.0;
            } else {
                // Fallback for non-finite bounds (e.g. all NaN data).
                self.min = -1.0;
                self.max = 1.0;
            }
        }
        self
    }
}

/// 2D domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain2D {
    pub x: Domain1D,
    pub y: Domain1D,
}

impl Domain2D {
    pub fn new(x: Domain1D, y: Domain1D) -> Self {
        Self { x, y }
    }
}

/// View transform for a chart: data domain mapped into local pixel
/// space through a padded plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartView {
    pub domain: Domain2D,
    /// Padding around the plotting area (left, top, right, bottom).
    pub padding: [f32; 4],
}

impl ChartView {
    pub fn new(domain: Domain2D) -> Self {
        Self {
            domain,
            padding: [32.0, 16.0, 16.0, 24.0],
        }
    }

    /// Fit a view to the table's data bounds, normalizing degenerate
    /// ranges (single point, all-equal y, empty table).
    pub fn fit(table: &SeriesTable) -> Self {
        let domain = match table.bounds() {
            Some((lo, hi)) => Domain2D::new(
                Domain1D::new(lo.x, hi.x).normalized(),
                Domain1D::new(lo.y, hi.y).normalized(),
            ),
            None => Domain2D::new(Domain1D::new(0.0, 1.0), Domain1D::new(0.0, 1.0)),
        };
        Self::new(domain)
    }

    pub fn with_padding(mut self, padding: [f32; 4]) -> Self {
        self.padding = padding;
        self
    }

    /// Plot rectangle within a `w` x `h` widget, as (x, y, w, h).
    pub fn plot_rect(&self, w: f32, h: f32) -> (f32, f32, f32, f32) {
        let [left, top, right, bottom] = self.padding;
        (left, top, w - left - right, h - top - bottom)
    }

    pub fn x_to_px(&self, x: f32, plot_x: f32, plot_w: f32) -> f32 {
        let t = (x - self.domain.x.min) / self.domain.x.span();
        plot_x + t * plot_w
    }

    pub fn y_to_px(&self, y: f32, plot_y: f32, plot_h: f32) -> f32 {
        let t = (y - self.domain.y.min) / self.domain.y.span();
        // Pixel y grows downward.
        plot_y + (1.0 - t) * plot_h
    }

    pub fn data_to_px(
        &self,
        x: f32,
        y: f32,
        plot_x: f32,
        plot_y: f32,
        plot_w: f32,
        plot_h: f32,
    ) -> Point {
        Point::new(
            self.x_to_px(x, plot_x, plot_w),
            self.y_to_px(y, plot_y, plot_h),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_of_empty_table_is_unit_domain() {
        let view = ChartView::fit(&SeriesTable::new());
        assert_eq!(view.domain.x, Domain1D::new(0.0, 1.0));
        assert_eq!(view.domain.y, Domain1D::new(0.0, 1.0));
    }

    #[test]
    fn fit_normalizes_single_point() {
        let mut table = SeriesTable::new();
        table.add_point("a", 2.0, 5.0);
        let view = ChartView::fit(&table);
        assert!(view.domain.x.is_valid());
        assert!(view.domain.y.is_valid());
        assert!(view.domain.x.min < 2.0 && view.domain.x.max > 2.0);
    }

    #[test]
    fn y_axis_is_inverted() {
        let view = ChartView::new(Domain2D::new(
            Domain1D::new(0.0, 10.0),
            Domain1D::new(0.0, 10.0),
        ));
        // Max y maps to the top of the plot.
        assert_eq!(view.y_to_px(10.0, 20.0, 100.0), 20.0);
        assert_eq!(view.y_to_px(0.0, 20.0, 100.0), 120.0);
    }

    #[test]
    fn x_maps_linearly_across_plot() {
        let view = ChartView::new(Domain2D::new(
            Domain1D::new(0.0, 4.0),
            Domain1D::new(0.0, 1.0),
        ));
        assert_eq!(view.x_to_px(2.0, 10.0, 100.0), 60.0);
    }
}
