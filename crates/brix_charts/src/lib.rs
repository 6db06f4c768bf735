//! brix_charts
//!
//! The chart component for Brix apps: an owned data model with a
//! narrow mutation API, painted through `brix_paint` and exported
//! through `brix_export`.
//!
//! Design notes:
//! - The series table is the source of truth — plain point lists and
//!   style structs keyed by name, insertion-ordered. Renderers derive
//!   everything from it; no registry of live backend objects.
//! - Event-handler code shares the widget through [`ChartHandle`] and
//!   mutates it synchronously; every mutation flags a redraw for the
//!   host to pick up.
//! - Unknown-series lookups and malformed data are reported as
//!   [`ChartError`], never swallowed.

mod common;
mod painter;

pub mod format;
pub mod mock;
pub mod scale;
pub mod series;
pub mod view;
pub mod widget;

pub use mock::MockChart;
pub use series::{ChartError, PlotPoint, Series, SeriesStyle, SeriesTable};
pub use view::{ChartView, Domain1D, Domain2D};
pub use widget::{ChartHandle, ChartProperties, ChartWidget};

/// Common imports for chart users.
pub mod prelude {
    pub use crate::mock::MockChart;
    pub use crate::series::{ChartError, PlotPoint, SeriesStyle, SeriesTable};
    pub use crate::widget::{ChartHandle, ChartProperties, ChartWidget};
    pub use brix_export::{ExportError, ImageFormat, MediaGallery, MediaRecord};
}
