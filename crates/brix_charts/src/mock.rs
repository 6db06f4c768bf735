//! Designer-side stand-in for the chart component.
//!
//! The visual editor places this instead of the runtime widget: it
//! paints a chart-shaped placeholder from the designer properties
//! alone, with no live data behind it.

use brix_paint::{Color, PaintContext, Point, TextAlign};

use crate::common::{draw_grid, fill_bg};
use crate::series::palette_color;
use crate::widget::ChartProperties;

/// Component type name, as the designer document spells it.
pub const TYPE: &str = "Chart";

/// Canned preview traces, as fractions of the plot area.
const PREVIEW_SERIES: [&[(f32, f32)]; 2] = [
    &[(0.0, 0.75), (0.25, 0.4), (0.5, 0.55), (0.75, 0.2), (1.0, 0.35)],
    &[(0.0, 0.9), (0.25, 0.8), (0.5, 0.6), (0.75, 0.65), (1.0, 0.45)],
];

/// Mock chart shown on the designer canvas.
pub struct MockChart {
    props: ChartProperties,
}

impl MockChart {
    pub fn new() -> Self {
        Self::with_properties(ChartProperties::default())
    }

    pub fn with_properties(props: ChartProperties) -> Self {
        Self { props }
    }

    pub fn properties(&self) -> &ChartProperties {
        &self.props
    }

    pub fn properties_mut(&mut self) -> &mut ChartProperties {
        &mut self.props
    }

    /// Paint the placeholder at the given designer size.
    pub fn paint(&self, ctx: &mut PaintContext, w: f32, h: f32) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let bg = Color::from_argb32(self.props.background_color);
        let text = Color::from_argb32(self.props.text_color);
        fill_bg(ctx, w, h, bg);
        ctx.stroke_rect(0.5, 0.5, w - 1.0, h - 1.0, text.with_alpha(0.4), 1.0);

        let title_size = (self.props.text_size as f32).min(h / 4.0);
        let top = if self.props.title.is_empty() {
            6.0
        } else {
            title_size * 1.4
        };
        let (px, py) = (10.0, top);
        let (pw, ph) = (w - 20.0, h - top - 10.0);
        if pw > 0.0 && ph > 0.0 {
            draw_grid(ctx, px, py, pw, ph, text.with_alpha(0.12), 4);
            for (i, trace) in PREVIEW_SERIES.iter().enumerate() {
                let points: Vec<Point> = trace
                    .iter()
                    .map(|&(tx, ty)| Point::new(px + tx * pw, py + ty * ph))
                    .collect();
                ctx.stroke_polyline(&points, palette_color(i), 2.0);
            }
        }

        if !self.props.title.is_empty() {
            ctx.draw_text_aligned(
                &self.props.title,
                w / 2.0,
                title_size,
                title_size,
                text,
                TextAlign::Center,
            );
        }
    }
}

impl Default for MockChart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brix_paint::PaintCommand;

    #[test]
    fn placeholder_shows_preview_traces_and_title() {
        let mock = MockChart::new();
        let mut ctx = PaintContext::new();
        mock.paint(&mut ctx, 200.0, 120.0);
        let traces = ctx
            .commands()
            .iter()
            .filter(|c| matches!(c, PaintCommand::StrokePath { .. }))
            .count();
        assert_eq!(traces, PREVIEW_SERIES.len());
        assert!(ctx
            .commands()
            .iter()
            .any(|c| matches!(c, PaintCommand::DrawText { text, .. } if text == "Title")));
    }

    #[test]
    fn zero_size_paints_nothing() {
        let mock = MockChart::new();
        let mut ctx = PaintContext::new();
        mock.paint(&mut ctx, 0.0, 100.0);
        assert!(ctx.commands().is_empty());
    }
}
