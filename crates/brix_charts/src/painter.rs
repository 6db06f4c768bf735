//! Chart painting: model state to paint commands.
//!
//! Layout mirrors the placed component: title across the top, rotated
//! y-axis label on the left, x-axis label along the bottom, and the
//! plot area between, with tick labels in the gutters.

use brix_paint::{Color, PaintContext, Path, Point};

use crate::common::{draw_grid, fill_bg};
use crate::format::format_compact;
use crate::scale::LinearScale;
use crate::series::Series;
use crate::view::ChartView;
use crate::widget::ChartWidget;

const GRID_DIVISIONS: usize = 4;
const TICK_SIZE: f32 = 10.0;

impl ChartWidget {
    /// Record the widget's current contents into `ctx`.
    ///
    /// Safe at any size; a widget without layout (0x0) records nothing.
    pub fn paint(&self, ctx: &mut PaintContext) {
        let w = self.width() as f32;
        let h = self.height() as f32;
        if w <= 0.0 || h <= 0.0 {
            return;
        }

        let bg = Color::from_argb32(self.props.background_color);
        let text = Color::from_argb32(self.props.text_color);
        fill_bg(ctx, w, h, bg);

        let title_size = self.props.text_size as f32;
        let label_size = (title_size * 0.75).max(8.0);

        let top = if self.props.title.is_empty() {
            8.0
        } else {
            title_size * 1.5
        };
        let bottom = TICK_SIZE * 1.8
            + if self.props.x_label.is_empty() {
                4.0
            } else {
                label_size * 1.5
            };
        let left = 42.0
            + if self.props.y_label.is_empty() {
                4.0
            } else {
                label_size * 1.5
            };
        let right = 12.0;

        let view = ChartView::fit(&self.table).with_padding([left, top, right, bottom]);
        let (px, py, pw, ph) = view.plot_rect(w, h);

        if pw > 0.0 && ph > 0.0 {
            let grid = text.with_alpha(0.15);
            draw_grid(ctx, px, py, pw, ph, grid, GRID_DIVISIONS);
            self.paint_tick_labels(ctx, &view, (px, py, pw, ph), text);

            if self.table.is_empty() {
                ctx.draw_text_aligned(
                    "No chart data available.",
                    px + pw / 2.0,
                    py + ph / 2.0,
                    label_size,
                    text.with_alpha(0.6),
                    brix_paint::TextAlign::Center,
                );
            } else {
                ctx.push_clip(px, py, pw, ph);
                for (_, series) in self.table.iter() {
                    self.paint_series(ctx, series, &view, (px, py, pw, ph));
                }
                if self.props.show_point_labels {
                    for (_, series) in self.table.iter() {
                        self.paint_value_labels(ctx, series, &view, (px, py, pw, ph), text);
                    }
                }
                ctx.pop_clip();
            }

            if self.props.show_legend && !self.table.is_empty() {
                self.paint_legend(ctx, (px, py), text);
            }
        }

        if !self.props.title.is_empty() {
            ctx.draw_text_aligned(
                &self.props.title,
                w / 2.0,
                title_size * 1.1,
                title_size,
                text,
                brix_paint::TextAlign::Center,
            );
        }
        if !self.props.x_label.is_empty() {
            ctx.draw_text_aligned(
                &self.props.x_label,
                px + pw / 2.0,
                h - label_size * 0.45,
                label_size,
                text,
                brix_paint::TextAlign::Center,
            );
        }
        if !self.props.y_label.is_empty() {
            ctx.draw_text_rotated(
                &self.props.y_label,
                label_size,
                py + ph / 2.0,
                label_size,
                text,
            );
        }
    }

    fn paint_tick_labels(
        &self,
        ctx: &mut PaintContext,
        view: &ChartView,
        plot: (f32, f32, f32, f32),
        text: Color,
    ) {
        let (px, py, pw, ph) = plot;
        let xs = LinearScale::new(view.domain.x.min, view.domain.x.max, px, px + pw);
        for v in xs.ticks(GRID_DIVISIONS + 1) {
            ctx.draw_text_aligned(
                format_compact(v),
                xs.map(v),
                py + ph + TICK_SIZE * 1.3,
                TICK_SIZE,
                text,
                brix_paint::TextAlign::Center,
            );
        }
        let ys = LinearScale::new(view.domain.y.min, view.domain.y.max, py + ph, py);
        for v in ys.ticks(GRID_DIVISIONS + 1) {
            ctx.draw_text_aligned(
                format_compact(v),
                px - 6.0,
                ys.map(v) + TICK_SIZE * 0.35,
                TICK_SIZE,
                text,
                brix_paint::TextAlign::Right,
            );
        }
    }

    fn paint_series(
        &self,
        ctx: &mut PaintContext,
        series: &Series,
        view: &ChartView,
        plot: (f32, f32, f32, f32),
    ) {
        let (px, py, pw, ph) = plot;
        let points: Vec<Point> = series
            .points()
            .iter()
            .map(|p| view.data_to_px(p.x, p.y, px, py, pw, ph))
            .collect();

        if series.style.fill && points.len() >= 2 {
            // Fill down to y=0 when it is in view, else to the plot edge.
            let zero = 0.0f32.clamp(view.domain.y.min, view.domain.y.max);
            let base = view.y_to_px(zero, py, ph);
            let mut polygon = points.clone();
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                polygon.push(Point::new(last.x, base));
                polygon.push(Point::new(first.x, base));
            }
            ctx.fill_path(Path::polygon(&polygon), series.style.fill_color);
        }

        if points.len() >= 2 {
            ctx.stroke_polyline(&points, series.style.color, series.style.line_width);
        }
        for p in &points {
            ctx.fill_circle(p.x, p.y, series.style.marker_radius, series.style.color);
        }
    }

    fn paint_value_labels(
        &self,
        ctx: &mut PaintContext,
        series: &Series,
        view: &ChartView,
        plot: (f32, f32, f32, f32),
        text: Color,
    ) {
        let (px, py, pw, ph) = plot;
        for p in series.points() {
            let at = view.data_to_px(p.x, p.y, px, py, pw, ph);
            ctx.draw_text_aligned(
                format_compact(p.y),
                at.x,
                at.y - series.style.marker_radius - 3.0,
                series.style.value_text_size,
                text,
                brix_paint::TextAlign::Center,
            );
        }
    }

    fn paint_legend(&self, ctx: &mut PaintContext, origin: (f32, f32), text: Color) {
        let (px, py) = origin;
        let mut x = px + 6.0;
        let y = py + 12.0;
        for (name, series) in self.table.iter() {
            ctx.fill_rect(x, y - 7.0, 8.0, 8.0, series.style.color);
            ctx.draw_text(name, x + 12.0, y, TICK_SIZE, text);
            // Painter has no font metrics; advance by an approximate
            // character width.
            x += 12.0 + name.chars().count() as f32 * TICK_SIZE * 0.62 + 14.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brix_paint::PaintCommand;
    use crate::widget::ChartWidget;

    fn commands_of(widget: &ChartWidget) -> Vec<PaintCommand> {
        let mut ctx = PaintContext::new();
        widget.paint(&mut ctx);
        ctx.take_commands()
    }

    fn count_text(commands: &[PaintCommand], needle: &str) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::DrawText { text, .. } if text == needle))
            .count()
    }

    #[test]
    fn unsized_widget_paints_nothing() {
        let widget = ChartWidget::new();
        assert!(commands_of(&widget).is_empty());
    }

    #[test]
    fn empty_chart_shows_placeholder_text() {
        let mut widget = ChartWidget::new();
        widget.resize(320, 240);
        let commands = commands_of(&widget);
        assert_eq!(count_text(&commands, "No chart data available."), 1);
        assert_eq!(count_text(&commands, "Title"), 1);
        assert_eq!(count_text(&commands, "X Axis"), 1);
        assert_eq!(count_text(&commands, "Y Axis"), 1);
    }

    #[test]
    fn one_polyline_and_marker_per_point() {
        let mut widget = ChartWidget::new();
        widget.resize(320, 240);
        widget.push_values("a", &[1.0, 2.0, 3.0]);
        let commands = commands_of(&widget);
        let polylines = commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::StrokePath { .. }))
            .count();
        let markers = commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::FillCircle { .. }))
            .count();
        assert_eq!(polylines, 1);
        assert_eq!(markers, 3);
    }

    #[test]
    fn series_are_clipped_to_the_plot() {
        let mut widget = ChartWidget::new();
        widget.resize(320, 240);
        widget.push_value("a", 1.0);
        let commands = commands_of(&widget);
        let pushes = commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::PushClip { .. }))
            .count();
        let pops = commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::PopClip))
            .count();
        assert_eq!(pushes, 1);
        assert_eq!(pops, 1);
    }

    #[test]
    fn point_labels_follow_the_toggle() {
        let mut widget = ChartWidget::new();
        widget.resize(320, 240);
        widget.push_values("a", &[3.0, 9.0]);
        // "3" already appears once as the lowest y tick label.
        assert_eq!(count_text(&commands_of(&widget), "3"), 1);
        widget.set_show_point_labels(true);
        assert_eq!(count_text(&commands_of(&widget), "3"), 2);
    }

    #[test]
    fn legend_lists_each_series_name() {
        let mut widget = ChartWidget::new();
        widget.resize(320, 240);
        widget.push_value("temp", 1.0);
        widget.push_value("humidity", 2.0);
        assert_eq!(count_text(&commands_of(&widget), "temp"), 0);
        widget.set_show_legend(true);
        let commands = commands_of(&widget);
        assert_eq!(count_text(&commands, "temp"), 1);
        assert_eq!(count_text(&commands, "humidity"), 1);
    }

    #[test]
    fn fill_emits_a_polygon() {
        let mut widget = ChartWidget::new();
        widget.resize(320, 240);
        widget.push_values("a", &[1.0, 2.0]);
        widget.set_series_fill("a", true, 0x8800FF00).unwrap();
        let commands = commands_of(&widget);
        assert!(commands
            .iter()
            .any(|c| matches!(c, PaintCommand::FillPath { .. })));
    }
}
