//! CPU execution of recorded paint commands.
//!
//! Mirrors what the GPU surface does at runtime, but into plain RGBA8
//! memory so widget contents can be captured headlessly and encoded.

use brix_paint::{
    Circle, Color, PaintCommand, Path, PathCommand, Point, Rect, StrokeStyle, TextAlign,
};

use crate::error::{ExportError, Result};
use crate::frame::Frame;
use crate::text::FontStore;

/// Executes paint commands into a [`Frame`].
pub struct Rasterizer {
    frame: Frame,
    clip_stack: Vec<Rect>,
    fonts: FontStore,
}

impl Rasterizer {
    /// Create a rasterizer over a fresh frame filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ExportError::ZeroSize { width, height });
        }
        Ok(Self {
            frame: Frame::filled(width, height, background),
            clip_stack: Vec::new(),
            fonts: FontStore::load_system(),
        })
    }

    /// Replace the font store (tests, bundled fonts).
    pub fn with_fonts(mut self, fonts: FontStore) -> Self {
        self.fonts = fonts;
        self
    }

    /// Execute a command list in order.
    pub fn run(&mut self, commands: &[PaintCommand]) {
        for command in commands {
            match command {
                PaintCommand::FillRect { rect, style } => self.fill_rect(*rect, style.color),
                PaintCommand::StrokeRect { rect, style } => self.stroke_rect(*rect, *style),
                PaintCommand::FillCircle { circle, style } => {
                    self.fill_circle(*circle, style.color);
                }
                PaintCommand::StrokeCircle { circle, style } => {
                    self.stroke_circle(*circle, *style);
                }
                PaintCommand::FillPath { path, style } => self.fill_path(path, style.color),
                PaintCommand::StrokePath { path, style } => self.stroke_path(path, *style),
                PaintCommand::DrawText {
                    text,
                    position,
                    size,
                    color,
                    align,
                    rotated,
                } => self.draw_text(text, *position, *size, *color, *align, *rotated),
                PaintCommand::PushClip { rect } => self.clip_stack.push(*rect),
                PaintCommand::PopClip => {
                    self.clip_stack.pop();
                }
            }
        }
    }

    /// Consume the rasterizer, yielding the finished frame.
    pub fn finish(self) -> Frame {
        self.frame
    }

    /// Effective clip: intersection of the stack with the frame bounds.
    fn clip(&self) -> Rect {
        let mut rect = Rect::new(
            0.0,
            0.0,
            self.frame.width() as f32,
            self.frame.height() as f32,
        );
        for clip in &self.clip_stack {
            rect = rect.intersect(clip);
        }
        rect
    }

    /// Integer pixel bounds of `rect` under the current clip.
    fn pixel_bounds(&self, rect: Rect) -> Option<(i32, i32, i32, i32)> {
        let r = rect.intersect(&self.clip());
        if r.is_empty() {
            return None;
        }
        Some((
            r.x.floor() as i32,
            r.y.floor() as i32,
            (r.x + r.width).ceil() as i32,
            (r.y + r.height).ceil() as i32,
        ))
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let clipped = rect.intersect(&self.clip());
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(rect) else {
            return;
        };
        for y in y0..y1 {
            let cov_y = (clipped.y + clipped.height).min(y as f32 + 1.0) - clipped.y.max(y as f32);
            if cov_y <= 0.0 {
                continue;
            }
            for x in x0..x1 {
                let cov_x =
                    (clipped.x + clipped.width).min(x as f32 + 1.0) - clipped.x.max(x as f32);
                if cov_x <= 0.0 {
                    continue;
                }
                self.frame
                    .blend_pixel(x, y, color, (cov_x * cov_y).clamp(0.0, 1.0));
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle) {
        let corners = [
            Point::new(rect.x, rect.y),
            Point::new(rect.x + rect.width, rect.y),
            Point::new(rect.x + rect.width, rect.y + rect.height),
            Point::new(rect.x, rect.y + rect.height),
        ];
        for i in 0..4 {
            self.stroke_segment(corners[i], corners[(i + 1) % 4], style.color, style.width);
        }
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        let r = circle.radius;
        let bounds = Rect::new(
            circle.center.x - r - 1.0,
            circle.center.y - r - 1.0,
            2.0 * (r + 1.0),
            2.0 * (r + 1.0),
        );
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(bounds) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - circle.center.x;
                let dy = y as f32 + 0.5 - circle.center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (r + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.frame.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    fn stroke_circle(&mut self, circle: Circle, style: StrokeStyle) {
        let half = style.width.max(0.1) / 2.0;
        let reach = circle.radius + half + 1.0;
        let bounds = Rect::new(
            circle.center.x - reach,
            circle.center.y - reach,
            2.0 * reach,
            2.0 * reach,
        );
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(bounds) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - circle.center.x;
                let dy = y as f32 + 0.5 - circle.center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (half + 0.5 - (dist - circle.radius).abs()).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.frame.blend_pixel(x, y, style.color, coverage);
                }
            }
        }
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        for poly in subpaths(path) {
            if poly.len() >= 3 {
                self.fill_polygon(&poly, color);
            }
        }
    }

    fn stroke_path(&mut self, path: &Path, style: StrokeStyle) {
        for poly in subpaths(path) {
            for pair in poly.windows(2) {
                self.stroke_segment(pair[0], pair[1], style.color, style.width);
            }
            // Round interior joints so thick polylines have no notches.
            if style.width > 2.0 && poly.len() > 2 {
                for p in &poly[1..poly.len() - 1] {
                    self.fill_circle(Circle::new(*p, style.width / 2.0), style.color);
                }
            }
        }
    }

    /// Even-odd scanline fill, sampling at pixel centers.
    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let bounds = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(bounds) else {
            return;
        };

        let mut crossings: Vec<f32> = Vec::new();
        for y in y0..y1 {
            let yc = y as f32 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if (a.y <= yc && b.y > yc) || (b.y <= yc && a.y > yc) {
                    crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for span in crossings.chunks_exact(2) {
                let (sx, ex) = (span[0], span[1]);
                let px0 = sx.floor().max(x0 as f32) as i32;
                let px1 = ex.ceil().min(x1 as f32) as i32;
                for x in px0..px1 {
                    let coverage = (ex.min(x as f32 + 1.0) - sx.max(x as f32)).clamp(0.0, 1.0);
                    if coverage > 0.0 {
                        self.frame.blend_pixel(x, y, color, coverage);
                    }
                }
            }
        }
    }

    /// Distance-field stroke of one segment.
    fn stroke_segment(&mut self, a: Point, b: Point, color: Color, width: f32) {
        let half = width.max(0.1) / 2.0;
        let pad = half + 1.0;
        let bounds = Rect::new(
            a.x.min(b.x) - pad,
            a.y.min(b.y) - pad,
            (a.x - b.x).abs() + 2.0 * pad,
            (a.y - b.y).abs() + 2.0 * pad,
        );
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(bounds) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (half + 0.5 - dist_to_segment(p, a, b)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.frame.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    fn draw_text(
        &mut self,
        text: &str,
        position: Point,
        size: f32,
        color: Color,
        align: TextAlign,
        rotated: bool,
    ) {
        let Some(line) = self.fonts.rasterize_line(text, size) else {
            return;
        };
        let offset = match align {
            TextAlign::Left => 0.0,
            TextAlign::Center => line.width as f32 / 2.0,
            TextAlign::Right => line.width as f32,
        };
        let clip = self.clip();
        if rotated {
            // 90 degrees counter-clockwise: text advances upward.
            let x0 = position.x.round();
            let y0 = (position.y + offset).round();
            for by in 0..line.height {
                for bx in 0..line.width {
                    let a = line.coverage[by * line.width + bx];
                    if a <= 0.0 {
                        continue;
                    }
                    let fx = x0 + (by as f32 - line.baseline);
                    let fy = y0 - bx as f32;
                    if clip.contains(Point::new(fx + 0.5, fy + 0.5)) {
                        self.frame.blend_pixel(fx as i32, fy as i32, color, a);
                    }
                }
            }
        } else {
            let x0 = (position.x - offset).round();
            let y0 = (position.y - line.baseline).round();
            for by in 0..line.height {
                for bx in 0..line.width {
                    let a = line.coverage[by * line.width + bx];
                    if a <= 0.0 {
                        continue;
                    }
                    let fx = x0 + bx as f32;
                    let fy = y0 + by as f32;
                    if clip.contains(Point::new(fx + 0.5, fy + 0.5)) {
                        self.frame.blend_pixel(fx as i32, fy as i32, color, a);
                    }
                }
            }
        }
    }
}

/// Flatten a straight-line path into its subpaths.
fn subpaths(path: &Path) -> Vec<Vec<Point>> {
    let mut out = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for command in path.commands() {
        match command {
            PathCommand::MoveTo(p) => {
                if current.len() > 1 {
                    out.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                current.push(*p);
            }
            PathCommand::LineTo(p) => current.push(*p),
            PathCommand::Close => {
                if let Some(first) = current.first().copied() {
                    current.push(first);
                }
            }
        }
    }
    if current.len() > 1 {
        out.push(current);
    }
    out
}

fn dist_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq <= f32::EPSILON {
        0.0
    } else {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    };
    let cx = a.x + t * abx;
    let cy = a.y + t * aby;
    ((p.x - cx) * (p.x - cx) + (p.y - cy) * (p.y - cy)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brix_paint::PaintContext;

    fn raster(w: u32, h: u32) -> Rasterizer {
        Rasterizer::new(w, h, Color::WHITE).unwrap()
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            Rasterizer::new(0, 32, Color::WHITE),
            Err(ExportError::ZeroSize { .. })
        ));
    }

    #[test]
    fn fill_rect_paints_interior_only() {
        let mut r = raster(16, 16);
        let mut ctx = PaintContext::new();
        ctx.fill_rect(4.0, 4.0, 8.0, 8.0, Color::BLACK);
        r.run(ctx.commands());
        let frame = r.finish();
        assert_eq!(frame.get_pixel(8, 8), Some([0, 0, 0, 255]));
        assert_eq!(frame.get_pixel(1, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn clip_limits_fill() {
        let mut r = raster(16, 16);
        let mut ctx = PaintContext::new();
        ctx.push_clip(0.0, 0.0, 8.0, 16.0);
        ctx.fill_rect(0.0, 0.0, 16.0, 16.0, Color::BLACK);
        ctx.pop_clip();
        r.run(ctx.commands());
        let frame = r.finish();
        assert_eq!(frame.get_pixel(4, 4), Some([0, 0, 0, 255]));
        assert_eq!(frame.get_pixel(12, 4), Some([255, 255, 255, 255]));
    }

    #[test]
    fn polyline_stroke_touches_endpoints() {
        let mut r = raster(32, 32);
        let mut ctx = PaintContext::new();
        ctx.stroke_polyline(
            &[Point::new(2.0, 2.0), Point::new(30.0, 30.0)],
            Color::BLACK,
            3.0,
        );
        r.run(ctx.commands());
        let frame = r.finish();
        let on_line = frame.get_pixel(16, 16).unwrap();
        assert!(on_line[0] < 128, "line center should be dark");
        let off_line = frame.get_pixel(28, 4).unwrap();
        assert_eq!(off_line, [255, 255, 255, 255]);
    }

    #[test]
    fn filled_circle_is_round() {
        let mut r = raster(32, 32);
        let mut ctx = PaintContext::new();
        ctx.fill_circle(16.0, 16.0, 6.0, Color::BLACK);
        r.run(ctx.commands());
        let frame = r.finish();
        assert_eq!(frame.get_pixel(16, 16), Some([0, 0, 0, 255]));
        assert_eq!(frame.get_pixel(16 + 9, 16), Some([255, 255, 255, 255]));
    }

    #[test]
    fn polygon_fill_respects_shape() {
        let mut r = raster(32, 32);
        let mut ctx = PaintContext::new();
        let tri = Path::polygon(&[
            Point::new(16.0, 2.0),
            Point::new(30.0, 30.0),
            Point::new(2.0, 30.0),
        ]);
        ctx.fill_path(tri, Color::BLACK);
        r.run(ctx.commands());
        let frame = r.finish();
        assert_eq!(frame.get_pixel(16, 20), Some([0, 0, 0, 255]));
        assert_eq!(frame.get_pixel(2, 4), Some([255, 255, 255, 255]));
    }

    #[test]
    fn subpaths_split_on_move_to() {
        let path = brix_paint::PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(1.0, 0.0)
            .move_to(5.0, 5.0)
            .line_to(6.0, 5.0)
            .line_to(6.0, 6.0)
            .build();
        let polys = subpaths(&path);
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0].len(), 2);
        assert_eq!(polys[1].len(), 3);
    }
}
