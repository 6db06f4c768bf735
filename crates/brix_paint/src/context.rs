//! Paint context - the main drawing API

use crate::color::Color;
use crate::path::{Path, Point};
use crate::primitives::*;

/// Fill style for shapes
#[derive(Clone, Copy, Debug)]
pub struct FillStyle {
    pub color: Color,
}

impl From<Color> for FillStyle {
    fn from(color: Color) -> Self {
        FillStyle { color }
    }
}

/// Stroke style
#[derive(Clone, Copy, Debug)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// A paint command for the renderer
#[derive(Clone, Debug)]
pub enum PaintCommand {
    FillRect {
        rect: Rect,
        style: FillStyle,
    },
    StrokeRect {
        rect: Rect,
        style: StrokeStyle,
    },
    FillCircle {
        circle: Circle,
        style: FillStyle,
    },
    StrokeCircle {
        circle: Circle,
        style: StrokeStyle,
    },
    FillPath {
        path: Path,
        style: FillStyle,
    },
    StrokePath {
        path: Path,
        style: StrokeStyle,
    },
    DrawText {
        text: String,
        position: Point,
        size: f32,
        color: Color,
        align: TextAlign,
        rotated: bool,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
}

/// Horizontal anchoring for drawn text. `position` is the anchor point
/// on the baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// The paint context used for custom drawing.
///
/// Records commands; a renderer (GPU surface, CPU rasterizer) executes
/// them later. Widgets never talk to a renderer directly.
pub struct PaintContext {
    commands: Vec<PaintCommand>,
    clip_stack: Vec<Rect>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            clip_stack: Vec::new(),
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    // === Shape drawing ===

    pub fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        style: impl Into<FillStyle>,
    ) {
        self.commands.push(PaintCommand::FillRect {
            rect: Rect::new(x, y, width, height),
            style: style.into(),
        });
    }

    pub fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
        stroke_width: f32,
    ) {
        self.commands.push(PaintCommand::StrokeRect {
            rect: Rect::new(x, y, width, height),
            style: StrokeStyle {
                color,
                width: stroke_width,
            },
        });
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, style: impl Into<FillStyle>) {
        self.commands.push(PaintCommand::FillCircle {
            circle: Circle::new(Point::new(cx, cy), radius),
            style: style.into(),
        });
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color, width: f32) {
        self.commands.push(PaintCommand::StrokeCircle {
            circle: Circle::new(Point::new(cx, cy), radius),
            style: StrokeStyle { color, width },
        });
    }

    // === Path drawing ===

    pub fn fill_path(&mut self, path: Path, style: impl Into<FillStyle>) {
        self.commands.push(PaintCommand::FillPath {
            path,
            style: style.into(),
        });
    }

    pub fn stroke_path(&mut self, path: Path, color: Color, width: f32) {
        self.commands.push(PaintCommand::StrokePath {
            path,
            style: StrokeStyle { color, width },
        });
    }

    /// Stroke an open polyline in one command.
    pub fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f32) {
        if points.len() < 2 {
            return;
        }
        self.stroke_path(Path::polyline(points), color, width);
    }

    // === Text ===

    pub fn draw_text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, color: Color) {
        self.draw_text_aligned(text, x, y, size, color, TextAlign::Left);
    }

    pub fn draw_text_aligned(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
        align: TextAlign,
    ) {
        self.commands.push(PaintCommand::DrawText {
            text: text.into(),
            position: Point::new(x, y),
            size,
            color,
            align,
            rotated: false,
        });
    }

    /// Draw text rotated 90 degrees counter-clockwise about its anchor
    /// (vertical axis labels).
    pub fn draw_text_rotated(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    ) {
        self.commands.push(PaintCommand::DrawText {
            text: text.into(),
            position: Point::new(x, y),
            size,
            color,
            align: TextAlign::Center,
            rotated: true,
        });
    }

    // === Clipping ===

    pub fn push_clip(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let rect = Rect::new(x, y, width, height);
        self.clip_stack.push(rect);
        self.commands.push(PaintCommand::PushClip { rect });
    }

    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
        self.commands.push(PaintCommand::PopClip);
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_commands_in_order() {
        let mut ctx = PaintContext::new();
        ctx.fill_rect(0.0, 0.0, 10.0, 10.0, Color::WHITE);
        ctx.draw_text("hi", 1.0, 2.0, 12.0, Color::BLACK);
        assert_eq!(ctx.commands().len(), 2);
        assert!(matches!(ctx.commands()[0], PaintCommand::FillRect { .. }));
        assert!(matches!(ctx.commands()[1], PaintCommand::DrawText { .. }));
    }

    #[test]
    fn short_polyline_is_dropped() {
        let mut ctx = PaintContext::new();
        ctx.stroke_polyline(&[Point::new(0.0, 0.0)], Color::BLACK, 1.0);
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn take_commands_drains() {
        let mut ctx = PaintContext::new();
        ctx.fill_rect(0.0, 0.0, 1.0, 1.0, Color::WHITE);
        let cmds = ctx.take_commands();
        assert_eq!(cmds.len(), 1);
        assert!(ctx.commands().is_empty());
    }
}
