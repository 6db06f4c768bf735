//! Shared painting helpers.

use brix_paint::{Color, PaintContext};

pub fn fill_bg(ctx: &mut PaintContext, w: f32, h: f32, bg: Color) {
    ctx.fill_rect(0.0, 0.0, w, h, bg);
}

pub fn draw_grid(
    ctx: &mut PaintContext,
    plot_x: f32,
    plot_y: f32,
    plot_w: f32,
    plot_h: f32,
    grid: Color,
    grid_n: usize,
) {
    if plot_w <= 0.0 || plot_h <= 0.0 {
        return;
    }

    let grid_n = grid_n.max(1);
    for i in 0..=grid_n {
        let t = i as f32 / grid_n as f32;
        let x = plot_x + t * plot_w;
        let y = plot_y + t * plot_h;
        ctx.fill_rect(x, plot_y, 1.0, plot_h, grid);
        ctx.fill_rect(plot_x, y, plot_w, 1.0, grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_emits_lines_for_each_division() {
        let mut ctx = PaintContext::new();
        draw_grid(&mut ctx, 0.0, 0.0, 100.0, 100.0, Color::BLACK, 4);
        // 5 vertical + 5 horizontal.
        assert_eq!(ctx.commands().len(), 10);
    }

    #[test]
    fn empty_plot_draws_nothing() {
        let mut ctx = PaintContext::new();
        draw_grid(&mut ctx, 0.0, 0.0, 0.0, 100.0, Color::BLACK, 4);
        assert!(ctx.commands().is_empty());
    }
}
