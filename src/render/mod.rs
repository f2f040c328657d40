//! Drawing the grid onto a canvas.
//!
//! The [`Canvas`] trait is the small subset of a 2D drawing context the renderer needs. Two
//! implementations live here: [`PixelBuffer`] rasterizes into a framebuffer for display, and
//! [`Recording`] keeps the raw draw calls around so they can be inspected.

pub mod color;
pub mod pixel_buffer;
pub mod recording;

use crate::view::GridBufferView;

pub use self::color::Color;
pub use self::pixel_buffer::PixelBuffer;
pub use self::recording::Recording;

/// A straight line between two canvas points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

pub trait Canvas {
    /// Start a new path, discarding any segments that were not stroked.
    fn begin_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    /// Add a segment from the current point to (`x`, `y`).
    fn line_to(&mut self, x: f64, y: f64);

    fn set_stroke_color(&mut self, color: Color);

    /// Paint every segment of the current path with the stroke color.
    fn stroke(&mut self);

    fn set_fill_color(&mut self, color: Color);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
}

/// Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Side length of a cell in canvas pixels, not counting the grid line
    pub cell_size: u32,

    pub grid_color: Color,
    pub dead_color: Color,
    pub alive_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: 5,
            grid_color: Color::rgb(0xCC, 0xCC, 0xCC),
            dead_color: Color::WHITE,
            alive_color: Color::BLACK,
        }
    }
}

impl RenderConfig {
    /// Distance between two neighboring grid lines: one cell plus one line.
    pub fn pitch(&self) -> usize {
        self.cell_size as usize + 1
    }

    /// Backing pixel size of a canvas that fits a `width` by `height` grid exactly.
    pub fn canvas_size(&self, width: usize, height: usize) -> (usize, usize) {
        (self.pitch() * width + 1, self.pitch() * height + 1)
    }
}

/// Draws a `width` by `height` grid: lines first, then one filled square per cell.
#[derive(Debug, Clone)]
pub struct CanvasRenderer {
    config: RenderConfig,
    width: usize,
    height: usize,
}

impl CanvasRenderer {
    pub fn new(config: RenderConfig, width: usize, height: usize) -> Self {
        Self {
            config,
            width,
            height,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn canvas_size(&self) -> (usize, usize) {
        self.config.canvas_size(self.width, self.height)
    }

    /// Grid lines, as one path stroked once. Doesn't look at cell state.
    ///
    /// Lines sit at `i * pitch + 1` on both axes and span the whole canvas.
    pub fn draw_grid<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let pitch = self.config.pitch() as f64;
        let (cw, ch) = self.canvas_size();
        let (cw, ch) = (cw as f64, ch as f64);

        canvas.begin_path();
        canvas.set_stroke_color(self.config.grid_color);

        // vertical lines
        for i in 0..=self.width {
            let x = i as f64 * pitch + 1.0;

            canvas.move_to(x, 0.0);
            canvas.line_to(x, ch);
        }

        // horizontal lines
        for j in 0..=self.height {
            let y = j as f64 * pitch + 1.0;

            canvas.move_to(0.0, y);
            canvas.line_to(cw, y);
        }

        canvas.stroke();
    }

    /// Fill every cell from `view`. The view has to be fresh: acquired after the last mutating
    /// engine call.
    pub fn draw_cells<C: Canvas + ?Sized>(&self, canvas: &mut C, view: &GridBufferView<'_>) {
        debug_assert_eq!(view.width(), self.width);
        debug_assert_eq!(view.height(), self.height);

        let pitch = self.config.pitch() as f64;
        let size = self.config.cell_size as f64;

        // only switch fill colors when they actually change
        let mut current = None;

        for row in 0..self.height {
            for col in 0..self.width {
                let color = if view.is_alive(row, col) {
                    self.config.alive_color
                } else {
                    self.config.dead_color
                };

                if current != Some(color) {
                    canvas.set_fill_color(color);
                    current = Some(color);
                }

                canvas.fill_rect(col as f64 * pitch + 1.0, row as f64 * pitch + 1.0, size, size);
            }
        }
    }

    /// Whole-grid redraw.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, view: &GridBufferView<'_>) {
        self.draw_grid(canvas);
        self.draw_cells(canvas, view);
    }
}
