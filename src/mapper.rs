/// Where the canvas is shown, in client (pointer) units. The displayed size does not have to
/// match the canvas' backing size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A position on the grid, always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

/// Converts pointer positions to grid cells.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    /// Grid size in cells
    width: usize,
    height: usize,

    /// Cell side plus one grid line, in canvas pixels
    pitch: f64,

    /// Backing size of the canvas in pixels
    canvas_width: f64,
    canvas_height: f64,
}

impl CoordinateMapper {
    pub fn new(
        width: usize,
        height: usize,
        cell_size: u32,
        (canvas_width, canvas_height): (usize, usize),
    ) -> Self {
        Self {
            width,
            height,
            pitch: cell_size as f64 + 1.0,
            canvas_width: canvas_width as f64,
            canvas_height: canvas_height as f64,
        }
    }

    /// Map a pointer at (`client_x`, `client_y`) to the cell under it.
    ///
    /// The client position is first scaled into canvas pixels, then divided by the pitch. Points
    /// on or past the outer edge clamp to the nearest cell, so the result is always valid.
    pub fn map(&self, rect: &ClientRect, client_x: f64, client_y: f64) -> CellIndex {
        let scale_x = self.canvas_width / rect.width;
        let scale_y = self.canvas_height / rect.height;

        let canvas_x = (client_x - rect.left) * scale_x;
        let canvas_y = (client_y - rect.top) * scale_y;

        CellIndex {
            row: Self::clamp_index(canvas_y / self.pitch, self.height),
            col: Self::clamp_index(canvas_x / self.pitch, self.width),
        }
    }

    /// Client position of the center of `cell`. The inverse of `map` for cell centers.
    pub fn cell_center(&self, rect: &ClientRect, cell: CellIndex) -> (f64, f64) {
        let canvas_x = cell.col as f64 * self.pitch + 1.0 + (self.pitch - 1.0) / 2.0;
        let canvas_y = cell.row as f64 * self.pitch + 1.0 + (self.pitch - 1.0) / 2.0;

        (
            rect.left + canvas_x * rect.width / self.canvas_width,
            rect.top + canvas_y * rect.height / self.canvas_height,
        )
    }

    // `as` saturates, and NaN becomes 0
    fn clamp_index(v: f64, len: usize) -> usize {
        let i = v.floor();

        if i <= 0.0 || i.is_nan() {
            0
        } else {
            (i as usize).min(len.saturating_sub(1))
        }
    }
}
