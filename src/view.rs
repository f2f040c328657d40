use crate::engine::Engine;
use crate::error::HarnessError;
use crate::error::HarnessResult;

/// Read-only window onto the engine's cell buffer. Nothing is copied.
///
/// The view borrows the engine, so it cannot outlive the next mutating engine call. Acquire a
/// fresh one for every draw.
#[derive(Debug, Clone, Copy)]
pub struct GridBufferView<'a> {
    cells: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> GridBufferView<'a> {
    /// Wrap `cells` as a `width * height` grid, row-major.
    pub fn new(cells: &'a [u8], width: usize, height: usize) -> HarnessResult<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(HarnessError::InvalidDimension { width, height })?;

        if cells.len() != expected {
            return Err(HarnessError::BufferMismatch {
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// View whatever buffer the engine holds right now.
    pub fn acquire<E: Engine + ?Sized>(engine: &'a E) -> HarnessResult<Self> {
        Self::new(engine.cells(), engine.width(), engine.height())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Whether the cell at (`row`, `col`) is alive. Panics when out of range.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        assert!(row < self.height, "row is out of bounds");
        assert!(col < self.width, "col is out of bounds");

        self.cells[self.index(row, col)] != 0
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.cells
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}
