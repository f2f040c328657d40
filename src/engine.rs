use std::num::NonZeroU32;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    #[error("Cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },

    #[error("Engine failure: {0}")]
    Failed(String),
}

/// Percentage of cells that come out alive when a grid is randomized. Always in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Density(u8);

impl Density {
    pub const MAX: u8 = 100;

    /// Clamps `percent` into `[0, 100]`.
    pub fn clamped(percent: i64) -> Self {
        Self(percent.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Probability of a single cell being alive.
    pub fn probability(self) -> f64 {
        self.0 as f64 / Self::MAX as f64
    }
}

impl Default for Density {
    fn default() -> Self {
        Self(50)
    }
}

/// The capability set the harness needs from a cellular automaton.
///
/// Dimensions are fixed for the lifetime of an engine. Cells are exposed as a borrowed, row-major
/// slice of bytes (`0` dead, anything else alive). Because the slice borrows the engine, it has to
/// be fetched again after every mutating call; the buffer may have moved.
pub trait Engine {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Advance the automaton by `n` generations.
    fn step(&mut self, n: NonZeroU32) -> Result<(), EngineError>;

    /// The raw cell buffer, `width * height` bytes long.
    fn cells(&self) -> &[u8];

    /// Flip a single cell between dead and alive.
    fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), EngineError>;

    fn set_all_cells(&mut self, alive: bool) -> Result<(), EngineError>;

    /// Reseed every cell independently, alive with probability `density`.
    fn randomize_cells(&mut self, density: Density) -> Result<(), EngineError>;

    /// The engine's own generation counter, if it keeps one. When this returns `Some`, the
    /// harness mirrors it instead of counting on its own.
    fn generation(&self) -> Option<u64> {
        None
    }
}

#[cfg(test)]
mod test {
    use super::Density;

    #[test]
    fn density_clamps_to_bounds() {
        assert_eq!(Density::clamped(-20).percent(), 0);
        assert_eq!(Density::clamped(0).percent(), 0);
        assert_eq!(Density::clamped(37).percent(), 37);
        assert_eq!(Density::clamped(100).percent(), 100);
        assert_eq!(Density::clamped(i64::MAX).percent(), 100);
    }

    #[test]
    fn density_probability() {
        assert_eq!(Density::clamped(25).probability(), 0.25);
        assert_eq!(Density::default().probability(), 0.5);
    }
}
