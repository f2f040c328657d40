//! Reference engine: a finite, toroidal, two-state automaton stored as one byte per cell.

pub mod rule_set;

use std::iter;
use std::mem;
use std::num::NonZeroU32;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::engine::Density;
use crate::engine::Engine;
use crate::engine::EngineError;

pub use self::rule_set::RuleSet;
pub use self::rule_set::RuleSetError;

#[derive(Debug, Clone)]
pub struct Automaton {
    width: usize,
    height: usize,

    /// Current generation, row-major
    cells: Vec<u8>,

    /// Scratch buffer the next generation is written into before the swap
    cells_step: Vec<u8>,

    rules: RuleSet,
    generation: u64,
    rng: StdRng,
}

impl Automaton {
    /// Constructs a new automaton with every cell dead.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        let len = Self::buffer_len(width, height)?;

        Ok(Self {
            width,
            height,
            cells: vec![0; len],
            cells_step: vec![0; len],
            rules: RuleSet::default(),
            generation: 0,
            rng: StdRng::from_entropy(),
        })
    }

    /// Use a fixed seed for `randomize_cells`, making it reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /// Swaps in new rules between generations. Cells keep their current states; any state the
    /// new rules don't have dies on the next step.
    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    /// Sets the birth neighbor counts, one bit per count as in [`RuleSet::new`].
    pub fn set_birth_rule(&mut self, births: u16) {
        self.rules.set_births(births);
    }

    pub fn set_survival_rule(&mut self, survivals: u16) {
        self.rules.set_survivals(survivals);
    }

    /// Sets the number of cell states. 2 is plain life.
    pub fn set_generation_rule(&mut self, states: u8) -> Result<(), RuleSetError> {
        self.rules = self.rules.with_states(states)?;
        Ok(())
    }

    /// Resizes the automaton so that `width` is equal to `new_width`.
    ///
    /// Growing extends every row with dead cells, shrinking truncates every row. The cell buffer
    /// is reallocated.
    pub fn resize_width(&mut self, new_width: usize) -> Result<(), EngineError> {
        let len = Self::buffer_len(new_width, self.height)?;
        let keep = self.width.min(new_width);

        let mut cells = Vec::with_capacity(len);
        for row in self.cells.chunks_exact(self.width) {
            cells.extend_from_slice(&row[..keep]);
            cells.extend(iter::repeat(0).take(new_width - keep));
        }

        self.cells = cells;
        self.cells_step = vec![0; len];
        self.width = new_width;

        Ok(())
    }

    /// Resizes the automaton so that `height` is equal to `new_height`.
    ///
    /// Growing appends rows of dead cells, shrinking drops rows from the bottom.
    pub fn resize_height(&mut self, new_height: usize) -> Result<(), EngineError> {
        let len = Self::buffer_len(self.width, new_height)?;

        self.cells.resize(len, 0);
        self.cells_step.resize(len, 0);
        self.height = new_height;

        Ok(())
    }

    /// Sets every cell in `locations` alive. Locations outside the grid are skipped.
    pub fn set_cells_alive(&mut self, locations: &[(usize, usize)]) {
        for &(row, col) in locations {
            if row < self.height && col < self.width {
                let idx = self.index(row, col);
                self.cells[idx] = 1;
            }
        }
    }

    /// A copy of the current cells.
    pub fn to_vec(&self) -> Vec<u8> {
        self.cells.clone()
    }

    fn buffer_len(width: usize, height: usize) -> Result<usize, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimension { width, height });
        }

        width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimension { width, height })
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Live neighbor count, wrapping around the edges. Dying cells don't count.
    fn neighbors(&self, row: usize, col: usize) -> u8 {
        let (w, h) = (self.width, self.height);
        let mut count = 0;

        for dr in [h - 1, 0, 1] {
            for dc in [w - 1, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }

                let idx = self.index((row + dr) % h, (col + dc) % w);
                if self.cells[idx] == 1 {
                    count += 1;
                }
            }
        }

        count
    }

    fn step_once(&mut self) {
        for row in 0..self.height {
            for col in 0..self.width {
                let idx = self.index(row, col);
                let neighbors = self.neighbors(row, col);

                self.cells_step[idx] = self.rules.next_state(self.cells[idx], neighbors);
            }
        }

        mem::swap(&mut self.cells, &mut self.cells_step);
    }
}

impl Engine for Automaton {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn step(&mut self, n: NonZeroU32) -> Result<(), EngineError> {
        for _ in 0..n.get() {
            self.step_once();
        }

        self.generation += n.get() as u64;

        Ok(())
    }

    fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        if row >= self.height || col >= self.width {
            return Err(EngineError::OutOfBounds { row, col });
        }

        let idx = self.index(row, col);
        self.cells[idx] = match self.cells[idx] {
            0 => 1,
            _ => 0,
        };

        Ok(())
    }

    fn set_all_cells(&mut self, alive: bool) -> Result<(), EngineError> {
        self.cells.fill(alive as u8);
        self.generation = 0;

        Ok(())
    }

    fn randomize_cells(&mut self, density: Density) -> Result<(), EngineError> {
        let p = density.probability();

        for cell in &mut self.cells {
            *cell = self.rng.gen_bool(p) as u8;
        }
        self.generation = 0;

        Ok(())
    }

    fn generation(&self) -> Option<u64> {
        Some(self.generation)
    }
}
