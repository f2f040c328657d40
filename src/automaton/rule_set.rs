use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("Rulestring is empty")]
    Empty,

    #[error("Expected 'b', 's' or 'c' before neighbor counts, but got '{got}'")]
    MissingPrefix { got: char },

    #[error("Neighbor count must be a digit from 0 to 8, but got '{got}'")]
    InvalidCount { got: char },

    #[error("State count must be from 2 to 255, but got {got}")]
    InvalidStates { got: u32 },
}

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// Alongside the bits sits the number of cell states, as in the "Generations" family of rules.
/// State 0 is dead and state 1 alive. With more than two states, a live cell that fails to
/// survive goes through states 2, 3, ... and dies after the last one. Only state 1 counts as a
/// live neighbor.
///
/// See: https://conwaylife.com/wiki/Rulestring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
    states: u8,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new two-state `RuleSet` for the given births and survivals. Bit `i` of `b` set
    /// means a dead cell with `i` live neighbors is born. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
            states: 2,
        }
    }

    /// The same births and survivals with `states` cell states. Needs at least 2.
    pub fn with_states(mut self, states: u8) -> Result<Self, RuleSetError> {
        if states < 2 {
            return Err(RuleSetError::InvalidStates { got: states as u32 });
        }

        self.states = states;
        Ok(self)
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    pub fn states(&self) -> u8 {
        self.states
    }

    pub fn set_births(&mut self, b: u16) {
        *self = Self::new(b, self.survivals()).with_states_unchecked(self.states);
    }

    pub fn set_survivals(&mut self, s: u16) {
        *self = Self::new(self.births(), s).with_states_unchecked(self.states);
    }

    const fn with_states_unchecked(mut self, states: u8) -> Self {
        self.states = states;
        self
    }

    /// Next state of a cell given its state now and its live neighbor count.
    pub fn next_state(&self, state: u8, neighbors: u8) -> u8 {
        let mask = 1u16 << neighbors;

        match state {
            0 if self.births() & mask == mask => 1,
            0 => 0,
            1 if self.survivals() & mask == mask => 1,

            // dying, one state older each generation
            s if s < self.states - 1 => s + 1,
            _ => 0,
        }
    }
}

/// Accepts `b3s23`, `B3/S23`, `S23/B3` and the like. A `c` part gives the number of states, as
/// in `b2s/c3`.
impl FromStr for RuleSet {
    type Err = RuleSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum State {
            Start,
            Birth,
            Survival,
            States,
        }

        if s.trim().is_empty() {
            return Err(RuleSetError::Empty);
        }

        let mut state = State::Start;
        let (mut b, mut s_bits) = (0u16, 0u16);
        let mut states: Option<u32> = None;

        for c in s.trim().chars() {
            match c {
                'b' | 'B' => state = State::Birth,
                's' | 'S' => state = State::Survival,
                'c' | 'C' => {
                    state = State::States;
                    states = Some(0);
                }
                '/' => {}
                c => match (&state, c.to_digit(10)) {
                    (State::Start, _) => return Err(RuleSetError::MissingPrefix { got: c }),
                    (_, None) => return Err(RuleSetError::InvalidCount { got: c }),

                    // anything past u8 is rejected below, so stop growing there
                    (State::States, Some(d)) => {
                        states = states.map(|n| (n * 10 + d).min(u8::MAX as u32 + 1))
                    }
                    (_, Some(9)) => return Err(RuleSetError::InvalidCount { got: c }),
                    (State::Birth, Some(n)) => b |= 1 << n,
                    (State::Survival, Some(n)) => s_bits |= 1 << n,
                },
            }
        }

        let rules = RuleSet::new(b, s_bits);

        match states {
            None => Ok(rules),
            Some(n) => {
                let n = u8::try_from(n).map_err(|_| RuleSetError::InvalidStates { got: n })?;
                rules.with_states(n)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::RuleSet;
    use super::RuleSetError;
    use super::B3S23;

    #[test]
    fn parse_life() {
        assert_eq!("b3s23".parse::<RuleSet>(), Ok(B3S23));
        assert_eq!("B3/S23".parse::<RuleSet>(), Ok(B3S23));
        assert_eq!("S23/B3".parse::<RuleSet>(), Ok(B3S23));
    }

    #[test]
    fn parse_highlife() {
        let rules: RuleSet = "b36s23".parse().unwrap();

        assert_eq!(rules.births(), 0b100_1000);
        assert_eq!(rules.survivals(), 0b1100);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<RuleSet>(), Err(RuleSetError::Empty));
        assert_eq!("23/3".parse::<RuleSet>(), Err(RuleSetError::MissingPrefix { got: '2' }));
        assert_eq!("b9s23".parse::<RuleSet>(), Err(RuleSetError::InvalidCount { got: '9' }));
        assert_eq!("b3sx".parse::<RuleSet>(), Err(RuleSetError::InvalidCount { got: 'x' }));
    }

    #[test]
    fn life_transitions() {
        let rules = B3S23;

        assert_eq!(rules.states(), 2);
        assert_eq!(rules.next_state(0, 3), 1);
        assert_eq!(rules.next_state(0, 2), 0);
        assert_eq!(rules.next_state(1, 2), 1);
        assert_eq!(rules.next_state(1, 3), 1);
        assert_eq!(rules.next_state(1, 1), 0);
        assert_eq!(rules.next_state(1, 4), 0);
    }

    #[test]
    fn parse_generations() {
        // Brian's Brain
        let rules: RuleSet = "b2s/c3".parse().unwrap();

        assert_eq!(rules.births(), 0b100);
        assert_eq!(rules.survivals(), 0);
        assert_eq!(rules.states(), 3);

        assert_eq!("B3/S23/C2".parse::<RuleSet>(), Ok(B3S23));
        assert_eq!("b3s23c12".parse::<RuleSet>().unwrap().states(), 12);
    }

    #[test]
    fn parse_rejects_bad_state_counts() {
        assert_eq!("b3s23c1".parse::<RuleSet>(), Err(RuleSetError::InvalidStates { got: 1 }));
        assert_eq!("b3s23c".parse::<RuleSet>(), Err(RuleSetError::InvalidStates { got: 0 }));
        assert_eq!(
            "b3s23c999999".parse::<RuleSet>(),
            Err(RuleSetError::InvalidStates { got: 256 })
        );
    }

    #[test]
    fn dying_cells_age_then_die() {
        let rules: RuleSet = "b2s/c4".parse().unwrap();

        // no survivals: a live cell starts dying whatever its neighbors
        assert_eq!(rules.next_state(1, 2), 2);
        assert_eq!(rules.next_state(2, 2), 3);
        assert_eq!(rules.next_state(3, 2), 0);

        // dying cells are never born again until they reach 0
        assert_eq!(rules.next_state(2, 2), 3);
        assert_eq!(rules.next_state(0, 2), 1);
    }

    #[test]
    fn setters_keep_the_rest() {
        let mut rules = "b2s/c3".parse::<RuleSet>().unwrap();

        rules.set_survivals(0b1100);
        assert_eq!((rules.births(), rules.survivals(), rules.states()), (0b100, 0b1100, 3));

        rules.set_births(0b1000);
        assert_eq!((rules.births(), rules.survivals(), rules.states()), (0b1000, 0b1100, 3));

        assert_eq!(rules.with_states(0), Err(RuleSetError::InvalidStates { got: 0 }));
    }
}
