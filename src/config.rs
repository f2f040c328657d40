use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::Parser;

use crate::automaton::RuleSet;
use crate::controller::ControllerState;
use crate::controls::MAX_STEP_SIZE;
use crate::engine::Density;
use crate::render::Color;
use crate::render::RenderConfig;

/// Interactive cellular automaton in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(version)]
pub struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 64)]
    pub width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 64)]
    pub height: usize,

    /// Cell side length in canvas pixels
    #[arg(long, value_name = "PIXELS", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub cell_size: u32,

    /// Generations advanced per step
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=MAX_STEP_SIZE as i64))]
    pub step_size: u32,

    /// Percentage of cells alive after randomizing
    #[arg(long, value_name = "PERCENT", default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub density: u8,

    /// Birth/survival rulestring, e.g. b3s23 or B36/S23
    #[arg(long, default_value = "b3s23")]
    pub rule: RuleSet,

    /// Seed for randomizing, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames per second while running
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    #[arg(long, value_name = "COLOR", default_value = "#cccccc")]
    pub grid_color: Color,

    #[arg(long, value_name = "COLOR", default_value = "#ffffff")]
    pub dead_color: Color,

    #[arg(long, value_name = "COLOR", default_value = "#000000")]
    pub alive_color: Color,

    /// Write logs here. Filter with RUST_LOG. Without this, logs are discarded.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            cell_size: self.cell_size,
            grid_color: self.grid_color,
            dead_color: self.dead_color,
            alive_color: self.alive_color,
        }
    }

    pub fn controller_state(&self) -> ControllerState {
        let step_size = NonZeroU32::new(self.step_size).unwrap_or(NonZeroU32::MIN);

        ControllerState::new(step_size, Density::clamped(self.density as i64))
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::Args;
    use crate::automaton::rule_set::B3S23;
    use crate::render::Color;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["life_canvas"]).unwrap();

        assert_eq!((args.width, args.height), (64, 64));
        assert_eq!(args.rule, B3S23);
        assert_eq!(args.fps, 60);

        let cfg = args.render_config();
        assert_eq!(cfg.cell_size, 1);
        assert_eq!(cfg.grid_color, Color::rgb(0xCC, 0xCC, 0xCC));

        let state = args.controller_state();
        assert_eq!(state.step_size().get(), 1);
        assert_eq!(state.density().percent(), 50);
        assert_eq!(state.generation(), 0);
        assert!(!state.running());
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "life_canvas",
            "--width",
            "10",
            "--step-size",
            "5",
            "--density",
            "20",
            "--rule",
            "B36/S23",
            "--alive-color",
            "#ff0000",
        ])
        .unwrap();

        assert_eq!(args.width, 10);
        assert_eq!(args.controller_state().step_size().get(), 5);
        assert_eq!(args.controller_state().density().percent(), 20);
        assert_eq!(args.rule.births(), 0b100_1000);
        assert_eq!(args.render_config().alive_color, Color::rgb(0xFF, 0, 0));
    }

    #[test]
    fn rejects_bad_values() {
        for bad in [
            ["life_canvas", "--step-size", "0"],
            ["life_canvas", "--step-size", "1001"],
            ["life_canvas", "--density", "101"],
            ["life_canvas", "--cell-size", "0"],
            ["life_canvas", "--rule", "23/3"],
            ["life_canvas", "--rule", "b3s23c1"],
            ["life_canvas", "--grid-color", "grey"],
        ] {
            assert!(Args::try_parse_from(bad).is_err(), "{bad:?} should not parse");
        }
    }
}
