use std::num::IntErrorKind;
use std::num::NonZeroU32;

use tracing::info;

use crate::controller::AnimationController;
use crate::engine::Density;
use crate::engine::Engine;
use crate::error::HarnessError;
use crate::error::HarnessResult;
use crate::mapper::ClientRect;
use crate::render::Canvas;
use crate::scheduler::FrameId;
use crate::scheduler::FrameScheduler;
use crate::session::Session;

/// Largest step size the controls accept. A whole batch runs inside one frame.
pub const MAX_STEP_SIZE: u32 = 1_000;

/// Named UI actions. Parameter changes carry the raw text the user entered.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TogglePlay,
    Play,
    Pause,

    /// One step batch, whether running or not
    Step,

    /// Kill every cell
    Reset,

    Randomize,
    ToggleCell { row: usize, col: usize },

    /// Pointer press at client coordinates, inside the canvas shown at `rect`
    Pointer { x: f64, y: f64, rect: ClientRect },

    SetStepSize(String),
    SetDensity(String),
}

/// Binds user actions to the engine and the animation controller.
pub struct ControlSurface<E, C, S> {
    session: Session<E, C>,
    animation: AnimationController<S>,
}

impl<E: Engine, C: Canvas, S: FrameScheduler> ControlSurface<E, C, S> {
    pub fn new(session: Session<E, C>, scheduler: S) -> Self {
        Self {
            session,
            animation: AnimationController::new(scheduler),
        }
    }

    pub fn session(&self) -> &Session<E, C> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<E, C> {
        &mut self.session
    }

    pub fn animation(&self) -> &AnimationController<S> {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationController<S> {
        &mut self.animation
    }

    pub fn dispatch(&mut self, action: Action) -> HarnessResult<()> {
        // a new action replaces whatever message was showing
        self.session.state.status = None;

        match action {
            Action::TogglePlay => self.on_toggle_play(),
            Action::Play => {
                self.animation.play(&mut self.session);
                Ok(())
            }
            Action::Pause => {
                self.animation.pause(&mut self.session);
                Ok(())
            }
            Action::Step => self.on_step(),
            Action::Reset => self.on_reset(),
            Action::Randomize => self.on_randomize(),
            Action::ToggleCell { row, col } => self.on_cell_click(row, col),
            Action::Pointer { x, y, rect } => self.on_pointer(x, y, &rect),
            Action::SetStepSize(text) => self.on_step_size_change(&text),
            Action::SetDensity(text) => self.on_randomize_density_change(&text),
        }
    }

    /// A frame from the scheduler came due.
    pub fn on_frame(&mut self, frame: FrameId) -> HarnessResult<()> {
        self.animation.tick(frame, &mut self.session)
    }

    pub fn on_toggle_play(&mut self) -> HarnessResult<()> {
        if self.session.state.running {
            self.animation.pause(&mut self.session);
        } else {
            self.animation.play(&mut self.session);
        }

        Ok(())
    }

    /// Flip one cell and redraw right away, running or not.
    pub fn on_cell_click(&mut self, row: usize, col: usize) -> HarnessResult<()> {
        let res = self.session.toggle_cell(row, col);
        self.checked(res)
    }

    pub fn on_pointer(&mut self, x: f64, y: f64, rect: &ClientRect) -> HarnessResult<()> {
        let cell = self.session.mapper().map(rect, x, y);
        self.on_cell_click(cell.row, cell.col)
    }

    /// Advance by one step batch without touching the play state.
    pub fn on_step(&mut self) -> HarnessResult<()> {
        let res = self.session.advance();
        self.checked(res)
    }

    /// Clear the grid and restart the count. A running animation keeps going from the empty grid.
    pub fn on_reset(&mut self) -> HarnessResult<()> {
        let res = self.session.clear();
        self.checked(res)
    }

    pub fn on_randomize(&mut self) -> HarnessResult<()> {
        let res = self.session.randomize();
        self.checked(res)
    }

    /// Accepts integers from 1 to [`MAX_STEP_SIZE`]. Anything else is rejected and the old step
    /// size stays.
    pub fn on_step_size_change(&mut self, text: &str) -> HarnessResult<()> {
        match text.trim().parse::<NonZeroU32>() {
            Ok(step_size) if step_size.get() <= MAX_STEP_SIZE => {
                self.session.state.step_size = step_size;
                info!(step_size = step_size.get(), "step size changed");

                Ok(())
            }
            _ => self.rejected("step size", text),
        }
    }

    /// Accepts any integer, clamping it into `[0, 100]`.
    pub fn on_randomize_density_change(&mut self, text: &str) -> HarnessResult<()> {
        let percent = match text.trim().parse::<i64>() {
            Ok(n) => n,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => return self.rejected("density", text),
            },
        };

        let density = Density::clamped(percent);
        self.session.state.density = density;
        info!(density = density.percent(), "randomize density changed");

        Ok(())
    }

    fn rejected(&mut self, name: &'static str, value: &str) -> HarnessResult<()> {
        let err = HarnessError::InvalidParameter {
            name,
            value: value.to_string(),
        };

        self.session.report(&err);
        Err(err)
    }

    /// Engine failures stop the animation and go on the status line.
    fn checked(&mut self, res: HarnessResult<()>) -> HarnessResult<()> {
        if let Err(e) = &res {
            self.animation.halt(&mut self.session, e);
        }

        res
    }
}
