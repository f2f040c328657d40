use std::num::NonZeroU32;

use tracing::debug;
use tracing::info;

use crate::engine::Density;
use crate::engine::Engine;
use crate::error::HarnessError;
use crate::error::HarnessResult;
use crate::render::Canvas;
use crate::scheduler::FrameId;
use crate::scheduler::FrameScheduler;
use crate::session::Session;

pub const LABEL_START: &str = "Start";
pub const LABEL_PAUSE: &str = "Pause";
pub const LABEL_RESUME: &str = "Resume";

/// UI-facing state shared by the controller and the control surface.
///
/// Every field has one writer: `running` and `toggle_label` belong to [`AnimationController`],
/// `step_size` and `density` to the control surface, and `generation` to the session's stepping
/// and reset paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerState {
    pub(crate) running: bool,
    pub(crate) step_size: NonZeroU32,
    pub(crate) density: Density,
    pub(crate) generation: u64,
    pub(crate) toggle_label: &'static str,

    /// Last message for the user, usually an error
    pub(crate) status: Option<String>,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new(NonZeroU32::MIN, Density::default())
    }
}

impl ControllerState {
    pub fn new(step_size: NonZeroU32, density: Density) -> Self {
        Self {
            running: false,
            step_size,
            density,
            generation: 0,
            toggle_label: LABEL_START,
            status: None,
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn step_size(&self) -> NonZeroU32 {
        self.step_size
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Text for the play/pause button.
    pub fn toggle_label(&self) -> &'static str {
        self.toggle_label
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

/// Play/pause state machine driving the simulate-then-render cycle, one step batch per frame.
pub struct AnimationController<S> {
    scheduler: S,

    /// The only frame request this controller has outstanding
    pending: Option<FrameId>,
}

impl<S: FrameScheduler> AnimationController<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    /// `Paused -> Running`. No-op when already running.
    pub fn play<E: Engine, C: Canvas>(&mut self, session: &mut Session<E, C>) {
        if session.state.running {
            return;
        }

        session.state.running = true;
        session.state.toggle_label = LABEL_PAUSE;
        self.pending = Some(self.scheduler.request_frame());

        info!(generation = session.state.generation, "animation running");
    }

    /// `Running -> Paused`, dropping the pending frame. No-op when already paused.
    pub fn pause<E: Engine, C: Canvas>(&mut self, session: &mut Session<E, C>) {
        if !session.state.running {
            return;
        }

        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }

        session.state.running = false;
        session.state.toggle_label = LABEL_RESUME;

        info!(generation = session.state.generation, "animation paused");
    }

    /// Stop after a failed engine call and tell the user why.
    pub fn halt<E: Engine, C: Canvas>(&mut self, session: &mut Session<E, C>, err: &HarnessError) {
        self.pause(session);
        session.report(err);
    }

    /// Runs one frame: step, count, redraw, and ask for the next frame.
    ///
    /// Frames other than the one currently pending are ignored, so a cancelled request that
    /// still gets delivered does nothing. If stepping fails the animation pauses and the frame
    /// is dropped without a redraw.
    pub fn tick<E: Engine, C: Canvas>(
        &mut self,
        frame: FrameId,
        session: &mut Session<E, C>,
    ) -> HarnessResult<()> {
        if !session.state.running || self.pending != Some(frame) {
            debug!(?frame, "ignoring stale frame");
            return Ok(());
        }

        self.pending = None;

        if let Err(e) = session.advance() {
            self.halt(session, &e);
            return Err(e);
        }

        self.pending = Some(self.scheduler.request_frame());

        Ok(())
    }
}
