use std::error::Error;

use tracing::debug;
use tracing::warn;

use crate::controller::ControllerState;
use crate::engine::Engine;
use crate::error::HarnessError;
use crate::error::HarnessResult;
use crate::mapper::CoordinateMapper;
use crate::render::Canvas;
use crate::render::CanvasRenderer;
use crate::render::RenderConfig;
use crate::view::GridBufferView;

/// Everything one running grid needs: the engine, the canvas it is drawn on and the shared
/// controller state.
///
/// This is where every engine call is made. Each mutating call is followed by a redraw from a
/// freshly acquired buffer view.
pub struct Session<E, C> {
    engine: E,
    canvas: C,
    renderer: CanvasRenderer,
    pub(crate) state: ControllerState,
}

impl<E: Engine, C: Canvas> Session<E, C> {
    /// Wraps `engine` and draws the initial frame. `canvas` should be sized to
    /// [`RenderConfig::canvas_size`] for the engine's dimensions.
    pub fn new(
        engine: E,
        canvas: C,
        config: RenderConfig,
        state: ControllerState,
    ) -> HarnessResult<Self> {
        let (width, height) = (engine.width(), engine.height());
        if width == 0 || height == 0 {
            return Err(HarnessError::InvalidDimension { width, height });
        }

        let mut session = Self {
            engine,
            canvas,
            renderer: CanvasRenderer::new(config, width, height),
            state,
        };

        session.restart_generation();
        session.redraw()?;

        Ok(session)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn renderer(&self) -> &CanvasRenderer {
        &self.renderer
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(
            self.engine.width(),
            self.engine.height(),
            self.renderer.config().cell_size,
            self.renderer.canvas_size(),
        )
    }

    /// Whole-grid redraw from the engine's current buffer.
    pub fn redraw(&mut self) -> HarnessResult<()> {
        let view = GridBufferView::acquire(&self.engine)?;
        self.renderer.draw(&mut self.canvas, &view);

        Ok(())
    }

    /// One batch of `step_size` generations, then a redraw.
    pub(crate) fn advance(&mut self) -> HarnessResult<()> {
        let n = self.state.step_size;

        self.engine.step(n).map_err(HarnessError::engine("step"))?;

        self.state.generation = match self.engine.generation() {
            Some(generation) => generation,
            None => self.state.generation + n.get() as u64,
        };

        self.redraw()
    }

    pub(crate) fn toggle_cell(&mut self, row: usize, col: usize) -> HarnessResult<()> {
        self.engine
            .toggle_cell(row, col)
            .map_err(HarnessError::engine("toggle_cell"))?;

        self.redraw()
    }

    pub(crate) fn clear(&mut self) -> HarnessResult<()> {
        self.engine
            .set_all_cells(false)
            .map_err(HarnessError::engine("set_all_cells"))?;

        self.restart_generation();
        self.redraw()
    }

    pub(crate) fn randomize(&mut self) -> HarnessResult<()> {
        self.engine
            .randomize_cells(self.state.density)
            .map_err(HarnessError::engine("randomize_cells"))?;

        self.restart_generation();
        self.redraw()
    }

    /// Back to generation 0, or to whatever the engine says if it keeps count itself.
    fn restart_generation(&mut self) {
        let generation = self.engine.generation().unwrap_or(0);

        if generation != 0 {
            debug!(generation, "mirroring engine generation");
        }

        self.state.generation = generation;
    }

    /// Put `err` on the status line.
    pub(crate) fn report(&mut self, err: &HarnessError) {
        let mut msg = err.to_string();

        let mut source = err.source();
        while let Some(e) = source {
            msg.push_str(": ");
            msg.push_str(&e.to_string());
            source = e.source();
        }

        warn!("{msg}");
        self.state.status = Some(msg);
    }
}
