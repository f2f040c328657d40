//! Interactive terminal host: a crossterm event loop that feeds key and mouse input to a
//! [`ControlSurface`] and shows its pixel buffer using half block characters.

pub mod input;
pub mod presenter;

use std::io;
use std::io::Write;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use tracing::debug;
use tracing::info;

use self::input::convert_event;
use self::input::Input;
use self::input::LineEditor;
use self::presenter::status_line;
use self::presenter::Presenter;
use crate::automaton::Automaton;
use crate::config::Args;
use crate::controls::ControlSurface;
use crate::error::HarnessError;
use crate::render::PixelBuffer;
use crate::scheduler::FrameQueue;
use crate::session::Session;

pub type TerminalSurface = ControlSurface<Automaton, PixelBuffer, FrameQueue>;

/// Raw mode, alternate screen and mouse capture, undone on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // nothing useful to do with a failure here
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Creates the engine, canvas and controls described by `args`.
pub fn build(args: &Args) -> anyhow::Result<TerminalSurface> {
    let mut engine = Automaton::new(args.width, args.height)
        .map_err(HarnessError::from)?
        .with_rules(args.rule);

    if let Some(seed) = args.seed {
        engine = engine.with_seed(seed);
    }

    let config = args.render_config();
    let (canvas_width, canvas_height) = config.canvas_size(args.width, args.height);
    let canvas = PixelBuffer::new(canvas_width, canvas_height, config.dead_color);

    let session = Session::new(engine, canvas, config, args.controller_state())
        .context("Failed to set up the grid")?;

    info!(
        width = args.width,
        height = args.height,
        canvas_width,
        canvas_height,
        "session ready"
    );

    Ok(ControlSurface::new(session, FrameQueue::new()))
}

/// Runs until the user quits.
pub fn run(args: &Args) -> anyhow::Result<()> {
    let mut surface = build(args)?;

    let _guard = TerminalGuard::enter().context("Failed to set up the terminal")?;
    event_loop(&mut surface, args.fps)
}

/// Returns true if the app should exit
fn apply(
    surface: &mut TerminalSurface,
    presenter: &mut Presenter,
    editor: &mut Option<LineEditor>,
    input: Input,
) -> bool {
    let action = match input {
        Input::Quit => return true,
        Input::Action(action) => action,
        Input::Edit(field) => {
            *editor = Some(LineEditor::new(field));
            return false;
        }
        Input::EditChar(c) => {
            if let Some(editor) = editor {
                editor.push(c);
            }
            return false;
        }
        Input::EditBackspace => {
            if let Some(editor) = editor {
                editor.pop();
            }
            return false;
        }
        Input::CancelEdit => {
            *editor = None;
            return false;
        }
        Input::CommitEdit => match editor.take() {
            Some(editor) => editor.commit(),
            None => return false,
        },
        Input::Resize { cols, rows } => {
            presenter.resize(cols, rows);
            return false;
        }
    };

    // failures are already on the status line
    if let Err(e) = surface.dispatch(action) {
        debug!(%e, "action failed");
    }

    false
}

fn event_loop(surface: &mut TerminalSurface, fps: u32) -> anyhow::Result<()> {
    let frame_time = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
    let mut stdout = io::stdout();

    let (cols, rows) = terminal::size()?;
    let mut presenter = Presenter::new(surface.session().renderer().canvas_size(), cols, rows);
    let mut editor: Option<LineEditor> = None;
    let mut full_redraw = true;

    loop {
        let t = Instant::now();

        // Poll for input for as long as a frame, then drain whatever else queued up
        if event::poll(frame_time)? {
            loop {
                let event = event::read()?;
                let resized = matches!(event, event::Event::Resize(..));

                if let Some(input) = convert_event(event, editor.is_some(), presenter.viewport()) {
                    if apply(surface, &mut presenter, &mut editor, input) {
                        return Ok(());
                    }
                }

                full_redraw |= resized;

                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        for frame in surface.animation_mut().scheduler_mut().take_due() {
            if let Err(e) = surface.on_frame(frame) {
                debug!(%e, "frame failed");
            }
        }

        let dirty = surface.session_mut().canvas_mut().take_dirty();

        if full_redraw {
            presenter.clear(&mut stdout)?;
        }

        if dirty || full_redraw {
            presenter.draw_canvas(&mut stdout, surface.session().canvas())?;
        }

        presenter.draw_status(
            &mut stdout,
            &status_line(surface.session().state(), editor.as_ref()),
        )?;
        stdout.flush()?;

        full_redraw = false;

        thread::sleep(frame_time.saturating_sub(t.elapsed()));
    }
}
