use std::io;
use std::io::Write;

use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::style::Print;
use crossterm::style::ResetColor;
use crossterm::style::SetBackgroundColor;
use crossterm::style::SetForegroundColor;
use crossterm::terminal::Clear;
use crossterm::terminal::ClearType;

use super::input::LineEditor;
use crate::controller::ControllerState;
use crate::mapper::ClientRect;
use crate::render::Color;
use crate::render::PixelBuffer;

/// Rows under the canvas kept for the status and help lines
pub const STATUS_ROWS: u16 = 2;

/// Upper half block: the foreground paints the top pixel, the background the bottom one.
const HALF_BLOCK: char = '▀';

const HELP: &str =
    "space play/pause  n step  c clear  r random  s step size  d density  click toggle  q quit";

/// Where the canvas goes on a `cols` by `rows` terminal, in terminal cells.
///
/// A terminal cell shows one pixel across and two down. Canvases that don't fit are scaled down
/// to the largest size that does, keeping the aspect ratio. The rect keeps the exact scale, so
/// its size can be fractional; drawing covers it rounded up. Returns `None` when there is no
/// room at all.
pub fn fit_viewport(
    (canvas_width, canvas_height): (usize, usize),
    cols: u16,
    rows: u16,
) -> Option<ClientRect> {
    let rows = rows.checked_sub(STATUS_ROWS)?;
    if cols == 0 || rows == 0 || canvas_width == 0 || canvas_height == 0 {
        return None;
    }

    let natural_width = canvas_width as f64;
    let natural_height = canvas_height as f64 / 2.0;

    let scale = (cols as f64 / natural_width)
        .min(rows as f64 / natural_height)
        .min(1.0);

    Some(ClientRect {
        left: 0.0,
        top: 0.0,
        width: natural_width * scale,
        height: natural_height * scale,
    })
}

/// Terminal cells needed to show all of `rect`.
pub fn covered(rect: &ClientRect) -> (u16, u16) {
    // rounding error in the scale must not add a whole row
    let cells = |len: f64| (len - 1e-9).ceil().max(0.0) as u16;

    (cells(rect.width), cells(rect.height))
}

/// The (top, bottom) pixel colors shown in terminal cell (`col`, `row`) of `rect`.
pub fn sample(fb: &PixelBuffer, rect: &ClientRect, col: u16, row: u16) -> (Color, Color) {
    let (width, height) = (fb.width(), fb.height());

    let pick = |pos: f64, extent: usize, shown: f64| -> usize {
        ((pos * extent as f64 / shown) as usize).min(extent - 1)
    };

    let x = pick(col as f64 + 0.5, width, rect.width);
    let top = pick(row as f64 + 0.25, height, rect.height);
    let bottom = pick(row as f64 + 0.75, height, rect.height);

    (fb.pixel(x, top), fb.pixel(x, bottom))
}

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// The line shown under the canvas.
pub fn status_line(state: &ControllerState, editor: Option<&LineEditor>) -> String {
    let mut line = format!(
        "{:<6} gen {}  step {}  density {}%",
        state.toggle_label(),
        state.generation(),
        state.step_size(),
        state.density().percent(),
    );

    if let Some(editor) = editor {
        line.push_str(&format!("  | {}: {}_", editor.field.name(), editor.buf));
    } else if let Some(status) = state.status() {
        line.push_str(&format!("  | {status}"));
    }

    line
}

/// Draws a [`PixelBuffer`] and the status lines with crossterm.
pub struct Presenter {
    canvas_size: (usize, usize),
    cols: u16,
    rows: u16,
    viewport: Option<ClientRect>,
}

impl Presenter {
    pub fn new(canvas_size: (usize, usize), cols: u16, rows: u16) -> Self {
        Self {
            canvas_size,
            cols,
            rows,
            viewport: fit_viewport(canvas_size, cols, rows),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.viewport = fit_viewport(self.canvas_size, cols, rows);
    }

    pub fn viewport(&self) -> Option<ClientRect> {
        self.viewport
    }

    pub fn clear<W: Write>(&self, out: &mut W) -> io::Result<()> {
        queue!(out, ResetColor, Clear(ClearType::All))
    }

    pub fn draw_canvas<W: Write>(&self, out: &mut W, fb: &PixelBuffer) -> io::Result<()> {
        let Some(rect) = self.viewport else {
            return Ok(());
        };

        let (cols, rows) = covered(&rect);

        for row in 0..rows {
            queue!(out, cursor::MoveTo(rect.left as u16, rect.top as u16 + row))?;

            // only emit color changes
            let mut last = None;

            for col in 0..cols {
                let colors = sample(fb, &rect, col, row);

                if last != Some(colors) {
                    let (top, bottom) = colors;
                    queue!(
                        out,
                        SetForegroundColor(term_color(top)),
                        SetBackgroundColor(term_color(bottom)),
                    )?;
                    last = Some(colors);
                }

                queue!(out, Print(HALF_BLOCK))?;
            }
        }

        queue!(out, ResetColor)
    }

    /// Status on the second to last row, key help on the last.
    pub fn draw_status<W: Write>(&self, out: &mut W, status: &str) -> io::Result<()> {
        let Some(first) = self.rows.checked_sub(STATUS_ROWS) else {
            return Ok(());
        };

        for (i, line) in [status, HELP].into_iter().enumerate() {
            let line: String = line.chars().take(self.cols as usize).collect();

            queue!(
                out,
                cursor::MoveTo(0, first + i as u16),
                Clear(ClearType::CurrentLine),
                Print(line),
            )?;
        }

        Ok(())
    }
}
