use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use super::presenter::covered;
use crate::controls::Action;
use crate::mapper::ClientRect;

/// A parameter the user can type a new value for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StepSize,
    Density,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::StepSize => "step size",
            Field::Density => "density",
        }
    }
}

/// What the host should do with one terminal event.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Action(Action),

    /// Start typing a value for a field
    Edit(Field),
    EditChar(char),
    EditBackspace,
    CommitEdit,
    CancelEdit,

    Resize { cols: u16, rows: u16 },

    /// Exit the application
    Quit,
}

/// The text being typed for a field. Nothing is validated here, the control surface does that
/// when the edit is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEditor {
    pub field: Field,
    pub buf: String,
}

impl LineEditor {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            buf: String::new(),
        }
    }

    pub fn push(&mut self, c: char) {
        self.buf.push(c);
    }

    pub fn pop(&mut self) {
        self.buf.pop();
    }

    pub fn commit(self) -> Action {
        match self.field {
            Field::StepSize => Action::SetStepSize(self.buf),
            Field::Density => Action::SetDensity(self.buf),
        }
    }
}

/// Converts a crossterm event into an [`Input`].
///
/// `editing` routes keystrokes to the line editor instead of the key bindings. `viewport` is
/// where the canvas currently sits on screen; clicks outside it are dropped.
pub fn convert_event(
    event: CrossTermEvent,
    editing: bool,
    viewport: Option<ClientRect>,
) -> Option<Input> {
    match event {
        CrossTermEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,

        CrossTermEvent::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }) => Some(Input::Quit),

        CrossTermEvent::Key(key_event) if editing => match key_event.code {
            KeyCode::Enter => Some(Input::CommitEdit),
            KeyCode::Esc => Some(Input::CancelEdit),
            KeyCode::Backspace => Some(Input::EditBackspace),
            KeyCode::Char(c) => Some(Input::EditChar(c)),
            _ => None,
        },

        CrossTermEvent::Key(key_event) => match key_event.code {
            KeyCode::Char('q') => Some(Input::Quit),
            KeyCode::Char(' ') => Some(Input::Action(Action::TogglePlay)),
            KeyCode::Char('n') | KeyCode::Right => Some(Input::Action(Action::Step)),
            KeyCode::Char('c') => Some(Input::Action(Action::Reset)),
            KeyCode::Char('r') => Some(Input::Action(Action::Randomize)),
            KeyCode::Char('s') => Some(Input::Edit(Field::StepSize)),
            KeyCode::Char('d') => Some(Input::Edit(Field::Density)),
            _ => None,
        },

        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => {
            let rect = viewport?;
            let (cols, rows) = covered(&rect);

            if column >= cols || row >= rows {
                return None;
            }

            // Aim at the pixel drawn in the top half. It is either inside the cell shown there
            // or the grid line right above the cell shown in the bottom half, which maps to the
            // same cell.
            let (x, y) = (column as f64 + 0.5, row as f64 + 0.25);

            Some(Input::Action(Action::Pointer { x, y, rect }))
        }

        CrossTermEvent::Resize(cols, rows) => Some(Input::Resize { cols, rows }),

        _ => None,
    }
}

#[cfg(test)]
mod test {
    use crossterm::event::Event as CrossTermEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyEventKind;
    use crossterm::event::KeyEventState;
    use crossterm::event::KeyModifiers;
    use crossterm::event::MouseButton;
    use crossterm::event::MouseEvent;
    use crossterm::event::MouseEventKind;

    use super::convert_event;
    use super::Field;
    use super::Input;
    use super::LineEditor;
    use crate::controls::Action;
    use crate::mapper::ClientRect;

    fn key(code: KeyCode) -> CrossTermEvent {
        CrossTermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> CrossTermEvent {
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    const VIEWPORT: ClientRect = ClientRect {
        left: 0.0,
        top: 0.0,
        width: 10.0,
        height: 5.0,
    };

    #[test]
    fn key_bindings() {
        let cases = [
            (KeyCode::Char(' '), Input::Action(Action::TogglePlay)),
            (KeyCode::Char('n'), Input::Action(Action::Step)),
            (KeyCode::Right, Input::Action(Action::Step)),
            (KeyCode::Char('c'), Input::Action(Action::Reset)),
            (KeyCode::Char('r'), Input::Action(Action::Randomize)),
            (KeyCode::Char('s'), Input::Edit(Field::StepSize)),
            (KeyCode::Char('d'), Input::Edit(Field::Density)),
            (KeyCode::Char('q'), Input::Quit),
        ];

        for (code, want) in cases {
            assert_eq!(convert_event(key(code), false, None), Some(want), "{code:?}");
        }

        assert_eq!(convert_event(key(KeyCode::Char('x')), false, None), None);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let ev = CrossTermEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(convert_event(ev.clone(), false, None), Some(Input::Quit));
        assert_eq!(convert_event(ev, true, None), Some(Input::Quit));
    }

    #[test]
    fn releases_are_ignored() {
        let ev = CrossTermEvent::Key(KeyEvent::new_with_kind_and_state(
            KeyCode::Char('n'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        ));

        assert_eq!(convert_event(ev, false, None), None);
    }

    #[test]
    fn editing_captures_keys() {
        assert_eq!(
            convert_event(key(KeyCode::Char('q')), true, None),
            Some(Input::EditChar('q'))
        );
        assert_eq!(convert_event(key(KeyCode::Enter), true, None), Some(Input::CommitEdit));
        assert_eq!(convert_event(key(KeyCode::Esc), true, None), Some(Input::CancelEdit));
        assert_eq!(
            convert_event(key(KeyCode::Backspace), true, None),
            Some(Input::EditBackspace)
        );
    }

    #[test]
    fn clicks_inside_viewport_only() {
        assert_eq!(
            convert_event(click(3, 2), false, Some(VIEWPORT)),
            Some(Input::Action(Action::Pointer {
                x: 3.5,
                y: 2.25,
                rect: VIEWPORT
            }))
        );
        assert_eq!(convert_event(click(10, 2), false, Some(VIEWPORT)), None);
        assert_eq!(convert_event(click(3, 5), false, Some(VIEWPORT)), None);

        // the last, partly covered row still takes clicks
        let partial = ClientRect {
            height: 4.5,
            ..VIEWPORT
        };
        assert!(convert_event(click(3, 4), false, Some(partial)).is_some());
        assert_eq!(convert_event(click(3, 2), false, None), None);
    }

    #[test]
    fn editor_commit() {
        let mut ed = LineEditor::new(Field::StepSize);
        ed.push('1');
        ed.push('2');
        ed.push('x');
        ed.pop();

        assert_eq!(ed.commit(), Action::SetStepSize("12".to_string()));

        let mut ed = LineEditor::new(Field::Density);
        ed.push('9');
        assert_eq!(ed.commit(), Action::SetDensity("9".to_string()));
    }
}
