//! Keyboard input for the sorter
//!
//! Crossterm events are reduced to the handful of keys the sorting screen
//! and the mapping editor understand.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

/// How long one poll waits before reporting [`TuiEvent::None`]
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Input relevant to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Char(char),
    Enter,
    Escape,
    // Arrows: Left/Right drive undo and next while sorting
    Up,
    Down,
    Left,
    Right,
    // Line editing
    Backspace,
    Delete,
    Home,
    End,
    /// Ctrl+C or Ctrl+D
    CtrlC,
    Resize(u16, u16),
    /// Poll timed out or the event is of no interest
    None,
}

impl TuiEvent {
    /// Translate a crossterm event
    pub fn from_crossterm(event: Event) -> Self {
        match event {
            Event::Key(key) => Self::from_key(key),
            Event::Resize(width, height) => TuiEvent::Resize(width, height),
            _ => TuiEvent::None,
        }
    }

    fn from_key(key: KeyEvent) -> Self {
        // Windows reports releases too
        if key.kind != KeyEventKind::Press {
            return TuiEvent::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c' | 'd') => TuiEvent::CtrlC,
                _ => TuiEvent::None,
            };
        }

        match key.code {
            KeyCode::Char(c) => TuiEvent::Char(c),
            KeyCode::Enter => TuiEvent::Enter,
            KeyCode::Esc => TuiEvent::Escape,
            KeyCode::Up => TuiEvent::Up,
            KeyCode::Down => TuiEvent::Down,
            KeyCode::Left => TuiEvent::Left,
            KeyCode::Right => TuiEvent::Right,
            KeyCode::Backspace => TuiEvent::Backspace,
            KeyCode::Delete => TuiEvent::Delete,
            KeyCode::Home => TuiEvent::Home,
            KeyCode::End => TuiEvent::End,
            _ => TuiEvent::None,
        }
    }
}

/// Blocking poller over the terminal's event queue
#[derive(Debug)]
pub struct EventPoll {
    timeout: Duration,
}

impl EventPoll {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Wait up to the timeout for the next event
    pub fn next(&self) -> io::Result<TuiEvent> {
        if event::poll(self.timeout)? {
            Ok(TuiEvent::from_crossterm(event::read()?))
        } else {
            Ok(TuiEvent::None)
        }
    }
}

impl Default for EventPoll {
    fn default() -> Self {
        Self::new(POLL_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_digit_keys_pass_through() {
        let event = TuiEvent::from_crossterm(press(KeyCode::Char('7'), KeyModifiers::NONE));
        assert_eq!(event, TuiEvent::Char('7'));
    }

    #[test]
    fn test_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(TuiEvent::from_crossterm(release), TuiEvent::None);
    }

    #[test]
    fn test_control_chords() {
        assert_eq!(
            TuiEvent::from_crossterm(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            TuiEvent::CtrlC
        );
        // Ctrl+1 must not classify
        assert_eq!(
            TuiEvent::from_crossterm(press(KeyCode::Char('1'), KeyModifiers::CONTROL)),
            TuiEvent::None
        );
    }

    #[test]
    fn test_resize() {
        assert_eq!(
            TuiEvent::from_crossterm(Event::Resize(80, 24)),
            TuiEvent::Resize(80, 24)
        );
    }
}
