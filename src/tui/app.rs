//! TUI application main module
//!
//! Owns the terminal and drives the sorting loop.

use crate::tui::event::{EventPoll, TuiEvent};
use crate::tui::state::{Flow, SortState};
use crate::tui::ui::render;
use ratatui::DefaultTerminal;

/// TUI application
#[derive(Debug)]
pub struct SortApp {
    /// Terminal
    pub terminal: DefaultTerminal,
    /// Event poller
    pub event_poll: EventPoll,
    /// Application state
    pub state: SortState,
}

impl SortApp {
    /// Take over the terminal
    pub fn new(state: SortState) -> Self {
        Self {
            terminal: ratatui::init(),
            event_poll: EventPoll::default(),
            state,
        }
    }

    /// Run until the user quits, then hand back the final state
    pub fn run(mut self) -> std::io::Result<SortState> {
        let result = self.event_loop();
        ratatui::restore();
        result.map(|()| self.state)
    }

    fn event_loop(&mut self) -> std::io::Result<()> {
        render(&mut self.terminal, &self.state)?;

        loop {
            match self.event_poll.next()? {
                TuiEvent::None => continue,
                TuiEvent::Resize(_, _) => {}
                event => {
                    if self.state.handle(event) == Flow::Exit {
                        return Ok(());
                    }
                }
            }
            render(&mut self.terminal, &self.state)?;
        }
    }
}
