//! UI渲染模块

use crate::tui::screens;
use crate::tui::state::{Screen, SortState};
use crate::tui::theme::theme;
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
};

fn set_background(area: Rect, buf: &mut Buffer) {
    let style = Style::new().bg(theme().bg);
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut(Position { x, y }) {
                cell.set_style(style);
            }
        }
    }
}

/// 渲染整个应用
pub fn render(terminal: &mut DefaultTerminal, state: &SortState) -> std::io::Result<()> {
    terminal.draw(|frame| draw(frame, frame.area(), state))?;
    Ok(())
}

/// 主渲染函数
pub fn draw(frame: &mut Frame, area: Rect, state: &SortState) {
    set_background(area, frame.buffer_mut());

    match state.screen() {
        Screen::Sorting => screens::sort::draw(frame, area, state),
        Screen::Editor(editor) => screens::editor::draw(frame, area, editor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KeyBucketMap, KeyCoverage};
    use crate::media::MediaFile;
    use crate::session::SortSession;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_sorting_screen_shows_position_and_keys() {
        let session = SortSession::new("/project", [MediaFile::new("/project/a.jpg")]);
        let map = KeyBucketMap::from_pairs([('1', "1990s")]).unwrap();
        let state = SortState::new(session, Some(map), "/tmp/unused.toml", KeyCoverage::Partial);

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| draw(frame, frame.area(), &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("1/1: a.jpg"));
        assert!(text.contains("1990s"));
    }

    #[test]
    fn test_first_run_shows_editor() {
        let session = SortSession::new("/project", Vec::<MediaFile>::new());
        let state = SortState::new(session, None, "/tmp/unused.toml", KeyCoverage::AllDigits);

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| draw(frame, frame.area(), &state)).unwrap();

        assert!(buffer_text(&terminal).contains("1940-1969"));
    }
}
