//! Common UI components module
//!
//! Provides reusable UI components shared by the sorting and editor screens.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::theme;

/// Three-panel layout: header, body, footer
pub fn three_panel_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(area)
}

/// Render a centered title block with border
pub fn render_title_block(title: &str, frame: &mut Frame, area: Rect) {
    let title_line = Line::from(format!(" {} ", title))
        .centered()
        .style(theme().title());

    let block = Block::bordered()
        .title(title_line)
        .border_type(BorderType::Rounded)
        .border_style(theme().border())
        .style(theme().normal());

    frame.render_widget(block, area);
}

/// Rounded block with a left-aligned title
pub fn panel(title: &str) -> Block<'static> {
    Block::bordered()
        .title(Line::from(format!(" {} ", title)).style(theme().title()))
        .border_type(BorderType::Rounded)
        .border_style(theme().border())
        .style(theme().normal())
}

/// Render bottom hint text
pub fn render_hint(hint: &str, frame: &mut Frame, area: Rect) {
    let hint_widget = Paragraph::new(hint.to_string())
        .style(theme().hint())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(hint_widget, area);
}

/// Truncate to a display width, keeping UTF-8 boundaries intact
pub fn truncate_value(value: &str, max_width: usize) -> String {
    if value.width() <= max_width {
        return value.to_string();
    }

    let target_width = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut output = String::new();

    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        output.push(ch);
        current_width += ch_width;
    }

    output.push_str("...");
    output
}
