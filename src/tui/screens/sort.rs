//! 分拣屏幕渲染

use crate::session::SessionState;
use crate::tui::components::{panel, render_title_block, three_panel_layout, truncate_value};
use crate::tui::state::SortState;
use crate::tui::theme::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
};
use rust_i18n::t;

/// 渲染分拣屏幕
pub fn draw(frame: &mut Frame, area: Rect, state: &SortState) {
    let [header, body, footer] = three_panel_layout(area);

    render_title_block(&t!("sort_title"), frame, header);

    let [mappings_area, center_area, controls_area] = Layout::horizontal([
        Constraint::Length(28),
        Constraint::Min(20),
        Constraint::Length(26),
    ])
    .areas(body);

    draw_mappings(frame, mappings_area, state);
    draw_current(frame, center_area, state);
    draw_controls(frame, controls_area);
    draw_status(frame, footer, state);
}

fn draw_mappings(frame: &mut Frame, area: Rect, state: &SortState) {
    let label_width = usize::from(area.width.saturating_sub(8));
    let items: Vec<ListItem> = state
        .mappings()
        .into_iter()
        .flat_map(|map| map.iter())
        .map(|(key, label)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", key), theme().key()),
                Span::styled(truncate_value(label, label_width), theme().normal()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(panel(&t!("mappings_title"))), area);
}

fn draw_current(frame: &mut Frame, area: Rect, state: &SortState) {
    let session = state.session();
    let block = panel(&session.root().display().to_string());
    let width = usize::from(area.width.saturating_sub(4));

    let (text, style) = match (session.state(), session.current()) {
        (SessionState::Ready { index, remaining }, Some(file)) => (
            t!(
                "image_position",
                current = index + 1,
                total = remaining,
                name = truncate_value(&file.file_name(), width)
            ),
            theme().normal(),
        ),
        _ if session.is_empty() && !session.can_undo() => (t!("no_images_found"), theme().warning()),
        _ => (t!("no_more_images"), theme().success()),
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn draw_controls(frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = [
        t!("control_sort"),
        t!("control_back"),
        t!("control_next"),
        t!("control_settings"),
        t!("control_quit"),
    ]
    .into_iter()
    .map(|line| ListItem::new(format!(" {}", line)).style(theme().hint()))
    .collect();

    frame.render_widget(List::new(items).block(panel(&t!("controls_title"))), area);
}

fn draw_status(frame: &mut Frame, area: Rect, state: &SortState) {
    let Some(status) = state.status() else {
        return;
    };
    let line = Paragraph::new(status.message.as_str())
        .style(theme().status(status.kind))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(line, area);
}
