//! 映射编辑器渲染

use crate::tui::components::{panel, render_hint, render_title_block, three_panel_layout};
use crate::tui::state::MappingEditor;
use crate::tui::theme::{HIGHLIGHT_SYMBOL, theme};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use rust_i18n::t;

/// 标签输入框前的固定宽度（选中符号 + 按键名）
const LABEL_OFFSET: u16 = 12;

/// 渲染映射编辑器
pub fn draw(frame: &mut Frame, area: Rect, editor: &MappingEditor) {
    let [header, body, footer] = three_panel_layout(area);

    let title = if editor.is_first_run() {
        t!("setup_title")
    } else {
        t!("settings_title")
    };
    render_title_block(&title, frame, header);

    let [list_area, error_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(body);

    let block = panel(&t!("mappings_title"));
    let inner = block.inner(list_area);
    frame.render_widget(block, list_area);

    let lines: Vec<Line> = editor
        .rows()
        .enumerate()
        .map(|(i, (key, input))| {
            let selected = i == editor.selected();
            let marker = if selected { HIGHLIGHT_SYMBOL } else { "  " };
            let key_label = format!("{}{:<10}", marker, t!("settings_key", key = key));
            let value_style = if selected {
                theme().selected()
            } else {
                theme().normal()
            };
            Line::from(vec![
                Span::styled(key_label, theme().key()),
                Span::styled(input.value().to_string(), value_style),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).style(theme().normal()), inner);

    // 设置光标位置
    if let Some((_, input)) = editor.rows().nth(editor.selected()) {
        let x = inner.x + LABEL_OFFSET + input.visual_cursor_position() as u16;
        let y = inner.y + editor.selected() as u16;
        if x < inner.x + inner.width && y < inner.y + inner.height {
            frame.set_cursor_position(Position { x, y });
        }
    }

    if let Some(error) = editor.error() {
        frame.render_widget(Line::from(error).style(theme().error()), error_area);
    }

    render_hint(&t!("settings_hint"), frame, footer);
}
