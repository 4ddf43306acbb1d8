//! 按键映射编辑器状态

use super::input::InputState;
use crate::config::{ConfigError, KEY_ORDER, KeyBucketMap, KeyCoverage};
use crate::tui::event::TuiEvent;

/// 编辑器对一次按键的反应
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// 继续编辑
    Continue,
    /// 用户确认保存，映射已通过校验
    Save(KeyBucketMap),
    /// 用户放弃编辑
    Cancel,
}

/// 十个数字键各占一行的映射编辑器
#[derive(Debug, Clone)]
pub struct MappingEditor {
    rows: Vec<(char, InputState)>,
    selected: usize,
    coverage: KeyCoverage,
    first_run: bool,
    error: Option<String>,
}

impl MappingEditor {
    /// 以现有映射为初值打开编辑器
    pub fn new(map: &KeyBucketMap, coverage: KeyCoverage) -> Self {
        let rows = KEY_ORDER
            .iter()
            .map(|&key| (key, InputState::with_value(map.get(key).unwrap_or(""))))
            .collect();
        Self {
            rows,
            selected: 0,
            coverage,
            first_run: false,
            error: None,
        }
    }

    /// 首次运行：以默认映射为初值
    pub fn first_run(coverage: KeyCoverage) -> Self {
        Self {
            first_run: true,
            ..Self::new(&KeyBucketMap::with_defaults(), coverage)
        }
    }

    pub fn is_first_run(&self) -> bool {
        self.first_run
    }

    pub fn rows(&self) -> impl Iterator<Item = (char, &InputState)> {
        self.rows.iter().map(|(key, input)| (*key, input))
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 记录保存失败的原因，保持编辑器打开
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// 处理一次按键
    pub fn handle(&mut self, event: &TuiEvent) -> EditorAction {
        match event {
            TuiEvent::Escape => return EditorAction::Cancel,
            TuiEvent::Enter => {
                return match self.build_map() {
                    Ok(map) => {
                        self.error = None;
                        EditorAction::Save(map)
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                        EditorAction::Continue
                    }
                };
            }
            TuiEvent::Up => {
                self.selected = self.selected.checked_sub(1).unwrap_or(self.rows.len() - 1);
            }
            TuiEvent::Down => {
                self.selected = (self.selected + 1) % self.rows.len();
            }
            TuiEvent::Left => self.input_mut().move_cursor_left(),
            TuiEvent::Right => self.input_mut().move_cursor_right(),
            TuiEvent::Home => self.input_mut().move_cursor_to_start(),
            TuiEvent::End => self.input_mut().move_cursor_to_end(),
            TuiEvent::Backspace => self.input_mut().delete_before_cursor(),
            TuiEvent::Delete => self.input_mut().delete_after_cursor(),
            TuiEvent::Char(c) => self.input_mut().insert_char(*c),
            _ => {}
        }
        EditorAction::Continue
    }

    /// 由当前输入组装映射并校验
    ///
    /// 要求全部按键时空白标签是错误；允许部分按键时空白行被略过。
    pub fn build_map(&self) -> Result<KeyBucketMap, ConfigError> {
        let mut map = KeyBucketMap::new();
        for (key, input) in &self.rows {
            let label = input.value().trim();
            if label.is_empty() {
                match self.coverage {
                    KeyCoverage::AllDigits => return Err(ConfigError::EmptyLabel(*key)),
                    KeyCoverage::Partial => continue,
                }
            }
            map.insert(*key, label)?;
        }
        if map.is_empty() {
            return Err(ConfigError::MissingSection("Mappings"));
        }
        map.validate()?;
        Ok(map)
    }

    fn input_mut(&mut self) -> &mut InputState {
        &mut self.rows[self.selected].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_selected(editor: &mut MappingEditor) {
        editor.handle(&TuiEvent::End);
        for _ in 0..32 {
            editor.handle(&TuiEvent::Backspace);
        }
    }

    #[test]
    fn test_first_run_starts_from_defaults() {
        let editor = MappingEditor::first_run(KeyCoverage::AllDigits);
        assert!(editor.is_first_run());
        let map = editor.build_map().unwrap();
        assert_eq!(map, KeyBucketMap::with_defaults());
    }

    #[test]
    fn test_edit_and_save() {
        let mut editor = MappingEditor::first_run(KeyCoverage::AllDigits);
        editor.handle(&TuiEvent::Down);
        clear_selected(&mut editor);
        for c in "Wedding".chars() {
            editor.handle(&TuiEvent::Char(c));
        }

        let EditorAction::Save(map) = editor.handle(&TuiEvent::Enter) else {
            panic!("expected save");
        };
        assert_eq!(map.get('2'), Some("Wedding"));
        assert_eq!(map.len(), 10);
    }

    #[test]
    fn test_blank_label_blocks_save_when_all_keys_required() {
        let mut editor = MappingEditor::first_run(KeyCoverage::AllDigits);
        clear_selected(&mut editor);

        assert_eq!(editor.handle(&TuiEvent::Enter), EditorAction::Continue);
        assert!(editor.error().is_some());
    }

    #[test]
    fn test_blank_label_dropped_with_partial_keys() {
        let mut editor = MappingEditor::first_run(KeyCoverage::Partial);
        clear_selected(&mut editor);

        let EditorAction::Save(map) = editor.handle(&TuiEvent::Enter) else {
            panic!("expected save");
        };
        assert_eq!(map.get('1'), None);
        assert_eq!(map.len(), 9);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let map = KeyBucketMap::from_pairs([('1', "A"), ('2', "B")]).unwrap();
        let mut editor = MappingEditor::new(&map, KeyCoverage::Partial);
        editor.handle(&TuiEvent::Down);
        clear_selected(&mut editor);
        editor.handle(&TuiEvent::Char('A'));

        assert_eq!(editor.handle(&TuiEvent::Enter), EditorAction::Continue);
        assert!(editor.error().unwrap().contains("'A'"));
    }

    #[test]
    fn test_selection_wraps() {
        let mut editor = MappingEditor::first_run(KeyCoverage::AllDigits);
        editor.handle(&TuiEvent::Up);
        assert_eq!(editor.selected(), 9);
        editor.handle(&TuiEvent::Down);
        assert_eq!(editor.selected(), 0);
    }

    #[test]
    fn test_escape_cancels() {
        let mut editor = MappingEditor::first_run(KeyCoverage::AllDigits);
        assert_eq!(editor.handle(&TuiEvent::Escape), EditorAction::Cancel);
    }
}
