//! 输入状态

use unicode_width::UnicodeWidthStr;

/// 文本输入状态
#[derive(Debug, Default, Clone)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    /// 使用初始值创建
    pub fn with_value(value: &str) -> Self {
        Self {
            buffer: value.to_string(),
            cursor: value.len(),
        }
    }

    /// 插入字符
    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// 删除光标前字符
    pub fn delete_before_cursor(&mut self) {
        if let Some(prev) = self.buffer[..self.cursor].chars().last() {
            self.cursor -= prev.len_utf8();
            self.buffer.remove(self.cursor);
        }
    }

    /// 删除光标后字符
    pub fn delete_after_cursor(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    /// 光标左移
    pub fn move_cursor_left(&mut self) {
        if let Some(prev) = self.buffer[..self.cursor].chars().last() {
            self.cursor -= prev.len_utf8();
        }
    }

    /// 光标右移
    pub fn move_cursor_right(&mut self) {
        if let Some(next) = self.buffer[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    /// 移动到行首
    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    /// 移动到行尾
    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// 光标可视位置
    pub fn visual_cursor_position(&self) -> usize {
        self.buffer[..self.cursor].width()
    }

    /// 获取当前值
    pub fn value(&self) -> &str {
        &self.buffer
    }
}
