//! 主题模块

use crate::tui::state::StatusKind;
use ratatui::style::{Color, Modifier, Style};

/// 列表选中项前缀
pub const HIGHLIGHT_SYMBOL: &str = "▶ ";

/// 调色板
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    /// 按键、边框与标题
    pub accent: Color,
    /// 次要文字
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    fn on_bg(&self, fg: Color) -> Style {
        Style::new().fg(fg).bg(self.bg)
    }

    /// 普通文本
    pub fn normal(&self) -> Style {
        self.on_bg(self.fg)
    }

    /// 标题
    pub fn title(&self) -> Style {
        self.on_bg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// 边框
    pub fn border(&self) -> Style {
        self.on_bg(self.accent)
    }

    /// 按键名
    pub fn key(&self) -> Style {
        self.on_bg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// 正在编辑的输入
    pub fn selected(&self) -> Style {
        Style::new()
            .fg(self.bg)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// 提示文本
    pub fn hint(&self) -> Style {
        self.on_bg(self.muted)
    }

    pub fn success(&self) -> Style {
        self.on_bg(self.success)
    }

    pub fn warning(&self) -> Style {
        self.on_bg(self.warning)
    }

    pub fn error(&self) -> Style {
        self.on_bg(self.error)
    }

    /// 状态行颜色
    pub fn status(&self, kind: StatusKind) -> Style {
        match kind {
            StatusKind::Info => self.hint(),
            StatusKind::Success => self.success(),
            StatusKind::Error => self.error(),
        }
    }
}

/// 全局主题实例
pub static THEME: Theme = Theme {
    bg: Color::Black,
    fg: Color::White,
    accent: Color::Cyan,
    muted: Color::Gray,
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Red,
};

/// 获取全局主题引用
pub fn theme() -> &'static Theme {
    &THEME
}
