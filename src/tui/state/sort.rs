//! 分拣界面状态
//!
//! 把按键翻译为 [`SortSession`] 上的操作，并记录要显示的状态行。

use super::editor::{EditorAction, MappingEditor};
use crate::config::{KeyBucketMap, KeyCoverage, save_mappings};
use crate::session::{BackOutcome, ClassifyOutcome, SortSession};
use crate::tui::event::TuiEvent;
use rust_i18n::t;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 当前屏幕
#[derive(Debug, Clone)]
pub enum Screen {
    /// 逐张分拣
    Sorting,
    /// 编辑按键映射
    Editor(MappingEditor),
}

/// 事件处理后主循环应如何继续
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// 状态行的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// 状态行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// 分拣应用状态
#[derive(Debug)]
pub struct SortState {
    session: SortSession,
    mappings: Option<KeyBucketMap>,
    config_path: PathBuf,
    coverage: KeyCoverage,
    screen: Screen,
    status: Option<Status>,
}

impl SortState {
    /// 创建状态；没有可用映射时先进入首次设置
    pub fn new(
        session: SortSession,
        mappings: Option<KeyBucketMap>,
        config_path: impl Into<PathBuf>,
        coverage: KeyCoverage,
    ) -> Self {
        let screen = match mappings {
            Some(_) => Screen::Sorting,
            None => Screen::Editor(MappingEditor::first_run(coverage)),
        };
        Self {
            session,
            mappings,
            config_path: config_path.into(),
            coverage,
            screen,
            status: None,
        }
    }

    pub fn session(&self) -> &SortSession {
        &self.session
    }

    pub fn mappings(&self) -> Option<&KeyBucketMap> {
        self.mappings.as_ref()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// 处理一个事件
    pub fn handle(&mut self, event: TuiEvent) -> Flow {
        if event == TuiEvent::CtrlC {
            return Flow::Exit;
        }
        match self.screen {
            Screen::Sorting => self.handle_sorting(event),
            Screen::Editor(_) => self.handle_editor(event),
        }
    }

    fn handle_sorting(&mut self, event: TuiEvent) -> Flow {
        match event {
            TuiEvent::Char('q') | TuiEvent::Escape => return Flow::Exit,
            TuiEvent::Char('s') => {
                let editor = match &self.mappings {
                    Some(map) => MappingEditor::new(map, self.coverage),
                    None => MappingEditor::first_run(self.coverage),
                };
                self.screen = Screen::Editor(editor);
            }
            TuiEvent::Char(key) if key.is_ascii_digit() => self.classify(key),
            TuiEvent::Left => self.back(),
            TuiEvent::Right => {
                self.session.next();
                self.status = None;
            }
            _ => {}
        }
        Flow::Continue
    }

    fn classify(&mut self, key: char) {
        let Some(map) = &self.mappings else {
            return;
        };
        let name = self
            .session
            .current()
            .map(|f| f.file_name())
            .unwrap_or_default();
        match self.session.classify(key, map) {
            Ok(ClassifyOutcome::Moved { bucket, .. }) => {
                self.status = Some(Status::new(
                    StatusKind::Success,
                    t!("status_moved", name = name, bucket = bucket),
                ));
            }
            Ok(ClassifyOutcome::Ignored) => {}
            Err(e) => {
                self.status = Some(Status::new(
                    StatusKind::Error,
                    t!("status_failed", error = e.to_string()),
                ));
            }
        }
    }

    fn back(&mut self) {
        self.status = Some(match self.session.undo() {
            Ok(BackOutcome::Undone { restored }) => {
                let name = restored
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Status::new(StatusKind::Success, t!("status_undone", name = name))
            }
            Ok(BackOutcome::Previous) => Status::new(StatusKind::Info, t!("status_previous")),
            Ok(BackOutcome::AtStart) => Status::new(StatusKind::Info, t!("status_at_start")),
            Err(e) => Status::new(StatusKind::Error, t!("status_failed", error = e.to_string())),
        });
    }

    fn handle_editor(&mut self, event: TuiEvent) -> Flow {
        let Screen::Editor(editor) = &mut self.screen else {
            return Flow::Continue;
        };
        match editor.handle(&event) {
            EditorAction::Continue => Flow::Continue,
            EditorAction::Cancel if editor.is_first_run() => {
                info!("Setup cancelled before a mapping was saved");
                Flow::Exit
            }
            EditorAction::Cancel => {
                self.screen = Screen::Sorting;
                Flow::Continue
            }
            EditorAction::Save(map) => {
                if let Err(e) = save_mappings(&self.config_path, &map) {
                    warn!(config = %self.config_path.display(), error = %e, "Saving mappings failed");
                    editor.set_error(t!("settings_error", error = e.to_string()));
                    return Flow::Continue;
                }
                self.mappings = Some(map);
                self.screen = Screen::Sorting;
                self.status = Some(Status::new(StatusKind::Success, t!("status_settings_saved")));
                Flow::Continue
            }
        }
    }
}
