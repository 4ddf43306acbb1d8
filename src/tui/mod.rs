//! Ratatui 终端 UI 模块
//!
//! 逐张分拣图片的终端界面，以及按键映射编辑器。

pub mod app;
pub mod components;
pub mod event;
pub mod screens;
pub mod state;
pub mod theme;
pub mod ui;

pub use app::SortApp;
pub use event::{EventPoll, TuiEvent};
pub use state::{EditorAction, Flow, InputState, MappingEditor, Screen, SortState};
pub use theme::{Theme, theme};
pub use ui::render;
