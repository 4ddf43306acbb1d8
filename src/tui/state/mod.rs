//! TUI 状态模块

pub mod editor;
pub mod input;
pub mod sort;

pub use editor::{EditorAction, MappingEditor};
pub use input::InputState;
pub use sort::{Flow, Screen, SortState, Status, StatusKind};
