//! 各屏幕的渲染

pub mod editor;
pub mod sort;
