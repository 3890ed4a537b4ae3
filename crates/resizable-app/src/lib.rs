//! Resizable view demo
//!
//! Window shell hosting a few resizable views: touch and mouse input,
//! a settings panel, and Vello rendering.

mod app;
mod event_handler;
mod ui;

pub use app::{App, AppConfig, AppError, AppResult};
pub use event_handler::{DemoContent, DemoView, EventHandler, SharedMeasure, StatusLog, MOUSE_TOUCH_ID};
pub use ui::{render_ui, UiAction, UiState};
