//! Resizable View Core Library
//!
//! Platform-agnostic logic for a view the user can drag and resize with
//! touch handles: anchor classification, frame clamping, the grip overlay
//! layout and delegate notification. Hosts deliver touch events and paint.

pub mod anchor;
pub mod config;
pub mod constraints;
pub mod delegate;
pub mod input;
pub mod overlay;
pub mod state;
pub mod view;

pub use anchor::AnchorPoint;
pub use config::{ConfigError, ConfigResult, MultiTouchPolicy, ResizableConfig, GLOBAL_INSET};
pub use delegate::{ContentView, ResizableViewDelegate};
pub use input::{TouchEvent, TouchId, TouchPhase, TouchTracker};
pub use overlay::{Corner, Edge, GripIcon, GripOverlay, GRIP_ICON_SIZE};
pub use state::{GestureOutcome, IgnoreReason, ResizeState};
pub use view::ResizableView;
