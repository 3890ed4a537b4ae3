//! Resizable view configuration.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inset applied to everything drawn (handles and content view), so users
/// can trigger a resize from a few points outside the visible box.
pub const GLOBAL_INSET: f64 = 0.0;

/// Default minimum width.
pub const DEFAULT_MIN_WIDTH: f64 = 8.0;
/// Default minimum height.
pub const DEFAULT_MIN_HEIGHT: f64 = 8.0;
/// Default interactive border size.
pub const DEFAULT_INTERACTIVE_BORDER_SIZE: f64 = 0.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// How simultaneous touches map onto a single gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiTouchPolicy {
    /// The first touch of a gesture drives the geometry, others are ignored.
    #[default]
    PrimaryTouch,
    /// Two touches resize the frame about its center by their change in span.
    Pinch,
}

/// Settable properties of a [`crate::ResizableView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizableConfig {
    pub min_width: f64,
    pub min_height: f64,
    /// Ignore all gestures.
    pub disable: bool,
    /// Ignore gestures that start while more than one touch is down, and
    /// freeze geometry while extra touches are down.
    pub disable_on_multi_touch: bool,
    /// Keep the frame inside the superview bounds.
    pub prevents_position_outside_superview: bool,
    /// Ignore gestures that start in the interior (move-only gestures).
    pub disable_pan: bool,
    /// Margin between the view's bounds and its content. Larger values make
    /// edges easier to grab.
    pub resizable_inset: f64,
    /// Thickness of the band inside each content edge that grabs the edge.
    pub interactive_border_size: f64,
    pub multi_touch: MultiTouchPolicy,
}

impl Default for ResizableConfig {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            disable: false,
            disable_on_multi_touch: false,
            prevents_position_outside_superview: true,
            disable_pan: false,
            resizable_inset: 0.0,
            interactive_border_size: DEFAULT_INTERACTIVE_BORDER_SIZE,
            multi_touch: MultiTouchPolicy::default(),
        }
    }
}

impl ResizableConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every dimension is finite and non-negative.
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("min_width", self.min_width),
            ("min_height", self.min_height),
            ("resizable_inset", self.resizable_inset),
            ("interactive_border_size", self.interactive_border_size),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Minimum frame size.
    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    /// Total margin between the frame and the content rect.
    pub fn content_inset(&self) -> f64 {
        GLOBAL_INSET + self.resizable_inset
    }
}
