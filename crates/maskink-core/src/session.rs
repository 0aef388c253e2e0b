//! Editor-session configuration: selected tool, brush width and class.

use crate::palette::ClassId;
use crate::stroke::ToolKind;
use serde::{Deserialize, Serialize};

pub const MIN_BRUSH_WIDTH: f64 = 1.0;
pub const MAX_BRUSH_WIDTH: f64 = 50.0;
pub const DEFAULT_BRUSH_WIDTH: f64 = 5.0;

/// Per-session UI state, passed explicitly rather than held as globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Currently selected tool.
    pub tool: ToolKind,
    /// Class new layers will be bound to. `None` until the hosting
    /// application supplies a non-empty palette.
    pub selected_class: Option<ClassId>,
    brush_width: f64,
}

impl SessionConfig {
    /// Create a session config, defaulting to the given class (normally the
    /// palette's first entry).
    pub fn new(default_class: Option<ClassId>) -> Self {
        Self {
            tool: ToolKind::default(),
            selected_class: default_class,
            brush_width: DEFAULT_BRUSH_WIDTH,
        }
    }

    pub fn brush_width(&self) -> f64 {
        self.brush_width
    }

    /// Set the brush width, clamped to the slider range.
    pub fn set_brush_width(&mut self, width: f64) {
        self.brush_width = width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH);
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(None)
    }
}
