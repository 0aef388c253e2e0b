//! Segmentation layers: named, class-bound stroke collections.

use crate::palette::{ClassDefinition, ClassId, Rgba};
use crate::stroke::Stroke;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a layer.
pub type LayerId = Uuid;

/// Opacity newly created layers start with.
pub const DEFAULT_LAYER_OPACITY: f64 = 0.7;

/// A named, class-bound, independently toggleable collection of strokes.
///
/// The class binding is snapshotted at creation time; later changes to the
/// palette do not retroactively alter existing layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationLayer {
    id: LayerId,
    pub name: String,
    class_id: ClassId,
    class_name: String,
    color: Rgba,
    strokes: Vec<Stroke>,
    visible: bool,
    locked: bool,
    opacity: f64,
}

impl SegmentationLayer {
    /// Create a layer bound to a class. `ordinal` is the 1-based position
    /// used for the default `"<class>_<n>"` name.
    pub fn new(class: &ClassDefinition, ordinal: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: format!("{}_{}", class.name, ordinal),
            class_id: class.id,
            class_name: class.name.clone(),
            color: class.color,
            strokes: Vec::new(),
            visible: true,
            locked: false,
            opacity: DEFAULT_LAYER_OPACITY,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn class_id(&self) -> ClassId {
        self.class_id
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Strokes in commit order (draw order within the layer).
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Append a committed stroke. Refused while the layer is locked.
    /// Returns whether the stroke was appended.
    pub fn append_stroke(&mut self, stroke: Stroke) -> bool {
        if self.locked {
            return false;
        }
        self.strokes.push(stroke);
        true
    }

    /// Flag setters are legal regardless of lock state: the lock only gates
    /// stroke mutation.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn toggle_locked(&mut self) {
        self.locked = !self.locked;
    }

    /// Set the layer opacity, clamped to [0, 1].
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Bounding box over all stroke polylines, or `None` for a stroke-less
    /// layer.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for stroke in &self.strokes {
            let bounds = stroke.bounds();
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    /// Hit test against the layer's painted strokes. Eraser strokes remove
    /// coverage, so only brush strokes count as hits.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.strokes
            .iter()
            .filter(|s| s.tool() == crate::stroke::ToolKind::Brush)
            .any(|s| s.hit_test(point, tolerance))
    }
}
