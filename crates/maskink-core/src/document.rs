//! Layer stack document and its mutation surface.

use crate::layer::{LayerId, SegmentationLayer};
use crate::palette::{ClassId, ClassPalette};
use crate::stroke::Stroke;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// The layer stack for one image: an ordered sequence of segmentation
/// layers plus the active-layer reference.
///
/// Stack order is both z-order (later layers draw on top) and list-display
/// order. Layer ids are unique within the document. The active reference is
/// either empty or points at an existing layer; deleting that layer resets
/// it to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    layers: Vec<SegmentationLayer>,
    active_layer: Option<LayerId>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layer bound to `class_id`, resolved against the palette.
    /// Returns `None` (no layer created) when the class is unknown.
    pub fn create_layer(&mut self, palette: &ClassPalette, class_id: ClassId) -> Option<LayerId> {
        let Some(class) = palette.get(class_id) else {
            log::debug!("create_layer: unknown class id {class_id}");
            return None;
        };

        let layer = SegmentationLayer::new(class, self.layers.len() + 1);
        let id = layer.id();
        self.layers.push(layer);
        Some(id)
    }

    /// Append a committed stroke to a layer. A no-op (returning `false`)
    /// when the id does not resolve, the layer is locked, or the stroke has
    /// no points.
    pub fn append_stroke(&mut self, layer_id: LayerId, stroke: Stroke) -> bool {
        let Some(layer) = self.layer_mut(layer_id) else {
            log::debug!("append_stroke: no layer {layer_id}");
            return false;
        };
        if !layer.append_stroke(stroke) {
            log::debug!("append_stroke: layer {layer_id} is locked, stroke discarded");
            return false;
        }
        true
    }

    pub fn set_visible(&mut self, layer_id: LayerId, visible: bool) -> bool {
        self.layer_mut(layer_id)
            .map(|l| l.set_visible(visible))
            .is_some()
    }

    pub fn toggle_visible(&mut self, layer_id: LayerId) -> bool {
        self.layer_mut(layer_id).map(|l| l.toggle_visible()).is_some()
    }

    /// Locking only gates stroke mutation; flag setters stay legal on a
    /// locked layer.
    pub fn set_locked(&mut self, layer_id: LayerId, locked: bool) -> bool {
        self.layer_mut(layer_id)
            .map(|l| l.set_locked(locked))
            .is_some()
    }

    pub fn toggle_locked(&mut self, layer_id: LayerId) -> bool {
        self.layer_mut(layer_id).map(|l| l.toggle_locked()).is_some()
    }

    /// Set a layer's opacity, clamped to [0, 1].
    pub fn set_opacity(&mut self, layer_id: LayerId, opacity: f64) -> bool {
        self.layer_mut(layer_id)
            .map(|l| l.set_opacity(opacity))
            .is_some()
    }

    /// Remove a layer. Deleting the active layer resets the active
    /// reference; deleting an unknown id is a no-op.
    pub fn delete_layer(&mut self, layer_id: LayerId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|l| l.id() != layer_id);
        if self.layers.len() == before {
            log::debug!("delete_layer: no layer {layer_id}");
            return false;
        }
        if self.active_layer == Some(layer_id) {
            self.active_layer = None;
        }
        true
    }

    /// Empty the layer list and reset the active reference.
    pub fn clear_all(&mut self) {
        self.layers.clear();
        self.active_layer = None;
    }

    /// Make a layer the target of subsequent brush strokes. Selecting an
    /// unknown id is a no-op.
    pub fn set_active(&mut self, layer_id: LayerId) -> bool {
        if self.layer(layer_id).is_none() {
            log::debug!("set_active: no layer {layer_id}");
            return false;
        }
        self.active_layer = Some(layer_id);
        true
    }

    pub fn clear_active(&mut self) {
        self.active_layer = None;
    }

    pub fn active_layer(&self) -> Option<LayerId> {
        self.active_layer
    }

    pub fn layer(&self, layer_id: LayerId) -> Option<&SegmentationLayer> {
        self.layers.iter().find(|l| l.id() == layer_id)
    }

    fn layer_mut(&mut self, layer_id: LayerId) -> Option<&mut SegmentationLayer> {
        self.layers.iter_mut().find(|l| l.id() == layer_id)
    }

    /// Layers in stack order (back to front).
    pub fn layers(&self) -> &[SegmentationLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Bounding box over every layer's strokes.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for layer in &self.layers {
            if let Some(bounds) = layer.bounds() {
                result = Some(match result {
                    Some(r) => r.union(bounds),
                    None => bounds,
                });
            }
        }
        result
    }

    /// Find the frontmost layer whose painted strokes pass under `point`.
    /// Invisible layers are skipped entirely.
    pub fn layer_at_point(&self, point: Point, tolerance: f64) -> Option<LayerId> {
        self.layers
            .iter()
            .rev()
            .filter(|l| l.visible())
            .find(|l| l.hit_test(point, tolerance))
            .map(|l| l.id())
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ClassDefinition;
    use crate::stroke::ToolKind;

    fn palette() -> ClassPalette {
        ClassPalette::from_classes(vec![
            ClassDefinition::from_hex(1, "cat", "#FF0000").unwrap(),
            ClassDefinition::from_hex(2, "dog", "#00FF00").unwrap(),
        ])
    }

    fn stroke(points: Vec<Point>) -> Stroke {
        Stroke::new(points, ToolKind::Brush, 5.0).unwrap()
    }

    #[test]
    fn test_create_layer_names_by_ordinal() {
        let palette = palette();
        let mut doc = Document::new();

        doc.create_layer(&palette, 1).unwrap();
        doc.create_layer(&palette, 1).unwrap();
        doc.create_layer(&palette, 2).unwrap();

        let names: Vec<_> = doc.layers().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["cat_1", "cat_2", "dog_3"]);
    }

    #[test]
    fn test_create_layer_unknown_class() {
        let palette = palette();
        let mut doc = Document::new();

        assert!(doc.create_layer(&palette, 99).is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_class_binding_snapshotted() {
        let palette = palette();
        let mut doc = Document::new();
        let id = doc.create_layer(&palette, 1).unwrap();

        // A later palette no longer knowing the class leaves the layer
        // binding untouched.
        let layer = doc.layer(id).unwrap();
        assert_eq!(layer.class_id(), 1);
        assert_eq!(layer.class_name(), "cat");
    }

    #[test]
    fn test_append_stroke_respects_lock() {
        let palette = palette();
        let mut doc = Document::new();
        let id = doc.create_layer(&palette, 1).unwrap();

        doc.set_locked(id, true);
        assert!(!doc.append_stroke(id, stroke(vec![Point::new(0.0, 0.0)])));
        assert_eq!(doc.layer(id).unwrap().stroke_count(), 0);

        doc.set_locked(id, false);
        assert!(doc.append_stroke(id, stroke(vec![Point::new(0.0, 0.0)])));
        assert_eq!(doc.layer(id).unwrap().stroke_count(), 1);
    }

    #[test]
    fn test_append_stroke_unknown_layer() {
        let mut doc = Document::new();
        assert!(!doc.append_stroke(uuid::Uuid::new_v4(), stroke(vec![Point::new(0.0, 0.0)])));
    }

    #[test]
    fn test_delete_layer_resets_active() {
        let palette = palette();
        let mut doc = Document::new();
        let id = doc.create_layer(&palette, 1).unwrap();
        doc.set_active(id);
        assert_eq!(doc.active_layer(), Some(id));

        assert!(doc.delete_layer(id));
        assert_eq!(doc.active_layer(), None);
        assert!(doc.is_empty());

        // Unknown ids are a no-op.
        assert!(!doc.delete_layer(id));
    }

    #[test]
    fn test_delete_other_layer_keeps_active() {
        let palette = palette();
        let mut doc = Document::new();
        let a = doc.create_layer(&palette, 1).unwrap();
        let b = doc.create_layer(&palette, 2).unwrap();
        doc.set_active(a);

        doc.delete_layer(b);
        assert_eq!(doc.active_layer(), Some(a));
    }

    #[test]
    fn test_clear_all() {
        let palette = palette();
        let mut doc = Document::new();
        let id = doc.create_layer(&palette, 1).unwrap();
        doc.set_active(id);

        doc.clear_all();
        assert!(doc.is_empty());
        assert_eq!(doc.active_layer(), None);
    }

    #[test]
    fn test_set_active_unknown_layer() {
        let mut doc = Document::new();
        assert!(!doc.set_active(uuid::Uuid::new_v4()));
        assert_eq!(doc.active_layer(), None);
    }

    #[test]
    fn test_layer_at_point_skips_invisible() {
        let palette = palette();
        let mut doc = Document::new();
        let bottom = doc.create_layer(&palette, 1).unwrap();
        let top = doc.create_layer(&palette, 2).unwrap();

        let line = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        doc.append_stroke(bottom, stroke(line.clone()));
        doc.append_stroke(top, stroke(line));

        // Frontmost visible layer wins.
        assert_eq!(doc.layer_at_point(Point::new(5.0, 0.0), 1.0), Some(top));

        doc.set_visible(top, false);
        assert_eq!(doc.layer_at_point(Point::new(5.0, 0.0), 1.0), Some(bottom));

        doc.set_visible(bottom, false);
        assert_eq!(doc.layer_at_point(Point::new(5.0, 0.0), 1.0), None);
    }

    #[test]
    fn test_json_round_trip() {
        let palette = palette();
        let mut doc = Document::new();
        let id = doc.create_layer(&palette, 1).unwrap();
        doc.append_stroke(id, stroke(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]));
        doc.set_active(id);

        let json = doc.to_json().unwrap();
        let restored = Document::from_json(&json).unwrap();

        assert_eq!(restored.len(), 1);
        assert_eq!(restored.active_layer(), Some(id));
        let layer = restored.layer(id).unwrap();
        assert_eq!(layer.name, "cat_1");
        assert_eq!(layer.strokes()[0].points().len(), 2);
    }
}
