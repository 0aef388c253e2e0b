//! Editor facade wiring capture, document, history and change
//! notifications.

use crate::capture::{PointerEvent, StrokeCapture};
use crate::document::Document;
use crate::history::History;
use crate::layer::{LayerId, SegmentationLayer};
use crate::palette::{ClassId, ClassPalette};
use crate::session::SessionConfig;
use crate::stroke::{Stroke, ToolKind};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Full ordered layer stack, delivered to the hosting application after
/// every document mutation. Persisting or transmitting it is the host's
/// job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeNotification {
    pub layers: Vec<SegmentationLayer>,
}

/// The segmentation editor for one image.
///
/// Owns the document, its history, the capture machine and the session
/// config, and is the single mutation path: every state transition happens
/// synchronously on the caller's thread, in event arrival order. Dropping
/// the editor drops the document and its history; nothing is persisted
/// here.
#[derive(Debug)]
pub struct Editor {
    palette: ClassPalette,
    document: Document,
    history: History,
    capture: StrokeCapture,
    /// Session UI state (tool, brush width, selected class).
    pub session: SessionConfig,
    canvas_size: Size,
    /// Pending notifications, drained by the hosting application.
    outgoing: Vec<ChangeNotification>,
}

impl Editor {
    /// Create an editor over an empty document. The session selects the
    /// palette's first class by default.
    pub fn new(palette: ClassPalette, canvas_size: Size) -> Self {
        let document = Document::new();
        let history = History::new(&document);
        let session = SessionConfig::new(palette.first().map(|c| c.id));
        Self {
            palette,
            document,
            history,
            capture: StrokeCapture::new(),
            session,
            canvas_size,
            outgoing: Vec::new(),
        }
    }

    pub fn palette(&self) -> &ClassPalette {
        &self.palette
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn capture(&self) -> &StrokeCapture {
        &self.capture
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    // --- Pointer stream ---

    /// Apply one pointer event. Events must arrive in order; each is
    /// handled synchronously and completely before the next.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.capture.append(position),
            PointerEvent::Up { .. } | PointerEvent::LeaveCanvas => {
                if self.capture.is_capturing() {
                    self.commit_stroke();
                }
            }
        }
    }

    fn pointer_down(&mut self, position: Point) {
        if self.capture.is_capturing() {
            return;
        }
        if !self.stroke_target_available() {
            log::debug!("pointer down ignored: no unlocked target layer");
            return;
        }
        self.capture.begin(position);
    }

    /// Whether a down event may start a stroke: the active layer must be
    /// unlocked, or, with no active layer, the brush must be able to
    /// create one for the selected class. The eraser never creates a
    /// layer.
    fn stroke_target_available(&self) -> bool {
        match self.document.active_layer() {
            Some(id) => self.document.layer(id).map(|l| !l.locked()).unwrap_or(false),
            None => match self.session.tool {
                ToolKind::Brush => self
                    .session
                    .selected_class
                    .is_some_and(|id| self.palette.contains(id)),
                ToolKind::Eraser => false,
            },
        }
    }

    /// Commit the captured points as a stroke, tagged with the tool and
    /// brush width selected at commit time. On the first brush stroke with
    /// no active layer a new class-bound layer is created and made active
    /// before the stroke is appended.
    fn commit_stroke(&mut self) {
        let points = self.capture.finish();
        let Some(stroke) = Stroke::new(points, self.session.tool, self.session.brush_width())
        else {
            return;
        };

        let target = match self.document.active_layer() {
            Some(id) => id,
            None => {
                if self.session.tool != ToolKind::Brush {
                    // Erasing requires an existing surface.
                    log::debug!("commit: eraser with no active layer, stroke discarded");
                    return;
                }
                let Some(class_id) = self.session.selected_class else {
                    return;
                };
                let Some(layer_id) = self.document.create_layer(&self.palette, class_id) else {
                    return;
                };
                self.document.set_active(layer_id);
                layer_id
            }
        };

        // A layer locked mid-capture still refuses the stroke; nothing is
        // snapshotted or announced in that case.
        if self.document.append_stroke(target, stroke) {
            self.history.snapshot(&self.document);
            self.notify();
        }
    }

    // --- Undo / redo ---

    /// Step the document back one committed mutation. Returns whether
    /// anything changed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(document) => {
                self.document = document;
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Step the document forward one committed mutation. Returns whether
    /// anything changed.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(document) => {
                self.document = document;
                self.notify();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Layer operations ---

    /// Explicitly create an empty layer bound to `class_id`. Returns
    /// `None` (and creates nothing) when the class is unknown. The new
    /// layer does not become active; only the first-stroke commit does
    /// that implicitly.
    pub fn create_layer(&mut self, class_id: ClassId) -> Option<LayerId> {
        let layer_id = self.document.create_layer(&self.palette, class_id)?;
        self.notify();
        Some(layer_id)
    }

    pub fn set_layer_visible(&mut self, layer_id: LayerId, visible: bool) {
        if self.document.set_visible(layer_id, visible) {
            self.notify();
        }
    }

    pub fn toggle_layer_visible(&mut self, layer_id: LayerId) {
        if self.document.toggle_visible(layer_id) {
            self.notify();
        }
    }

    pub fn set_layer_locked(&mut self, layer_id: LayerId, locked: bool) {
        if self.document.set_locked(layer_id, locked) {
            self.notify();
        }
    }

    pub fn toggle_layer_locked(&mut self, layer_id: LayerId) {
        if self.document.toggle_locked(layer_id) {
            self.notify();
        }
    }

    pub fn set_layer_opacity(&mut self, layer_id: LayerId, opacity: f64) {
        if self.document.set_opacity(layer_id, opacity) {
            self.notify();
        }
    }

    pub fn delete_layer(&mut self, layer_id: LayerId) {
        if self.document.delete_layer(layer_id) {
            self.notify();
        }
    }

    /// Clear the whole layer stack. Snapshotted, so it is undoable.
    pub fn clear_all(&mut self) {
        self.document.clear_all();
        self.history.snapshot(&self.document);
        self.notify();
    }

    /// Select the layer that receives subsequent brush strokes. Selection
    /// alone does not change the layer stack, so no notification is
    /// emitted.
    pub fn set_active_layer(&mut self, layer_id: LayerId) -> bool {
        self.document.set_active(layer_id)
    }

    pub fn clear_active_layer(&mut self) {
        self.document.clear_active();
    }

    // --- Change notifications ---

    fn notify(&mut self) {
        self.outgoing.push(ChangeNotification {
            layers: self.document.layers().to_vec(),
        });
    }

    /// Take pending notifications (drains the queue).
    pub fn take_outgoing(&mut self) -> Vec<ChangeNotification> {
        std::mem::take(&mut self.outgoing)
    }

    /// Check if there are pending notifications.
    pub fn has_outgoing(&self) -> bool {
        !self.outgoing.is_empty()
    }
}
