//! Deterministic display-list compositing of the layer stack.
//!
//! The list fixes the contract a backend must honor: base image first,
//! then each visible layer as one isolated group (its opacity applied to
//! the group as a unit), strokes inside a layer in commit order, eraser
//! strokes as nested destination-out groups so they can only remove
//! coverage from content already inside their own layer, and finally the
//! in-progress stroke as an ephemeral overlay above everything.

use crate::renderer::RenderContext;
use kurbo::Point;
use maskink_core::{Rgba, ToolKind};
use peniko::{BlendMode, Color, Compose, Mix};

/// Normal painting: source over destination.
pub const SRC_OVER: BlendMode = BlendMode {
    mix: Mix::Normal,
    compose: Compose::SrcOver,
};

/// Subtractive erase: removes coverage beneath, scoped to the enclosing
/// group.
pub const DEST_OUT: BlendMode = BlendMode {
    mix: Mix::Normal,
    compose: Compose::DestOut,
};

/// Overlay color when the selected class cannot be resolved.
const FALLBACK_OVERLAY_COLOR: Rgba = Rgba {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

/// A single compositing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// The base raster image, always below everything and never affected
    /// by layer blending.
    BaseImage { width: u32, height: u32 },
    /// Begin an isolated group, composited onto the backdrop with `alpha`
    /// and `blend` at the matching `PopGroup`.
    PushGroup { alpha: f32, blend: BlendMode },
    /// End the most recently pushed group.
    PopGroup,
    /// Stroke a polyline with round caps and round joins. A single point
    /// is a degenerate dot under round caps.
    Polyline {
        points: Vec<Point>,
        width: f64,
        color: Color,
    },
}

/// Ordered compositing instructions for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
}

impl DisplayList {
    fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Instructions in draw order (back to front).
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Walk the editor state and produce the frame's display list.
pub fn build_display_list(ctx: &RenderContext) -> DisplayList {
    let mut list = DisplayList::default();
    let editor = ctx.editor;

    if let Some(image) = ctx.base_image {
        list.push(DrawOp::BaseImage {
            width: image.width,
            height: image.height,
        });
    }

    for layer in editor.document().layers() {
        if !layer.visible() {
            continue;
        }
        list.push(DrawOp::PushGroup {
            alpha: layer.opacity() as f32,
            blend: SRC_OVER,
        });
        for stroke in layer.strokes() {
            push_polyline(
                &mut list,
                stroke.points().to_vec(),
                stroke.width(),
                layer.color().into(),
                stroke.tool(),
            );
        }
        list.push(DrawOp::PopGroup);
    }

    // In-progress stroke, rendered as an ephemeral overlay above all
    // committed layers. It is discarded on commit; the committed stroke in
    // its layer takes over.
    let capture = editor.capture();
    if capture.is_capturing() && !capture.points().is_empty() {
        let color = editor
            .session
            .selected_class
            .and_then(|id| editor.palette().get(id))
            .map(|c| c.color)
            .unwrap_or(FALLBACK_OVERLAY_COLOR);

        list.push(DrawOp::PushGroup {
            alpha: 1.0,
            blend: SRC_OVER,
        });
        push_polyline(
            &mut list,
            capture.points().to_vec(),
            editor.session.brush_width(),
            color.into(),
            editor.session.tool,
        );
        list.push(DrawOp::PopGroup);
    }

    list
}

/// Emit one stroke. Brush strokes paint directly; eraser strokes are
/// wrapped in a destination-out group so they subtract coverage only from
/// the enclosing group.
fn push_polyline(
    list: &mut DisplayList,
    points: Vec<Point>,
    width: f64,
    color: Color,
    tool: ToolKind,
) {
    let polyline = DrawOp::Polyline {
        points,
        width,
        color,
    };
    match tool {
        ToolKind::Brush => list.push(polyline),
        ToolKind::Eraser => {
            list.push(DrawOp::PushGroup {
                alpha: 1.0,
                blend: DEST_OUT,
            });
            list.push(polyline);
            list.push(DrawOp::PopGroup);
        }
    }
}
