//! Stroke capture: accumulating a raw pointer stream into one stroke.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event feeding the capture machine. Positions are in canvas pixel
/// space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The pointer left the canvas. Treated exactly like `Up` so the
    /// machine can never stay stuck mid-stroke.
    LeaveCanvas,
}

/// Capture machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

/// Accumulates in-progress stroke points between pointer down and up.
///
/// Strictly single-stroke-at-a-time: the policy decision of whether a down
/// event starts a stroke belongs to the editor; this type only buffers
/// points, verbatim and in arrival order (no resampling, duplicates
/// permitted).
#[derive(Debug, Clone, Default)]
pub struct StrokeCapture {
    state: CaptureState,
    points: Vec<Point>,
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    /// The in-progress point buffer, for the ephemeral overlay.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Begin a stroke at the down position. Ignored while already
    /// capturing.
    pub fn begin(&mut self, position: Point) {
        if self.is_capturing() {
            return;
        }
        self.points.clear();
        self.points.push(position);
        self.state = CaptureState::Capturing;
    }

    /// Append a move position. Ignored while idle.
    pub fn append(&mut self, position: Point) {
        if self.is_capturing() {
            self.points.push(position);
        }
    }

    /// End the stroke, draining the accumulated points and returning to
    /// `Idle`. The buffer is discarded regardless of what the caller does
    /// with the result.
    pub fn finish(&mut self) -> Vec<Point> {
        self.state = CaptureState::Idle;
        std::mem::take(&mut self.points)
    }
}
