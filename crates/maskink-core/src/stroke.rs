//! Committed brush and eraser strokes.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stroke.
pub type StrokeId = Uuid;

/// Drawing tool a stroke was made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Paints with the owning layer's class color.
    #[default]
    Brush,
    /// Removes coverage from earlier strokes in the same layer.
    Eraser,
}

/// One committed pointer drag: a polyline in canvas pixel space with a tool
/// and width. Immutable once committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Point>,
    tool: ToolKind,
    width: f64,
}

impl Stroke {
    /// Create a stroke from captured points. Returns `None` for an empty
    /// point sequence; such a stroke is never stored.
    pub fn new(points: Vec<Point>, tool: ToolKind, width: f64) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            points,
            tool,
            width,
        })
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Points in drag order. Never empty.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the polyline (stroke width not included).
    pub fn bounds(&self) -> Rect {
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Distance-based hit test against the polyline, honoring the stroke
    /// width.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.points.len() < 2 {
            let Some(&p) = self.points.first() else {
                return false;
            };
            let dx = point.x - p.x;
            let dy = point.y - p.y;
            return (dx * dx + dy * dy).sqrt() <= tolerance + self.width / 2.0;
        }

        for window in self.points.windows(2) {
            let start = window[0];
            let end = window[1];

            let line_vec = kurbo::Vec2::new(end.x - start.x, end.y - start.y);
            let point_vec = kurbo::Vec2::new(point.x - start.x, point.y - start.y);

            let line_len_sq = line_vec.hypot2();
            if line_len_sq < f64::EPSILON {
                continue;
            }

            let t = (point_vec.dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
            let projection = Point::new(start.x + t * line_vec.x, start.y + t * line_vec.y);

            let dist =
                ((point.x - projection.x).powi(2) + (point.y - projection.y).powi(2)).sqrt();
            if dist <= tolerance + self.width / 2.0 {
                return true;
            }
        }

        false
    }
}
