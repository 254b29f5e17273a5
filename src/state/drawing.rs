//! Brush / shape / eraser gesture capture.
//!
//! Brush strokes accumulate a path, shapes track a fixed start and a live end
//! point, and the eraser removes whole drawings near the cursor while the
//! primary button is held.

use crate::geometry::{Point, Rect, distance_to_line};
use crate::model::{Drawing, Shape, ShapeKind, Stroke};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Brush,
    Shape(ShapeKind),
    Eraser,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub thickness: f64,
    /// Shape fill, `None` when filling is off.
    pub fill: Option<String>,
}

impl StrokeStyle {
    /// The eraser reaches twice the current stroke thickness.
    pub fn erase_radius(&self) -> f64 {
        self.thickness * 2.0
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: "#ff0000".to_string(),
            thickness: 3.0,
            fill: None,
        }
    }
}

/// A finished drawing still waiting for its id.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawingDraft {
    pub color: String,
    pub thickness: f64,
    pub stroke: Stroke,
}

impl DrawingDraft {
    pub fn with_id(self, id: String) -> Drawing {
        Drawing {
            id,
            color: self.color,
            thickness: self.thickness,
            stroke: self.stroke,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Capture {
    #[default]
    Idle,
    Brush {
        points: Vec<Point>,
    },
    Shape {
        kind: ShapeKind,
        start: Point,
        end: Point,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CaptureEvent {
    Press { point: Point, primary: bool },
    Move { point: Point, primary_held: bool },
    Release,
    Leave,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CaptureEffect {
    Completed(DrawingDraft),
    EraseAt { point: Point, radius: f64 },
}

impl Capture {
    pub fn transition(
        self,
        tool: Tool,
        style: &StrokeStyle,
        event: CaptureEvent,
    ) -> (Capture, Option<CaptureEffect>) {
        match event {
            CaptureEvent::Press { primary: false, .. } => (self, None),
            CaptureEvent::Press { point, primary: true } => match tool {
                Tool::Brush => (Capture::Brush { points: vec![point] }, None),
                Tool::Shape(kind) => (Capture::Shape { kind, start: point, end: point }, None),
                Tool::Eraser => (
                    Capture::Idle,
                    Some(CaptureEffect::EraseAt { point, radius: style.erase_radius() }),
                ),
            },
            CaptureEvent::Move { point, primary_held } => match (self, tool) {
                (_, Tool::Eraser) => {
                    let effect = primary_held
                        .then(|| CaptureEffect::EraseAt { point, radius: style.erase_radius() });
                    (Capture::Idle, effect)
                }
                (Capture::Brush { mut points }, _) => {
                    points.push(point);
                    (Capture::Brush { points }, None)
                }
                (Capture::Shape { kind, start, .. }, _) => {
                    (Capture::Shape { kind, start, end: point }, None)
                }
                (Capture::Idle, _) => (Capture::Idle, None),
            },
            CaptureEvent::Release | CaptureEvent::Leave => (Capture::Idle, self.finish(style)),
        }
    }

    /// In-place form of [`Capture::transition`].
    pub fn handle(
        &mut self,
        tool: Tool,
        style: &StrokeStyle,
        event: CaptureEvent,
    ) -> Option<CaptureEffect> {
        let (next, effect) = std::mem::take(self).transition(tool, style, event);
        *self = next;
        effect
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Capture::Idle)
    }

    /// The in-progress drawing, for display only.
    pub fn preview(&self, style: &StrokeStyle) -> Option<DrawingDraft> {
        self.clone().finish(style).and_then(CaptureEffect::into_draft)
    }

    fn finish(self, style: &StrokeStyle) -> Option<CaptureEffect> {
        let stroke = match self {
            Capture::Idle => return None,
            Capture::Brush { points } if points.is_empty() => return None,
            Capture::Brush { points } => Stroke::Path(points),
            Capture::Shape { kind, start, end } => Stroke::Shape(Shape {
                kind,
                start,
                end,
                fill: style.fill.clone(),
            }),
        };
        Some(CaptureEffect::Completed(DrawingDraft {
            color: style.color.clone(),
            thickness: style.thickness,
            stroke,
        }))
    }
}

impl CaptureEffect {
    pub fn into_draft(self) -> Option<DrawingDraft> {
        match self {
            CaptureEffect::Completed(draft) => Some(draft),
            CaptureEffect::EraseAt { .. } => None,
        }
    }
}

/// Whether an eraser at `point` with reach `radius` touches `drawing`.
pub fn eraser_hits(drawing: &Drawing, point: Point, radius: f64) -> bool {
    match &drawing.stroke {
        Stroke::Path(points) => points.iter().any(|p| p.distance(point) <= radius),
        Stroke::Shape(shape) => match shape.kind {
            ShapeKind::Rectangle => Rect::from_corners(shape.start, shape.end)
                .expanded(radius)
                .contains(point),
            ShapeKind::Circle => point.distance(shape.start) <= shape.radius() + radius,
            // Measured against the whole line, not just the drawn segment.
            ShapeKind::Line => distance_to_line(point, shape.start, shape.end) <= radius,
        },
    }
}

/// Drawings left after erasing at `point`, or `None` when nothing was hit.
pub fn erase_at(drawings: &[Drawing], point: Point, radius: f64) -> Option<Vec<Drawing>> {
    let remaining: Vec<Drawing> = drawings
        .iter()
        .filter(|d| !eraser_hits(d, point, radius))
        .cloned()
        .collect();
    (remaining.len() != drawings.len()).then_some(remaining)
}
