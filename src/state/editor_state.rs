/// The gesture state machine for the canvas.
///
/// Each pointer gesture runs from `Idle` through exactly one working state
/// and back. Keyboard shortcuts only act while idle, so a gesture is never
/// interrupted by a command; `Escape` is the one exit that skips the commit.
///
/// # State Transitions
///
/// ```text
///                    ┌─────────────┐
///              ┌─────►   Drawing   ├─────┐
///              │     └─────────────┘     │
///              │                         │
/// ┌──────────┐ │     ┌─────────────┐     │ ┌──────────┐
/// │   Idle   ├─┼─────►  Selecting  ├─────┼─►   Idle   │
/// └──────────┘ │     └─────────────┘     │ └──────────┘
///              │                         │
///              │     ┌─────────────┐     │
///              └─────► Transforming├─────┘
///                    └─────────────┘
///   pointer-down                  pointer-up (commit) / Escape (abort)
/// ```
use egui::{Pos2, Rect};

use crate::tools::ToolType;
use crate::transform::TransformKind;

/// The possible states of the editor.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Dragging out a new shape
    Drawing {
        tool: ToolType,
        start: Pos2,
        end: Pos2,
        /// Sampled pointer path, only grown by the polygon tool.
        points: Vec<Pos2>,
    },
    /// Dragging a selection rectangle, or clicking
    Selecting { start: Pos2, end: Pos2 },
    /// Moving, rotating or scaling the selection
    Transforming { kind: TransformKind, start: Pos2, end: Pos2 },
}

impl EditorState {
    /// Every gesture starts and ends at `Idle`.
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            (EditorState::Idle, _) => true,
            (_, EditorState::Idle) => true,
            _ => false,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, EditorState::Drawing { .. })
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self, EditorState::Selecting { .. })
    }

    pub fn is_transforming(&self) -> bool {
        matches!(self, EditorState::Transforming { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "idle",
            EditorState::Drawing { .. } => "drawing",
            EditorState::Selecting { .. } => "selecting",
            EditorState::Transforming { .. } => "transforming",
        }
    }

    /// Start and current end of the gesture in progress.
    pub fn span(&self) -> Option<(Pos2, Pos2)> {
        match self {
            EditorState::Idle => None,
            EditorState::Drawing { start, end, .. }
            | EditorState::Selecting { start, end }
            | EditorState::Transforming { start, end, .. } => Some((*start, *end)),
        }
    }

    /// The drag rectangle of a selection gesture.
    pub fn selection_area(&self) -> Option<Rect> {
        match self {
            EditorState::Selecting { start, end } => Some(Rect::from_two_pos(*start, *end)),
            _ => None,
        }
    }

    /// Update the gesture end point. Polygon drawing also records the pointer
    /// path, one point every `spacing` pixels.
    pub fn track(&mut self, pos: Pos2, spacing: f32) {
        match self {
            EditorState::Idle => {}
            EditorState::Drawing { tool, end, points, .. } => {
                *end = pos;
                if *tool == ToolType::Polygon && points.last().is_none_or(|last| last.distance(pos) >= spacing) {
                    points.push(pos);
                }
            }
            EditorState::Selecting { end, .. } | EditorState::Transforming { end, .. } => *end = pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn drawing(tool: ToolType) -> EditorState {
        EditorState::Drawing {
            tool,
            start: pos2(0.0, 0.0),
            end: pos2(0.0, 0.0),
            points: vec![pos2(0.0, 0.0)],
        }
    }

    #[test]
    fn test_transitions_go_through_idle() {
        let selecting = EditorState::Selecting {
            start: pos2(0.0, 0.0),
            end: pos2(0.0, 0.0),
        };
        assert!(EditorState::Idle.can_transition_to(&selecting));
        assert!(selecting.can_transition_to(&EditorState::Idle));
        assert!(!selecting.can_transition_to(&drawing(ToolType::Square)));
    }

    #[test]
    fn test_polygon_samples_by_spacing() {
        let mut state = drawing(ToolType::Polygon);
        state.track(pos2(1.0, 0.0), 4.0);
        state.track(pos2(5.0, 0.0), 4.0);
        state.track(pos2(6.0, 0.0), 4.0);
        state.track(pos2(9.0, 3.0), 4.0);
        match state {
            EditorState::Drawing { points, end, .. } => {
                assert_eq!(points, vec![pos2(0.0, 0.0), pos2(5.0, 0.0), pos2(9.0, 3.0)]);
                assert_eq!(end, pos2(9.0, 3.0));
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_square_does_not_sample() {
        let mut state = drawing(ToolType::Square);
        state.track(pos2(50.0, 50.0), 4.0);
        match state {
            EditorState::Drawing { points, .. } => assert_eq!(points.len(), 1),
            other => panic!("unexpected state {other:?}"),
        }
        assert_eq!(drawing(ToolType::Square).span(), Some((pos2(0.0, 0.0), pos2(0.0, 0.0))));
    }
}
