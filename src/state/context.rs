/// The editing session: everything the gesture state machine reads and
/// mutates, passed explicitly instead of living in globals.
///
/// `EditorContext` owns the document and the selection. Input arrives as
/// [`InputEvent`]s through [`EditorContext::handle_event`]; the renderer reads
/// the committed document and asks [`EditorContext::preview`] for the ghost
/// layer, which is always computed from copies.
///
/// Every gesture ends in a commit on pointer-up or in
/// [`EditorContext::abort`] (Escape). Both reset the per-gesture fields: the
/// cached group pivot and the axis lock.
use egui::{Modifiers, Pos2, Rect, Vec2, pos2};
use log::{debug, info, warn};
use thiserror::Error;

use super::EditorState;
use crate::command::Command;
use crate::config::CanvasConfig;
use crate::document::Document;
use crate::element::{AxisLock, Circle, Element, ElementType, Polygon, Square, Style, factory};
use crate::error::{PictureError, ShapeError};
use crate::geometry;
use crate::input::InputEvent;
use crate::selection::{Selection, SelectionMode, ShapeDescriptor};
use crate::tools::{KeyAction, ToolType, key_action};
use crate::transform::{GestureTransform, TransformKind};

/// Errors that can occur during state transitions.
#[derive(Debug, Error, PartialEq)]
pub enum StateTransitionError {
    #[error("cannot go from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },
}

/// Tool to restore once a keyboard-triggered one-shot transform finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevertTarget {
    pub tool: ToolType,
    /// The selection was picked implicitly and is dropped afterwards.
    pub clear_selection: bool,
}

/// What the ghost layer should show for the gesture in progress.
#[derive(Debug, Clone)]
pub enum Preview {
    None,
    /// Shape that pointer-up would create.
    Shape(ElementType),
    /// Open pointer path of a polygon being drawn, or the outline of a
    /// drag still too small to become a shape.
    Path(Vec<Pos2>),
    /// Selection rectangle.
    Area(Rect),
    /// Transformed copies of the selected shapes.
    Transformed(Vec<ElementType>),
}

/// The main context for the vector editor.
#[derive(Debug)]
pub struct EditorContext {
    state: EditorState,
    tool: ToolType,
    pub document: Document,
    pub selection: Selection,
    pub config: CanvasConfig,
    /// Colors for newly drawn shapes.
    pub style: Style,
    lock: AxisLock,
    modifiers: Modifiers,
    mouse: Pos2,
    revert: Option<RevertTarget>,
    /// Convex hull around the selection, built at gesture start.
    pivot: Option<Polygon>,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl EditorContext {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            state: EditorState::Idle,
            tool: ToolType::default(),
            document: Document::new(),
            selection: Selection::new(),
            style: Style::new(config.default_stroke, config.default_fill),
            config,
            lock: AxisLock::None,
            modifiers: Modifiers::NONE,
            mouse: pos2(0.0, 0.0),
            revert: None,
            pivot: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn tool(&self) -> ToolType {
        self.tool
    }

    pub fn axis_lock(&self) -> AxisLock {
        self.lock
    }

    pub fn revert_target(&self) -> Option<RevertTarget> {
        self.revert
    }

    /// Last known pointer position.
    pub fn mouse(&self) -> Pos2 {
        self.mouse
    }

    /// Group pivot cached for the current gesture, if any.
    pub fn group_pivot(&self) -> Option<&Polygon> {
        self.pivot.as_ref()
    }

    fn transition_to(&mut self, new_state: EditorState) -> Result<(), StateTransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(StateTransitionError::InvalidTransition {
                from: self.state.name(),
                to: new_state.name(),
            });
        }
        debug!("State {} -> {}", self.state.name(), new_state.name());
        self.state = new_state;
        Ok(())
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        self.modifiers = event.modifiers();
        match event {
            InputEvent::PointerDown { location, .. } => self.pointer_down(location.position),
            InputEvent::PointerMove { location, .. } => self.pointer_move(location.position),
            InputEvent::PointerUp { location, .. } => self.pointer_up(location.position),
            InputEvent::KeyDown { key, .. } => self.key_down(*key),
            InputEvent::KeyUp { .. } => {}
        }
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn pointer_down(&mut self, pos: Pos2) {
        self.mouse = pos;
        if !self.state.is_idle() {
            debug!("Pointer down ignored while {}", self.state.name());
            return;
        }

        let next = match self.tool {
            tool if tool.is_shape_tool() => EditorState::Drawing {
                tool,
                start: pos,
                end: pos,
                points: vec![pos],
            },
            ToolType::Select => EditorState::Selecting { start: pos, end: pos },
            ToolType::Move | ToolType::Rotate | ToolType::Scale => {
                if self.selection.is_empty() {
                    debug!("{} with an empty selection does nothing", self.tool.name());
                    return;
                }
                let Some(kind) = self.tool.transform_kind() else {
                    return;
                };
                self.pivot = None;
                if self.selection.len() > 1 {
                    self.pivot = self.selection.group_pivot(&self.document);
                }
                EditorState::Transforming { kind, start: pos, end: pos }
            }
            ToolType::Erase => {
                self.erase_at(pos);
                return;
            }
            _ => return,
        };

        if let Err(err) = self.transition_to(next) {
            debug!("{err}");
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        self.mouse = pos;
        self.state.track(pos, self.config.polygon_point_spacing);
    }

    pub fn pointer_up(&mut self, pos: Pos2) {
        self.mouse = pos;
        if self.state.is_idle() {
            return;
        }
        self.state.track(pos, self.config.polygon_point_spacing);

        let finished = self.state.clone();
        if let Err(err) = self.transition_to(EditorState::Idle) {
            warn!("{err}");
            return;
        }
        match finished {
            EditorState::Idle => {}
            EditorState::Drawing { tool, start, end, points } => self.commit_shape(tool, start, end, points),
            EditorState::Selecting { start, end } => self.commit_selection(start, end),
            EditorState::Transforming { kind, start, end } => self.commit_transform(kind, start, end),
        }
        self.finish_gesture();
    }

    pub fn key_down(&mut self, key: egui::Key) {
        let Some(action) = key_action(key) else {
            debug!("No binding for {key:?}");
            return;
        };

        match action {
            KeyAction::Abort => self.abort(),
            KeyAction::ToggleLock(axis) => {
                self.lock = self.lock.toggled(axis);
                debug!("Axis lock {:?}", self.lock);
            }
            _ if !self.state.is_idle() => debug!("{action:?} ignored while {}", self.state.name()),
            KeyAction::Transform(kind) => self.begin_one_shot(kind),
            KeyAction::Command(command) => {
                command.execute(&mut self.document, &mut self.selection, &self.config);
            }
        }
    }

    /// Switch to a transform tool for exactly one gesture. With nothing
    /// selected, the topmost shape under the pointer is picked first; if
    /// there is none the key does nothing.
    fn begin_one_shot(&mut self, kind: TransformKind) {
        let mut clear_selection = false;
        if self.selection.is_empty() {
            let Some(id) = self.document.element_at_position(self.mouse).map(|e| e.id()) else {
                debug!("No shape under the pointer for {}", kind.name());
                return;
            };
            self.selection.replace(&[id]);
            clear_selection = true;
        }

        // A second shortcut before the gesture keeps the original target.
        let target = match self.revert {
            Some(previous) => RevertTarget {
                tool: previous.tool,
                clear_selection: previous.clear_selection || clear_selection,
            },
            None => RevertTarget {
                tool: self.tool,
                clear_selection,
            },
        };
        self.revert = Some(target);
        self.tool = ToolType::from_transform(kind);
        debug!("One-shot {} (reverts to {})", kind.name(), target.tool.name());
    }

    /// Cancel the gesture in progress without committing anything.
    ///
    /// A pending one-shot tool is reverted; the selection is left as it is.
    pub fn abort(&mut self) {
        if !self.state.is_idle() {
            debug!("Aborted {}", self.state.name());
            if let Err(err) = self.transition_to(EditorState::Idle) {
                warn!("{err}");
            }
        }
        self.reset_gesture();
        if let Some(target) = self.revert.take() {
            self.tool = target.tool;
        }
    }

    fn reset_gesture(&mut self) {
        self.pivot = None;
        self.lock = AxisLock::None;
    }

    fn finish_gesture(&mut self) {
        self.reset_gesture();
        if let Some(target) = self.revert.take() {
            self.tool = target.tool;
            if target.clear_selection {
                self.selection.clear();
            }
        }
    }

    fn commit_shape(&mut self, tool: ToolType, start: Pos2, end: Pos2, points: Vec<Pos2>) {
        let min = self.config.min_shape_size;
        let created = match tool {
            ToolType::Square => factory::create_square(start, end, self.style, min),
            ToolType::Circle => factory::create_circle(start, end, self.style, min),
            ToolType::Polygon => factory::create_polygon(&points, self.style, min),
            ToolType::Picture => factory::create_picture(start, end, self.style, min),
            _ => return,
        };
        match created {
            Ok(shape) => self.document.add_element(shape),
            Err(err) => debug!("Discarded {}: {err}", tool.name()),
        }
    }

    fn commit_selection(&mut self, start: Pos2, end: Pos2) {
        let hits: Vec<usize> = if start.distance(end) < self.config.min_drag {
            self.document.element_at_position(end).map(|e| e.id()).into_iter().collect()
        } else {
            self.document.elements_in_area(&geometry::rect_polygon(start, end))
        };
        let mode = SelectionMode::from_modifiers(&self.modifiers);
        self.selection.apply(mode, &hits);
        debug!("{mode:?} selection with {} hits -> {} selected", hits.len(), self.selection.len());
    }

    fn commit_transform(&mut self, kind: TransformKind, start: Pos2, end: Pos2) {
        if start.distance(end) < self.config.min_drag {
            debug!("{} below drag threshold", kind.name());
            return;
        }

        let transform = GestureTransform::new(kind, start, end, self.lock);
        let ids = self.selection.ids().to_vec();
        let mut shapes = self.document.elements_mut_by_ids(&ids);
        match &self.pivot {
            Some(pivot) if shapes.len() > 1 => transform.apply_grouped(&mut shapes, pivot),
            _ => {
                for shape in shapes.iter_mut() {
                    transform.apply_to(shape);
                }
            }
        }
        info!("Applied {} to {} shapes", kind.name(), ids.len());
    }

    fn erase_at(&mut self, pos: Pos2) {
        let Some(id) = self.document.element_at_position(pos).map(|e| e.id()) else {
            return;
        };
        self.document.remove_element(id);
        self.selection.prune(&self.document);
    }

    /// Change the active tool from the toolbar. Any gesture in progress is
    /// aborted. `New` clears the drawing and keeps the current tool.
    pub fn set_tool(&mut self, tool: ToolType) {
        self.abort();
        if tool == ToolType::New {
            Command::Clear.execute(&mut self.document, &mut self.selection, &self.config);
            return;
        }
        if tool != self.tool {
            debug!("Tool {} -> {}", self.tool.name(), tool.name());
        }
        self.tool = tool;
    }

    /// Toolbar entry point. Names outside the tool vocabulary are ignored.
    pub fn set_tool_by_name(&mut self, name: &str) -> bool {
        match ToolType::from_name(name) {
            Some(tool) => {
                self.set_tool(tool);
                true
            }
            None => {
                debug!("Unknown tool {name:?}");
                false
            }
        }
    }

    /// Run a command from the toolbar or a menu.
    pub fn execute(&mut self, command: Command) -> bool {
        if !self.state.is_idle() {
            debug!("{command:?} ignored while {}", self.state.name());
            return false;
        }
        command.execute(&mut self.document, &mut self.selection, &self.config)
    }

    /// Set the drawing colors and recolor the selected shapes.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
        if !self.selection.is_empty() {
            self.document.set_style(self.selection.ids(), style);
            info!("Restyled {} shapes", self.selection.len());
        }
    }

    pub fn selection_summary(&self) -> Vec<ShapeDescriptor> {
        self.selection.describe(&self.document)
    }

    /// Decode `bytes` into the selected picture, or the topmost picture under
    /// the pointer when no picture is selected. Returns the id of the picture
    /// that received the bitmap.
    pub fn load_picture_bitmap(&mut self, bytes: &[u8]) -> Result<Option<usize>, PictureError> {
        let target = self
            .selection
            .ids()
            .iter()
            .copied()
            .find(|id| matches!(self.document.find_element_by_id(*id), Some(ElementType::Picture(_))))
            .or_else(|| {
                self.document
                    .elements()
                    .iter()
                    .rev()
                    .find(|e| matches!(e, ElementType::Picture(_)) && e.contains(self.mouse))
                    .map(|e| e.id())
            });

        let Some(id) = target else {
            warn!("Dropped bitmap has no picture to go into");
            return Ok(None);
        };
        if let Some(picture) = self.document.find_element_by_id_mut(id).and_then(|e| e.as_picture_mut()) {
            picture.load_bitmap(bytes)?;
        }
        Ok(Some(id))
    }

    /// The ghost-layer content for the gesture in progress. Computed from
    /// copies; the document is never touched.
    pub fn preview(&self) -> Preview {
        match &self.state {
            EditorState::Idle => Preview::None,
            EditorState::Drawing { tool, start, end, points } => self.drawing_preview(*tool, *start, *end, points),
            EditorState::Selecting { start, end } => Preview::Area(Rect::from_two_pos(*start, *end)),
            EditorState::Transforming { kind, start, end } => {
                let shapes = self.selection.shapes(&self.document);
                let transform = GestureTransform::new(*kind, *start, *end, self.lock);
                Preview::Transformed(transform.project(&shapes, self.pivot.as_ref()))
            }
        }
    }

    fn drawing_preview(&self, tool: ToolType, start: Pos2, end: Pos2, points: &[Pos2]) -> Preview {
        let min = self.config.min_shape_size;
        // Previews use id 0 so they never consume real ids.
        let shape: Result<ElementType, ShapeError> = match tool {
            // A picture frame previews as its outline; the pixel buffer is only
            // allocated on commit.
            ToolType::Square | ToolType::Picture => {
                Square::from_corners(0, start, end, self.style, min).map(ElementType::Square)
            }
            ToolType::Circle => Circle::from_drag(0, start, end, self.style, min).map(ElementType::Circle),
            _ => {
                let mut path = points.to_vec();
                if path.last() != Some(&end) {
                    path.push(end);
                }
                return Preview::Path(path);
            }
        };
        match shape {
            Ok(shape) => Preview::Shape(shape),
            Err(_) => Preview::Path(vec![start, end]),
        }
    }

    /// Drag vector of the gesture in progress.
    pub fn drag_delta(&self) -> Vec2 {
        self.state.span().map(|(start, end)| end - start).unwrap_or(Vec2::ZERO)
    }
}
