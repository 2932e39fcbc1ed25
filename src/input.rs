use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position relative to the canvas origin
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Input events understood by the editor. Pointer events refer to the
/// primary button only.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { location: InputLocation, modifiers: Modifiers },
    /// Pointer moved, with or without the button held
    PointerMove { location: InputLocation, modifiers: Modifiers },
    PointerUp { location: InputLocation, modifiers: Modifiers },
    KeyDown { key: Key, modifiers: Modifiers },
    KeyUp { key: Key, modifiers: Modifiers },
}

impl InputEvent {
    /// Helper to check if an input event occurred within the canvas
    pub fn is_in_canvas(&self) -> bool {
        match self {
            InputEvent::PointerDown { location, .. }
            | InputEvent::PointerMove { location, .. }
            | InputEvent::PointerUp { location, .. } => location.is_in_canvas,
            _ => false,
        }
    }

    /// Modifier keys held when the event happened.
    pub fn modifiers(&self) -> Modifiers {
        match self {
            InputEvent::PointerDown { modifiers, .. }
            | InputEvent::PointerMove { modifiers, .. }
            | InputEvent::PointerUp { modifiers, .. }
            | InputEvent::KeyDown { modifiers, .. }
            | InputEvent::KeyUp { modifiers, .. } => *modifiers,
        }
    }
}

/// Handles converting raw egui input into canvas-relative InputEvents
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    /// A press started on the canvas and has not been released yet.
    dragging: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            dragging: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Creates an InputLocation from a screen position
    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos - self.canvas_rect.min.to_vec2(),
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    /// Process raw egui input and generate our InputEvents.
    ///
    /// Presses only count when they land on the canvas; the matching release
    /// is always delivered so a drag that leaves the canvas still ends.
    /// Key events are skipped while a text field has keyboard focus, and
    /// auto-repeats are dropped.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let keys_enabled = !ctx.wants_keyboard_input();

        ctx.input(|input| {
            let modifiers = input.modifiers;

            if let Some(pos) = input.pointer.hover_pos() {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                        modifiers,
                    });
                }
                self.last_pointer_pos = Some(pos);
            }

            if input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = input.pointer.interact_pos() {
                    let location = self.make_location(pos);
                    if location.is_in_canvas {
                        self.dragging = true;
                        events.push(InputEvent::PointerDown { location, modifiers });
                    }
                }
            }

            if self.dragging && input.pointer.button_released(PointerButton::Primary) {
                let pos = input.pointer.interact_pos().or(self.last_pointer_pos);
                if let Some(pos) = pos {
                    events.push(InputEvent::PointerUp {
                        location: self.make_location(pos),
                        modifiers,
                    });
                }
                self.dragging = false;
            }

            if keys_enabled {
                for event in &input.raw.events {
                    if let egui::Event::Key { key, pressed, repeat: false, modifiers, .. } = event {
                        events.push(if *pressed {
                            InputEvent::KeyDown { key: *key, modifiers: *modifiers }
                        } else {
                            InputEvent::KeyUp { key: *key, modifiers: *modifiers }
                        });
                    }
                }
            }
        });

        events
    }
}
