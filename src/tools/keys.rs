use egui::Key;

use crate::command::Command;
use crate::element::AxisLock;
use crate::transform::TransformKind;

/// What a key press asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// One-shot transform tool (`g`, `r`, `s`).
    Transform(TransformKind),
    /// Toggle the scale axis lock (`x`, `y`).
    ToggleLock(AxisLock),
    /// Abort the gesture in progress (`Escape`).
    Abort,
    Command(Command),
}

/// Key binding table. Keys without a binding map to `None`.
pub fn key_action(key: Key) -> Option<KeyAction> {
    let action = match key {
        Key::G => KeyAction::Transform(TransformKind::Move),
        Key::R => KeyAction::Transform(TransformKind::Rotate),
        Key::S => KeyAction::Transform(TransformKind::Scale),
        Key::X => KeyAction::ToggleLock(AxisLock::X),
        Key::Y => KeyAction::ToggleLock(AxisLock::Y),
        Key::Escape => KeyAction::Abort,
        Key::Delete => KeyAction::Command(Command::DeleteSelection),
        Key::Backspace => KeyAction::Command(Command::EraseLast),
        Key::D => KeyAction::Command(Command::Duplicate),
        Key::PageUp => KeyAction::Command(Command::Raise),
        Key::PageDown => KeyAction::Command(Command::Lower),
        Key::A => KeyAction::Command(Command::SelectAll),
        _ => return None,
    };
    Some(action)
}
