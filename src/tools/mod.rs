use serde::{Deserialize, Serialize};

use crate::transform::TransformKind;

mod keys;

pub use keys::{KeyAction, key_action};

/// The closed tool vocabulary offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolType {
    #[default]
    Select,
    Move,
    Rotate,
    Scale,
    Square,
    Circle,
    Polygon,
    Picture,
    Erase,
    New,
}

impl ToolType {
    pub const ALL: [ToolType; 10] = [
        ToolType::Select,
        ToolType::Move,
        ToolType::Rotate,
        ToolType::Scale,
        ToolType::Square,
        ToolType::Circle,
        ToolType::Polygon,
        ToolType::Picture,
        ToolType::Erase,
        ToolType::New,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolType::Select => "select",
            ToolType::Move => "move",
            ToolType::Rotate => "rotate",
            ToolType::Scale => "scale",
            ToolType::Square => "square",
            ToolType::Circle => "circle",
            ToolType::Polygon => "polygon",
            ToolType::Picture => "picture",
            ToolType::Erase => "erase",
            ToolType::New => "new",
        }
    }

    /// Look up a toolbar name. Names outside the vocabulary give `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Tools whose drag creates a new shape.
    pub fn is_shape_tool(&self) -> bool {
        matches!(
            self,
            ToolType::Square | ToolType::Circle | ToolType::Polygon | ToolType::Picture
        )
    }

    pub fn transform_kind(&self) -> Option<TransformKind> {
        match self {
            ToolType::Move => Some(TransformKind::Move),
            ToolType::Rotate => Some(TransformKind::Rotate),
            ToolType::Scale => Some(TransformKind::Scale),
            _ => None,
        }
    }

    pub fn from_transform(kind: TransformKind) -> Self {
        match kind {
            TransformKind::Move => ToolType::Move,
            TransformKind::Rotate => ToolType::Rotate,
            TransformKind::Scale => ToolType::Scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for tool in ToolType::ALL {
            assert_eq!(ToolType::from_name(tool.name()), Some(tool));
        }
    }

    #[test]
    fn test_unknown_name_is_none() {
        assert_eq!(ToolType::from_name("lasso"), None);
        assert_eq!(ToolType::from_name(""), None);
    }

    #[test]
    fn test_tool_categories() {
        assert!(ToolType::Polygon.is_shape_tool());
        assert!(!ToolType::Select.is_shape_tool());
        assert_eq!(ToolType::Rotate.transform_kind(), Some(TransformKind::Rotate));
        assert_eq!(ToolType::Erase.transform_kind(), None);
    }
}
