mod editor_state;
pub mod context;

pub use context::{EditorContext, Preview, RevertTarget, StateTransitionError};
pub use editor_state::EditorState;
