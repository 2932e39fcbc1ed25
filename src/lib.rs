#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod selection;
pub mod state;
pub mod surface;
pub mod texture_manager;
pub mod tools;
pub mod transform;

pub use app::{AppSettings, VectorApp};
pub use command::Command;
pub use config::CanvasConfig;
pub use document::Document;
pub use element::{Element, ElementType};
pub use error::{ConfigError, PictureError, ShapeError};
pub use input::{InputEvent, InputHandler, InputLocation};
pub use renderer::{PainterSurface, Renderer};
pub use selection::{Selection, SelectionMode, ShapeDescriptor};
pub use state::{EditorContext, EditorState, Preview};
pub use surface::{RecordingSurface, Surface, SurfaceOp};
pub use tools::ToolType;
pub use transform::{GestureTransform, TransformKind};
