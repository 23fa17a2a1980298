//! Rendering module
//!
//! `scene` composes the game state into screen-space triangles through the
//! camera; `pipeline` uploads them to WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Frame, Label, compose};
pub use vertex::Vertex;
