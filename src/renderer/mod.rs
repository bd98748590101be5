//! Rendering module
//!
//! `scene` turns game state into draw calls on any `Backend`. `SpriteBatch`
//! is the backend for the GPU path: it collects coloured quads which
//! `RenderState` uploads to WebGPU each frame.

pub mod atlas;
pub mod batch;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use batch::{SpriteBatch, TextLine};
pub use pipeline::RenderState;
pub use vertex::Vertex;
