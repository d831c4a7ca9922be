//! GPU resource primitives and the built-in quad renderer
//!
//! Every primitive owns its GL object and deletes it on drop. Creation and
//! destruction populate whichever OpenGL context is current, so callers make
//! the intended context current first; the toolkit's own call sites all do.

use thiserror::Error;

pub mod buffer;
pub mod renderer;
pub mod shader;
pub mod vertex_array;

pub use buffer::VertexBuffer;
pub use renderer::{RendererError, SharedRenderObjects, WindowRenderState};
pub use shader::{ShaderError, ShaderProgram, ShaderStage};
pub use vertex_array::VertexArray;

/// Errors from raw GL object allocation
#[derive(Error, Debug)]
pub enum GlError {
    /// The driver refused to allocate an object name
    #[error("GL object allocation failed: {0}")]
    Allocation(String),
}
