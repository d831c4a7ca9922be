//! Vertex array primitive

use std::rc::Rc;

use glow::HasContext;

use super::GlError;

/// An owned GL vertex array object.
///
/// Vertex arrays are not shared between GL contexts, so each window surface
/// carries its own. Attribute configuration recorded while this object and
/// a buffer are bound is replayed on every draw.
pub struct VertexArray {
    gl: Rc<glow::Context>,
    raw: glow::VertexArray,
}

impl VertexArray {
    /// Allocate a vertex array object and bind it as current.
    pub fn create(gl: &Rc<glow::Context>) -> Result<Self, GlError> {
        let raw = unsafe { gl.create_vertex_array() }.map_err(GlError::Allocation)?;
        let array = Self {
            gl: Rc::clone(gl),
            raw,
        };
        array.bind();
        Ok(array)
    }

    /// Bind this vertex array as current.
    pub fn bind(&self) {
        unsafe { self.gl.bind_vertex_array(Some(self.raw)) };
    }

    /// Clear the vertex array binding.
    pub fn unbind(&self) {
        unsafe { self.gl.bind_vertex_array(None) };
    }

    /// The native GL object name.
    pub fn id(&self) -> u32 {
        self.raw.0.get()
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        self.unbind();
        unsafe { self.gl.delete_vertex_array(self.raw) };
    }
}
