//! Vertex buffer primitive

use std::rc::Rc;

use glow::HasContext;

use super::GlError;

/// An owned GL vertex buffer object.
///
/// Holds the GL dispatch table alive so the underlying object can be
/// deleted when the handle drops.
pub struct VertexBuffer {
    gl: Rc<glow::Context>,
    raw: glow::Buffer,
}

impl VertexBuffer {
    /// Allocate a buffer object and bind it as the current `ARRAY_BUFFER`.
    pub fn create(gl: &Rc<glow::Context>) -> Result<Self, GlError> {
        let raw = unsafe { gl.create_buffer() }.map_err(GlError::Allocation)?;
        let buffer = Self {
            gl: Rc::clone(gl),
            raw,
        };
        buffer.bind();
        Ok(buffer)
    }

    /// Bind this buffer as the current `ARRAY_BUFFER`.
    pub fn bind(&self) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.raw)) };
    }

    /// Clear the `ARRAY_BUFFER` binding.
    pub fn unbind(&self) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, None) };
    }

    /// Bind and upload vertex data with `STATIC_DRAW` usage.
    pub fn upload_static(&self, data: &[u8]) {
        self.bind();
        unsafe {
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW);
        }
    }

    /// The native GL object name.
    pub fn id(&self) -> u32 {
        self.raw.0.get()
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        self.unbind();
        unsafe { self.gl.delete_buffer(self.raw) };
    }
}
