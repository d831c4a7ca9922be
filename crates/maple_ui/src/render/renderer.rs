//! Built-in quad renderer
//!
//! The placeholder render hook every window runs until a real widget tree
//! exists: a fixed quad, scaled to half the surface, in a fixed color. The
//! buffer and shader live in the shared context's object namespace and are
//! built once per [`Context`](crate::Context); only the vertex array
//! configuration is per-window, because vertex arrays do not cross GL
//! context boundaries.

use std::rc::Rc;

use glow::HasContext;
use thiserror::Error;

use super::buffer::VertexBuffer;
use super::shader::{ShaderError, ShaderProgram};
use super::vertex_array::VertexArray;
use super::GlError;

/// Unit quad as two triangles, three floats per vertex.
const QUAD_VERTICES: [f32; 18] = [
    -1.0, 1.0, 0.0, //
    1.0, 1.0, 0.0, //
    1.0, -1.0, 0.0, //
    1.0, -1.0, 0.0, //
    -1.0, -1.0, 0.0, //
    -1.0, 1.0, 0.0, //
];

const QUAD_VERTEX_SHADER: &str = r"
    #version 330 core
    layout (location = 0) in vec3 position;

    void main()
    {
        gl_Position = vec4(position.x / 2.0, position.y / 2.0, position.z / 2.0, 1.0);
    }
";

const QUAD_FRAGMENT_SHADER: &str = r"
    #version 330 core
    layout (location = 0) out vec4 frag_color;

    uniform vec4 u_color;

    void main()
    {
        frag_color = u_color;
    }
";

const QUAD_COLOR: [f32; 4] = [0.3, 0.4, 0.5, 1.0];

/// Errors from building render objects
#[derive(Error, Debug)]
pub enum RendererError {
    /// A GL object could not be allocated
    #[error(transparent)]
    Gl(#[from] GlError),

    /// The built-in shader failed to compile or link
    #[error(transparent)]
    Shader(#[from] ShaderError),
}

/// GL objects shared by every window of a context.
///
/// Created exactly once, against the context's invisible shared GL context,
/// before any window exists. Windows reach them through a reference-counted
/// handle, so the bundle outlives every window that might draw with it.
pub struct SharedRenderObjects {
    quad_buffer: VertexBuffer,
    quad_shader: ShaderProgram,
}

/// Per-window GL context state.
///
/// Valid only while the owning window's surface is alive; the window drops
/// it, with its own context current, as the first step of closing. Keeps a
/// handle on the shared bundle so the objects it references cannot go away
/// first.
pub struct WindowRenderState {
    shared: Rc<SharedRenderObjects>,
    quad_vao: VertexArray,
}

/// Build the shared buffer and shader in the shared context's namespace.
pub(crate) fn generate_shared_objects(
    gl: &Rc<glow::Context>,
    shared_context: &mut glfw::PWindow,
) -> Result<SharedRenderObjects, RendererError> {
    use glfw::Context;
    shared_context.make_current();

    let quad_buffer = VertexBuffer::create(gl)?;
    quad_buffer.upload_static(bytemuck::cast_slice(&QUAD_VERTICES));
    let quad_shader = ShaderProgram::create(gl, QUAD_VERTEX_SHADER, QUAD_FRAGMENT_SHADER)?;

    Ok(SharedRenderObjects {
        quad_buffer,
        quad_shader,
    })
}

/// Record a window's vertex array configuration over the shared buffer.
pub(crate) fn generate_window_states(
    gl: &Rc<glow::Context>,
    shared: &Rc<SharedRenderObjects>,
    surface: &mut glfw::PWindow,
) -> Result<WindowRenderState, RendererError> {
    use glfw::Context;
    surface.make_current();

    let quad_vao = VertexArray::create(gl)?;
    shared.quad_buffer.bind();
    unsafe {
        gl.vertex_attrib_pointer_f32(
            0,
            3,
            glow::FLOAT,
            false,
            (3 * std::mem::size_of::<f32>()) as i32,
            0,
        );
        gl.enable_vertex_attrib_array(0);
    }

    Ok(WindowRenderState {
        shared: Rc::clone(shared),
        quad_vao,
    })
}

/// Draw the quad into whichever surface is current.
///
/// The caller has already made the target surface current and cleared it.
pub(crate) fn draw_quad(gl: &glow::Context, state: &WindowRenderState) {
    state.shared.quad_shader.bind();
    state.quad_vao.bind();
    state.shared.quad_shader.set_uniform_vec4(
        "u_color",
        QUAD_COLOR[0],
        QUAD_COLOR[1],
        QUAD_COLOR[2],
        QUAD_COLOR[3],
    );

    unsafe { gl.draw_arrays(glow::TRIANGLES, 0, 6) };
}
