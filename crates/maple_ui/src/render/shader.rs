//! Shader program primitive
//!
//! Compilation and link failures surface as typed errors carrying the
//! driver's diagnostic log, and are logged at `error` level so a host
//! program that discards the `Result` still leaves a trace.

use std::fmt;
use std::rc::Rc;

use glow::HasContext;
use thiserror::Error;

/// The two pipeline stages the toolkit compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex stage
    Vertex,
    /// Fragment stage
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Shader compilation and linking errors
#[derive(Error, Debug)]
pub enum ShaderError {
    /// The driver refused to allocate a shader or program object
    #[error("shader object allocation failed: {0}")]
    Allocation(String),

    /// A stage failed to compile; `log` is the driver's diagnostic output
    #[error("{stage} shader compilation failed: {log}")]
    Compile {
        /// Stage that failed
        stage: ShaderStage,
        /// Driver info log
        log: String,
    },

    /// The program failed to link
    #[error("shader program linking failed: {log}")]
    Link {
        /// Driver info log
        log: String,
    },
}

/// An owned, linked GL shader program.
pub struct ShaderProgram {
    gl: Rc<glow::Context>,
    raw: glow::Program,
}

impl ShaderProgram {
    /// Compile both stages into a linked program and bind it.
    ///
    /// The intermediate stage objects are released before returning,
    /// whether linking succeeded or not.
    pub fn create(
        gl: &Rc<glow::Context>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, fragment_source) {
            Ok(shader) => shader,
            Err(err) => {
                unsafe { gl.delete_shader(vertex) };
                return Err(err);
            }
        };

        let raw = match unsafe { gl.create_program() } {
            Ok(program) => program,
            Err(err) => {
                unsafe {
                    gl.delete_shader(vertex);
                    gl.delete_shader(fragment);
                }
                return Err(ShaderError::Allocation(err));
            }
        };

        unsafe {
            gl.attach_shader(raw, vertex);
            gl.attach_shader(raw, fragment);
            gl.link_program(raw);
        }
        let linked = unsafe { gl.get_program_link_status(raw) };
        unsafe {
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
        }

        if !linked {
            let log = unsafe { gl.get_program_info_log(raw) };
            unsafe { gl.delete_program(raw) };
            log::error!("shader program linking failed: {log}");
            return Err(ShaderError::Link { log });
        }

        let program = Self {
            gl: Rc::clone(gl),
            raw,
        };
        program.bind();
        Ok(program)
    }

    /// Make this program current.
    pub fn bind(&self) {
        unsafe { self.gl.use_program(Some(self.raw)) };
    }

    /// Clear the current program.
    pub fn unbind(&self) {
        unsafe { self.gl.use_program(None) };
    }

    /// Set a `vec4` uniform on this program.
    ///
    /// The program must be bound. Unknown uniform names are ignored, which
    /// also covers uniforms the driver optimized away.
    pub fn set_uniform_vec4(&self, name: &str, x: f32, y: f32, z: f32, w: f32) {
        unsafe {
            let location = self.gl.get_uniform_location(self.raw, name);
            self.gl.uniform_4_f32(location.as_ref(), x, y, z, w);
        }
    }

    /// The native GL object name.
    pub fn id(&self) -> u32 {
        self.raw.0.get()
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.unbind();
        unsafe { self.gl.delete_program(self.raw) };
    }
}

fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    let shader = unsafe { gl.create_shader(stage.gl_type()) }.map_err(ShaderError::Allocation)?;
    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    if unsafe { gl.get_shader_compile_status(shader) } {
        Ok(shader)
    } else {
        let log = unsafe { gl.get_shader_info_log(shader) };
        unsafe { gl.delete_shader(shader) };
        log::error!("{stage} shader compilation failed: {log}");
        Err(ShaderError::Compile { stage, log })
    }
}
