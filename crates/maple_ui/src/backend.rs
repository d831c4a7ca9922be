//! Process-wide GLFW bootstrap
//!
//! GLFW initialization is idempotent for the lifetime of the process and
//! termination is tied to process exit, so the [`glfw::Glfw`] token handed
//! out here is the only handle the rest of the toolkit needs. Backend
//! errors are routed through the `log` crate instead of aborting.

use thiserror::Error;

use crate::config::ContextConfig;

/// Backend bootstrap errors
#[derive(Error, Debug)]
pub enum BackendError {
    /// GLFW could not be initialized on this system
    #[error("GLFW initialization failed")]
    InitializationFailed,
}

/// Initialize GLFW and return the process-wide token.
///
/// GLFW errors raised after this point are logged at `error` level rather
/// than panicking the host program.
pub(crate) fn acquire() -> Result<glfw::Glfw, BackendError> {
    let glfw = glfw::init(glfw::log_errors).map_err(|_| BackendError::InitializationFailed)?;
    log::debug!("GLFW runtime: {}", glfw::get_version_string());
    Ok(glfw)
}

/// Apply the window hints every OpenGL context in the process shares.
///
/// Hint state is process-wide and may have been changed since the last
/// creation, so this runs before the shared context and again before each
/// window surface. Surfaces start hidden; the mainloop shows them once it
/// takes over.
pub(crate) fn apply_context_hints(glfw: &mut glfw::Glfw, config: &ContextConfig) {
    let (major, minor) = config.opengl_version;
    glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
        glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::Visible(false));
}
