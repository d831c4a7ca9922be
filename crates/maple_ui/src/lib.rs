//! # Maple UI
//!
//! A minimal multi-window toolkit over GLFW and OpenGL.
//!
//! ## Features
//!
//! - **Shared GPU objects**: one invisible OpenGL context per
//!   [`Context`] owns the vertex data and shaders; every window renders
//!   with them through its own surface
//! - **Deterministic mainloop**: a single-threaded, event-driven loop
//!   shows every window, then draws and closes them in creation order
//! - **Cooperative close**: windows veto or approve their own close
//!   requests through callbacks, and are notified after teardown
//! - **Config files**: context settings round-trip through TOML and RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use maple_ui::{Context, WindowProperties};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     maple_ui::foundation::logging::init();
//!
//!     let mut context = Context::create()?;
//!     let editor = context.create_window(WindowProperties::default().with_title("Editor"))?;
//!
//!     if let Some(window) = context.window_mut(editor) {
//!         window.on_close_attempt(|| {
//!             // approve or veto the user's close request
//!             true
//!         });
//!         window.on_close(|| println!("editor closed"));
//!     }
//!
//!     context.mainloop();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod backend;
pub mod config;
pub mod event;
pub mod foundation;
pub mod render;

mod context;
mod window;

pub use backend::BackendError;
pub use config::{Config, ConfigError, ContextConfig};
pub use context::{Context, ContextError};
pub use event::{CloseAttemptFn, CloseFn};
pub use window::{Window, WindowError, WindowId, WindowProperties};

/// Common imports for toolkit users
pub mod prelude {
    pub use crate::{
        config::{Config, ContextConfig},
        foundation::geometry::{Point, Size},
        Context, ContextError, Window, WindowError, WindowId, WindowProperties,
    };
}
