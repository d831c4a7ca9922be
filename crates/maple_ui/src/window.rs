//! Window management
//!
//! A [`Window`] pairs a GLFW surface with the per-window GL state the
//! built-in renderer needs. Windows are created hidden through
//! [`Context::create_window`](crate::Context::create_window); the context's
//! mainloop shows them, then draws each one every pass until its close flag
//! is set. Host programs hold a [`WindowId`] and reach the window through
//! the context.
//!
//! The close protocol is cooperative: a close request from the user or the
//! system consults the window's close-attempt predicate once, and the
//! verdict is written back to the surface's close flag. The mainloop closes
//! every flagged window on its next pass and fires the close notification
//! after the GPU surface is gone.

use std::rc::Rc;

use glfw::Context as _;
use glow::HasContext;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::WindowCallbacks;
use crate::foundation::geometry::{Point, Size};
use crate::render::renderer;
use crate::render::{RendererError, WindowRenderState};

/// Background color drawn behind the placeholder quad.
const CLEAR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

slotmap::new_key_type! {
    /// Stable handle to a window registered with a
    /// [`Context`](crate::Context).
    ///
    /// Ids are generational: after the window closes, lookups with its id
    /// yield `None` forever instead of aliasing a window created later.
    pub struct WindowId;
}

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The backend could not create the window surface
    #[error("window creation failed")]
    CreationFailed,

    /// The window's render state could not be built
    #[error("window render state generation failed: {0}")]
    Renderer(#[from] RendererError),
}

/// Initial attributes of a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowProperties {
    /// Surface extent in pixels
    pub size: Size,
    /// Initial position in screen coordinates
    pub position: Point,
    /// Title-bar text
    pub title: String,
}

impl WindowProperties {
    /// Create properties from explicit values.
    pub fn new(size: Size, position: Point, title: impl Into<String>) -> Self {
        Self {
            size,
            position,
            title: title.into(),
        }
    }

    /// Set the surface extent.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the initial screen position.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Set the title-bar text.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Default for WindowProperties {
    fn default() -> Self {
        Self {
            size: Size::new(800, 600),
            position: Point::new(50, 50),
            title: "Maple UI".to_string(),
        }
    }
}

/// The lifecycle surface the mainloop drives.
///
/// Deliberately crate-private: host programs interact with a window through
/// [`Window`]'s public methods, never by showing, drawing, or closing it
/// themselves. Loop semantics are tested against mock implementations.
pub(crate) trait WindowLifecycle {
    /// Make the window visible.
    fn show(&mut self);

    /// Render one frame into the window's surface.
    fn draw(&mut self);

    /// Whether the window's close flag is set.
    fn is_close_approved(&self) -> bool;

    /// Release the GPU state and surface, then fire the close notification.
    fn close(&mut self);
}

/// Everything that exists only while the surface is alive.
///
/// Field order is drop order: the render state must be released before the
/// surface it was recorded against is destroyed.
struct Active {
    state: WindowRenderState,
    gl: Rc<glow::Context>,
    handle: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

/// An on-screen window owned by a [`Context`](crate::Context).
pub struct Window {
    properties: WindowProperties,
    active: Option<Active>,
    callbacks: WindowCallbacks,
    closed: bool,
}

impl Window {
    pub(crate) fn new(
        properties: WindowProperties,
        handle: glfw::PWindow,
        events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
        gl: Rc<glow::Context>,
        state: WindowRenderState,
    ) -> Self {
        Self {
            properties,
            active: Some(Active {
                state,
                gl,
                handle,
                events,
            }),
            callbacks: WindowCallbacks::default(),
            closed: false,
        }
    }

    /// Change the title-bar text.
    ///
    /// Takes effect immediately, independent of the render loop.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if let Some(active) = self.active.as_mut() {
            active.handle.set_title(&title);
        }
        self.properties.title = title;
    }

    /// The current title-bar text.
    pub fn title(&self) -> &str {
        &self.properties.title
    }

    /// The window's current attributes.
    pub fn properties(&self) -> &WindowProperties {
        &self.properties
    }

    /// Register the predicate consulted on every close request.
    ///
    /// Replaces the default, which approves unconditionally.
    pub fn on_close_attempt(&mut self, predicate: impl FnMut() -> bool + 'static) {
        self.callbacks.close_attempt = Box::new(predicate);
    }

    /// Register the notification fired once the window has closed.
    pub fn on_close(&mut self, notify: impl FnMut() + 'static) {
        self.callbacks.close = Box::new(notify);
    }

    /// Flag the window for closing on the next mainloop pass.
    ///
    /// This is the programmatic path, so the close-attempt predicate is not
    /// consulted; the close notification still fires.
    pub fn request_close(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.handle.set_should_close(true);
        }
    }

    /// Apply the window's queued input events.
    ///
    /// Called by the mainloop between passes. A close request consults the
    /// close-attempt predicate once and writes the verdict back to the
    /// surface's close flag; a framebuffer resize updates the GL viewport.
    pub(crate) fn process_pending_events(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let pending: Vec<(f64, glfw::WindowEvent)> =
            glfw::flush_messages(&active.events).collect();
        for (_, event) in pending {
            match event {
                glfw::WindowEvent::Close => {
                    let approved = (self.callbacks.close_attempt)();
                    active.handle.set_should_close(approved);
                    log::debug!(
                        "close request on '{}': {}",
                        self.properties.title,
                        if approved { "approved" } else { "vetoed" }
                    );
                }
                glfw::WindowEvent::FramebufferSize(width, height) => {
                    active.handle.make_current();
                    unsafe { active.gl.viewport(0, 0, width, height) };
                }
                _ => {}
            }
        }
    }

    /// Release the render state and destroy the surface, in that order.
    fn teardown_surface(&mut self) {
        if let Some(mut active) = self.active.take() {
            // state drops under its own context
            active.handle.make_current();
            drop(active);
        }
    }
}

impl WindowLifecycle for Window {
    fn show(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.handle.show();
        }
    }

    fn draw(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        active.handle.make_current();
        unsafe {
            active.gl.clear_color(
                CLEAR_COLOR[0],
                CLEAR_COLOR[1],
                CLEAR_COLOR[2],
                CLEAR_COLOR[3],
            );
            active.gl.clear(glow::COLOR_BUFFER_BIT);
        }
        renderer::draw_quad(&active.gl, &active.state);
        active.handle.swap_buffers();
    }

    fn is_close_approved(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.handle.should_close())
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        self.teardown_surface();
        log::debug!("window '{}' closed", self.properties.title);
        (self.callbacks.close)();
    }
}

impl Drop for Window {
    /// A window dropped without going through the close path releases its
    /// resources silently; the close notification never fires.
    fn drop(&mut self) {
        self.teardown_surface();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// A window with no backing surface. The host-facing methods and the
    /// close protocol are exercised without a display server; every
    /// GL/GLFW-touching path no-ops on the absent surface.
    fn detached(properties: WindowProperties) -> Window {
        Window {
            properties,
            active: None,
            callbacks: WindowCallbacks::default(),
            closed: false,
        }
    }

    #[test]
    fn test_default_properties() {
        let properties = WindowProperties::default();
        assert_eq!(properties.size, Size::new(800, 600));
        assert_eq!(properties.position, Point::new(50, 50));
        assert_eq!(properties.title, "Maple UI");
    }

    #[test]
    fn test_property_builders() {
        let properties = WindowProperties::default()
            .with_size(Size::new(1280, 720))
            .with_position(Point::new(-100, 20))
            .with_title("Editor");
        assert_eq!(properties.size, Size::new(1280, 720));
        assert_eq!(properties.position, Point::new(-100, 20));
        assert_eq!(properties.title, "Editor");
    }

    #[test]
    fn test_set_title_applies_immediately() {
        let mut window = detached(WindowProperties::default());
        assert_eq!(window.title(), "Maple UI");

        window.set_title("renamed");
        assert_eq!(window.title(), "renamed");
        assert_eq!(window.properties().title, "renamed");
    }

    #[test]
    fn test_close_notifies_exactly_once() {
        let mut window = detached(WindowProperties::default());
        let notified = Rc::new(Cell::new(0));
        let observer = Rc::clone(&notified);
        window.on_close(move || observer.set(observer.get() + 1));

        window.close();
        window.close();

        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn test_drop_without_close_does_not_notify() {
        let notified = Rc::new(Cell::new(0));
        {
            let mut window = detached(WindowProperties::default());
            let observer = Rc::clone(&notified);
            window.on_close(move || observer.set(observer.get() + 1));
        }
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn test_close_attempt_predicate_is_replaceable() {
        let mut window = detached(WindowProperties::default());
        assert!((window.callbacks.close_attempt)());

        window.on_close_attempt(|| false);
        assert!(!(window.callbacks.close_attempt)());
    }

    #[test]
    fn test_close_predicate_can_flip_per_request() {
        let mut window = detached(WindowProperties::default());
        let vetoed_once = Cell::new(false);
        window.on_close_attempt(move || {
            if vetoed_once.get() {
                true
            } else {
                vetoed_once.set(true);
                false
            }
        });

        assert!(!(window.callbacks.close_attempt)());
        assert!((window.callbacks.close_attempt)());
    }

    #[test]
    fn test_surfaceless_window_never_approves_close() {
        let mut window = detached(WindowProperties::default());
        window.request_close();
        assert!(!window.is_close_approved());
    }
}
