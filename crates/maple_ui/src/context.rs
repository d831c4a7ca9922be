//! Context - the toolkit coordinator
//!
//! A [`Context`] owns the process's GLFW handle and an invisible OpenGL
//! context whose object namespace every window shares. It also owns the
//! render objects built once into that namespace and the windows
//! themselves. Its [`mainloop`](Context::mainloop) drives every window
//! from first show to final close, until none remain.
//!
//! The loop is strictly single-threaded and event-driven: one pass scans
//! the windows in creation order, closing every window whose close flag is
//! set and drawing the rest; the collection compacts; then the loop blocks
//! until the next input event and applies queued close requests and
//! resizes before scanning again.

use std::rc::Rc;

use glfw::Context as _;
use glow::HasContext;
use slotmap::SlotMap;
use thiserror::Error;

use crate::backend::{self, BackendError};
use crate::config::ContextConfig;
use crate::render::renderer;
use crate::render::{RendererError, SharedRenderObjects};
use crate::window::{Window, WindowError, WindowId, WindowLifecycle, WindowProperties};

/// Context initialization errors
#[derive(Error, Debug)]
pub enum ContextError {
    /// The windowing backend could not be initialized
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The configuration was rejected
    #[error("invalid context configuration: {0}")]
    Config(String),

    /// The invisible shared OpenGL context could not be created
    #[error("shared OpenGL context creation failed")]
    SharedContextCreation,

    /// OpenGL function pointers could not be loaded
    #[error("OpenGL function loading failed")]
    FunctionLoading,

    /// The shared render objects could not be built
    #[error("shared render object generation failed: {0}")]
    Renderer(#[from] RendererError),
}

/// The coordinator owning the shared GL state and every window.
///
/// Windows are created through [`create_window`](Context::create_window)
/// and looked up by [`WindowId`]; they live exactly as long as the context
/// allows, and never beyond it.
pub struct Context {
    // Declaration order doubles as teardown order: windows release their
    // surfaces first, then the shared objects go while the shared context
    // still exists. The glfw handle outlives everything it produced.
    windows: SlotMap<WindowId, Window>,
    order: Vec<WindowId>,
    shared_objects: Rc<SharedRenderObjects>,
    gl: Rc<glow::Context>,
    shared_context: glfw::PWindow,
    _shared_events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    glfw: glfw::Glfw,
    config: ContextConfig,
}

impl Context {
    /// Create a context with default settings.
    pub fn create() -> Result<Self, ContextError> {
        Self::new(ContextConfig::default())
    }

    /// Create a context with explicit settings.
    ///
    /// Initializes the windowing backend and creates the invisible shared
    /// GL context. The OpenGL function pointers and the shared render
    /// objects are then built against that context, failing fast on the
    /// first error.
    pub fn new(config: ContextConfig) -> Result<Self, ContextError> {
        config.validate().map_err(ContextError::Config)?;

        let mut glfw = backend::acquire()?;

        backend::apply_context_hints(&mut glfw, &config);
        let (mut shared_context, shared_events) = glfw
            .create_window(100, 100, "", glfw::WindowMode::Windowed)
            .ok_or(ContextError::SharedContextCreation)?;
        shared_context.make_current();

        let gl = Rc::new(unsafe {
            glow::Context::from_loader_function(|symbol| {
                glfw.get_proc_address_raw(symbol) as *const _
            })
        });
        let renderer_name = unsafe { gl.get_parameter_string(glow::RENDERER) };
        if renderer_name.is_empty() {
            return Err(ContextError::FunctionLoading);
        }
        log::info!("OpenGL renderer: {renderer_name}");

        let shared_objects = Rc::new(renderer::generate_shared_objects(&gl, &mut shared_context)?);

        Ok(Self {
            windows: SlotMap::with_key(),
            order: Vec::new(),
            shared_objects,
            gl,
            shared_context,
            _shared_events: shared_events,
            glfw,
            config,
        })
    }

    /// Create a window and register it with this context.
    ///
    /// The window shares the context's GL object namespace, starts hidden,
    /// and becomes visible when [`mainloop`](Context::mainloop) takes over.
    /// The returned id stays valid until the window closes and never
    /// afterwards refers to another window.
    pub fn create_window(&mut self, properties: WindowProperties) -> Result<WindowId, WindowError> {
        backend::apply_context_hints(&mut self.glfw, &self.config);
        let (mut handle, events) = self
            .shared_context
            .create_shared(
                properties.size.width,
                properties.size.height,
                &properties.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::CreationFailed)?;

        handle.set_pos(properties.position.x, properties.position.y);
        handle.set_close_polling(true);
        handle.set_framebuffer_size_polling(true);

        handle.make_current();
        self.glfw.set_swap_interval(if self.config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        let state = renderer::generate_window_states(&self.gl, &self.shared_objects, &mut handle)?;

        log::info!(
            "created window '{}' ({}x{})",
            properties.title,
            properties.size.width,
            properties.size.height
        );

        let window = Window::new(properties, handle, events, Rc::clone(&self.gl), state);
        let id = self.windows.insert(window);
        self.order.push(id);
        Ok(id)
    }

    /// Look up a live window.
    ///
    /// Returns `None` once the window has closed.
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id)
    }

    /// Look up a live window for mutation.
    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(id)
    }

    /// Number of windows currently open.
    pub fn window_count(&self) -> usize {
        self.order.len()
    }

    /// Show every window and drive the render loop until all have closed.
    ///
    /// Blocks the calling thread. Between passes the loop suspends in the
    /// backend's event wait; any input event wakes it. Returns `true` once
    /// the window collection is empty.
    pub fn mainloop(&mut self) -> bool {
        log::info!("mainloop starting with {} windows", self.order.len());

        let Self {
            windows,
            order,
            glfw,
            ..
        } = self;
        let finished = drive_mainloop(windows, order, |windows, order| {
            glfw.wait_events();
            for &id in order {
                if let Some(window) = windows.get_mut(id) {
                    window.process_pending_events();
                }
            }
        });

        log::info!("mainloop finished");
        finished
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        // Windows tear down against their own contexts, then the field drop
        // order releases the shared objects under the shared context.
        self.order.clear();
        self.windows.clear();
        self.shared_context.make_current();
    }
}

/// One mark-and-compact pass in creation order.
///
/// Every close-approved window closes; every other window draws a frame.
/// Closed windows leave the collection after the scan, so several windows
/// can close in the same pass and later windows still get their draw.
fn run_pass<W: WindowLifecycle>(windows: &mut SlotMap<WindowId, W>, order: &mut Vec<WindowId>) {
    let mut closed: Vec<WindowId> = Vec::new();

    for &id in order.iter() {
        let Some(window) = windows.get_mut(id) else {
            closed.push(id);
            continue;
        };

        if window.is_close_approved() {
            window.close();
            closed.push(id);
        } else {
            window.draw();
        }
    }

    if !closed.is_empty() {
        for id in &closed {
            windows.remove(*id);
        }
        order.retain(|id| !closed.contains(id));
    }
}

/// Show all windows, then alternate passes with event waits until the
/// collection empties.
///
/// `wait_for_events` blocks until something happens and applies queued
/// events; it is never entered once the last window has closed.
fn drive_mainloop<W, F>(
    windows: &mut SlotMap<WindowId, W>,
    order: &mut Vec<WindowId>,
    mut wait_for_events: F,
) -> bool
where
    W: WindowLifecycle,
    F: FnMut(&mut SlotMap<WindowId, W>, &[WindowId]),
{
    for &id in order.iter() {
        if let Some(window) = windows.get_mut(id) {
            window.show();
        }
    }

    while !order.is_empty() {
        run_pass(windows, order);
        if order.is_empty() {
            break;
        }
        wait_for_events(windows, order);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Shared observation point for mock windows: the current pass number
    /// and the ordered record of lifecycle calls.
    #[derive(Default)]
    struct Journal {
        pass: Cell<u32>,
        entries: RefCell<Vec<String>>,
    }

    impl Journal {
        fn record(&self, entry: String) {
            self.entries.borrow_mut().push(entry);
        }

        fn entries(&self) -> Vec<String> {
            self.entries.borrow().clone()
        }

        fn position_of(&self, entry: &str) -> Option<usize> {
            self.entries.borrow().iter().position(|e| e == entry)
        }
    }

    struct MockWindow {
        name: &'static str,
        journal: Rc<Journal>,
        close_on_pass: Option<u32>,
        closed: bool,
    }

    impl MockWindow {
        fn new(name: &'static str, journal: &Rc<Journal>, close_on_pass: Option<u32>) -> Self {
            Self {
                name,
                journal: Rc::clone(journal),
                close_on_pass,
                closed: false,
            }
        }
    }

    impl WindowLifecycle for MockWindow {
        fn show(&mut self) {
            self.journal.record(format!("show {}", self.name));
        }

        fn draw(&mut self) {
            self.journal
                .record(format!("draw {} pass {}", self.name, self.journal.pass.get()));
        }

        fn is_close_approved(&self) -> bool {
            self.close_on_pass
                .is_some_and(|pass| self.journal.pass.get() >= pass)
        }

        fn close(&mut self) {
            assert!(!self.closed, "close ran twice for {}", self.name);
            self.closed = true;
            self.journal.record(format!("close {}", self.name));
        }
    }

    fn spawn(
        windows: &mut SlotMap<WindowId, MockWindow>,
        order: &mut Vec<WindowId>,
        window: MockWindow,
    ) -> WindowId {
        let id = windows.insert(window);
        order.push(id);
        id
    }

    /// Drive with a wait hook that only advances the pass counter.
    fn drive(
        windows: &mut SlotMap<WindowId, MockWindow>,
        order: &mut Vec<WindowId>,
        journal: &Rc<Journal>,
    ) -> bool {
        journal.pass.set(1);
        drive_mainloop(windows, order, |_, _| {
            journal.pass.set(journal.pass.get() + 1);
        })
    }

    #[test]
    fn test_empty_collection_finishes_immediately() {
        let mut windows: SlotMap<WindowId, MockWindow> = SlotMap::with_key();
        let mut order = Vec::new();

        let finished = drive_mainloop(&mut windows, &mut order, |_, _| {
            panic!("wait hook entered with no windows");
        });

        assert!(finished);
    }

    #[test]
    fn test_immediate_approvals_close_without_waiting() {
        let journal = Rc::new(Journal::default());
        let mut windows = SlotMap::with_key();
        let mut order = Vec::new();
        for name in ["a", "b", "c"] {
            spawn(&mut windows, &mut order, MockWindow::new(name, &journal, Some(1)));
        }

        journal.pass.set(1);
        let finished = drive_mainloop(&mut windows, &mut order, |_, _| {
            panic!("wait hook entered although every window closed in pass 1");
        });

        assert!(finished);
        assert!(windows.is_empty());
        assert!(order.is_empty());
        assert_eq!(
            journal.entries(),
            vec!["show a", "show b", "show c", "close a", "close b", "close c"]
        );
    }

    #[test]
    fn test_vetoed_window_keeps_drawing_until_approved() {
        let journal = Rc::new(Journal::default());
        let mut windows = SlotMap::with_key();
        let mut order = Vec::new();
        spawn(&mut windows, &mut order, MockWindow::new("w", &journal, Some(3)));

        assert!(drive(&mut windows, &mut order, &journal));

        assert_eq!(
            journal.entries(),
            vec!["show w", "draw w pass 1", "draw w pass 2", "close w"]
        );
    }

    #[test]
    fn test_batch_close_in_one_pass_preserves_creation_order() {
        let journal = Rc::new(Journal::default());
        let mut windows = SlotMap::with_key();
        let mut order = Vec::new();
        spawn(&mut windows, &mut order, MockWindow::new("first", &journal, Some(2)));
        spawn(&mut windows, &mut order, MockWindow::new("second", &journal, Some(2)));
        spawn(&mut windows, &mut order, MockWindow::new("third", &journal, Some(4)));

        assert!(drive(&mut windows, &mut order, &journal));

        let close_first = journal.position_of("close first").unwrap();
        let close_second = journal.position_of("close second").unwrap();
        assert!(close_first < close_second, "closes must follow creation order");

        // the surviving window is still drawn in the pass the others leave
        let survivor_draw = journal.position_of("draw third pass 2").unwrap();
        assert!(close_second < survivor_draw);
        assert!(journal.position_of("draw third pass 3").is_some());
        assert_eq!(journal.entries().last().unwrap(), "close third");
    }

    #[test]
    fn test_staggered_closes_drain_the_collection() {
        let journal = Rc::new(Journal::default());
        let mut windows = SlotMap::with_key();
        let mut order = Vec::new();
        let first = spawn(&mut windows, &mut order, MockWindow::new("w1", &journal, Some(2)));
        let second = spawn(&mut windows, &mut order, MockWindow::new("w2", &journal, Some(5)));

        assert!(drive(&mut windows, &mut order, &journal));
        assert!(windows.is_empty());
        assert!(order.is_empty());
        assert!(windows.get(first).is_none());
        assert!(windows.get(second).is_none());

        let entries = journal.entries();
        assert_eq!(
            entries,
            vec![
                "show w1",
                "show w2",
                "draw w1 pass 1",
                "draw w2 pass 1",
                "close w1",
                "draw w2 pass 2",
                "draw w2 pass 3",
                "draw w2 pass 4",
                "close w2",
            ]
        );
    }

    #[test]
    fn test_closed_ids_are_never_reused() {
        let journal = Rc::new(Journal::default());
        let mut windows = SlotMap::with_key();
        let mut order = Vec::new();
        let early = spawn(&mut windows, &mut order, MockWindow::new("early", &journal, Some(1)));

        assert!(drive(&mut windows, &mut order, &journal));
        assert!(windows.get(early).is_none());

        // a later window must not become reachable through the stale id
        let late = spawn(&mut windows, &mut order, MockWindow::new("late", &journal, None));
        assert!(windows.get(early).is_none());
        assert!(windows.get(late).is_some());
    }

    #[test]
    fn test_wait_hook_sees_survivors_only() {
        let journal = Rc::new(Journal::default());
        let mut windows = SlotMap::with_key();
        let mut order = Vec::new();
        spawn(&mut windows, &mut order, MockWindow::new("gone", &journal, Some(1)));
        spawn(&mut windows, &mut order, MockWindow::new("stays", &journal, Some(2)));

        journal.pass.set(1);
        let observed: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let observer = Rc::clone(&observed);
        let pass = Rc::clone(&journal);
        drive_mainloop(&mut windows, &mut order, move |_, order| {
            observer.borrow_mut().push(order.len());
            pass.pass.set(pass.pass.get() + 1);
        });

        // the only wait happens between pass 1 and 2, after "gone" left
        assert_eq!(*observed.borrow(), vec![1]);
    }
}
