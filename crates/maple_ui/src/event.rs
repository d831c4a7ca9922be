//! Close-protocol callback types
//!
//! Windows carry two host-supplied callbacks: a close-attempt predicate
//! consulted once per close request, and a close notification fired after a
//! window's GPU surface has been torn down. Both run on the mainloop thread.

/// Predicate consulted when a window receives a close request.
///
/// Returning `true` approves the close; returning `false` vetoes it and the
/// window stays alive. The verdict applies to that request only, and the
/// next request consults the predicate again.
pub type CloseAttemptFn = Box<dyn FnMut() -> bool>;

/// Notification fired exactly once after a window has been closed and its
/// GPU resources released.
pub type CloseFn = Box<dyn FnMut()>;

/// The callback pair attached to every window.
pub(crate) struct WindowCallbacks {
    pub close_attempt: CloseAttemptFn,
    pub close: CloseFn,
}

impl Default for WindowCallbacks {
    /// Approve every close request, notify nobody.
    fn default() -> Self {
        Self {
            close_attempt: Box::new(|| true),
            close: Box::new(|| {}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_close_attempt_approves() {
        let mut callbacks = WindowCallbacks::default();
        assert!((callbacks.close_attempt)());
        assert!((callbacks.close_attempt)());
    }

    #[test]
    fn test_default_close_notification_is_callable() {
        let mut callbacks = WindowCallbacks::default();
        (callbacks.close)();
    }
}
