//! Multi-window demo
//!
//! Opens two windows sharing one GL context. The first window vetoes its
//! first close request, so the close button must be pressed twice; the
//! second window closes right away. Both windows log their close
//! notifications, and the demo exits once the last window is gone.

use std::cell::Cell;
use std::rc::Rc;

use maple_ui::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("starting multi-window demo");

    let mut context = Context::create()?;

    let first = context.create_window(WindowProperties::new(
        Size::new(800, 600),
        Point::new(50, 50),
        "Window 1",
    ))?;
    let second = context.create_window(
        WindowProperties::default()
            .with_title("Window 2")
            .with_position(Point::new(900, 50)),
    )?;

    let vetoed = Rc::new(Cell::new(false));
    if let Some(window) = context.window_mut(first) {
        let veto_state = Rc::clone(&vetoed);
        window.on_close_attempt(move || {
            if veto_state.get() {
                true
            } else {
                veto_state.set(true);
                log::info!("close request vetoed once; close Window 1 again to confirm");
                false
            }
        });
        window.on_close(|| log::info!("Window 1 closed"));
    }
    if let Some(window) = context.window_mut(second) {
        window.on_close(|| log::info!("Window 2 closed"));
    }

    context.mainloop();
    log::info!("all windows closed");
    Ok(())
}
