use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use nix::sys::signal::{self, SigHandler, Signal};

static STOP: OnceLock<Arc<AtomicBool>> = OnceLock::new();
static RUNNING: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// Install signal handlers for the status poller.
///
/// The first SIGINT raises `stop` (the task is asked to stop, polling goes
/// on until it finishes). A second SIGINT, or SIGTERM, clears `running`.
/// Flags are bound on the first call only.
pub fn install_signal_handlers(
    stop: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
) -> nix::Result<()> {
    let _ = STOP.set(stop);
    let _ = RUNNING.set(running);

    unsafe {
        signal::signal(Signal::SIGINT, SigHandler::Handler(handle_interrupt))?;
        signal::signal(Signal::SIGTERM, SigHandler::Handler(handle_terminate))?;
    }

    Ok(())
}

extern "C" fn handle_interrupt(_: i32) {
    if let Some(stop) = STOP.get() {
        if stop.swap(true, Ordering::SeqCst) {
            handle_terminate(0);
        }
    }
}

extern "C" fn handle_terminate(_: i32) {
    if let Some(running) = RUNNING.get() {
        running.store(false, Ordering::SeqCst);
    }
}
