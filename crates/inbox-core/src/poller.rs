//! The fixed-interval refresh loop.
//!
//! The loop only holds a weak reference to the engine and is wrapped in
//! `futures::future::Abortable`. The engine owns the abort handle through
//! `PollTask`, so shutdown, re-initialization, an auth failure, or simply
//! dropping the last engine handle all end the loop.

use std::rc::{Rc, Weak};

use futures::future::AbortHandle;

use crate::engine::{EngineInner, InboxEngine};
use crate::ports::SchedulerPort;

/// Owning handle of a spawned poll loop. Aborts the loop when dropped.
pub(crate) struct PollTask {
    handle: AbortHandle,
}

impl PollTask {
    pub(crate) fn new(handle: AbortHandle) -> Self {
        Self { handle }
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub(crate) async fn poll_loop(
    engine: Weak<EngineInner>,
    scheduler: Rc<dyn SchedulerPort>,
    interval_ms: u64,
) {
    loop {
        scheduler.sleep(interval_ms).await;

        let Some(inner) = engine.upgrade() else {
            break;
        };
        let engine = InboxEngine::from_inner(inner);
        if !engine.state().poll_active {
            break;
        }
        // Failures are logged inside poll(); one bad tick never ends the loop.
        let _ = engine.poll().await;
    }
    log::debug!("Poll loop finished");
}
