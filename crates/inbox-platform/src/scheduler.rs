//! Browser scheduler: microtask spawning and `setTimeout` sleeps.

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;

use inbox_core::ports::SchedulerPort;

#[derive(Default)]
pub struct BrowserScheduler;

impl BrowserScheduler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl SchedulerPort for BrowserScheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    async fn sleep(&self, ms: u64) {
        // setTimeout takes a u32 delay
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        TimeoutFuture::new(ms).await;
    }
}
