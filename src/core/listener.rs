use std::sync::Arc;

use crate::types::{ClassResultBatch, EngineEvent, UnreportableRun};

/// Receives the engine's result stream for one run.
///
/// `handle_class_result` and `handle_unreportable` may be called from several
/// threads at once. `run_end` is called exactly once, after every delivery has
/// returned.
pub trait ResultListener: Send + Sync {
    fn run_start(&self) {}

    fn handle_class_result(&self, batch: &ClassResultBatch);

    fn handle_unreportable(&self, _run: &UnreportableRun) {}

    fn run_end(&self) {}
}

/// Fans engine events out to every registered listener
#[derive(Clone, Default)]
pub struct ListenerSet {
    listeners: Vec<Arc<dyn ResultListener>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Arc<dyn ResultListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn run_start(&self) {
        for listener in &self.listeners {
            listener.run_start();
        }
    }

    pub fn dispatch(&self, event: &EngineEvent) {
        match event {
            EngineEvent::ClassResult(batch) => {
                for listener in &self.listeners {
                    listener.handle_class_result(batch);
                }
            }
            EngineEvent::Unreportable(run) => {
                for listener in &self.listeners {
                    listener.handle_unreportable(run);
                }
            }
        }
    }

    pub fn run_end(&self) {
        for listener in &self.listeners {
            listener.run_end();
        }
    }
}
