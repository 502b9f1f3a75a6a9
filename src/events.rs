//! In-process event delivery between the engine boundary and the facade

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Event carrying an analysis frame from the engine.
pub const ANALYSIS_AVAILABLE: &str = "analysisAvailable";

/// Nominal completion event. No engine currently emits it; the name exists
/// because the facade reserves a cleanup slot for it.
pub const ANALYSIS_FINISHED: &str = "analysisFinished";

/// Listener id counter (shared across all emitters)
static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(0);

type Handler = Arc<dyn Fn(&Value) + Send + Sync>;

struct RegisteredListener {
    id: u64,
    handler: Handler,
}

type Registry = Mutex<HashMap<String, Vec<RegisteredListener>>>;

/// Named-event publish/subscribe channel.
///
/// Clonable handle over shared registry state: the facade and the engine each
/// hold a clone of the same emitter. `emit` may be called from any thread;
/// handlers run synchronously on the emitting thread, in registration order,
/// with no registry lock held.
#[derive(Clone, Default)]
pub struct EventEmitter {
    registry: Arc<Registry>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a named event.
    ///
    /// The registration stays live until the returned [`Subscription`] is
    /// removed or dropped.
    pub fn add_listener(
        &self,
        event: &str,
        handler: impl Fn(&Value) + Send + Sync + 'static,
    ) -> Subscription {
        let id = NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed);

        self.registry
            .lock()
            .entry(event.to_string())
            .or_default()
            .push(RegisteredListener {
                id,
                handler: Arc::new(handler),
            });

        Subscription {
            registry: self.registry.clone(),
            event: event.to_string(),
            id,
        }
    }

    /// Deliver a payload to every live listener for `event`.
    ///
    /// Handlers are copied out under the lock and invoked after it is
    /// released, so a handler may itself add or remove listeners.
    pub fn emit(&self, event: &str, payload: &Value) {
        let handlers: Vec<Handler> = {
            let registry = self.registry.lock();
            match registry.get(event) {
                Some(listeners) => listeners.iter().map(|l| l.handler.clone()).collect(),
                None => return,
            }
        };

        for handler in handlers {
            handler(payload);
        }
    }

    /// Number of live listeners for a named event.
    pub fn listener_count(&self, event: &str) -> usize {
        self.registry
            .lock()
            .get(event)
            .map(|listeners| listeners.len())
            .unwrap_or(0)
    }
}

/// Handle for one event registration.
///
/// Removal happens on `remove()` or on drop, whichever comes first, and is
/// safe when the registration is already gone.
pub struct Subscription {
    registry: Arc<Registry>,
    event: String,
    id: u64,
}

impl Subscription {
    /// Event name this subscription was registered for.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Release the registration.
    pub fn remove(self) {
        // Drop impl does the unregistering
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut registry = self.registry.lock();
        let now_empty = match registry.get_mut(&self.event) {
            Some(listeners) => {
                listeners.retain(|l| l.id != self.id);
                listeners.is_empty()
            }
            None => false,
        };
        if now_empty {
            registry.remove(&self.event);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}
