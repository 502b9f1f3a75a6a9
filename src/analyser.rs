//! Analysis facade: option merging, engine control, event forwarding

use crate::config::{AnalysisOptions, AnalysisOverrides};
use crate::engine::AnalysisEngine;
use crate::events::{EventEmitter, Subscription, ANALYSIS_AVAILABLE};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

type Callback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Assignable callback slot, shared with the live event handler so the
/// callback can be set or replaced before or after analysis starts.
type CallbackSlot = Arc<Mutex<Option<Callback>>>;

/// Facade over the native analysis engine.
///
/// Owns at most one live "analysisAvailable" subscription at a time;
/// starting analysis releases any existing subscription before registering
/// the replacement. All operations are synchronous and non-throwing:
/// engine-side failures surface asynchronously over the event channel, not
/// from these calls.
pub struct AudioAnalyser {
    engine: Arc<dyn AnalysisEngine>,
    emitter: EventEmitter,

    /// Live registration for "analysisAvailable", if analysis was started
    progress_subscription: Option<Subscription>,

    /// Reserved cleanup slot for a completion event. Nothing in this layer
    /// creates it; the engine boundary defines no finished event today.
    finished_subscription: Option<Subscription>,

    on_progress: CallbackSlot,
    on_finished: CallbackSlot,
}

impl AudioAnalyser {
    /// Create a facade over `engine`, delivering events through `emitter`.
    ///
    /// The engine publishes into a clone of the same emitter.
    pub fn new(engine: Arc<dyn AnalysisEngine>, emitter: EventEmitter) -> Self {
        Self {
            engine,
            emitter,
            progress_subscription: None,
            finished_subscription: None,
            on_progress: CallbackSlot::default(),
            on_finished: CallbackSlot::default(),
        }
    }

    /// Event emitter shared with the engine.
    pub fn emitter(&self) -> &EventEmitter {
        &self.emitter
    }

    /// Start analysis with `overrides` shallow-merged over the defaults.
    ///
    /// Replaces any live progress subscription (release, then store), then
    /// asks the engine to start. When the engine reports no analysis
    /// support, a diagnostic is logged and no engine call is made.
    pub fn start_analysing(&mut self, overrides: AnalysisOverrides) {
        if let Some(subscription) = self.progress_subscription.take() {
            subscription.remove();
        }

        let on_progress = self.on_progress.clone();
        let subscription = self.emitter.add_listener(ANALYSIS_AVAILABLE, move |payload| {
            // Copy the callback out of the slot, release the lock, then invoke
            let callback = on_progress.lock().clone();
            if let Some(callback) = callback {
                callback(payload);
            }
        });
        self.progress_subscription = Some(subscription);

        let options = AnalysisOptions::default().merged(overrides);

        if self.engine.supports_analysis() {
            log::debug!(
                "starting analysis: {} Hz, {} channels, {} fourier parameters",
                options.sample_rate,
                options.channels,
                options.fourier_parameters.len()
            );
            self.engine.start_analysing(
                options.sample_rate,
                options.channels,
                &options.fourier_parameters,
            );
        } else {
            log::warn!("audio analysis is not supported on this platform");
        }
    }

    /// Stop analysis, returning the engine's result unmodified.
    ///
    /// No running-state validation: stopping while idle is the engine's
    /// concern, same as the native boundary.
    pub fn stop_analysing(&self) -> Value {
        self.engine.stop_analysing()
    }

    /// Release all event subscriptions. Safe to call repeatedly or when
    /// nothing is subscribed; makes no engine call.
    pub fn remove_listeners(&mut self) {
        if let Some(subscription) = self.progress_subscription.take() {
            subscription.remove();
        }
        if let Some(subscription) = self.finished_subscription.take() {
            subscription.remove();
        }
    }

    /// Set the callback invoked with each "analysisAvailable" payload.
    pub fn set_on_progress(&self, callback: impl Fn(&Value) + Send + Sync + 'static) {
        *self.on_progress.lock() = Some(Arc::new(callback));
    }

    /// Clear the progress callback; events are still received but dropped.
    pub fn clear_on_progress(&self) {
        *self.on_progress.lock() = None;
    }

    /// Set the callback for a completion event, should the engine define
    /// one. Held but never invoked by this layer today.
    pub fn set_on_finished(&self, callback: impl Fn(&Value) + Send + Sync + 'static) {
        *self.on_finished.lock() = Some(Arc::new(callback));
    }

    /// Clear the finished callback.
    pub fn clear_on_finished(&self) {
        *self.on_finished.lock() = None;
    }
}
