//! Native analysis engine boundary
//!
//! The capture/FFT pipeline lives outside this crate, behind
//! [`AnalysisEngine`]. Hosts with a native backend implement the trait and
//! publish frames through the shared [`EventEmitter`](crate::EventEmitter);
//! targets without one plug in [`UnsupportedEngine`].

mod scripted;
mod unsupported;

pub use scripted::ScriptedEngine;
pub use unsupported::UnsupportedEngine;

use crate::config::FourierParameters;
use serde_json::Value;

/// Strategy boundary to the native analysis backend.
///
/// Capability reporting replaces a runtime platform check: the facade asks
/// `supports_analysis` before issuing a start call, so an engine for an
/// unsupported target never has to fail at start time.
pub trait AnalysisEngine: Send + Sync {
    /// Whether this engine can analyse on the current target.
    fn supports_analysis(&self) -> bool;

    /// Begin analysis with the effective configuration.
    ///
    /// Fire-and-forget from the caller's view: failures surface
    /// asynchronously over the event channel, never from this call.
    fn start_analysing(
        &self,
        sample_rate: f64,
        channels: u16,
        fourier_parameters: &FourierParameters,
    );

    /// Stop analysis and return the engine's result, unmodified.
    fn stop_analysing(&self) -> Value;
}
