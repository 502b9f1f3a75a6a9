//! No-op engine for targets without a native analysis backend

use super::AnalysisEngine;
use crate::config::FourierParameters;
use serde_json::Value;

/// Explicit no-op engine.
///
/// Reports no analysis support, so the facade logs a diagnostic and skips
/// the start call. The engine methods are still safe to invoke directly:
/// start does nothing and stop returns `Null`.
#[derive(Debug, Clone, Copy)]
pub struct UnsupportedEngine;

impl UnsupportedEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnsupportedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisEngine for UnsupportedEngine {
    fn supports_analysis(&self) -> bool {
        false
    }

    fn start_analysing(
        &self,
        _sample_rate: f64,
        _channels: u16,
        _fourier_parameters: &FourierParameters,
    ) {
        log::debug!("start ignored: no native analysis backend on this target");
    }

    fn stop_analysing(&self) -> Value {
        Value::Null
    }
}
