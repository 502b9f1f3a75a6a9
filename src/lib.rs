//! Audio Analysis Bridge
//!
//! Library facade exposing a native real-time audio-analysis capability
//! (spectral analysis of microphone input) to the application layer. The
//! facade merges caller options over defaults, toggles the engine, and
//! relays asynchronous "analysisAvailable" events to a registered callback.
//!
//! The signal-processing engine itself (capture, windowing, FFT) lives
//! behind the [`AnalysisEngine`] trait and is supplied by the host; targets
//! without a native backend use [`UnsupportedEngine`], which turns start
//! requests into a logged no-op.
//!
//! ```
//! use audio_analyser_bridge::{
//!     AnalysisOverrides, AudioAnalyser, EventEmitter, ScriptedEngine,
//! };
//! use std::sync::Arc;
//!
//! let emitter = EventEmitter::new();
//! let engine = Arc::new(ScriptedEngine::new(emitter.clone()));
//!
//! let mut analyser = AudioAnalyser::new(engine, emitter);
//! analyser.set_on_progress(|frame| println!("frame: {frame}"));
//!
//! analyser.start_analysing(AnalysisOverrides {
//!     channels: Some(1),
//!     ..Default::default()
//! });
//!
//! let result = analyser.stop_analysing();
//! analyser.remove_listeners();
//! # let _ = result;
//! ```

pub mod analyser;
pub mod config;
pub mod engine;
pub mod events;

pub use analyser::AudioAnalyser;
pub use config::{AnalysisOptions, AnalysisOverrides, FourierParameters};
pub use engine::{AnalysisEngine, ScriptedEngine, UnsupportedEngine};
pub use events::{EventEmitter, Subscription, ANALYSIS_AVAILABLE, ANALYSIS_FINISHED};
