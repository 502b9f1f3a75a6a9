//! Drives the facade with the scripted engine and logs forwarded frames.
//!
//! Run with: RUST_LOG=debug cargo run --example synthetic

use audio_analyser_bridge::{AnalysisOverrides, AudioAnalyser, EventEmitter, ScriptedEngine};
use std::sync::Arc;
use std::time::Duration;

fn main() {
    env_logger::init();

    let emitter = EventEmitter::new();
    let engine = Arc::new(ScriptedEngine::with_interval(
        emitter.clone(),
        Duration::from_millis(100),
    ));
    let mut analyser = AudioAnalyser::new(engine, emitter);

    analyser.set_on_progress(|frame| {
        log::info!("analysis frame: {}", frame);
    });

    analyser.start_analysing(AnalysisOverrides {
        channels: Some(1),
        ..Default::default()
    });

    std::thread::sleep(Duration::from_secs(1));

    let result = analyser.stop_analysing();
    log::info!("engine stop result: {}", result);

    analyser.remove_listeners();
}
