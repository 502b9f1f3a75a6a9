//! Scripted engine emitting synthetic analysis frames
//!
//! Stands in for a native backend during development and testing: a
//! dedicated worker thread publishes deterministic "analysisAvailable"
//! frames through the shared emitter until stopped. No actual capture or
//! FFT happens here.

use super::AnalysisEngine;
use crate::config::FourierParameters;
use crate::events::{EventEmitter, ANALYSIS_AVAILABLE};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Number of magnitude bins in a synthetic frame
const FRAME_BINS: u64 = 8;

/// Commands sent to the worker thread
enum WorkerCommand {
    Stop,
}

/// Running worker: command channel plus join handle.
///
/// The handle returns the number of frames emitted.
struct Worker {
    command_tx: mpsc::Sender<WorkerCommand>,
    thread_handle: JoinHandle<u64>,
}

/// Engine that emits synthetic frames from a worker thread.
pub struct ScriptedEngine {
    emitter: EventEmitter,
    interval: Duration,
    worker: Mutex<Option<Worker>>,
}

impl ScriptedEngine {
    /// Create an engine publishing into `emitter` every 10ms once started.
    pub fn new(emitter: EventEmitter) -> Self {
        Self::with_interval(emitter, Duration::from_millis(10))
    }

    /// Create an engine with a custom frame interval.
    pub fn with_interval(emitter: EventEmitter, interval: Duration) -> Self {
        Self {
            emitter,
            interval,
            worker: Mutex::new(None),
        }
    }

    fn stop_worker(worker: Option<Worker>) -> Option<u64> {
        let worker = worker?;
        let _ = worker.command_tx.send(WorkerCommand::Stop);
        worker.thread_handle.join().ok()
    }
}

impl AnalysisEngine for ScriptedEngine {
    fn supports_analysis(&self) -> bool {
        true
    }

    fn start_analysing(
        &self,
        sample_rate: f64,
        channels: u16,
        fourier_parameters: &FourierParameters,
    ) {
        // Starting while running replaces the worker, stop the old one first
        let previous = self.worker.lock().take();
        if let Some(frames) = Self::stop_worker(previous) {
            log::debug!("replacing running scripted worker after {} frames", frames);
        }

        log::info!(
            "scripted analysis starting: {} Hz, {} channels, {} fourier parameters",
            sample_rate,
            channels,
            fourier_parameters.len()
        );

        let (command_tx, command_rx) = mpsc::channel();
        let emitter = self.emitter.clone();
        let interval = self.interval;

        let spawned = thread::Builder::new()
            .name("scripted-analysis".to_string())
            .spawn(move || run_worker(emitter, interval, sample_rate, channels, command_rx));

        let thread_handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("failed to spawn scripted analysis thread: {}", e);
                return;
            }
        };

        *self.worker.lock() = Some(Worker {
            command_tx,
            thread_handle,
        });
    }

    fn stop_analysing(&self) -> Value {
        let worker = self.worker.lock().take();
        match Self::stop_worker(worker) {
            Some(frames) => {
                log::info!("scripted analysis stopped after {} frames", frames);
                json!({ "framesEmitted": frames })
            }
            None => Value::Null,
        }
    }
}

impl Drop for ScriptedEngine {
    fn drop(&mut self) {
        let worker = self.worker.lock().take();
        Self::stop_worker(worker);
    }
}

/// Worker loop: emit a frame, then wait one interval or for a stop command.
fn run_worker(
    emitter: EventEmitter,
    interval: Duration,
    sample_rate: f64,
    channels: u16,
    command_rx: mpsc::Receiver<WorkerCommand>,
) -> u64 {
    let mut frames = 0u64;

    loop {
        emitter.emit(
            ANALYSIS_AVAILABLE,
            &synthetic_frame(frames, sample_rate, channels),
        );
        frames += 1;

        match command_rx.recv_timeout(interval) {
            Ok(WorkerCommand::Stop) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
    }

    frames
}

/// Deterministic frame payload: rectified sine sweep across the bins.
fn synthetic_frame(seq: u64, sample_rate: f64, channels: u16) -> Value {
    let magnitudes: Vec<f64> = (0..FRAME_BINS)
        .map(|bin| (((seq + bin) as f64) * 0.35).sin().abs())
        .collect();

    json!({
        "seq": seq,
        "sampleRate": sample_rate,
        "channels": channels,
        "magnitudes": magnitudes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn emits_frames_until_stopped() {
        let emitter = EventEmitter::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let _sub = emitter.add_listener(ANALYSIS_AVAILABLE, move |payload| {
            received_clone.lock().push(payload.clone());
        });

        let engine = ScriptedEngine::with_interval(emitter, Duration::from_millis(1));
        engine.start_analysing(48_000.0, 1, &FourierParameters::new());

        // First frame is emitted before the worker waits, so one is guaranteed
        thread::sleep(Duration::from_millis(20));
        let result = engine.stop_analysing();

        let frames = result["framesEmitted"].as_u64().unwrap();
        assert!(frames >= 1);
        assert_eq!(received.lock().len() as u64, frames);

        let first = &received.lock()[0];
        assert_eq!(first["seq"], 0);
        assert_eq!(first["sampleRate"], 48_000.0);
        assert_eq!(first["channels"], 1);
        assert_eq!(first["magnitudes"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn stop_without_start_returns_null() {
        let engine = ScriptedEngine::new(EventEmitter::new());

        assert_eq!(engine.stop_analysing(), Value::Null);
    }

    #[test]
    fn restart_replaces_the_worker() {
        let emitter = EventEmitter::new();
        let engine = ScriptedEngine::with_interval(emitter, Duration::from_millis(1));

        engine.start_analysing(44_100.0, 2, &FourierParameters::new());
        engine.start_analysing(22_050.0, 1, &FourierParameters::new());

        // Only the second worker is live; stop joins it cleanly
        let result = engine.stop_analysing();
        assert!(result["framesEmitted"].as_u64().unwrap() >= 1);
        assert_eq!(engine.stop_analysing(), Value::Null);
    }
}
