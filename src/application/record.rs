//! Record audio use case
//!
//! Drives a chunked recorder against the domain recording session: once a
//! second it drains newly emitted chunks into the session and advances the
//! elapsed counter, until asked to stop or cancel. Stopping keeps the audio
//! for upload; cancelling discards it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::domain::capture::{FinishError, InvalidSessionTransition, RecordingSession};

use super::ports::{ChunkedRecorder, RecordingError};

/// Errors from the record use case
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Recording failed: {0}")]
    Recording(#[from] RecordingError),

    #[error(transparent)]
    Session(#[from] InvalidSessionTransition),

    #[error(transparent)]
    Finish(#[from] FinishError),
}

/// Callbacks for recording progress
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct RecordCallbacks {
    /// Called once capture has started
    pub on_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called every second with the elapsed recording time
    pub on_tick: Option<Box<dyn Fn(u64) + Send + Sync>>,
}

/// Output from the record use case
#[derive(Debug, Clone)]
pub struct RecordOutput {
    /// Concatenated samples in chunk arrival order
    pub samples: Vec<i16>,
    /// Sample rate of the capture
    pub sample_rate: u32,
    /// Total recording time in whole seconds
    pub elapsed_secs: u64,
}

/// Stop-controlled audio recording use case
pub struct RecordAudioUseCase<R>
where
    R: ChunkedRecorder,
{
    recorder: R,
    tick_interval: Duration,
    stop_flag: Arc<AtomicBool>,
    cancel_flag: Arc<AtomicBool>,
}

impl<R> RecordAudioUseCase<R>
where
    R: ChunkedRecorder,
{
    /// Create a new use case instance with the standard one-second tick
    pub fn new(recorder: R) -> Self {
        Self::with_tick_interval(recorder, Duration::from_secs(1))
    }

    pub fn with_tick_interval(recorder: R, tick_interval: Duration) -> Self {
        Self {
            recorder,
            tick_interval,
            stop_flag: Arc::new(AtomicBool::new(false)),
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the stop flag for external signal handling
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    /// Get the cancel flag for external signal handling
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel_flag)
    }

    /// Signal the recording to stop and keep the audio
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Signal the recording to stop and discard the audio
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Record until the stop or cancel flag is raised
    pub async fn execute(&self, callbacks: RecordCallbacks) -> Result<RecordOutput, RecordError> {
        self.stop_flag.store(false, Ordering::SeqCst);
        self.cancel_flag.store(false, Ordering::SeqCst);

        let mut session = RecordingSession::new();
        session.start()?;

        let sample_rate = self.recorder.start().await?;
        if let Some(ref cb) = callbacks.on_start {
            cb();
        }

        let mut ticker = tokio::time::interval(self.tick_interval);
        // Consume the immediate first tick so elapsed lags wall time by
        // one interval, matching the capture buffer
        ticker.tick().await;

        loop {
            ticker.tick().await;

            if self.cancel_flag.load(Ordering::SeqCst) {
                let _ = self.recorder.stop().await;
                session.cancel()?;
                return Err(RecordingError::Cancelled.into());
            }

            for chunk in self.recorder.drain_chunks() {
                session.push_chunk(chunk)?;
            }
            let elapsed = session.tick()?;
            if let Some(ref cb) = callbacks.on_tick {
                cb(elapsed);
            }

            if self.stop_flag.load(Ordering::SeqCst) {
                break;
            }
        }

        // Flush the tail before closing the session
        self.recorder.stop().await?;
        for chunk in self.recorder.drain_chunks() {
            session.push_chunk(chunk)?;
        }

        let elapsed_secs = session.elapsed_secs();
        session.stop()?;
        let samples = session.finish()?;

        Ok(RecordOutput {
            samples,
            sample_rate,
            elapsed_secs,
        })
    }
}
