//! Recording session state machine
//!
//! Owns everything a live capture mutates: the ordered chunk buffer fed by
//! the recorder's periodic emission, and the elapsed-seconds counter fed by
//! an independent 1 Hz tick. Both feeds are only legal while the session is
//! in the recording state, so a timer that outlives its recorder shows up
//! as a transition error instead of a silently drifting counter.
//!
//! State machine:
//!   IDLE -> RECORDING (start)
//!   RECORDING -> STOPPED (stop; the chunk cutoff)
//!   RECORDING -> IDLE (cancel)
//!   STOPPED -> IDLE (finish or cancel)

use std::fmt;
use thiserror::Error;

/// Recording session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
    Stopped,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when a feed or transition arrives in the wrong state
#[derive(Debug, Clone, Error)]
#[error("invalid recording transition: cannot {action} while in {current_state} state")]
pub struct InvalidSessionTransition {
    pub current_state: SessionState,
    pub action: &'static str,
}

/// Error when finishing a session
#[derive(Debug, Clone, Error)]
pub enum FinishError {
    #[error(transparent)]
    Invalid(#[from] InvalidSessionTransition),

    /// The recorder emitted no chunks for the whole session. Distinct from
    /// recorded silence, which still produces chunks of zero samples.
    #[error("recording produced no audio")]
    EmptyRecording,
}

/// One in-progress capture: chunk buffer, elapsed counter, and the state
/// that gates both.
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: SessionState,
    chunks: Vec<Vec<i16>>,
    elapsed_secs: u64,
}

impl RecordingSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Elapsed recording time in whole seconds
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Number of chunks received so far
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Transition from IDLE to RECORDING, resetting the chunk buffer and
    /// the elapsed counter to zero
    pub fn start(&mut self) -> Result<(), InvalidSessionTransition> {
        if self.state != SessionState::Idle {
            return Err(InvalidSessionTransition {
                current_state: self.state,
                action: "start",
            });
        }
        self.chunks.clear();
        self.elapsed_secs = 0;
        self.state = SessionState::Recording;
        Ok(())
    }

    /// Append one recorder-emitted chunk, preserving arrival order
    pub fn push_chunk(&mut self, samples: Vec<i16>) -> Result<(), InvalidSessionTransition> {
        if self.state != SessionState::Recording {
            return Err(InvalidSessionTransition {
                current_state: self.state,
                action: "push chunk",
            });
        }
        self.chunks.push(samples);
        Ok(())
    }

    /// Advance the elapsed counter by one second. Only legal while
    /// recording: a tick in any other state means a leaked timer.
    pub fn tick(&mut self) -> Result<u64, InvalidSessionTransition> {
        if self.state != SessionState::Recording {
            return Err(InvalidSessionTransition {
                current_state: self.state,
                action: "tick",
            });
        }
        self.elapsed_secs += 1;
        Ok(self.elapsed_secs)
    }

    /// Transition from RECORDING to STOPPED. This is the chunk cutoff:
    /// chunks arriving after stop are refused rather than awaited.
    pub fn stop(&mut self) -> Result<(), InvalidSessionTransition> {
        if self.state != SessionState::Recording {
            return Err(InvalidSessionTransition {
                current_state: self.state,
                action: "stop",
            });
        }
        self.state = SessionState::Stopped;
        Ok(())
    }

    /// Concatenate all chunks collected up to the stop event into one
    /// sample buffer and return to idle
    pub fn finish(&mut self) -> Result<Vec<i16>, FinishError> {
        if self.state != SessionState::Stopped {
            return Err(InvalidSessionTransition {
                current_state: self.state,
                action: "finish",
            }
            .into());
        }
        if self.chunks.is_empty() {
            self.reset();
            return Err(FinishError::EmptyRecording);
        }
        let total: usize = self.chunks.iter().map(Vec::len).sum();
        let mut samples = Vec::with_capacity(total);
        for chunk in self.chunks.drain(..) {
            samples.extend_from_slice(&chunk);
        }
        self.reset();
        Ok(samples)
    }

    /// Abandon the session from any active state, dropping buffered chunks
    pub fn cancel(&mut self) -> Result<(), InvalidSessionTransition> {
        if self.state == SessionState::Idle {
            return Err(InvalidSessionTransition {
                current_state: self.state,
                action: "cancel",
            });
        }
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.chunks.clear();
        self.elapsed_secs = 0;
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = RecordingSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.is_recording());
        assert_eq!(session.elapsed_secs(), 0);
        assert_eq!(session.chunk_count(), 0);
    }

    #[test]
    fn start_from_idle() {
        let mut session = RecordingSession::new();
        assert!(session.start().is_ok());
        assert!(session.is_recording());
    }

    #[test]
    fn start_while_recording_fails() {
        let mut session = RecordingSession::new();
        session.start().unwrap();

        let err = session.start().unwrap_err();
        assert_eq!(err.current_state, SessionState::Recording);
        assert_eq!(err.action, "start");
    }

    #[test]
    fn chunks_preserve_arrival_order() {
        let mut session = RecordingSession::new();
        session.start().unwrap();
        session.push_chunk(vec![1, 1]).unwrap();
        session.push_chunk(vec![2, 2]).unwrap();
        session.push_chunk(vec![3]).unwrap();
        session.stop().unwrap();

        let samples = session.finish().unwrap();
        assert_eq!(samples, vec![1, 1, 2, 2, 3]);
    }

    #[test]
    fn tick_only_while_recording() {
        let mut session = RecordingSession::new();
        let err = session.tick().unwrap_err();
        assert_eq!(err.action, "tick");

        session.start().unwrap();
        assert_eq!(session.tick().unwrap(), 1);
        assert_eq!(session.tick().unwrap(), 2);

        session.stop().unwrap();
        assert!(session.tick().is_err());
    }

    #[test]
    fn chunk_after_stop_is_refused() {
        let mut session = RecordingSession::new();
        session.start().unwrap();
        session.push_chunk(vec![1]).unwrap();
        session.stop().unwrap();

        let err = session.push_chunk(vec![2]).unwrap_err();
        assert_eq!(err.current_state, SessionState::Stopped);

        // The late chunk is not part of the payload
        assert_eq!(session.finish().unwrap(), vec![1]);
    }

    #[test]
    fn empty_recording_is_distinct_from_silence() {
        let mut session = RecordingSession::new();
        session.start().unwrap();
        session.stop().unwrap();
        assert!(matches!(session.finish(), Err(FinishError::EmptyRecording)));

        // A session of silence still yields samples
        session.start().unwrap();
        session.push_chunk(vec![0; 16]).unwrap();
        session.stop().unwrap();
        assert_eq!(session.finish().unwrap(), vec![0; 16]);
    }

    #[test]
    fn finish_returns_to_idle_for_reuse() {
        let mut session = RecordingSession::new();
        session.start().unwrap();
        session.push_chunk(vec![7]).unwrap();
        session.tick().unwrap();
        session.stop().unwrap();
        session.finish().unwrap();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.elapsed_secs(), 0);
        assert!(session.start().is_ok());
        assert_eq!(session.chunk_count(), 0);
    }

    #[test]
    fn cancel_drops_chunks() {
        let mut session = RecordingSession::new();
        session.start().unwrap();
        session.push_chunk(vec![1, 2, 3]).unwrap();
        session.cancel().unwrap();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.chunk_count(), 0);
    }

    #[test]
    fn cancel_from_idle_fails() {
        let mut session = RecordingSession::new();
        assert!(session.cancel().is_err());
    }

    #[test]
    fn start_resets_previous_counters() {
        let mut session = RecordingSession::new();
        session.start().unwrap();
        session.push_chunk(vec![9]).unwrap();
        session.tick().unwrap();
        session.cancel().unwrap();

        session.start().unwrap();
        assert_eq!(session.elapsed_secs(), 0);
        assert_eq!(session.chunk_count(), 0);
    }
}
