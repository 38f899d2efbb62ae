//! Dashboard phase machine
//!
//! The lifecycle of one analysis run:
//!
//!   IDLE -> UPLOADING -> ANALYZING -> COMPLETE
//!              |             |
//!              +--> ERROR <--+
//!
//! `reset` is the only transition allowed from every phase.

use std::fmt;
use thiserror::Error;

/// Dashboard lifecycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashboardPhase {
    #[default]
    Idle,
    Uploading,
    Analyzing,
    Complete,
    Error,
}

impl DashboardPhase {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Uploading => "uploading",
            Self::Analyzing => "analyzing",
            Self::Complete => "complete",
            Self::Error => "error",
        }
    }

    /// Whether a run is currently in flight
    pub const fn is_processing(&self) -> bool {
        matches!(self, Self::Uploading | Self::Analyzing)
    }
}

impl fmt::Display for DashboardPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for a phase transition requested in the wrong phase
#[derive(Debug, Clone, Error)]
#[error("invalid dashboard transition: cannot {action} while in {current_phase} phase")]
pub struct InvalidPhaseTransition {
    pub current_phase: DashboardPhase,
    pub action: &'static str,
}

/// Enforces the dashboard lifecycle
#[derive(Debug, Default)]
pub struct PhaseMachine {
    phase: DashboardPhase,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DashboardPhase {
        self.phase
    }

    /// IDLE -> UPLOADING
    pub fn begin_upload(&mut self) -> Result<(), InvalidPhaseTransition> {
        if self.phase != DashboardPhase::Idle {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "begin upload",
            });
        }
        self.phase = DashboardPhase::Uploading;
        Ok(())
    }

    /// UPLOADING -> ANALYZING
    pub fn begin_analysis(&mut self) -> Result<(), InvalidPhaseTransition> {
        if self.phase != DashboardPhase::Uploading {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "begin analysis",
            });
        }
        self.phase = DashboardPhase::Analyzing;
        Ok(())
    }

    /// ANALYZING -> COMPLETE
    pub fn complete(&mut self) -> Result<(), InvalidPhaseTransition> {
        if self.phase != DashboardPhase::Analyzing {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "complete",
            });
        }
        self.phase = DashboardPhase::Complete;
        Ok(())
    }

    /// UPLOADING or ANALYZING -> ERROR
    pub fn fail(&mut self) -> Result<(), InvalidPhaseTransition> {
        if !self.phase.is_processing() {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "fail",
            });
        }
        self.phase = DashboardPhase::Error;
        Ok(())
    }

    /// Return to IDLE from any phase
    pub fn reset(&mut self) {
        self.phase = DashboardPhase::Idle;
    }
}
