//! Dashboard use case
//!
//! Orchestrates one analysis run end to end: size check, upload, status
//! polling, result normalization, and the post-completion audience-fit and
//! report-export actions. Holds the phase machine, the current view model,
//! and the fit panel, so a front end only renders what it is told.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

use crate::domain::audience::{Audience, AudienceFit};
use crate::domain::capture::{CapturePayload, UploadPolicy};
use crate::domain::dashboard::{DashboardPhase, InvalidPhaseTransition, PhaseMachine};
use crate::domain::error::PayloadTooLarge;
use crate::domain::job::{normalize_progress, JobId, JobStatus};
use crate::domain::AnalysisViewModel;

use super::ports::{AnalysisBackend, BackendError, EntitlementsProvider};

/// Errors from the dashboard use case
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Nothing to upload: the audio payload is empty")]
    EmptyPayload,

    #[error(transparent)]
    PayloadTooLarge(#[from] PayloadTooLarge),

    #[error(transparent)]
    Phase(#[from] InvalidPhaseTransition),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Analysis job failed on the server")]
    JobFailed,

    #[error("Timed out waiting for analysis after {attempts} status checks")]
    Timeout { attempts: u32 },

    #[error("Analysis was cancelled")]
    Cancelled,

    #[error("Audience '{0}' requires a pro subscription")]
    AudienceLocked(Audience),

    #[error("Report export requires a pro subscription")]
    ReportLocked,

    #[error("No completed analysis")]
    NoCompletedJob,
}

/// Callbacks for phase and progress updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct DashboardCallbacks {
    /// Called on every phase change
    pub on_phase: Option<Box<dyn Fn(DashboardPhase) + Send + Sync>>,
    /// Called with normalized progress (0 to 100) while analyzing
    pub on_progress: Option<Box<dyn Fn(u8) + Send + Sync>>,
    /// Called when a status poll fails transiently
    pub on_poll_error: Option<Box<dyn Fn(&BackendError) + Send + Sync>>,
}

#[derive(Default)]
struct DashboardState {
    machine: PhaseMachine,
    job: Option<JobId>,
    model: Option<AnalysisViewModel>,
    fit: Option<AudienceFit>,
}

/// Upload-and-poll dashboard use case
pub struct Dashboard<B, E>
where
    B: AnalysisBackend,
    E: EntitlementsProvider,
{
    backend: B,
    entitlements: E,
    policy: UploadPolicy,
    poll_interval: Duration,
    max_poll_attempts: u32,
    state: Mutex<DashboardState>,
    cancel_flag: Arc<AtomicBool>,
    /// Bumped on every fit request and on reset so that a slow response
    /// for a superseded selection is discarded instead of rendered
    fit_generation: AtomicU64,
}

impl<B, E> Dashboard<B, E>
where
    B: AnalysisBackend,
    E: EntitlementsProvider,
{
    /// Create a new dashboard instance
    pub fn new(
        backend: B,
        entitlements: E,
        policy: UploadPolicy,
        poll_interval: Duration,
        max_poll_attempts: u32,
    ) -> Self {
        Self {
            backend,
            entitlements,
            policy,
            poll_interval,
            max_poll_attempts,
            state: Mutex::new(DashboardState::default()),
            cancel_flag: Arc::new(AtomicBool::new(false)),
            fit_generation: AtomicU64::new(0),
        }
    }

    /// Get the cancel flag for external signal handling
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel_flag)
    }

    /// Signal a running analysis to abort at the next status check
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> DashboardPhase {
        self.lock_state().machine.phase()
    }

    /// Identifier of the current job, if one has been submitted
    pub fn job_id(&self) -> Option<JobId> {
        self.lock_state().job.clone()
    }

    /// The renderable analysis. Zero model until a run completes.
    pub fn view_model(&self) -> AnalysisViewModel {
        self.lock_state()
            .model
            .clone()
            .unwrap_or_else(AnalysisViewModel::zero)
    }

    /// The audience-fit panel, if one is loaded
    pub fn audience_fit(&self) -> Option<AudienceFit> {
        self.lock_state().fit.clone()
    }

    /// Return to idle, clearing the job, the view model, and the fit
    /// panel. Any in-flight fit response becomes stale.
    pub fn reset(&self) {
        self.fit_generation.fetch_add(1, Ordering::SeqCst);
        self.cancel_flag.store(false, Ordering::SeqCst);
        let mut state = self.lock_state();
        state.machine.reset();
        state.job = None;
        state.model = None;
        state.fit = None;
    }

    /// Execute one full analysis run: upload, poll until terminal, fetch
    /// and normalize the result.
    pub async fn analyze(
        &self,
        payload: CapturePayload,
        callbacks: &DashboardCallbacks,
    ) -> Result<AnalysisViewModel, DashboardError> {
        if payload.is_empty() {
            return Err(DashboardError::EmptyPayload);
        }
        self.policy.check(&payload)?;
        self.cancel_flag.store(false, Ordering::SeqCst);

        self.transition(callbacks, |machine| machine.begin_upload())?;

        let job = match self.backend.submit(&payload).await {
            Ok(job) => job,
            Err(e) => return Err(self.fail_with(callbacks, e.into())),
        };
        self.lock_state().job = Some(job.clone());

        self.transition(callbacks, |machine| machine.begin_analysis())?;

        if let Err(e) = self.poll_until_done(&job, callbacks).await {
            return Err(self.fail_with(callbacks, e));
        }

        let raw = match self.backend.result(&job).await {
            Ok(raw) => raw,
            Err(e) => return Err(self.fail_with(callbacks, e.into())),
        };
        let model = AnalysisViewModel::from_raw(raw);

        {
            let mut state = self.lock_state();
            state.machine.complete()?;
            state.model = Some(model.clone());
        }
        if let Some(ref cb) = callbacks.on_phase {
            cb(DashboardPhase::Complete);
        }

        Ok(model)
    }

    /// Load the fit panel for an audience. Locked audiences require a pro
    /// entitlement; an entitlement lookup failure counts as not entitled.
    ///
    /// # Returns
    /// The fit, or None when a newer selection superseded this one
    pub async fn select_audience(
        &self,
        audience: Audience,
    ) -> Result<Option<AudienceFit>, DashboardError> {
        let job = self.completed_job()?;

        if !audience.is_free() && !self.entitlements.is_pro().await.unwrap_or(false) {
            return Err(DashboardError::AudienceLocked(audience));
        }

        let generation = self.fit_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = self.backend.audience_fit(&job, audience).await;

        // A response for a superseded selection, success or failure, must
        // not touch the panel a newer selection owns
        if self.fit_generation.load(Ordering::SeqCst) != generation {
            return Ok(None);
        }

        match outcome {
            Ok(fit) => {
                self.lock_state().fit = Some(fit.clone());
                Ok(Some(fit))
            }
            Err(e) => {
                // A failed fit clears the panel but leaves the phase and
                // the main analysis untouched
                self.lock_state().fit = None;
                Err(e.into())
            }
        }
    }

    /// Download the rendered report for the completed job
    pub async fn export_report(
        &self,
        audience: Audience,
    ) -> Result<Vec<u8>, DashboardError> {
        let job = self.completed_job()?;

        if !self.entitlements.is_pro().await.unwrap_or(false) {
            return Err(DashboardError::ReportLocked);
        }

        Ok(self.backend.download_report(&job, audience).await?)
    }

    async fn poll_until_done(
        &self,
        job: &JobId,
        callbacks: &DashboardCallbacks,
    ) -> Result<(), DashboardError> {
        let mut ticker = tokio::time::interval(self.poll_interval);
        for _ in 0..self.max_poll_attempts {
            // First tick fires immediately
            ticker.tick().await;

            if self.cancel_flag.load(Ordering::SeqCst) {
                return Err(DashboardError::Cancelled);
            }

            match self.backend.status(job).await {
                Ok(report) => {
                    if let (Some(ref cb), Some(progress)) =
                        (&callbacks.on_progress, report.progress)
                    {
                        cb(normalize_progress(progress));
                    }
                    match report.status {
                        JobStatus::Done => return Ok(()),
                        JobStatus::Failed => return Err(DashboardError::JobFailed),
                        JobStatus::Queued | JobStatus::Processing => {}
                    }
                }
                // A vanished job never comes back
                Err(BackendError::JobNotFound) => {
                    return Err(BackendError::JobNotFound.into())
                }
                Err(e) => {
                    if let Some(ref cb) = callbacks.on_poll_error {
                        cb(&e);
                    }
                }
            }
        }
        Err(DashboardError::Timeout {
            attempts: self.max_poll_attempts,
        })
    }

    fn completed_job(&self) -> Result<JobId, DashboardError> {
        let state = self.lock_state();
        if state.machine.phase() != DashboardPhase::Complete {
            return Err(DashboardError::NoCompletedJob);
        }
        state.job.clone().ok_or(DashboardError::NoCompletedJob)
    }

    fn transition(
        &self,
        callbacks: &DashboardCallbacks,
        apply: impl FnOnce(&mut PhaseMachine) -> Result<(), InvalidPhaseTransition>,
    ) -> Result<(), DashboardError> {
        let phase = {
            let mut state = self.lock_state();
            apply(&mut state.machine)?;
            state.machine.phase()
        };
        if let Some(ref cb) = callbacks.on_phase {
            cb(phase);
        }
        Ok(())
    }

    fn fail_with(&self, callbacks: &DashboardCallbacks, error: DashboardError) -> DashboardError {
        // Cancellation returns to idle rather than parking in error
        let phase = {
            let mut state = self.lock_state();
            if matches!(error, DashboardError::Cancelled) {
                state.machine.reset();
            } else if state.machine.phase().is_processing() {
                // Infallible: fail is legal from any processing phase
                let _ = state.machine.fail();
            }
            state.machine.phase()
        };
        if let Some(ref cb) = callbacks.on_phase {
            cb(phase);
        }
        error
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, DashboardState> {
        // Recovering the state is safe: all mutations are transition-checked
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
