//! Main app runner for the analyze flow

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::application::ports::ConfigStore;
use crate::application::{Dashboard, DashboardCallbacks, DashboardError, RecordAudioUseCase, RecordCallbacks};
use crate::domain::capture::{AudioMimeType, CapturePayload, UploadPolicy};
use crate::domain::config::AppConfig;
use crate::domain::dashboard::DashboardPhase;
use crate::infrastructure::recording::encode_capture;
use crate::infrastructure::{
    CpalChunkedRecorder, HttpAnalysisBackend, HttpIdentityProvider, XdgConfigStore,
};

use super::args::{AnalyzeOptions, AnalyzeSource};
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Per-request ceiling; polling retries make a longer timeout pointless
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Run one analysis end to end
pub async fn run_analyze(options: AnalyzeOptions, config: AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let payload = match &options.source {
        AnalyzeSource::File(path) => match load_file_payload(path).await {
            Ok(payload) => payload,
            Err(e) => {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
        AnalyzeSource::Record => match record_payload(&mut presenter).await {
            Ok(payload) => payload,
            Err(e) => {
                presenter.spinner_fail("Recording failed");
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
    };

    let client = match reqwest::Client::builder().timeout(HTTP_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            presenter.error(&format!("Failed to build HTTP client: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let api_base = config.api_base_url_or_default();
    let auth_base = config
        .auth_base_url
        .clone()
        .unwrap_or_else(|| api_base.clone());

    let mut backend = HttpAnalysisBackend::with_client(&api_base, client.clone());
    let mut identity = HttpIdentityProvider::with_client(&auth_base, client);
    if let Some(ref token) = config.access_token {
        backend = backend.with_access_token(token);
        identity = identity.with_access_token(token);
    }

    let dashboard = Dashboard::new(
        backend,
        identity,
        UploadPolicy::from_max_mb(config.max_upload_mb_or_default()),
        Duration::from_millis(config.poll_interval_ms_or_default()),
        config.max_poll_attempts_or_default(),
    );

    // Ctrl-C aborts the run at the next status check
    let cancel_flag = dashboard.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_flag.store(true, Ordering::SeqCst);
        }
    });

    presenter.info(&format!(
        "Uploading {} ({})",
        payload.filename(),
        payload.human_readable_size()
    ));
    presenter.start_spinner("Uploading...");

    let phase_spinner = presenter.spinner_handle();
    let progress_spinner = presenter.spinner_handle();
    let retry_spinner = presenter.spinner_handle();
    let callbacks = DashboardCallbacks {
        on_phase: Some(Box::new(move |phase| {
            if let Some(ref spinner) = phase_spinner {
                match phase {
                    DashboardPhase::Uploading => spinner.set_message("Uploading..."),
                    DashboardPhase::Analyzing => spinner.set_message("Analyzing..."),
                    _ => {}
                }
            }
        })),
        on_progress: Some(Box::new(move |percent| {
            if let Some(ref spinner) = progress_spinner {
                spinner.set_message(format!("Analyzing... {}%", percent));
            }
        })),
        on_poll_error: Some(Box::new(move |error| {
            if let Some(ref spinner) = retry_spinner {
                spinner.set_message(format!("Analyzing... (retrying: {})", error));
            }
        })),
    };

    let model = match dashboard.analyze(payload, &callbacks).await {
        Ok(model) => {
            presenter.spinner_success("Analysis complete");
            model
        }
        Err(e) => {
            presenter.spinner_fail("Analysis failed");
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.render_analysis(&model);

    if let Some(audience) = options.audience {
        match dashboard.select_audience(audience).await {
            Ok(Some(fit)) => presenter.render_fit(&fit),
            Ok(None) => {}
            Err(e @ DashboardError::AudienceLocked(_)) => {
                presenter.warn(&e.to_string());
            }
            Err(e) => {
                presenter.warn(&format!("Audience fit unavailable: {}", e));
            }
        }
    }

    if let Some(ref path) = options.report {
        let audience = options.audience.unwrap_or_else(|| config.audience_or_default());
        match dashboard.export_report(audience).await {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(path, bytes).await {
                    presenter.error(&format!(
                        "Failed to write report to {}: {}",
                        path.display(),
                        e
                    ));
                    return ExitCode::from(EXIT_ERROR);
                }
                presenter.success(&format!("Report written to {}", path.display()));
            }
            Err(e) => {
                presenter.error(&format!("Report export failed: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Build an upload payload from a file on disk
async fn load_file_payload(path: &Path) -> Result<CapturePayload, String> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    if data.is_empty() {
        return Err(format!("{} is empty", path.display()));
    }

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "audio".to_string());
    let mime = AudioMimeType::from_path(path);

    Ok(CapturePayload::new(data, filename, mime))
}

/// Record from the microphone until Ctrl-C, then encode for upload.
/// A second Ctrl-C discards the recording.
async fn record_payload(presenter: &mut Presenter) -> Result<CapturePayload, String> {
    let use_case = RecordAudioUseCase::new(CpalChunkedRecorder::new());

    let stop_flag = use_case.stop_flag();
    let cancel_flag = use_case.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop_flag.store(true, Ordering::SeqCst);
        }
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_flag.store(true, Ordering::SeqCst);
        }
    });

    presenter.start_spinner("Recording... (Ctrl-C to stop)");
    let tick_spinner = presenter.spinner_handle();
    let callbacks = RecordCallbacks {
        on_start: None,
        on_tick: Some(Box::new(move |elapsed| {
            if let Some(ref spinner) = tick_spinner {
                spinner.set_message(format!("Recording... {}s (Ctrl-C to stop)", elapsed));
            }
        })),
    };

    let output = use_case
        .execute(callbacks)
        .await
        .map_err(|e| e.to_string())?;

    presenter.update_spinner("Encoding...");
    let samples = output.samples;
    let sample_rate = output.sample_rate;
    let filename = recording_filename();
    let payload = tokio::task::spawn_blocking(move || {
        encode_capture(&samples, sample_rate, filename)
    })
    .await
    .map_err(|e| format!("Encode task error: {}", e))?
    .map_err(|e| e.to_string())?;

    presenter.spinner_success(&format!(
        "Recorded {}s ({})",
        output.elapsed_secs,
        payload.human_readable_size()
    ));

    Ok(payload)
}

/// Name a recorded upload after its capture time
fn recording_filename() -> String {
    let unix_ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("recording-{}.flac", unix_ts)
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        api_base_url: env::var("LISTENDRIFT_API_URL").ok().filter(|s| !s.is_empty()),
        access_token: env::var("LISTENDRIFT_ACCESS_TOKEN")
            .ok()
            .filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_filename_carries_unix_timestamp() {
        let name = recording_filename();
        let stamp = name
            .strip_prefix("recording-")
            .and_then(|rest| rest.strip_suffix(".flac"))
            .expect("recording-{ts}.flac");
        let parsed: u64 = stamp.parse().expect("numeric timestamp");
        // Well past 2020, well before the year 20000
        assert!(parsed > 1_577_836_800);
        assert!(parsed < 570_000_000_000);
    }
}
