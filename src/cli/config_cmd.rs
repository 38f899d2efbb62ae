//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::audience::Audience;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    validate_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "api_base_url" => config.api_base_url = Some(value.to_string()),
        "auth_base_url" => config.auth_base_url = Some(value.to_string()),
        "access_token" => config.access_token = Some(value.to_string()),
        "max_upload_mb" => config.max_upload_mb = Some(parse_u64(key, value)?),
        "poll_interval_ms" => config.poll_interval_ms = Some(parse_u64(key, value)?),
        "max_poll_attempts" => {
            config.max_poll_attempts = Some(parse_u64(key, value)? as u32)
        }
        "audience" => config.audience = Some(value.to_ascii_lowercase()),
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "api_base_url" => config.api_base_url,
        "auth_base_url" => config.auth_base_url,
        "access_token" => config.access_token.map(|t| mask_token(&t)),
        "max_upload_mb" => config.max_upload_mb.map(|v| v.to_string()),
        "poll_interval_ms" => config.poll_interval_ms.map(|v| v.to_string()),
        "max_poll_attempts" => config.max_poll_attempts.map(|v| v.to_string()),
        "audience" => config.audience,
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    let not_set = || "(not set)".to_string();

    presenter.key_value(
        "api_base_url",
        config.api_base_url.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "auth_base_url",
        config.auth_base_url.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "access_token",
        &config
            .access_token
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(not_set),
    );
    presenter.key_value(
        "max_upload_mb",
        &config
            .max_upload_mb
            .map(|v| v.to_string())
            .unwrap_or_else(not_set),
    );
    presenter.key_value(
        "poll_interval_ms",
        &config
            .poll_interval_ms
            .map(|v| v.to_string())
            .unwrap_or_else(not_set),
    );
    presenter.key_value(
        "max_poll_attempts",
        &config
            .max_poll_attempts
            .map(|v| v.to_string())
            .unwrap_or_else(not_set),
    );
    presenter.key_value(
        "audience",
        config.audience.as_deref().unwrap_or("(not set)"),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "max_upload_mb" | "poll_interval_ms" | "max_poll_attempts" => {
            let parsed = parse_u64(key, value)?;
            if parsed == 0 {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be greater than zero".to_string(),
                });
            }
        }
        "audience" => {
            value
                .parse::<Audience>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        _ => {} // URLs and tokens accept any string
    }
    Ok(())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be a positive integer".to_string(),
    })
}

/// Mask access token for display (show first 4 and last 4 chars)
fn mask_token(token: &str) -> String {
    if token.len() <= 8 {
        "*".repeat(token.len())
    } else {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    }
}
