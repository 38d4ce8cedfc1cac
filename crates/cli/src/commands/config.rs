use std::env;
use std::path::{Path, PathBuf};

use secrecy::ExposeSecret;
use switchboard_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file = detect_config_path();

    let mut lines =
        vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "database.url",
        &config.database.url,
        source_for("SWITCHBOARD_DATABASE_URL", config_file.as_deref()),
    ));
    lines.push(render_line(
        "database.max_connections",
        &config.database.max_connections.to_string(),
        source_for("SWITCHBOARD_DATABASE_MAX_CONNECTIONS", config_file.as_deref()),
    ));
    lines.push(render_line(
        "reputation.enabled",
        &config.reputation.enabled.to_string(),
        source_for("SWITCHBOARD_REPUTATION_ENABLED", config_file.as_deref()),
    ));
    lines.push(render_line(
        "reputation.base_url",
        &config.reputation.base_url,
        source_for("SWITCHBOARD_REPUTATION_BASE_URL", config_file.as_deref()),
    ));
    lines.push(render_line(
        "reputation.api_key_secret",
        &config.reputation.api_key_secret,
        source_for("SWITCHBOARD_REPUTATION_API_KEY_SECRET", config_file.as_deref()),
    ));
    lines.push(render_line(
        "reputation.spam_line_types",
        &config.reputation.spam_line_types.join(","),
        source_for("SWITCHBOARD_REPUTATION_SPAM_LINE_TYPES", config_file.as_deref()),
    ));
    lines.push(render_line(
        "reputation.flagged_line_types",
        &config.reputation.flagged_line_types.join(","),
        source_for("SWITCHBOARD_REPUTATION_FLAGGED_LINE_TYPES", config_file.as_deref()),
    ));

    let webhook = config
        .notifier
        .webhook_url
        .as_ref()
        .map(|value| redact(value.expose_secret()))
        .unwrap_or_else(|| "<unset>".to_string());
    lines.push(render_line(
        "notifier.webhook_url",
        &webhook,
        source_for("SWITCHBOARD_NOTIFIER_WEBHOOK_URL", config_file.as_deref()),
    ));

    lines.push(render_line(
        "server.bind_address",
        &config.server.bind_address,
        source_for("SWITCHBOARD_SERVER_BIND_ADDRESS", config_file.as_deref()),
    ));
    lines.push(render_line(
        "server.port",
        &config.server.port.to_string(),
        source_for("SWITCHBOARD_SERVER_PORT", config_file.as_deref()),
    ));
    lines.push(render_line(
        "server.health_check_port",
        &config.server.health_check_port.to_string(),
        source_for("SWITCHBOARD_SERVER_HEALTH_CHECK_PORT", config_file.as_deref()),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source_for("SWITCHBOARD_LOGGING_LEVEL", config_file.as_deref()),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        source_for("SWITCHBOARD_LOGGING_FORMAT", config_file.as_deref()),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("switchboard.toml"), PathBuf::from("config/switchboard.toml")]
        .into_iter()
        .find(|path| path.exists())
}

// Coarse attribution: env beats file beats defaults, so reporting the first
// populated layer is enough for an operator to know where a value came from.
fn source_for(env_key: &str, config_file: Option<&Path>) -> String {
    if env::var(env_key).map(|value| !value.trim().is_empty()).unwrap_or(false) {
        return format!("env:{env_key}");
    }
    if let Some(path) = config_file {
        return format!("file:{}", path.display());
    }
    "default".to_string()
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("  {key} = {value} ({source})")
}

/// Keeps enough of a secret visible to recognize it without exposing it.
fn redact(value: &str) -> String {
    let visible: String = value.chars().take(12).collect();
    if value.chars().count() <= 12 {
        "<redacted>".to_string()
    } else {
        format!("{visible}…<redacted>")
    }
}
