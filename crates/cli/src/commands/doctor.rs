use serde::Serialize;
use switchboard_core::config::{AppConfig, LoadOptions};
use switchboard_db::connect_with_settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_reputation_readiness(&config));
            checks.push(check_notifier_readiness(&config));
            checks.push(check_database_connectivity(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in
                ["reputation_readiness", "notifier_readiness", "database_connectivity"]
            {
                checks.push(skipped_check(name));
            }
        }
    }

    let all_healthy =
        checks.iter().all(|check| check.status != CheckStatus::Fail);
    let overall_status = if all_healthy { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_healthy {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn skipped_check(name: &'static str) -> DoctorCheck {
    DoctorCheck {
        name,
        status: CheckStatus::Skipped,
        details: "skipped because configuration did not load".to_string(),
    }
}

fn check_reputation_readiness(config: &AppConfig) -> DoctorCheck {
    if !config.reputation.enabled {
        return DoctorCheck {
            name: "reputation_readiness",
            status: CheckStatus::Skipped,
            details: "spam detection is disabled; checks run in fail-open no-op mode".to_string(),
        };
    }

    match std::env::var(&config.reputation.api_key_secret) {
        Ok(value) if !value.trim().is_empty() => DoctorCheck {
            name: "reputation_readiness",
            status: CheckStatus::Pass,
            details: format!(
                "credential secret `{}` resolves",
                config.reputation.api_key_secret
            ),
        },
        _ => DoctorCheck {
            name: "reputation_readiness",
            status: CheckStatus::Fail,
            details: format!(
                "credential secret `{}` does not resolve; spam checks will fail open",
                config.reputation.api_key_secret
            ),
        },
    }
}

fn check_notifier_readiness(config: &AppConfig) -> DoctorCheck {
    match &config.notifier.webhook_url {
        Some(_) => DoctorCheck {
            name: "notifier_readiness",
            status: CheckStatus::Pass,
            details: "webhook endpoint configured".to_string(),
        },
        None => DoctorCheck {
            name: "notifier_readiness",
            status: CheckStatus::Skipped,
            details: "no webhook configured; notifications use the noop channel".to_string(),
        },
    }
}

fn check_database_connectivity(config: &AppConfig) -> DoctorCheck {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return DoctorCheck {
                name: "database_connectivity",
                status: CheckStatus::Fail,
                details: format!("failed to initialize async runtime: {error}"),
            };
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

        pool.close().await;
        Ok::<(), String>(())
    });

    match result {
        Ok(()) => DoctorCheck {
            name: "database_connectivity",
            status: CheckStatus::Pass,
            details: format!("connected using `{}`", config.database.url),
        },
        Err(error) => {
            DoctorCheck { name: "database_connectivity", status: CheckStatus::Fail, details: error }
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
