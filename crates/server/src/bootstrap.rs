use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use switchboard_agent::ActionHandler;
use switchboard_core::audit::{AuditEvent, AuditOutcome, AuditSink};
use switchboard_core::config::{AppConfig, ConfigError, LoadOptions};
use switchboard_db::{connect_with_settings, migrations, DbPool, SqlCallRecordRepository};
use switchboard_notify::{NoopChannel, NotificationChannel, WebhookChannel};
use switchboard_reputation::{EnvSecretStore, HttpReputationClient, SpamCheckService};

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub handler: Arc<ActionHandler>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

/// Audit sink for the running server: every audit event becomes a
/// structured log line.
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn emit(&self, event: AuditEvent) {
        let call_id =
            event.call_id.as_ref().map(|id| id.0.clone()).unwrap_or_else(|| "unknown".to_string());
        match event.outcome {
            AuditOutcome::Success => tracing::info!(
                event_name = %event.event_type,
                correlation_id = %event.correlation_id,
                call_id = %call_id,
                "audit event"
            ),
            AuditOutcome::Rejected | AuditOutcome::Failed => tracing::warn!(
                event_name = %event.event_type,
                correlation_id = %event.correlation_id,
                call_id = %call_id,
                "audit event"
            ),
        }
    }
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        call_id = "unknown",
        "starting application bootstrap"
    );

    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        call_id = "unknown",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        call_id = "unknown",
        "database migrations applied"
    );

    let handler = Arc::new(build_handler(&config, db_pool.clone()));

    Ok(Application { config, db_pool, handler })
}

fn build_handler(config: &AppConfig, db_pool: DbPool) -> ActionHandler {
    let records = Arc::new(SqlCallRecordRepository::new(db_pool));

    let channel: Arc<dyn NotificationChannel> = match &config.notifier.webhook_url {
        Some(webhook_url) => {
            Arc::new(WebhookChannel::new(webhook_url.clone(), config.notifier.timeout_secs))
        }
        None => Arc::new(NoopChannel),
    };
    info!(
        event_name = "system.bootstrap.notification_channel",
        correlation_id = "bootstrap",
        call_id = "unknown",
        channel = if config.notifier.webhook_url.is_some() { "webhook" } else { "noop" },
        "notification channel selected"
    );

    let spam = Arc::new(SpamCheckService::new(
        config.reputation.clone(),
        Arc::new(EnvSecretStore::new()),
        Arc::new(HttpReputationClient::new(
            config.reputation.base_url.clone(),
            config.reputation.timeout_secs,
        )),
    ));

    ActionHandler::new(records, channel, spam, Arc::new(TracingAuditSink))
}
