//! Hydrate Server: hydration reminder scheduling and delivery.
//!
//! Main entry point that wires all crates together and runs the selected
//! command.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt};

use hydrate_api::{AppState, build_router};
use hydrate_core::config::AppConfig;
use hydrate_core::traits::transport::{PushTransport, SmsTransport, TextGenerator};
use hydrate_database::DatabasePool;
use hydrate_database::repositories::{
    AnalyticsRepository, EventRepository, MilestoneRepository, PreferencesRepository,
    ScheduledNotificationRepository, StreakRepository,
};
use hydrate_delivery::{FcmPushTransport, GeminiTextGenerator, TwilioSmsTransport};
use hydrate_service::{
    AnalyticsRecorder, DeliveryDispatcher, FrequencyPolicy, MessageComposer, MilestoneTracker,
    ProgressTracker, ReminderOrchestrator, ScheduledDelivery,
};
use hydrate_worker::{BatchRunner, CronScheduler, ReminderJobHandler};

/// Hydration reminder engine.
#[derive(Debug, Parser)]
#[command(name = "hydrate-server", version, about)]
struct Cli {
    /// Configuration overlay to merge over `config/default.toml`.
    #[arg(long, default_value = "development")]
    config_env: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API and the batch scheduler.
    Serve,
    /// Run one batch over the scheduled queue and exit.
    Drain,
    /// Load and validate configuration, then exit.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config_env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let result = match cli.command {
        Command::Serve => serve(config).await,
        Command::Drain => drain(config).await,
        Command::CheckConfig => {
            check_config(&config);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Fully-wired services sharing one database pool.
struct Engine {
    database: DatabasePool,
    reminders: Arc<ReminderOrchestrator>,
    batch: Arc<BatchRunner>,
}

async fn build_engine(config: &AppConfig) -> anyhow::Result<Engine> {
    tracing::info!("Starting Hydrate v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let database = DatabasePool::connect(&config.database)
        .await
        .context("Database connection failed")?;
    hydrate_database::migration::run_migrations(database.pool())
        .await
        .context("Migration failed")?;

    // ── Transports ───────────────────────────────────────────────
    let push: Option<Arc<dyn PushTransport>> = FcmPushTransport::from_config(&config.push)
        .context("Push transport init failed")?
        .map(|t| Arc::new(t) as Arc<dyn PushTransport>);
    let sms = TwilioSmsTransport::from_config(&config.sms).context("SMS transport init failed")?;
    let sms_from = sms.as_ref().map(|t| t.from_number().to_string());
    let sms: Option<Arc<dyn SmsTransport>> = sms.map(|t| Arc::new(t) as Arc<dyn SmsTransport>);
    let generator: Option<Arc<dyn TextGenerator>> =
        GeminiTextGenerator::from_config(&config.generation)
            .context("Text generator init failed")?
            .map(|g| Arc::new(g) as Arc<dyn TextGenerator>);

    tracing::info!(
        push = push.is_some(),
        sms = sms.is_some(),
        generation = generator.is_some(),
        "Transports initialized"
    );

    // ── Repositories ─────────────────────────────────────────────
    let pool: PgPool = database.pool().clone();
    let preferences = Arc::new(PreferencesRepository::new(pool.clone()));
    let events = Arc::new(EventRepository::new(pool.clone()));
    let streaks = Arc::new(StreakRepository::new(pool.clone()));
    let milestones = Arc::new(MilestoneRepository::new(pool.clone()));
    let queue = Arc::new(ScheduledNotificationRepository::new(pool.clone()));
    let analytics = AnalyticsRecorder::new(Arc::new(AnalyticsRepository::new(pool)));

    // ── Services ─────────────────────────────────────────────────
    let composer = MessageComposer::new(
        generator,
        Duration::from_secs(config.generation.timeout_seconds),
        config.generation.temperature,
    );
    let dispatcher = DeliveryDispatcher::new(push, sms, sms_from);

    let reminders = ReminderOrchestrator::new(
        preferences.clone(),
        ProgressTracker::new(
            events,
            streaks.clone(),
            config.reminder.streak_history_days,
        ),
        FrequencyPolicy::new(config.reminder.tiers.clone()),
        MilestoneTracker::new(milestones),
        composer.clone(),
        dispatcher.clone(),
        analytics.clone(),
    );

    let handler = ReminderJobHandler::new(ScheduledDelivery::new(
        preferences,
        streaks,
        composer,
        dispatcher,
        analytics,
    ));
    let batch = BatchRunner::new(queue, Arc::new(handler), config.worker.clone());

    Ok(Engine {
        database,
        reminders: Arc::new(reminders),
        batch: Arc::new(batch),
    })
}

/// Run the HTTP API and, if enabled, the cron scheduler.
async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let engine = build_engine(&config).await?;

    let scheduler = if config.worker.enabled {
        let scheduler = CronScheduler::new(Arc::clone(&engine.batch)).await?;
        scheduler.register_batch_drain().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Batch scheduler disabled");
        None
    };

    let state = AppState {
        config: Arc::new(config.clone()),
        reminders: engine.reminders,
        batch: engine.batch,
        database: Some(engine.database.clone()),
    };
    let app = build_router(state);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    engine.database.close().await;
    tracing::info!("Hydrate shut down complete");
    Ok(())
}

/// Run a single batch and print its report.
async fn drain(config: AppConfig) -> anyhow::Result<()> {
    let engine = build_engine(&config).await?;
    let report = engine.batch.run_once(Utc::now()).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    engine.database.close().await;
    Ok(())
}

fn check_config(config: &AppConfig) {
    println!("Configuration OK");
    println!("  server:     {}", config.server.bind_address());
    println!("  push:       {}", status(config.push.is_configured()));
    println!("  sms:        {}", status(config.sms.is_configured()));
    println!("  generation: {}", status(config.generation.is_configured()));
    println!(
        "  worker:     {} ({})",
        status(config.worker.enabled),
        config.worker.schedule
    );
}

fn status(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
