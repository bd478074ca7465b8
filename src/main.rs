//! Expomeet server binary.
//!
//! Wires the Postgres adapters into the application handlers, mounts the
//! HTTP surface, and serves until interrupted.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use expomeet::adapters::auth::{JwtConfig, JwtSessionValidator};
use expomeet::adapters::http::{app_router, AuthState, MeetingHandlers, ScheduleHandlers};
use expomeet::adapters::notification::{HttpNotifier, HttpNotifierConfig};
use expomeet::adapters::postgres::{
    PostgresAttendanceLog, PostgresConnectionGate, PostgresEventDirectory, PostgresMeetingReader,
    PostgresMeetingRequestRepository, PostgresParticipantRepository, PostgresSlotSheetRepository,
};
use expomeet::adapters::InMemoryNotifier;
use expomeet::application::handlers::{
    CancelRequestHandler, GenerateSheetHandler, ListAvailableSlotsHandler,
    ListConfirmedMeetingsHandler, ListPendingRequestsHandler, ReconcileSheetsCommand,
    ReconcileSheetsHandler, RequestSlotHandler, RespondToRequestHandler, SetSlotVisibilityHandler,
};
use expomeet::config::AppConfig;
use expomeet::domain::foundation::Timestamp;
use expomeet::ports::{
    AttendanceLog, ConnectionGate, EventDirectory, MeetingReader, MeetingRequestRepository,
    Notifier, ParticipantRepository, SlotSheetRepository,
};

/// Delay between repair sweeps over the sheets of events still in play.
const RECONCILE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config);

    info!(environment = ?config.server.environment, "Starting expomeet server");

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(config.database.url.expose_secret())
        .await?;
    info!("Database pool ready");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");
    }

    let sheets: Arc<dyn SlotSheetRepository> =
        Arc::new(PostgresSlotSheetRepository::new(pool.clone()));
    let requests: Arc<dyn MeetingRequestRepository> =
        Arc::new(PostgresMeetingRequestRepository::new(pool.clone()));
    let events: Arc<dyn EventDirectory> = Arc::new(PostgresEventDirectory::new(pool.clone()));
    let connections: Arc<dyn ConnectionGate> = Arc::new(PostgresConnectionGate::new(pool.clone()));
    let attendance: Arc<dyn AttendanceLog> = Arc::new(PostgresAttendanceLog::new(pool.clone()));
    let participants: Arc<dyn ParticipantRepository> =
        Arc::new(PostgresParticipantRepository::new(pool.clone()));
    let meeting_reader: Arc<dyn MeetingReader> = Arc::new(PostgresMeetingReader::new(pool));

    let notifier: Arc<dyn Notifier> = if config.notification.enabled {
        Arc::new(HttpNotifier::new(HttpNotifierConfig::new(
            config.notification.base_url.clone(),
            config.notification.api_key.clone(),
        )))
    } else {
        info!("Notification delivery disabled");
        Arc::new(InMemoryNotifier::new())
    };

    let schedule_handlers = ScheduleHandlers::new(
        Arc::new(GenerateSheetHandler::new(sheets.clone(), events.clone())),
        Arc::new(SetSlotVisibilityHandler::new(sheets.clone())),
        Arc::new(ListAvailableSlotsHandler::new(
            sheets.clone(),
            connections.clone(),
            attendance,
        )),
    );
    let meeting_handlers = MeetingHandlers::new(
        Arc::new(RequestSlotHandler::new(
            sheets.clone(),
            requests.clone(),
            connections,
            participants.clone(),
            notifier.clone(),
        )),
        Arc::new(RespondToRequestHandler::new(
            requests.clone(),
            sheets.clone(),
            participants.clone(),
            notifier.clone(),
        )),
        Arc::new(CancelRequestHandler::new(
            requests.clone(),
            sheets.clone(),
            participants,
            notifier,
        )),
        Arc::new(ListConfirmedMeetingsHandler::new(meeting_reader.clone())),
        Arc::new(ListPendingRequestsHandler::new(meeting_reader)),
    );

    let validator: AuthState = Arc::new(JwtSessionValidator::new(JwtConfig::new(
        config.auth.jwt_issuer.clone(),
        config.auth.jwt_secret.clone(),
    )));

    spawn_reconcile_sweep(ReconcileSheetsHandler::new(sheets, requests), events);

    let app = app_router(
        schedule_handlers,
        meeting_handlers,
        validator,
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Installs the tracing subscriber.
///
/// `RUST_LOG` overrides the configured filter. Production emits JSON lines.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Spawns the periodic repair sweep.
///
/// A crash between a guarded slot update and its companion request write
/// leaves the pair out of step; the sweep applies the transition the
/// interrupted operation never got to. The first pass runs immediately.
fn spawn_reconcile_sweep(handler: ReconcileSheetsHandler, events: Arc<dyn EventDirectory>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(RECONCILE_INTERVAL);
        loop {
            ticker.tick().await;
            let event_ids = match events.active_event_ids(Timestamp::now().date()).await {
                Ok(ids) => ids,
                Err(e) => {
                    error!(error = %e, "Reconciliation sweep could not list events");
                    continue;
                }
            };
            for event_id in event_ids {
                match handler.handle(ReconcileSheetsCommand { event_id }).await {
                    Ok(report) => {
                        if report.slots_released > 0
                            || report.slots_booked > 0
                            || report.inconsistencies_reported > 0
                        {
                            warn!(
                                event_id = %event_id,
                                slots_released = report.slots_released,
                                slots_booked = report.slots_booked,
                                inconsistencies = report.inconsistencies_reported,
                                "Reconciliation sweep repaired slots"
                            );
                        }
                    }
                    Err(e) => {
                        error!(event_id = %event_id, error = %e, "Reconciliation sweep failed");
                    }
                }
            }
        }
    });
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
