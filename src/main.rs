use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use roleplay::clock::{Clock, SystemClock};
use roleplay::config::Config;
use roleplay::db::{PgResetTokenRepo, PgUserRepo, ResetTokenRepo, UserRepo};
use roleplay::email::{LogMailer, Mailer, SmtpMailer};
use roleplay::reset::PasswordResetService;
use roleplay::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env().expect("Failed to load configuration");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!("Starting Roleplay API");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Migrations applied");

    let mailer: Arc<dyn Mailer> = match config.smtp.as_ref() {
        Some(smtp) => match SmtpMailer::new(smtp) {
            Ok(mailer) => {
                tracing::info!("SMTP transport configured");
                Arc::new(mailer)
            }
            Err(e) => {
                tracing::warn!("SMTP not available: {e}");
                Arc::new(LogMailer)
            }
        },
        None => {
            tracing::warn!("SMTP not configured, outbound mail will be logged");
            Arc::new(LogMailer)
        }
    };

    let users: Arc<dyn UserRepo> = Arc::new(PgUserRepo::new(pool.clone()));
    let tokens: Arc<dyn ResetTokenRepo> = Arc::new(PgResetTokenRepo::new(pool.clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let reset = PasswordResetService::new(users.clone(), tokens, mailer, clock);
    let state = Arc::new(AppState { users, reset });

    let addr = SocketAddr::new(config.host, config.port);
    let app = roleplay::build_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
