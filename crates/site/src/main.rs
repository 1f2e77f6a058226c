//! Jungle Park site server binary.
//!
//! Loads configuration, prepares the data directory, and serves the
//! public site and the admin panel on one port.

#![cfg_attr(not(test), forbid(unsafe_code))]

use jungle_park_site::config::SiteConfig;
use jungle_park_site::services::auth::INITIAL_ROOT_PASSWORD;
use jungle_park_site::state::AppState;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter.
    // Defaults to debug level for our crate if RUST_LOG is not set.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "jungle_park_site=debug,info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = SiteConfig::from_env().expect("Failed to load configuration");

    // Build application state (opens the JSON store, loads translations)
    let state = AppState::new(config.clone()).expect("Failed to initialize application state");

    // Make sure settings.json and the root account exist
    let root_created = jungle_park_site::bootstrap(&state)
        .await
        .expect("Failed to prepare data directory");
    if root_created {
        if state.config().root_password.is_some() {
            tracing::info!("Created root account with the password from ROOT_PASSWORD");
        } else {
            tracing::warn!(
                "Created root account with the initial password '{INITIAL_ROOT_PASSWORD}'; \
                 it must be changed on first login"
            );
        }
    }

    let app = jungle_park_site::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("jungle-park-site listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
