//! Server entry point: config, logging, store wiring, graceful shutdown.

use log::{error, info};
use memo_core::db::open_db;
use memo_core::{SqliteTaskRepository, TaskStore};
use memo_server::{build_router, AppState, ServerConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error loading configuration: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) =
        memo_core::init_logging(&config.log_level, &config.log_dir.to_string_lossy())
    {
        eprintln!("error initializing logging: {err}");
        std::process::exit(1);
    }

    let store = match open_db(&config.db_path).map_err(Into::into).and_then(SqliteTaskRepository::try_new) {
        Ok(repo) => Arc::new(TaskStore::new(repo)),
        Err(err) => {
            error!("event=server_start module=server status=error error={err}");
            eprintln!("error opening database {}: {err}", config.db_path.display());
            std::process::exit(1);
        }
    };

    let app = build_router(AppState { store }, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("event=server_start module=server status=error error={err}");
            eprintln!("error binding {}: {err}", config.bind_addr);
            std::process::exit(1);
        }
    };

    info!(
        "event=server_start module=server status=ok addr={}",
        config.bind_addr
    );
    println!("memo server listening on http://{}", config.bind_addr);

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("event=server_stop module=server status=error error={err}");
        std::process::exit(1);
    }

    info!("event=server_stop module=server status=ok");
}

/// Resolves when ctrl-c or SIGTERM arrives, triggering graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }
}
