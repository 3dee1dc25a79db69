use std::net::SocketAddr;

use axum::ServiceExt;
use axum::extract::Request;
use dotenvy::dotenv;
use taskshelf::config::ServerConfig;
use taskshelf::logging::{init_tracing, shutdown_tracer};
use taskshelf::metrics::{init_metrics, metrics_app};
use taskshelf::router::init_app;
use taskshelf::state::init_app_state;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        error!(error = %format!("{:#}", e), "Server failed");
        shutdown_tracer().await;
        std::process::exit(1);
    }

    shutdown_tracer().await;
}

async fn run() -> anyhow::Result<()> {
    let server_config = ServerConfig::from_env();

    if let Some(handle) = init_metrics() {
        let metrics_addr = server_config.metrics_addr;
        tokio::spawn(async move {
            match TcpListener::bind(metrics_addr).await {
                Ok(listener) => {
                    info!("📊 Metrics available at http://{}/metrics", metrics_addr);
                    if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                        warn!(error = %e, "Metrics server stopped");
                    }
                }
                Err(e) => warn!(error = %e, address = %metrics_addr, "Failed to bind metrics server"),
            }
        });
    }

    let state = init_app_state().await?;
    taskshelf_db::run_migrations(&state.db).await?;

    let app = init_app(state);

    let listener = TcpListener::bind(server_config.addr).await?;
    info!("🚀 Server running on http://{}", server_config.addr);
    info!("📚 Swagger UI available at http://{}/swagger-ui", server_config.addr);
    info!("📖 Scalar UI available at http://{}/scalar", server_config.addr);

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => warn!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
