mod error;
pub mod handlers;
pub mod types;

pub use error::IntakeError;

use crate::{
    Error, Result,
    config::{Config, ServerConfig},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{future::Future, io::ErrorKind, net::SocketAddr};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

pub fn router(config: &ServerConfig) -> Router {
    let routes = Router::new()
        .route(
            "/",
            get(handlers::root).fallback(handlers::method_not_allowed),
        )
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        .route(
            "/message",
            post(handlers::receive_message).fallback(handlers::method_not_allowed),
        )
        .route(
            "/data",
            post(handlers::receive_data).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found);

    with_middleware(routes, config)
}

/// Wraps `routes` in the body limit, panic catcher, request id and tracing
/// layers used by [`router`].
pub fn with_middleware(routes: Router, config: &ServerConfig) -> Router {
    routes
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(PropagateRequestIdLayer::x_request_id())
        // Panics are already logged once by `handle_panic`
        .layer(TraceLayer::new_for_http().on_failure(()))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid::default()))
}

/// Serves on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, config: &Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(&config.server);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    Ok(())
}

pub async fn run(config: Config) -> Result<()> {
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            error!("Port {} is already in use. Check for other instances.", addr.port());
            return Err(Error::AddrInUse { addr });
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        addr = %addr,
        max_body_bytes = config.server.max_body_bytes,
        "Starting server"
    );
    info!("Endpoints: POST /message, POST /data, GET /health, GET /");

    serve(listener, &config, shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
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
