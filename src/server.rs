use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::account_gate;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let security = &state.config.security;
    let api = &state.config.api;

    let mut router = Router::new()
        // Public
        .merge(public_routes())
        // Gated by token bound to the account in the path
        .merge(account_routes(state.clone()))
        .with_state(state.clone());

    // Global middleware
    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/login", post(public::login))
        .route("/account", get(public::account_list).post(public::account_create))
        .route("/transfer", post(public::transfer_create))
}

fn account_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/account/:id",
            get(protected::account_get).delete(protected::account_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, account_gate))
}

/// Serve until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
