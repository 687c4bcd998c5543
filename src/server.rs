//! HTTP surface: an axum router mounted under `/api`.

use std::time::Duration;

use axum::Router;
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::routing::get;
use axum::routing::post;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::DefaultMakeSpan;
use tower_http::trace::DefaultOnResponse;
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::server::routes::attorneys_handler;
use crate::server::routes::confirm_handler;
use crate::server::routes::consultation_handler;
use crate::server::routes::contact_handler;
use crate::server::routes::events_handler;
use crate::server::routes::news_handler;
use crate::server::routes::newsletters_handler;
use crate::server::routes::offices_handler;
use crate::server::routes::practice_areas_handler;
use crate::server::routes::subscribe_handler;
use crate::server::state::AppState;

pub mod error;
pub mod routes;
pub mod state;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/practice-areas", get(practice_areas_handler))
        .route("/news", get(news_handler))
        .route("/newsletters", get(newsletters_handler))
        .route("/attorneys", get(attorneys_handler))
        .route("/offices", get(offices_handler))
        .route("/events", get(events_handler))
        .route("/subscriptions", post(subscribe_handler))
        .route("/contacts", post(contact_handler))
        .route("/consultation", post(consultation_handler))
        .route("/confirm", get(confirm_handler));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(trace)
        .with_state(state)
}

/// Serves `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    if let Ok(address) = listener.local_addr() {
        info!("Server running on {address}");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Ctrl+C received, shutting down.");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::SignalKind;
        use tokio::signal::unix::signal;

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down.");
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {e}");
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
}
