//! Study gateway HTTP surface.
//!
//! Exposes the [`tutor::TutorService`] operations as JSON endpoints:
//!
//! | Method & Path | Operation | Success body |
//! |---------------|-----------|--------------|
//! | `POST /explain` | [`tutor::TutorService::explain`] | `{"explanation"}` |
//! | `POST /quiz` | [`tutor::TutorService::generate_quiz`] | `{"quiz_text", "time_per_question"}` |
//! | `POST /quiz/evaluate` | [`tutor::TutorService::evaluate_quiz`] | `{"evaluation_result"}` |
//! | `GET /health` | liveness | empty |
//!
//! Every failure is reported as `{"error": "<message>"}` through [`ApiError`]:
//! 400 for missing fields or malformed bodies, 500 for upstream failures.
//! Cross-origin requests are accepted from any origin.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Routing, body decoding, CORS and request spans live
//! here. Prompt content and validation rules stay in [`tutor`].

use std::future::Future;

use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info_span;
use tutor::TutorService;
use uuid::Uuid;

pub mod dto;
mod error;
mod handlers;

pub use error::ApiError;

/// Builds the gateway router around an injected service.
pub fn router(service: TutorService) -> Router {
    Router::new()
        .route("/explain", post(handlers::explain))
        .route("/quiz", post(handlers::generate_quiz))
        .route("/quiz/evaluate", post(handlers::evaluate_quiz))
        .route("/health", get(handlers::health))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                info_span!(
                    "http.request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            })
            // ApiError already logs 5xx responses with their message.
            .on_failure(()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(service)
}

/// Serves the gateway on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish once shutdown begins.
pub async fn serve<F>(
    listener: TcpListener,
    service: TutorService,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Study gateway listening");
    }

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await
}
