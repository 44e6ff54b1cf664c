//! Events API webhook server

pub mod events;
pub mod signature;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::application::errors::BotError;
use crate::application::services::CommandService;
use events::{CallbackEvent, Envelope};
pub use signature::{SignatureError, SignatureVerifier};

#[derive(Clone)]
pub struct WebhookState {
    verifier: Arc<SignatureVerifier>,
    commands: Arc<CommandService>,
}

impl WebhookState {
    pub fn new(verifier: SignatureVerifier, commands: Arc<CommandService>) -> Self {
        Self {
            verifier: Arc::new(verifier),
            commands,
        }
    }
}

/// Routes: `POST {events_path}` for Slack, `GET /health` for probes
pub fn router(events_path: &str, state: WebhookState) -> Router {
    Router::new()
        .route(events_path, post(handle_events))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Server listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> &'static str {
    "ok"
}

async fn handle_events(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable request body");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };
    tracing::debug!(bytes = body.len(), "Received event callback");

    if let Err(e) = state.verifier.verify(&headers, &body) {
        tracing::warn!(error = %e, "Rejected webhook request");
        return e.status().into_response();
    }

    let envelope = match events::decode(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse event");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match envelope {
        Envelope::UrlVerification { challenge } => {
            tracing::info!("Event type url verification");
            ([(header::CONTENT_TYPE, "text/plain")], challenge).into_response()
        }
        Envelope::EventCallback { event: CallbackEvent::AppMention(mention) } => {
            tracing::debug!(
                channel = %mention.channel,
                user = %mention.user,
                text = %mention.text,
                "App mention event"
            );
            match state
                .commands
                .handle_mention(&mention.channel, &mention.user, &mention.text)
                .await
            {
                Ok(Some(_)) => {}
                Ok(None) => tracing::debug!("Mention had no command"),
                Err(BotError::NotFound(reason)) => {
                    tracing::warn!(%reason, "Bot identity unresolved, mention skipped")
                }
                Err(e) => tracing::error!(error = %e, "Failed to handle mention"),
            }
            StatusCode::OK.into_response()
        }
        Envelope::EventCallback { event: CallbackEvent::Other } | Envelope::Other => {
            tracing::debug!("Ignoring event");
            StatusCode::OK.into_response()
        }
    }
}
