//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use twilio::{TwilioOptions, TwilioService};

use crate::config::Config;
use crate::domains::auth::{AdminCredentials, JwtService};
use crate::kernel::{FsTranscriptStore, ServerDeps, TwilioAdapter};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    call_counts_handler, call_recordings_handler, error_messages_handler, get_recording_handler,
    get_transcript_handler, health_handler, list_calls_handler, list_recordings_handler,
    list_transcripts_handler, login_handler,
};

/// Build production dependencies from configuration
///
/// Hashes the admin password once; this is the slow part of startup.
pub fn build_deps(config: &Config) -> Result<ServerDeps> {
    let twilio = Arc::new(TwilioService::new(TwilioOptions {
        account_sid: config.twilio_account_sid.clone(),
        auth_token: config.twilio_auth_token.clone(),
    }));

    let admin = AdminCredentials::new(&config.admin_email, &config.admin_password)?;

    Ok(ServerDeps::new(
        Arc::new(TwilioAdapter::new(twilio)),
        Arc::new(FsTranscriptStore::new(config.transcript_dir.clone())),
        Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone())),
        Arc::new(admin),
    ))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(tower_http::cors::Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the Axum application router
///
/// Everything under /api except /api/login sits behind the JWT gate.
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = deps.jwt_service.clone();

    let protected = Router::new()
        .route("/api/calls", get(list_calls_handler))
        .route("/api/calls/counts", get(call_counts_handler))
        .route("/api/call/:sid/recordings", get(call_recordings_handler))
        .route("/api/recordings", get(list_recordings_handler))
        .route("/api/recording/:id", get(get_recording_handler))
        .route("/api/errors/messages", get(error_messages_handler))
        .route("/api/transcripts", get(list_transcripts_handler))
        .route("/api/transcript/:recording_id", get(get_transcript_handler))
        // route_layer: unknown paths still 404 instead of 401
        .route_layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }));

    Router::new()
        .route("/api/login", post(login_handler))
        .route("/health", get(health_handler))
        .merge(protected)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(deps))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
