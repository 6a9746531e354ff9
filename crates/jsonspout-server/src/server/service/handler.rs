//! Catch-all HTTP handler for the JSON stream.
//!
//! This module defines [`StreamService`], the axum state and router for the
//! server. Each request gets its own [`ResponseStream`] seeded with the
//! configured seed, so every client sees the identical byte sequence.
//!
//! ## Responsibilities
//!
//! - Answer every method and path with `200 OK` and a streaming body.
//! - Answer CORS preflights (`OPTIONS` with `Access-Control-Request-Method`)
//!   through the CORS layer. A bare `OPTIONS` streams like any other method.
//! - Hand out stream ids for log correlation.
//! - Tie every open body to the server's shutdown token.

use crate::server::{config::ServerConfig, streaming::body::ResponseStream};
use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

/// Media type of the response body: JSON texts back to back.
pub const JSON_STREAM_CONTENT_TYPE: &str = "application/x-json-stream";

/// Shared state behind every request.
///
/// Cloning is cheap; clones share the configuration, the shutdown token and
/// the stream id counter.
#[derive(Clone, Debug)]
pub struct StreamService {
    config: Arc<ServerConfig>,
    shutdown: CancellationToken,
    next_stream_id: Arc<AtomicU64>,
}

impl StreamService {
    /// Creates the service. Cancelling `shutdown` ends every open body.
    pub fn new(config: ServerConfig, shutdown: CancellationToken) -> Self {
        Self {
            config: Arc::new(config),
            shutdown,
            next_stream_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Builds the router: one fallback handler for all methods and paths.
    ///
    /// Preflights are diverted to a permissive CORS layer; every other
    /// response carries `Access-Control-Allow-Origin: *`.
    pub fn into_router(self) -> Router {
        let preflight = Router::new()
            .fallback(stream_json)
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(self.clone());

        Router::new()
            .fallback(stream_json)
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(middleware::from_fn_with_state(preflight, answer_preflight))
            .with_state(self)
    }

    /// Opens a fresh, independently seeded response body.
    pub fn open_stream(&self) -> ResponseStream {
        let stream_id = self.next_stream_id.fetch_add(1, Ordering::Relaxed);
        ResponseStream::new(
            self.config.seed,
            self.config.skip_empty_chunks,
            &self.shutdown,
            stream_id,
        )
    }
}

fn is_preflight(request: &Request) -> bool {
    request.method() == Method::OPTIONS
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Hands CORS preflights to `cors`; everything else continues to the stream.
async fn answer_preflight(State(cors): State<Router>, request: Request, next: Next) -> Response {
    if !is_preflight(&request) {
        return next.run(request).await;
    }
    match cors.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

/// Streams chunks of undelimited JSON until the client disconnects or the
/// server shuts down.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
async fn stream_json(State(service): State<StreamService>) -> Response {
    let body = Body::from_stream(service.open_stream());
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_STREAM_CONTENT_TYPE),
        )],
        body,
    )
        .into_response()
}
