//! Application router: both poll variants, health, and the tower-http stack.

use std::sync::Arc;

use axum::{routing::get, Router};
use http::{header::CONTENT_TYPE, HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::ServerConfig;
use crate::domain::poll::{MoodLevel, Profile};
use crate::ports::PollRepository;

use super::poll::{health, poll_routes, PollAppState};

/// Mount point of the categorical (profile) poll.
pub const PROFILE_PREFIX: &str = "/api/sessions";

/// Mount point of the mood poll.
pub const MOOD_PREFIX: &str = "/api/mood-swing/sessions";

/// Builds the full HTTP application.
pub fn app_router(
    profiles: Arc<dyn PollRepository<Profile>>,
    moods: Arc<dyn PollRepository<MoodLevel>>,
    server: &ServerConfig,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(PROFILE_PREFIX, poll_routes(PollAppState::new(profiles)))
        .nest(MOOD_PREFIX, poll_routes(PollAppState::new(moods)))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(server))
                .layer(TimeoutLayer::new(server.request_timeout()))
                .layer(CompressionLayer::new()),
        )
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPollRepository;

    #[test]
    fn app_router_builds_with_configured_origins() {
        let server = ServerConfig {
            cors_origins: Some("http://localhost:5173,\u{7f}bad".to_string()),
            ..Default::default()
        };
        let _router = app_router(
            Arc::new(InMemoryPollRepository::<Profile>::with_defaults()),
            Arc::new(InMemoryPollRepository::<MoodLevel>::with_defaults()),
            &server,
        );
    }
}
