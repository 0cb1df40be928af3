//! API Routes Module
//!
//! # Routes
//! - `/` - banner
//! - `/health` - health check
//! - `/wells` - list (GET) / create (POST)
//! - `/wells/:id` - get (GET) / replace (PUT) / delete (DELETE)

pub mod extract;
pub mod health;
pub mod wells;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, AppState};

/// Build the application router
///
/// # Route Structure
///
/// ```text
/// GET    /              - banner
/// GET    /health        - server and database status
///
/// GET    /wells         - list wells (?limit=&offset=)
/// POST   /wells         - create a well
/// GET    /wells/:id     - fetch one well
/// PUT    /wells/:id     - replace a well
/// DELETE /wells/:id     - delete a well
/// ```
pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    let routes = Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health_check))

        // Wells
        .route("/wells", get(wells::list_wells).post(wells::create_well))
        .route(
            "/wells/:id",
            get(wells::get_well)
                .put(wells::update_well)
                .delete(wells::delete_well),
        );

    with_middleware(routes, &config).with_state(state)
}

/// Shared middleware stack
///
/// Last added runs first. The request id is propagated outside the timeout
/// so a 408 produced by [`TimeoutLayer`] still carries `x-request-id`.
fn with_middleware<S>(router: Router<S>, config: &Config) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors(config))
}

fn cors(config: &Config) -> CorsLayer {
    if config.is_production() {
        // production: only configured origins
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
