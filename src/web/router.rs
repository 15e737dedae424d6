//! Router configuration for the Boards site.

use axum::{
    http::{header, Method, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::error::WebError;
use super::handlers::{
    board_topics, home, password_reset_complete, password_reset_confirm,
    password_reset_confirm_submit, password_reset_done, password_reset_form,
    password_reset_submit, AppState,
};
use super::middleware::security_headers;

const HOME: &str = "/";
const BOARD_TOPICS: &str = "/boards/:id/";
const RESET: &str = "/reset/";
const RESET_DONE: &str = "/reset/done/";
const RESET_COMPLETE: &str = "/reset/complete/";
const RESET_CONFIRM: &str = "/reset/:uidb64/:token/";

/// Every page route. All of them end in a slash.
const PAGE_ROUTES: [&str; 6] = [
    HOME,
    BOARD_TOPICS,
    RESET,
    RESET_DONE,
    RESET_COMPLETE,
    RESET_CONFIRM,
];

/// Create the site router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let board_routes = Router::new()
        .route(HOME, get(home))
        .route(BOARD_TOPICS, get(board_topics));

    let reset_routes = Router::new()
        .route(RESET, get(password_reset_form).post(password_reset_submit))
        .route(RESET_DONE, get(password_reset_done))
        .route(RESET_COMPLETE, get(password_reset_complete))
        .route(
            RESET_CONFIRM,
            get(password_reset_confirm).post(password_reset_confirm_submit),
        );

    Router::new()
        .merge(board_routes)
        .merge(reset_routes)
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Unmatched requests: redirect to the slashed URL when that names a page,
/// otherwise 404.
async fn fallback(method: Method, uri: Uri) -> Response {
    match append_slash(&method, &uri) {
        Some(location) => {
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
        }
        None => WebError::not_found("The requested page does not exist.").into_response(),
    }
}

/// Location with a trailing slash added to the path, if a GET or HEAD for it
/// would reach a page. The query string is kept.
fn append_slash(method: &Method, uri: &Uri) -> Option<String> {
    if *method != Method::GET && *method != Method::HEAD {
        return None;
    }

    let path = uri.path();
    if path.ends_with('/') {
        return None;
    }

    let slashed = format!("{path}/");
    if !PAGE_ROUTES.iter().any(|route| route_matches(route, &slashed)) {
        return None;
    }

    Some(match uri.query() {
        Some(query) => format!("{slashed}?{query}"),
        None => slashed,
    })
}

/// Match a path against a route, where `:name` stands for one non-empty segment.
fn route_matches(route: &str, path: &str) -> bool {
    let mut route_segments = route.split('/');
    let mut path_segments = path.split('/');

    loop {
        match (route_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(r), Some(p)) if r.starts_with(':') && !p.is_empty() => {}
            (Some(r), Some(p)) if r == p => {}
            _ => return false,
        }
    }
}
