//! # Framework HTTP Routes
//!
//! Axum router exposing one `GET` route per endpoint plus `/health` and the
//! OpenAPI document at `/api-docs`.
//!
//! | Route        | Query parameters     |
//! |--------------|----------------------|
//! | `/daily`     | `date`               |
//! | `/weekend`   | `year`, `week`       |
//! | `/weekly`    | `year`, `week`       |
//! | `/monthly`   | `year`, `month`      |
//! | `/seasonal`  | `year`, `season`     |
//! | `/quarterly` | `year`, `quarter`    |
//! | `/yearly`    | `year`                |
//!
//! A repeated query key binds its first value, and a blank first value counts
//! as missing.
//!
//! Errors are returned as `{"error": "<message>"}` with the status given by
//! [`status_code`].

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::{DispatchError, Dispatcher, Endpoint, ParameterSet, openapi};

/// The HTTP status a dispatch error maps to.
pub fn status_code(error: &DispatchError) -> StatusCode {
    match error {
        DispatchError::UnknownEndpoint { .. } => StatusCode::NOT_FOUND,
        DispatchError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
        DispatchError::InvalidParameter { .. } | DispatchError::ProviderFailure(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// A dispatch error rendered as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub DispatchError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.0.to_string() }));
        (status_code(&self.0), body).into_response()
    }
}

impl From<DispatchError> for ApiError {
    fn from(e: DispatchError) -> Self {
        ApiError(e)
    }
}

async fn health() -> &'static str {
    "OK!"
}

async fn api_docs() -> Json<Value> {
    Json(openapi::document())
}

async fn query_endpoint(
    endpoint: Endpoint,
    dispatcher: Dispatcher,
    pairs: Vec<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let params = ParameterSet::from_query_pairs(pairs);
    let result = dispatcher.dispatch(endpoint, &params).await?;
    Ok(Json(result))
}

/// Creates the router for the framework variant.
///
/// # Routes
/// - `GET /health` - Liveness probe returning `OK!`
/// - `GET /api-docs` - OpenAPI 3.0 description of the routes
/// - `GET /{endpoint}` - One route per [`Endpoint`]
pub fn create_router(dispatcher: Dispatcher) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/api-docs", get(api_docs));

    for endpoint in Endpoint::ALL {
        router = router.route(
            &format!("/{}", endpoint.name()),
            get(
                move |State(dispatcher): State<Dispatcher>,
                      Query(pairs): Query<Vec<(String, String)>>| async move {
                    query_endpoint(endpoint, dispatcher, pairs).await
                },
            ),
        );
    }

    router
        .with_state(dispatcher)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
