//! # Minimal HTTP Handler
//!
//! A single request handler that does its own path matching, for deployments
//! that mount one function behind a URL (serverless style). It answers the
//! same seven routes as the framework router but has no `/health` route and
//! reports errors as plain text.
//!
//! Query strings follow the usual form-decoding rules: the first occurrence
//! of a key wins and blank values are dropped.

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use url::form_urlencoded;

use crate::{Dispatcher, Endpoint, ParameterSet, router::status_code};

fn parse_query(uri: &Uri) -> ParameterSet {
    let mut params = ParameterSet::new();
    let Some(query) = uri.query() else {
        return params;
    };
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if !value.is_empty() && params.get(&key).is_none() {
            params.insert(key.into_owned(), value.into_owned());
        }
    }
    params
}

fn send_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        message.to_string(),
    )
        .into_response()
}

/// Serves one request.
pub async fn handle(dispatcher: &Dispatcher, method: &Method, uri: &Uri) -> Response {
    if *method != Method::GET {
        return send_error(
            StatusCode::NOT_IMPLEMENTED,
            &format!("Unsupported method ('{}')", method),
        );
    }
    let Some(endpoint) = uri
        .path()
        .strip_prefix('/')
        .and_then(|name| name.parse::<Endpoint>().ok())
    else {
        return send_error(StatusCode::NOT_FOUND, "Endpoint not found");
    };

    let params = parse_query(uri);
    match dispatcher.dispatch(endpoint, &params).await {
        Ok(result) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            ],
            result.to_string(),
        )
            .into_response(),
        Err(e) => send_error(status_code(&e), &e.to_string()),
    }
}

async fn fallback(State(dispatcher): State<Dispatcher>, request: Request<Body>) -> Response {
    handle(&dispatcher, request.method(), request.uri()).await
}

/// Wraps [`handle`] as a router that sends every request to it.
pub fn create_raw_router(dispatcher: Dispatcher) -> Router {
    Router::new().fallback(fallback).with_state(dispatcher)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum_test::TestServer;
    use serde_json::json;

    use super::*;
    use crate::Query;
    use crate::test_utils::test_helpers::{failing_dispatcher, recording_dispatcher};

    #[test]
    fn first_value_wins_and_blanks_are_dropped() {
        let uri: Uri = "/weekend?year=2023&year=1999&week=&week=4&x=%20y"
            .parse()
            .unwrap();
        let params = parse_query(&uri);
        assert_eq!(params.get("year"), Some("2023"));
        assert_eq!(params.get("week"), Some("4"));
        assert_eq!(params.get("x"), Some(" y"));
    }

    #[tokio::test]
    async fn serves_json_with_cors() {
        let (dispatcher, provider) = recording_dispatcher(json!({"rank": 1, "title": "X"}));
        let server = TestServer::new(create_raw_router(dispatcher)).unwrap();

        let response = server
            .get("/daily")
            .add_query_param("date", "2023-01-01")
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({"rank": 1, "title": "X"}));
        assert_eq!(
            response.header("access-control-allow-origin"),
            HeaderValue::from_static("*")
        );
        assert_eq!(
            response.header("content-type"),
            HeaderValue::from_static("application/json")
        );
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn seasonal_passes_season_through() {
        let (dispatcher, provider) = recording_dispatcher(json!([]));
        let server = TestServer::new(create_raw_router(dispatcher)).unwrap();

        server
            .get("/seasonal")
            .add_query_param("year", "2022")
            .add_query_param("season", "winter")
            .await
            .assert_status_ok();
        assert_eq!(
            provider.calls(),
            vec![Query::Season {
                year: 2022,
                season: "winter".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn missing_parameter_is_plain_text_400() {
        let (dispatcher, provider) = recording_dispatcher(json!([]));
        let server = TestServer::new(create_raw_router(dispatcher)).unwrap();

        let response = server.get("/daily").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text("Date parameter is required");
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn health_is_not_served() {
        let (dispatcher, _) = recording_dispatcher(json!([]));
        let server = TestServer::new(create_raw_router(dispatcher)).unwrap();

        let response = server.get("/health").await;
        response.assert_status_not_found();
        response.assert_text("Endpoint not found");
    }

    #[tokio::test]
    async fn provider_failure_is_500_with_message() {
        let (dispatcher, _) = failing_dispatcher("upstream timed out");
        let server = TestServer::new(create_raw_router(dispatcher)).unwrap();

        let response = server
            .get("/monthly")
            .add_query_param("year", "2023")
            .add_query_param("month", "5")
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_text("upstream timed out");
    }

    #[tokio::test]
    async fn coercion_failure_is_500() {
        let (dispatcher, provider) = recording_dispatcher(json!([]));
        let server = TestServer::new(create_raw_router(dispatcher)).unwrap();

        let response = server
            .get("/quarterly")
            .add_query_param("year", "2023")
            .add_query_param("quarter", "two")
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_text("Invalid quarter: 'two' is not an integer");
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn non_get_is_not_implemented() {
        let (dispatcher, _) = recording_dispatcher(json!([]));
        let server = TestServer::new(create_raw_router(dispatcher)).unwrap();

        server
            .post("/daily")
            .add_query_param("date", "2023-01-01")
            .await
            .assert_status(StatusCode::NOT_IMPLEMENTED);
    }
}
