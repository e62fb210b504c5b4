//! OpenAPI 3.0 description of the framework routes, derived from the endpoint table.

use serde_json::{Map, Value, json};

use crate::{Endpoint, ParamKind, ParamSpec, SEASONS};

fn summary(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::Daily => "Get daily box office data",
        Endpoint::Weekend => "Get weekend box office data",
        Endpoint::Weekly => "Get weekly box office data",
        Endpoint::Monthly => "Get monthly box office data",
        Endpoint::Seasonal => "Get seasonal box office data",
        Endpoint::Quarterly => "Get quarterly box office data",
        Endpoint::Yearly => "Get yearly box office data",
    }
}

fn parameter(spec: &ParamSpec) -> Value {
    let (schema, description) = match (spec.name, spec.kind) {
        ("date", _) => (
            json!({"type": "string", "format": "date"}),
            "Date in YYYY-MM-DD format",
        ),
        ("season", _) => (
            json!({"type": "string", "enum": SEASONS}),
            "Season name",
        ),
        ("year", _) => (json!({"type": "integer"}), "Year (e.g., 2024)"),
        ("week", _) => (
            json!({"type": "integer", "minimum": 1, "maximum": 53}),
            "Week number",
        ),
        ("month", _) => (
            json!({"type": "integer", "minimum": 1, "maximum": 12}),
            "Month number (1-12)",
        ),
        ("quarter", _) => (
            json!({"type": "integer", "enum": [1, 2, 3, 4]}),
            "Quarter number (1-4)",
        ),
        (_, ParamKind::Integer) => (json!({"type": "integer"}), ""),
        (_, ParamKind::Text) => (json!({"type": "string"}), ""),
    };
    json!({
        "in": "query",
        "name": spec.name,
        "required": true,
        "schema": schema,
        "description": description,
    })
}

fn operation(endpoint: Endpoint) -> Value {
    let parameters: Vec<Value> = endpoint.query_params().iter().map(parameter).collect();
    json!({
        "get": {
            "summary": summary(endpoint),
            "parameters": parameters,
            "responses": {
                "200": {
                    "description": format!("Box office data for the specified {}", endpoint),
                    "content": {"application/json": {"schema": {}}}
                },
                "400": {"description": endpoint.missing_message()},
                "500": {"description": "Invalid parameter or provider failure"}
            }
        }
    })
}

/// Builds the OpenAPI document served at `/api-docs`.
pub fn document() -> Value {
    let mut paths = Map::new();
    paths.insert(
        "/health".to_string(),
        json!({
            "get": {
                "summary": "Health check endpoint",
                "description": "Returns OK if the server is running",
                "responses": {
                    "200": {
                        "description": "Server is running",
                        "content": {"text/plain": {"schema": {"type": "string", "example": "OK!"}}}
                    }
                }
            }
        }),
    );
    for endpoint in Endpoint::ALL {
        paths.insert(format!("/{}", endpoint.name()), operation(endpoint));
    }
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Box Office API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "API documentation for Box Office data",
        },
        "paths": paths,
    })
}
