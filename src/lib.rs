//! # Boxoffice: Box-Office Statistics over a CLI and HTTP
//!
//! This crate answers box-office chart queries (daily, weekend, weekly,
//! monthly, seasonal, quarterly and yearly grosses) through three thin
//! transports that share a single dispatcher:
//!
//! - **CLI**: `boxoff <endpoint> [args...]` prints one line of JSON
//! - **Framework HTTP**: an Axum router with `/health`, `/api-docs` and one
//!   route per endpoint
//! - **Minimal HTTP**: a single handler doing its own path matching, for
//!   serverless-style deployments
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┬────────────────────┬──────────────────┐
//! │ boxoff (CLI) │ router (Axum)      │ handler (raw)    │
//! ├──────────────┴────────────────────┴──────────────────┤
//! │ Dispatcher: validate ParameterSet, build Query       │
//! ├──────────────────────────────────────────────────────┤
//! │ Provider trait                                       │
//! │   MojoProvider (scrape) │ BoxOfficeClient (remote)   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Endpoints
//!
//! | Endpoint  | Parameters     | Provider call                   |
//! |-----------|----------------|---------------------------------|
//! | daily     | date           | `get_daily(date)`               |
//! | weekend   | year, week     | `get_weekend(year, week)`       |
//! | weekly    | year, week     | `get_weekly(year, week)`        |
//! | monthly   | year, month    | `get_monthly(year, month)`      |
//! | seasonal  | year, season   | `get_season(year, season)`      |
//! | quarterly | quarter, year  | `get_quarterly(quarterly, year)`|
//! | yearly    | year           | `get_yearly(year)`              |
//!
//! ## Usage Examples
//!
//! ### Validating Parameters
//!
//! ```rust
//! use boxoffice::{DispatchError, Endpoint, ParameterSet, Query};
//!
//! let params: ParameterSet = [("year", "2023"), ("week", "7")].into_iter().collect();
//! let query = Query::from_params(Endpoint::Weekend, &params).unwrap();
//! assert_eq!(query, Query::Weekend { year: 2023, week: 7 });
//!
//! let params: ParameterSet = [("year", "abc")].into_iter().collect();
//! let err = Query::from_params(Endpoint::Yearly, &params).unwrap_err();
//! assert_eq!(err.to_string(), "Invalid year: 'abc' is not an integer");
//! ```
//!
//! ### Serving HTTP
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use boxoffice::{Dispatcher, MojoProvider, create_router, mojo};
//!
//! # async fn serve() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MojoProvider::new(mojo::DEFAULT_BASE_URL, Duration::from_secs(30))?;
//! let app = create_router(Dispatcher::new(Arc::new(provider)));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
mod dispatch;
mod endpoint;
mod errors;
mod provider;

/// Command-line interface utilities for JSON output, error exits and logging.
pub mod cli_utils;

/// Command handlers for the boxoff CLI.
pub mod commands;

/// Configuration for the boxoffice binaries.
pub mod config;

/// Minimal HTTP handler with its own path matching.
pub mod handler;

/// HTTP client for a running boxoffd, usable as a provider.
pub mod http_utils;

/// Box Office Mojo provider.
pub mod mojo;

/// OpenAPI document for the framework routes.
pub mod openapi;

/// Framework (Axum) routes.
pub mod router;

pub use dispatch::{Dispatcher, ParameterSet};
pub use endpoint::{Endpoint, EndpointParseError, ParamKind, ParamSpec, SEASONS};
pub use errors::{DispatchError, ProviderError};
pub use handler::create_raw_router;
pub use http_utils::BoxOfficeClient;
pub use mojo::MojoProvider;
pub use provider::{Provider, Query, QueryResult};
pub use router::{ApiError, create_router};
