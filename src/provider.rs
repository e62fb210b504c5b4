//! # Data Provider Abstraction
//!
//! Every query the crate answers is ultimately served by a [`Provider`]. The
//! trait mirrors the seven operations of a box-office data source; the
//! dispatcher validates parameters and then calls exactly one of them.
//!
//! ## Implementations
//!
//! - **MojoProvider**: scrapes Box Office Mojo tables over HTTP
//! - **BoxOfficeClient**: forwards queries to a running `boxoffd`
//!
//! ```text
//! Dispatcher ── Query ──► Provider::get_*(..) ──► QueryResult
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::{Endpoint, ProviderError};

/// The opaque, JSON-serializable result of a provider query.
pub type QueryResult = Value;

/// Interface to a box-office data source.
///
/// Implementations must be shareable across request handlers. Failures carry
/// a message that is surfaced to callers without modification.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Grosses for a single date (e.g. `2023-01-01`).
    async fn get_daily(&self, date: &str) -> Result<QueryResult, ProviderError>;

    /// Grosses for a weekend.
    async fn get_weekend(&self, year: i64, week: i64) -> Result<QueryResult, ProviderError>;

    /// Grosses for a full week.
    async fn get_weekly(&self, year: i64, week: i64) -> Result<QueryResult, ProviderError>;

    /// Grosses for a calendar month.
    async fn get_monthly(&self, year: i64, month: i64) -> Result<QueryResult, ProviderError>;

    /// Grosses for a named season.
    async fn get_season(&self, year: i64, season: &str) -> Result<QueryResult, ProviderError>;

    /// Grosses for a quarter of a year.
    async fn get_quarterly(&self, quarterly: i64, year: i64)
    -> Result<QueryResult, ProviderError>;

    /// Grosses for a whole year.
    async fn get_yearly(&self, year: i64) -> Result<QueryResult, ProviderError>;
}

/// A validated provider call with its arguments already coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `get_daily(date)`
    Daily {
        /// Date string, passed through untouched.
        date: String,
    },
    /// `get_weekend(year, week)`
    Weekend {
        /// Calendar year.
        year: i64,
        /// Week number.
        week: i64,
    },
    /// `get_weekly(year, week)`
    Weekly {
        /// Calendar year.
        year: i64,
        /// Week number.
        week: i64,
    },
    /// `get_monthly(year, month)`
    Monthly {
        /// Calendar year.
        year: i64,
        /// Month number.
        month: i64,
    },
    /// `get_season(year, season)`
    Season {
        /// Calendar year.
        year: i64,
        /// Season name, passed through untouched.
        season: String,
    },
    /// `get_quarterly(quarterly, year)`
    Quarterly {
        /// Quarter number.
        quarterly: i64,
        /// Calendar year.
        year: i64,
    },
    /// `get_yearly(year)`
    Yearly {
        /// Calendar year.
        year: i64,
    },
}

impl Query {
    /// The endpoint this query answers.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Query::Daily { .. } => Endpoint::Daily,
            Query::Weekend { .. } => Endpoint::Weekend,
            Query::Weekly { .. } => Endpoint::Weekly,
            Query::Monthly { .. } => Endpoint::Monthly,
            Query::Season { .. } => Endpoint::Seasonal,
            Query::Quarterly { .. } => Endpoint::Quarterly,
            Query::Yearly { .. } => Endpoint::Yearly,
        }
    }

    /// Invokes the single provider operation matching this query.
    pub async fn run(&self, provider: &dyn Provider) -> Result<QueryResult, ProviderError> {
        match self {
            Query::Daily { date } => provider.get_daily(date).await,
            Query::Weekend { year, week } => provider.get_weekend(*year, *week).await,
            Query::Weekly { year, week } => provider.get_weekly(*year, *week).await,
            Query::Monthly { year, month } => provider.get_monthly(*year, *month).await,
            Query::Season { year, season } => provider.get_season(*year, season).await,
            Query::Quarterly { quarterly, year } => {
                provider.get_quarterly(*quarterly, *year).await
            }
            Query::Yearly { year } => provider.get_yearly(*year).await,
        }
    }

    /// The query as HTTP query-string pairs, keyed by parameter name.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Query::Daily { date } => vec![("date", date.clone())],
            Query::Weekend { year, week } | Query::Weekly { year, week } => {
                vec![("year", year.to_string()), ("week", week.to_string())]
            }
            Query::Monthly { year, month } => {
                vec![("year", year.to_string()), ("month", month.to_string())]
            }
            Query::Season { year, season } => {
                vec![("year", year.to_string()), ("season", season.clone())]
            }
            Query::Quarterly { quarterly, year } => {
                vec![("year", year.to_string()), ("quarter", quarterly.to_string())]
            }
            Query::Yearly { year } => vec![("year", year.to_string())],
        }
    }
}
