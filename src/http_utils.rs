use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::{Provider, ProviderError, Query, QueryResult};

/// A [`Provider`] that forwards queries to a running `boxoffd`.
pub struct BoxOfficeClient {
    client: Client,
    base_url: String,
}

impl BoxOfficeClient {
    /// Creates a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Constructs a full URL from a route path
    pub fn route_url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.base_url, path)
    }

    /// Makes a GET request for `query` and handles the response
    pub async fn get(&self, query: &Query) -> Result<QueryResult, ProviderError> {
        let url = self.route_url(query.endpoint().name());
        let response = self
            .client
            .get(&url)
            .query(&query.to_pairs())
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Handles HTTP response, deserializing success or returning the server's error
    async fn handle_response(&self, response: Response) -> Result<QueryResult, ProviderError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status().as_u16();
            let error = response.text().await.unwrap_or_default();
            Err(ProviderError::new(error_message(status, &error)))
        }
    }
}

/// Pulls the `error` field out of a JSON error body, falling back to the raw text.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body)
        && let Some(Value::String(message)) = map.get("error")
    {
        return message.clone();
    }
    let body = body.trim();
    if body.is_empty() {
        format!("Server returned HTTP {} with no error details", status)
    } else {
        body.to_string()
    }
}

#[async_trait]
impl Provider for BoxOfficeClient {
    async fn get_daily(&self, date: &str) -> Result<QueryResult, ProviderError> {
        self.get(&Query::Daily {
            date: date.to_string(),
        })
        .await
    }

    async fn get_weekend(&self, year: i64, week: i64) -> Result<QueryResult, ProviderError> {
        self.get(&Query::Weekend { year, week }).await
    }

    async fn get_weekly(&self, year: i64, week: i64) -> Result<QueryResult, ProviderError> {
        self.get(&Query::Weekly { year, week }).await
    }

    async fn get_monthly(&self, year: i64, month: i64) -> Result<QueryResult, ProviderError> {
        self.get(&Query::Monthly { year, month }).await
    }

    async fn get_season(&self, year: i64, season: &str) -> Result<QueryResult, ProviderError> {
        self.get(&Query::Season {
            year,
            season: season.to_string(),
        })
        .await
    }

    async fn get_quarterly(
        &self,
        quarterly: i64,
        year: i64,
    ) -> Result<QueryResult, ProviderError> {
        self.get(&Query::Quarterly { quarterly, year }).await
    }

    async fn get_yearly(&self, year: i64) -> Result<QueryResult, ProviderError> {
        self.get(&Query::Yearly { year }).await
    }
}
