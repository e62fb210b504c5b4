//! # Box Office Mojo Provider
//!
//! Fetches chart pages from Box Office Mojo and turns the first table on the
//! page into JSON. Each row becomes an object keyed by the table's header
//! cells, so a daily chart comes back as
//!
//! ```json
//! [{"Rank": "1", "Release": "Avatar: The Way of Water", "Daily": "$18,702,410"}]
//! ```
//!
//! Values are kept as the page renders them; no numeric parsing is attempted.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::{Map, Value};

use crate::{Provider, ProviderError, QueryResult};

/// Default location of Box Office Mojo.
pub const DEFAULT_BASE_URL: &str = "https://www.boxofficemojo.com";

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table\b[^>]*>(.*?)</table>").expect("table regex"));
static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").expect("row regex"));
static CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(th|td)\b[^>]*>(.*?)</(?:th|td)>").expect("cell regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag regex"));
static SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("space regex"));

//////////////////////////////////////////// MojoProvider /////////////////////////////////////////////

/// A [`Provider`] that scrapes Box Office Mojo chart pages.
pub struct MojoProvider {
    client: Client,
    base_url: String,
}

impl MojoProvider {
    /// Creates a provider rooted at `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("boxoffice/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Builds the page URL for a path relative to the base URL.
    pub fn page_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch_chart(&self, path: &str) -> Result<QueryResult, ProviderError> {
        let url = self.page_url(path);
        tracing::debug!(%url, "fetching chart");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::new(format!(
                "Box Office Mojo returned HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }
        let body = response.text().await?;
        parse_chart(&body)
            .map(Value::Array)
            .ok_or_else(|| ProviderError::new(format!("No box office data found at {}", url)))
    }
}

/// Path of the monthly chart, e.g. `month/march/2024/`.
pub fn month_path(year: i64, month: i64) -> Result<String, ProviderError> {
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|idx| MONTHS.get(idx))
        .map(|name| format!("month/{}/{}/", name, year))
        .ok_or_else(|| ProviderError::new(format!("Invalid month: {}", month)))
}

#[async_trait]
impl Provider for MojoProvider {
    async fn get_daily(&self, date: &str) -> Result<QueryResult, ProviderError> {
        self.fetch_chart(&format!("date/{}/", date)).await
    }

    async fn get_weekend(&self, year: i64, week: i64) -> Result<QueryResult, ProviderError> {
        self.fetch_chart(&format!("weekend/{}W{:02}/", year, week))
            .await
    }

    async fn get_weekly(&self, year: i64, week: i64) -> Result<QueryResult, ProviderError> {
        self.fetch_chart(&format!("weekly/{}W{:02}/", year, week))
            .await
    }

    async fn get_monthly(&self, year: i64, month: i64) -> Result<QueryResult, ProviderError> {
        let path = month_path(year, month)?;
        self.fetch_chart(&path).await
    }

    async fn get_season(&self, year: i64, season: &str) -> Result<QueryResult, ProviderError> {
        self.fetch_chart(&format!("season/{}/{}/", season, year))
            .await
    }

    async fn get_quarterly(
        &self,
        quarterly: i64,
        year: i64,
    ) -> Result<QueryResult, ProviderError> {
        self.fetch_chart(&format!("quarter/q{}/{}/", quarterly, year))
            .await
    }

    async fn get_yearly(&self, year: i64) -> Result<QueryResult, ProviderError> {
        self.fetch_chart(&format!("year/{}/", year)).await
    }
}

/////////////////////////////////////////// Table Parsing /////////////////////////////////////////////

/// Parses the first HTML table into one JSON object per data row.
///
/// Returns `None` when the page has no table or the table has no data rows.
pub fn parse_chart(html: &str) -> Option<Vec<Value>> {
    let table = TABLE.captures(html)?.get(1)?.as_str();
    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for row in ROW.captures_iter(table) {
        let Some(inner) = row.get(1) else { continue };
        let mut is_header = true;
        let mut cells = Vec::new();
        for cell in CELL.captures_iter(inner.as_str()) {
            if cell[1].eq_ignore_ascii_case("td") {
                is_header = false;
            }
            cells.push(cell_text(&cell[2]));
        }
        if cells.is_empty() {
            continue;
        }
        if is_header && headers.is_empty() {
            headers = cells;
            continue;
        }

        let mut object = Map::new();
        for (i, value) in cells.into_iter().enumerate() {
            let key = headers
                .get(i)
                .filter(|h| !h.is_empty())
                .cloned()
                .unwrap_or_else(|| format!("column_{}", i + 1));
            object.insert(key, Value::String(value));
        }
        rows.push(Value::Object(object));
    }

    if rows.is_empty() { None } else { Some(rows) }
}

fn cell_text(raw: &str) -> String {
    let stripped = TAG.replace_all(raw, " ");
    let decoded = decode_entities(&stripped);
    SPACE.replace_all(decoded.trim(), " ").into_owned()
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const CHART: &str = r#"
        <html><body>
        <div id="table">
        <table class="a-bordered a-horizontal-stripes mojo-body-table">
          <tr>
            <th class="a-text-right"><span title="Rank">Rank</span></th>
            <th><a href="?sort=release">Release</a></th>
            <th class="a-text-right">Daily</th>
            <th></th>
          </tr>
          <tr>
            <td class="a-text-right mojo-header-column">1</td>
            <td><a class="a-link-normal" href="/release/rl1/">Avatar: The Way of Water</a></td>
            <td class="a-text-right"><span class="money">$18,702,410</span></td>
            <td>Disney&nbsp;&amp; 20th</td>
          </tr>
          <tr>
            <td>2</td>
            <td><a href="/release/rl2/">Puss in Boots: The Last Wish</a></td>
            <td>$4,875,000</td>
            <td>Universal</td>
          </tr>
        </table>
        </div>
        </body></html>
    "#;

    fn provider(base_url: &str) -> MojoProvider {
        MojoProvider::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn parse_chart_keys_rows_by_header() {
        let rows = parse_chart(CHART).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            json!({
                "Rank": "1",
                "Release": "Avatar: The Way of Water",
                "Daily": "$18,702,410",
                "column_4": "Disney & 20th",
            })
        );
        assert_eq!(rows[1]["Release"], "Puss in Boots: The Last Wish");
    }

    #[test]
    fn parse_chart_without_table() {
        assert_eq!(parse_chart("<html><p>nothing here</p></html>"), None);
    }

    #[test]
    fn parse_chart_with_only_headers() {
        assert_eq!(
            parse_chart("<table><tr><th>Rank</th></tr></table>"),
            None
        );
    }

    #[test]
    fn month_paths() {
        assert_eq!(month_path(2024, 1).unwrap(), "month/january/2024/");
        assert_eq!(month_path(2024, 12).unwrap(), "month/december/2024/");
        assert_eq!(month_path(2024, 0).unwrap_err().message(), "Invalid month: 0");
        assert_eq!(
            month_path(2024, 13).unwrap_err().message(),
            "Invalid month: 13"
        );
        assert!(month_path(2024, -3).is_err());
    }

    #[test]
    fn page_url_joins_cleanly() {
        let p = provider("https://example.test/");
        assert_eq!(p.page_url("/year/2023/"), "https://example.test/year/2023/");
    }

    #[tokio::test]
    async fn daily_fetches_date_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/date/2023-01-01/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CHART))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider(&server.uri()).get_daily("2023-01-01").await.unwrap();
        assert_eq!(result.as_array().unwrap().len(), 2);
        assert_eq!(result[0]["Rank"], "1");
    }

    #[tokio::test]
    async fn routes_for_each_granularity() {
        let server = MockServer::start().await;
        for page in [
            "/weekend/2023W05/",
            "/weekly/2023W42/",
            "/month/july/2023/",
            "/season/summer/2023/",
            "/quarter/q2/2023/",
            "/year/2023/",
        ] {
            Mock::given(method("GET"))
                .and(path(page))
                .respond_with(ResponseTemplate::new(200).set_body_string(CHART))
                .expect(1)
                .mount(&server)
                .await;
        }

        let p = provider(&server.uri());
        assert!(p.get_weekend(2023, 5).await.is_ok());
        assert!(p.get_weekly(2023, 42).await.is_ok());
        assert!(p.get_monthly(2023, 7).await.is_ok());
        assert!(p.get_season(2023, "summer").await.is_ok());
        assert!(p.get_quarterly(2, 2023).await.is_ok());
        assert!(p.get_yearly(2023).await.is_ok());
    }

    #[tokio::test]
    async fn upstream_error_status_is_provider_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = provider(&server.uri()).get_yearly(1850).await.unwrap_err();
        assert_eq!(
            err.message(),
            format!(
                "Box Office Mojo returned HTTP 404 for {}/year/1850/",
                server.uri()
            )
        );
    }

    #[tokio::test]
    async fn page_without_table_is_provider_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let err = provider(&server.uri()).get_yearly(2023).await.unwrap_err();
        assert!(err.message().starts_with("No box office data found at"));
    }

    #[tokio::test]
    async fn invalid_month_never_hits_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CHART))
            .expect(0)
            .mount(&server)
            .await;

        let err = provider(&server.uri()).get_monthly(2023, 13).await.unwrap_err();
        assert_eq!(err.message(), "Invalid month: 13");
    }
}
