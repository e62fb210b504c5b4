use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

////////////////////////////////////////////// Endpoint //////////////////////////////////////////////

/// The aggregation granularities a provider can be queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Grosses for a single calendar date.
    Daily,
    /// Grosses for a weekend, addressed by year and week number.
    Weekend,
    /// Grosses for a full week, addressed by year and week number.
    Weekly,
    /// Grosses for a calendar month.
    Monthly,
    /// Grosses for a named season of a year.
    Seasonal,
    /// Grosses for a quarter of a year.
    Quarterly,
    /// Grosses for a whole year.
    Yearly,
}

/// The type a parameter is coerced to before it reaches the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Passed through as the raw string.
    Text,
    /// Parsed as a base-10 integer.
    Integer,
}

/// A named parameter an endpoint requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Query-string key of the parameter.
    pub name: &'static str,
    /// How the raw value is coerced.
    pub kind: ParamKind,
    /// Placeholder shown in CLI usage lines.
    pub placeholder: &'static str,
}

const fn text(name: &'static str, placeholder: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::Text,
        placeholder,
    }
}

const fn integer(name: &'static str, placeholder: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::Integer,
        placeholder,
    }
}

const DAILY: &[ParamSpec] = &[text("date", "YYYY-MM-DD")];
const WEEK: &[ParamSpec] = &[integer("year", "YYYY"), integer("week", "WW")];
const MONTHLY: &[ParamSpec] = &[integer("year", "YYYY"), integer("month", "MM")];
const SEASONAL: &[ParamSpec] = &[
    integer("year", "YYYY"),
    text("season", "[spring|summer|fall|winter]"),
];
const QUARTERLY: &[ParamSpec] = &[integer("quarter", "Q"), integer("year", "YYYY")];
const YEARLY: &[ParamSpec] = &[integer("year", "YYYY")];

/// Season names accepted by the seasonal endpoint. Only advertised, never enforced.
pub const SEASONS: &[&str] = &["spring", "summer", "fall", "winter"];

impl Endpoint {
    /// Every endpoint in the order they are documented.
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Daily,
        Endpoint::Weekend,
        Endpoint::Weekly,
        Endpoint::Monthly,
        Endpoint::Seasonal,
        Endpoint::Quarterly,
        Endpoint::Yearly,
    ];

    /// The lowercase name used for CLI commands and HTTP routes.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Daily => "daily",
            Endpoint::Weekend => "weekend",
            Endpoint::Weekly => "weekly",
            Endpoint::Monthly => "monthly",
            Endpoint::Seasonal => "seasonal",
            Endpoint::Quarterly => "quarterly",
            Endpoint::Yearly => "yearly",
        }
    }

    /// Required parameters in CLI positional order.
    ///
    /// Quarterly takes the quarter before the year on the command line even
    /// though the provider binds them by name.
    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            Endpoint::Daily => DAILY,
            Endpoint::Weekend | Endpoint::Weekly => WEEK,
            Endpoint::Monthly => MONTHLY,
            Endpoint::Seasonal => SEASONAL,
            Endpoint::Quarterly => QUARTERLY,
            Endpoint::Yearly => YEARLY,
        }
    }

    /// Required parameters in the order the HTTP surface names them.
    pub fn query_params(self) -> Vec<ParamSpec> {
        let mut params = self.params().to_vec();
        if self == Endpoint::Quarterly {
            params.reverse();
        }
        params
    }

    /// Human phrase for the whole requirement, e.g. "Year and week".
    pub fn requirement(self) -> String {
        let names: Vec<&str> = self.query_params().iter().map(|p| p.name).collect();
        capitalize(&join_with_and(&names))
    }

    /// The message reported when any required parameter is missing.
    ///
    /// It always names the whole requirement, not just the absent keys.
    pub fn missing_message(self) -> String {
        if self.params().len() == 1 {
            format!("{} parameter is required", self.requirement())
        } else {
            format!("{} parameters are required", self.requirement())
        }
    }

    /// CLI usage line, e.g. `boxoff weekend YYYY WW`.
    pub fn usage(self) -> String {
        let mut usage = format!("boxoff {}", self.name());
        for param in self.params() {
            usage.push(' ');
            usage.push_str(param.placeholder);
        }
        usage
    }

    /// Comma-separated list of every endpoint name.
    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(|e| e.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn join_with_and(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/////////////////////////////////////////// Display and FromStr ///////////////////////////////////////

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

/// Returned when a name is not one of the supported endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointParseError {
    /// The name that failed to parse.
    pub name: String,
}

impl Display for EndpointParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "Invalid endpoint. Supported endpoints: {}",
            Endpoint::supported()
        )
    }
}

impl std::error::Error for EndpointParseError {}

impl FromStr for Endpoint {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| EndpointParseError {
                name: s.to_string(),
            })
    }
}
