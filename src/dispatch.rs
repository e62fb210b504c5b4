//! # Request Dispatch
//!
//! The dispatcher is the one piece of logic every transport shares. It takes
//! an [`Endpoint`] and a [`ParameterSet`], checks that the endpoint's required
//! parameters are all present, coerces the integer-typed ones, and calls the
//! matching [`Provider`] operation exactly once.
//!
//! ## Validation Order
//!
//! 1. Every required parameter must be present (an empty value counts as
//!    absent). The resulting error names the whole requirement.
//! 2. Integer parameters are coerced in CLI order; the first failure is
//!    reported.
//! 3. The provider is invoked. Its failure message is kept verbatim.
//!
//! ```rust
//! # use boxoffice::{ParameterSet, Endpoint, Query, DispatchError};
//! let params: ParameterSet = [("quarter", "2"), ("year", "2023")].into_iter().collect();
//! let query = Query::from_params(Endpoint::Quarterly, &params).unwrap();
//! assert_eq!(query, Query::Quarterly { quarterly: 2, year: 2023 });
//!
//! let params: ParameterSet = [("year", "2023")].into_iter().collect();
//! let err = Query::from_params(Endpoint::Weekend, &params).unwrap_err();
//! assert!(matches!(err, DispatchError::MissingParameter { .. }));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{DispatchError, Endpoint, Provider, Query, QueryResult};

/////////////////////////////////////////// ParameterSet /////////////////////////////////////////////

/// Named raw parameter values supplied by a transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds positional CLI arguments to the endpoint's parameter names.
    ///
    /// Surplus arguments are ignored; absent ones simply stay unset.
    pub fn from_positional(endpoint: Endpoint, args: &[String]) -> Self {
        endpoint
            .params()
            .iter()
            .zip(args)
            .map(|(spec, value)| (spec.name, value.as_str()))
            .collect()
    }

    /// Builds a set from decoded query pairs.
    ///
    /// The first occurrence of a key wins, even when its value is blank.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values = BTreeMap::new();
        for (k, v) in pairs {
            values.entry(k.into()).or_insert_with(|| v.into());
        }
        Self { values }
    }

    /// Sets `name` to `value`, replacing any earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// The value for `name`, treating an empty string as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Number of parameters held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no parameters are held.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ParameterSet::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

///////////////////////////////////////////// Validation //////////////////////////////////////////////

fn integer_param(params: &ParameterSet, name: &'static str) -> Result<i64, DispatchError> {
    let raw = params.get(name).unwrap_or_default();
    raw.trim()
        .parse::<i64>()
        .map_err(|_| DispatchError::InvalidParameter {
            field: name,
            value: raw.to_string(),
        })
}

fn text_param(params: &ParameterSet, name: &str) -> String {
    params.get(name).unwrap_or_default().to_string()
}

impl Query {
    /// Validates `params` against `endpoint` and builds the provider call.
    pub fn from_params(endpoint: Endpoint, params: &ParameterSet) -> Result<Query, DispatchError> {
        let missing: Vec<&'static str> = endpoint
            .params()
            .iter()
            .filter(|spec| params.get(spec.name).is_none())
            .map(|spec| spec.name)
            .collect();
        if !missing.is_empty() {
            return Err(DispatchError::MissingParameter { endpoint, missing });
        }

        // Integers are coerced in CLI order; see Endpoint::params.
        let query = match endpoint {
            Endpoint::Daily => Query::Daily {
                date: text_param(params, "date"),
            },
            Endpoint::Weekend => Query::Weekend {
                year: integer_param(params, "year")?,
                week: integer_param(params, "week")?,
            },
            Endpoint::Weekly => Query::Weekly {
                year: integer_param(params, "year")?,
                week: integer_param(params, "week")?,
            },
            Endpoint::Monthly => Query::Monthly {
                year: integer_param(params, "year")?,
                month: integer_param(params, "month")?,
            },
            Endpoint::Seasonal => Query::Season {
                year: integer_param(params, "year")?,
                season: text_param(params, "season"),
            },
            Endpoint::Quarterly => Query::Quarterly {
                quarterly: integer_param(params, "quarter")?,
                year: integer_param(params, "year")?,
            },
            Endpoint::Yearly => Query::Yearly {
                year: integer_param(params, "year")?,
            },
        };
        Ok(query)
    }
}

///////////////////////////////////////////// Dispatcher //////////////////////////////////////////////

/// Validates requests and forwards them to a shared provider.
#[derive(Clone)]
pub struct Dispatcher {
    provider: Arc<dyn Provider>,
}

impl Dispatcher {
    /// Creates a dispatcher backed by `provider`.
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Validates `params` for `endpoint` and runs the provider call.
    ///
    /// The provider's result is returned unchanged.
    pub async fn dispatch(
        &self,
        endpoint: Endpoint,
        params: &ParameterSet,
    ) -> Result<QueryResult, DispatchError> {
        let query = Query::from_params(endpoint, params)?;
        tracing::debug!(%endpoint, ?query, "dispatching query");
        match query.run(self.provider.as_ref()).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::debug!(%endpoint, error = %e, "provider failed");
                Err(DispatchError::ProviderFailure(e))
            }
        }
    }

    /// Resolves `name` to an endpoint, then dispatches.
    pub async fn dispatch_named(
        &self,
        name: &str,
        params: &ParameterSet,
    ) -> Result<QueryResult, DispatchError> {
        let endpoint: Endpoint = name.parse()?;
        self.dispatch(endpoint, params).await
    }
}
