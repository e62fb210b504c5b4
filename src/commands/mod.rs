//! # Command Handlers
//!
//! Command handling for the boxoff CLI. The first free argument names the
//! endpoint and the rest are bound positionally to its parameters:
//!
//! ```text
//! boxoff daily 2023-01-01
//! boxoff quarterly 2 2023
//! ```
//!
//! - `errors` - User-facing error extraction via the handled crate

/// User-facing error extraction for CLI output.
pub mod errors;

use crate::{Dispatcher, Endpoint, ParameterSet, QueryResult, cli_utils};

pub use errors::{UserError, format_cli_error};

/// Usage line for the boxoff binary.
///
/// Options are only recognized before the endpoint; anything after it is
/// bound positionally.
pub const USAGE: &str = "USAGE: boxoff [options] <daily|weekend|weekly|monthly|seasonal|quarterly|yearly> [args...]
Options must come before <endpoint>; arguments after it are endpoint parameters.";

/// Reported when the CLI is invoked without an endpoint.
pub fn missing_endpoint_message() -> String {
    format!(
        "Endpoint type required. Usage: boxoff [{}] [params...]",
        Endpoint::ALL.map(|e| e.name()).join("|")
    )
}

/// Runs one CLI invocation and returns the JSON to print, or the error message.
pub async fn run_endpoint_command(
    args: &[String],
    dispatcher: &Dispatcher,
) -> Result<QueryResult, String> {
    let Some((name, rest)) = args.split_first() else {
        return Err(missing_endpoint_message());
    };
    let endpoint: Endpoint = name
        .parse()
        .map_err(|e: crate::EndpointParseError| e.to_string())?;
    let params = ParameterSet::from_positional(endpoint, rest);
    dispatcher
        .dispatch(endpoint, &params)
        .await
        .map_err(|e| format_cli_error(&e))
}

/// Handles a CLI invocation, printing the result or exiting with a JSON error.
pub async fn handle_endpoint_command(args: &[String], dispatcher: &Dispatcher) {
    match run_endpoint_command(args, dispatcher).await {
        Ok(result) => cli_utils::print_json_or_exit(&result, "result"),
        Err(message) => cli_utils::exit_with_error(&message),
    }
}
