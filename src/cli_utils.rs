use std::process;

use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Formats `message` as the JSON error object the CLI prints.
pub fn error_json(message: &str) -> String {
    json!({ "error": message }).to_string()
}

/// Prints a JSON error object to stdout and exits with status 1
pub fn exit_with_error(message: &str) -> ! {
    println!("{}", error_json(message));
    process::exit(1);
}

/// Prints a value as a single line of JSON
pub fn print_json<T>(value: &T) -> Result<(), serde_json::Error>
where
    T: serde::Serialize,
{
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Prints a JSON value or exits with error
pub fn print_json_or_exit<T>(value: &T, context: &str)
where
    T: serde::Serialize,
{
    if let Err(e) = print_json(value) {
        exit_with_error(&format!("Failed to format {} JSON: {}", context, e));
    }
}

/// Installs a stderr `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` and the
/// `default_level` applies.
pub fn init_logging(default_level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { default_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
