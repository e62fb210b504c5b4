use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use boxoffice::commands::{USAGE, handle_endpoint_command};
use boxoffice::{cli_utils, config::ClientConfig};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(optional, "Base URL of a running boxoffd to query instead of Box Office Mojo")]
    server: Option<String>,
    #[arrrg(optional, "Base URL of Box Office Mojo")]
    upstream: Option<String>,
    #[arrrg(optional, "Request timeout in seconds")]
    timeout_secs: Option<u64>,
    #[arrrg(flag, "Log debug output to stderr")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let (options, free) = Options::from_command_line_relaxed(USAGE);

    let config = ClientConfig::resolve(
        options.server,
        options.upstream,
        options.timeout_secs,
        options.verbose,
    );
    cli_utils::init_logging("warn", config.verbose);

    let dispatcher = match config.provider.build_dispatcher() {
        Ok(dispatcher) => dispatcher,
        Err(e) => cli_utils::exit_with_error(&e.to_string()),
    };

    handle_endpoint_command(&free, &dispatcher).await;
}
