use arrrg::CommandLine;
use arrrg_derive::CommandLine;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

use boxoffice::{cli_utils, config::ServerConfig, create_raw_router, create_router};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Args {
    #[arrrg(optional, "Host to bind the HTTP server")]
    host: Option<String>,
    #[arrrg(optional, "Port to bind the HTTP server")]
    port: Option<u16>,
    #[arrrg(optional, "Base URL of Box Office Mojo")]
    upstream: Option<String>,
    #[arrrg(optional, "Upstream request timeout in seconds")]
    timeout_secs: Option<u64>,
    #[arrrg(flag, "Serve the minimal handler instead of the full router")]
    raw: bool,
    #[arrrg(flag, "Enable verbose logging")]
    verbose: bool,
}

const HELP_TEXT: &str = r#"boxoffd - Box office statistics server

USAGE:
    boxoffd [OPTIONS]

OPTIONS:
    --host <HOST>            Host to bind the HTTP server [default: 127.0.0.1]
    --port <PORT>            Port to bind the HTTP server [default: $PORT or 3000]
    --upstream <URL>         Base URL of Box Office Mojo [default: $BOXOFFICE_UPSTREAM or https://www.boxofficemojo.com]
    --timeout-secs <SECS>    Upstream request timeout [default: 30]
    --raw                    Serve the minimal handler (no /health, plain-text errors)
    --verbose                Enable verbose logging

DESCRIPTION:
    Serves box office charts as JSON. Every response carries
    Access-Control-Allow-Origin: *.

    The server supports graceful shutdown via Ctrl+C.

API ENDPOINTS:
    GET /health                          Health check (returns OK!)
    GET /api-docs                        OpenAPI document
    GET /daily?date=YYYY-MM-DD           Daily chart
    GET /weekend?year=&week=             Weekend chart
    GET /weekly?year=&week=              Weekly chart
    GET /monthly?year=&month=            Monthly chart
    GET /seasonal?year=&season=          Seasonal chart (spring|summer|fall|winter)
    GET /quarterly?year=&quarter=        Quarterly chart
    GET /yearly?year=                    Yearly chart"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, free) = Args::from_command_line("USAGE: boxoffd [OPTIONS]");

    if !free.is_empty() && free[0] == "help" {
        println!("{}", HELP_TEXT);
        return Ok(());
    }

    let config = ServerConfig::resolve(
        args.host,
        args.port,
        args.upstream,
        args.timeout_secs,
        args.raw,
        args.verbose,
    );
    cli_utils::init_logging("info", config.verbose);

    let dispatcher = config.provider.build_dispatcher()?;
    let app: Router = if config.raw {
        create_raw_router(dispatcher)
    } else {
        create_router(dispatcher)
    };

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!(
        %addr,
        upstream = %config.provider.upstream,
        raw = config.raw,
        "boxoffd listening"
    );

    let shutdown_signal = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("shutdown signal received, stopping server");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    tracing::info!("boxoffd stopped");
    Ok(())
}
