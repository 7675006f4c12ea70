//! mathdash-server: real-time multiplayer math quiz backend.
//!
//! Serves the WebSocket push channel and the HTTP API side by side, both
//! driving one shared session controller.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use mathdash_common::{EventBus, MathdashError};
use mathdash_config::schema::{LedgerBackend, LogLevel};
use mathdash_config::{config_to_json, load_config};
use mathdash_engine::SessionController;
use mathdash_server::connection::ConnectionContext;
use mathdash_server::http::ApiState;
use mathdash_server::{http, open_ledger, ws};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "mathdash-server", about = "Real-time multiplayer math quiz server")]
struct Args {
    /// Config file (defaults to the platform config dir).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level override: trace, debug, info, warn, error.
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// WebSocket port override.
    #[arg(long)]
    ws_port: Option<u16>,

    /// HTTP port override.
    #[arg(long)]
    http_port: Option<u16>,

    /// Keep scores in memory only.
    #[arg(long)]
    memory: bool,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mathdash-server: {e}");
            std::process::exit(2);
        }
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(port) = args.ws_port {
        config.server.ws_port = port;
    }
    if let Some(port) = args.http_port {
        config.server.http_port = port;
    }
    if args.memory {
        config.ledger.backend = LedgerBackend::Memory;
    }

    if args.print_config {
        println!("{}", config_to_json(&config));
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.directive().into()),
        )
        .init();

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "mathdash-server stopped");
        std::process::exit(1);
    }
}

async fn run(config: mathdash_config::MathdashConfig) -> Result<(), MathdashError> {
    let ledger = open_ledger(&config.ledger)?;
    let events = Arc::new(EventBus::default());
    let controller = SessionController::from_config(&config, Arc::clone(&ledger), events);

    let ws_listener = TcpListener::bind(config.server.ws_addr()).await?;
    let http_listener = TcpListener::bind(config.server.http_addr()).await?;

    let ctx = ConnectionContext {
        controller: Arc::clone(&controller),
        max_messages_per_second: config.server.max_messages_per_second,
    };
    let api = ApiState::new(controller, ledger);

    tracing::info!(
        ws = %config.server.ws_addr(),
        http = %config.server.http_addr(),
        "mathdash-server started"
    );

    tokio::select! {
        _ = ws::serve(ws_listener, ctx) => {
            Err(MathdashError::Network("WebSocket listener stopped".into()))
        }
        res = http::serve(http_listener, api) => {
            res?;
            Err(MathdashError::Network("HTTP server stopped".into()))
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
            Ok(())
        }
    }
}
