use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use lampwick::config::Config;
use lampwick::server::Server;

#[derive(Parser)]
#[command(name = "lampwick", version, about = "Serve a directory over HTTP/1.1, one request at a time")]
struct Cli {
    /// Port to listen on
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// YAML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory to serve
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    if let Some(port) = cli.port {
        cfg.set_port(port)?;
    }
    if let Some(root) = cli.root {
        cfg.root = root;
    }

    let level = match cli.verbose {
        0 => cfg.log_level()?,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .init();

    let server = Server::bind(&cfg)?;

    server.run(shutdown_signal()).await?;

    tracing::info!("Stopping server");
    Ok(())
}

/// Completes on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
