//! Decora CLI and REST API entry point.
//!
//! Binary name: `decora`
//!
//! Parses CLI arguments, loads configuration, wires the backend clients,
//! then dispatches to the appropriate command handler or starts the REST
//! API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use decora_infra::config::load_app_config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity. `serve --otel` switches to the
    // OpenTelemetry-bridged subscriber, which reads RUST_LOG instead.
    if matches!(cli.command, Commands::Serve { otel: true, .. }) {
        decora_observe::tracing_setup::init_tracing(true)
            .map_err(|e| anyhow::anyhow!("tracing init: {e}"))?;
    } else {
        let filter = match cli.verbose {
            0 if cli.quiet => "error",
            0 => "warn",
            1 => "info,decora=debug",
            _ => "trace",
        };
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_target(false)
            .init();
    }

    // Shell completions and classification need no app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "decora", &mut std::io::stdout());
        return Ok(());
    }
    if let Commands::Classify { message } = &cli.command {
        return cli::classify::run(message, cli.json);
    }

    let config = load_app_config(&cli.config).await;

    match cli.command {
        Commands::Serve { port, host, .. } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }

            let state = AppState::init(config.clone()).await?;

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Decora API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            decora_observe::tracing_setup::shutdown_tracing();
            println!("\n  Server stopped.");
        }

        Commands::Upload { path, mime } => {
            let state = AppState::init(config).await?;
            cli::upload::upload(&state, &path, mime.as_deref(), cli.json).await?;
        }

        Commands::Authorize => {
            cli::upload::authorize(&config, cli.json).await?;
        }

        Commands::Status => {
            cli::status::run(&config, cli.json).await?;
        }

        Commands::Classify { .. } | Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
