//! CLI command definitions and dispatch for the `decora` binary.
//!
//! Uses clap derive macros for argument parsing. `serve` is the main
//! command; the rest are operator utilities around the same services.

pub mod classify;
pub mod status;
pub mod upload;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// AI interior-design relay: chat, image generation, Drive uploads.
#[derive(Parser)]
#[command(name = "decora", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config).
        #[arg(long)]
        host: Option<String>,

        /// Export spans via OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Classify a message as a text question or an image request.
    Classify {
        /// The message to classify.
        message: String,
    },

    /// Upload a file to Drive and print its shareable URL.
    Upload {
        /// Path of the file to upload.
        path: PathBuf,

        /// MIME type of the file (guessed from the extension if omitted).
        #[arg(long)]
        mime: Option<String>,
    },

    /// Run the Drive authorization flow and cache the resulting token.
    Authorize,

    /// Show resolved configuration and credential state.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
