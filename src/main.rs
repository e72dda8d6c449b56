//! Portal URL service.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌───────────────────────────────────────────────┐
//!                       │                 PORTAL URL                     │
//!     Client Request    │  ┌──────────┐   ┌────────────┐   ┌──────────┐  │
//!     ──────────────────┼─▶│   http   │──▶│ navigation │──▶│  url     │  │
//!                       │  │  server  │   │ middleware │   │ decoder  │  │
//!                       │  └──────────┘   └────────────┘   └────┬─────┘  │
//!                       │                                       │        │
//!                       │                  ┌────────────┐  ┌────▼─────┐  │
//!     JSON Response     │  ┌──────────┐    │  registry  │◀─│   url    │  │
//!     ◀─────────────────┼──│ handler  │◀───│  (layout,  │  │ encoder  │  │
//!                       │  └──────────┘    │  panels)   │  └──────────┘  │
//!                       │                  └────────────┘                │
//!                       └───────────────────────────────────────────────┘
//! ```
//!
//! Subcommands:
//! - `serve`: run the HTTP server
//! - `decode <path>`: print the navigation state of a path
//! - `encode --panel <token> ...`: print the canonical URL of a panel

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tokio::net::TcpListener;

use portal_url::config::{load_config, PortalConfig};
use portal_url::registry::PanelRegistry;
use portal_url::observability::{logging, metrics};
use portal_url::url::{PortalUrlProvider, PortletMode, PortletUrl, UrlState};
use portal_url::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "portal-url")]
#[command(about = "Decode and encode portal navigation URLs", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve,
    /// Decode a request path into its navigation state
    Decode {
        /// Full request path, including the context path
        path: String,
    },
    /// Build the canonical URL of a panel
    Encode {
        /// Panel token as known to the registry
        #[arg(long)]
        panel: String,
        #[arg(long, value_enum, default_value_t = StateArg::Normal)]
        state: StateArg,
        #[arg(long, value_enum, default_value_t = ModeArg::View)]
        mode: ModeArg,
        /// Build an action URL instead of a render URL
        #[arg(long)]
        action: bool,
        /// Panel parameter as key=value (repeatable)
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
        /// Portal control parameter as key=value (repeatable)
        #[arg(long = "portal-param", value_parser = parse_key_value)]
        portal_params: Vec<(String, String)>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StateArg {
    Normal,
    Max,
    Exclusive,
}

impl From<StateArg> for UrlState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Normal => UrlState::Normal,
            StateArg::Max => UrlState::Maximized,
            StateArg::Exclusive => UrlState::Exclusive,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    View,
    Edit,
    Help,
}

impl From<ModeArg> for PortletMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::View => PortletMode::View,
            ModeArg::Edit => PortletMode::Edit,
            ModeArg::Help => PortletMode::Help,
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PortalConfig::default(),
    };

    logging::init(&config.observability);

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::Decode { path } => {
            let provider = PortalUrlProvider::from_config(&config);
            let state = provider.decode_path(&path)?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::Encode {
            panel,
            state,
            mode,
            action,
            params,
            portal_params,
        } => {
            let provider = PortalUrlProvider::from_config(&config);
            let handle = provider.registry().resolve_token(&panel);
            if handle.is_none() {
                tracing::warn!(panel = %panel, "Unknown panel token");
            }
            let target = PortletUrl {
                window_state: state.into(),
                portlet_mode: mode.into(),
                is_action: action,
                portal_parameters: portal_params.into_iter().collect(),
                portlet_parameters: params.into_iter().collect(),
            };
            println!("{}", provider.portlet_url(&target, handle.as_ref())?);
        }
    }
    Ok(())
}

async fn serve(config: PortalConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("portal-url v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        context_path = %config.url.context_path,
        folders = config.folders.len(),
        panels = config.panels.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
