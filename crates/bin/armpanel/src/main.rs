//! # armpanel — terminal control panel for a networked robotic arm
//!
//! Composition root that wires the adapters together and runs the panel.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise logging (to stderr, so the console stays readable)
//! - Construct the HTTP transport and the console-backed view
//! - Construct application services, injecting adapters via port traits
//! - Start the status poller and read operator commands from stdin
//! - Stop the poller on `quit`, end of input or Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It only wires things together; behaviour lives in `armpanel-app`.

mod config;
mod repl;

use std::sync::Arc;

use armpanel_adapter_console::Console;
use armpanel_adapter_http_reqwest::ReqwestTransport;
use armpanel_app::ports::ViewBindings;
use armpanel_app::services::alert_surface::AlertSurface;
use armpanel_app::services::api_client::ApiClient;
use armpanel_app::services::dispatcher::CommandDispatcher;
use armpanel_app::services::poller::StatusPoller;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::repl::LinePrompt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    // Adapters
    let transport = Arc::new(ReqwestTransport::new(&config.device)?);
    let console = Console::stdout();
    let view = Arc::new(ViewBindings::bind(&config.step_sizes(), |id| {
        console.element(id)
    }));
    tracing::info!(base_url = transport.base_url(), "armpanel starting");

    // Operator input
    let lines = Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()));

    // Services
    let alerts = Arc::new(AlertSurface::new(
        Arc::clone(&view.alert_box),
        config.alert_duration(),
    ));
    let client = ApiClient::new(
        Arc::clone(&transport),
        Arc::clone(&view),
        alerts,
        config.request_timeout(),
    );
    let prompt = LinePrompt::new(Arc::clone(&lines), console.clone());
    let mut dispatcher = CommandDispatcher::new(client, prompt);
    let mut poller = StatusPoller::new(
        Arc::clone(&transport),
        Arc::clone(&view),
        config.poll_interval(),
        config.request_timeout(),
    );

    poller.start();
    console.println("armpanel ready, type `help` for commands");

    let interrupted = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };
    let outcome = repl::drive(&*lines, &mut dispatcher, &console, interrupted).await;

    poller.stop();
    tracing::info!("armpanel stopped");
    outcome.map_err(Into::into)
}
