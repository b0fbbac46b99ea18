// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Main entry point for the Hello World MCP fixture
use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};
use url::Url;

use hello_mcp::client::{probe, ProbeOptions};
use hello_mcp::{create_router, AppState, Config};

#[derive(Parser, Debug)]
#[command(name = "hello-mcp", version, about = "Hello World MCP fixture over the SSE transport", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the fixture (default when no subcommand is given)
    Serve(ServeArgs),
    /// Drive a running fixture through initialize, tools/list and say_hello
    Probe(ProbeArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Listen address (overrides BIND_ADDRESS)
    #[arg(long)]
    bind: Option<String>,

    /// Listen port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Absolute base for the endpoint event URL (overrides PUBLIC_BASE_URL)
    #[arg(long)]
    public_base_url: Option<String>,

    /// Idle seconds before a keepalive ping (overrides KEEPALIVE_SECS)
    #[arg(long)]
    keepalive_secs: Option<u64>,
}

impl ServeArgs {
    fn apply(self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(base) = self.public_base_url {
            config.public_base_url = Some(base);
        }
        if let Some(secs) = self.keepalive_secs {
            config.keepalive_secs = secs;
        }
    }
}

#[derive(Args, Debug)]
struct ProbeArgs {
    /// Stream-open URL of the fixture
    #[arg(long, default_value = "http://localhost:8005/sse")]
    url: Url,

    /// Name to greet; omitted exercises the "World" default
    #[arg(long)]
    name: Option<String>,

    /// Seconds to wait for each stream event
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    install_panic_hook();

    let mut config = Config::from_env().context("Configuration error")?;

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => {
            args.apply(&mut config);
            config.validate().context("Configuration error")?;
            init_tracing(&config)?;
            serve(config).await
        }
        Command::Probe(args) => {
            init_tracing(&config)?;
            run_probe(args).await
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Starting Hello World MCP fixture");
    info!(
        bind_address = %config.bind_address,
        port = config.port,
        keepalive_secs = config.keepalive_secs,
        "Configuration loaded"
    );

    let addr = config.listen_addr();
    let app_state = AppState::hello_world(config);
    let streams = app_state.shutdown.clone();
    let router = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        error!(error = %e, addr = %addr, "Failed to bind to address");
        e
    })?;

    info!(addr = %addr, "Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Open event streams never finish on their own
            streams.cancel();
        })
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn run_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let options = ProbeOptions {
        sse_url: args.url,
        name: args.name,
        timeout: Duration::from_secs(args.timeout_secs),
    };

    let report = probe(&options).await?;

    println!("endpoint:         {}", report.endpoint);
    println!("protocol version: {}", report.protocol_version);
    println!("tools:            {}", report.tools.join(", "));
    println!("say_hello:        {}", report.greeting);
    println!("OK");
    Ok(())
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("PANIC: {} at {}", message, location);
    }));
}

/// Initialize tracing subscriber based on configuration
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        subscriber
            .json()
            .try_init()
            .map_err(|e| anyhow!("Failed to init tracing: {}", e))
    } else {
        subscriber
            .try_init()
            .map_err(|e| anyhow!("Failed to init tracing: {}", e))
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            info!("SIGTERM received, starting graceful shutdown");
        },
    }
}
