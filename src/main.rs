//! # Venezia Assistant CLI
//!
//! Reads one message per line from stdin and prints the assistant's reply.
//! `--once` answers a single message and exits.
//!
//! ```bash
//! RUST_LOG=info venezia-assistant --api-url http://localhost:5002
//! venezia-assistant --offline --once "Suma 15 kg de chocolate"
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use venezia_assistant::config::AssistantConfig;
use venezia_assistant::lifecycle::{setup_tracing, AssistantSystem};

/// Chat with the Venezia assistant from the terminal
#[derive(Parser, Debug)]
#[command(name = "venezia-assistant")]
#[command(about = "Classify chat messages and execute inventory and production commands")]
struct Args {
    /// TOML config file (overrides VENEZIA_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the Venezia API
    #[arg(long)]
    api_url: Option<String>,

    /// Serve every action from the simulated backend
    #[arg(long, default_value_t = false)]
    offline: bool,

    /// Answer a single message and exit
    #[arg(long)]
    once: Option<String>,
}

const EXIT_WORDS: &[&str] = &["salir", "exit"];

fn load_config(args: &Args) -> anyhow::Result<AssistantConfig> {
    let mut config = match &args.config {
        Some(path) => AssistantConfig::from_file(path)?.with_env(|key| std::env::var(key).ok())?,
        None => AssistantConfig::load()?,
    };
    if let Some(url) = &args.api_url {
        config.api_base_url = url.clone();
    }
    if args.offline {
        config.offline = true;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let args = Args::parse();
    let config = load_config(&args).context("loading configuration")?;
    let mut system = AssistantSystem::new(&config).context("starting assistant")?;
    info!(mode = ?system.assistant.executor().primary_mode(), "Primary backend ready");

    if let Some(message) = &args.once {
        let reply = system.assistant.respond(message).await;
        println!("{}", reply.text());
    } else {
        info!("Reading messages from stdin; type 'salir' to quit");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();
        while let Some(line) = lines.next_line().await? {
            let message = line.trim();
            if message.is_empty() {
                continue;
            }
            if EXIT_WORDS.iter().any(|w| message.eq_ignore_ascii_case(w)) {
                break;
            }
            let reply = system.assistant.respond(message).await;
            stdout.write_all(reply.text().as_bytes()).await?;
            stdout.write_all(b"\n\n").await?;
            stdout.flush().await?;
        }
    }

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    Ok(())
}
