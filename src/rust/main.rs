use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use triage::engine::DEFAULT_CONFIDENCE_THRESHOLD;
use triage::{server, EngineConfig, IntelEngine};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Minimum emotion probability needed to keep a prediction
    #[arg(long, global = true, default_value_t = DEFAULT_CONFIDENCE_THRESHOLD)]
    confidence_threshold: f32,

    /// Seed reply selection for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "TRIAGE_ADDR", default_value = server::DEFAULT_ADDR)]
        addr: String,
    },
    /// Classify a complaint report and print the result as JSON
    Report { text: String },
    /// Answer a chat message and print the result as JSON
    Chat { text: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    triage::init_logger();
    let args = Args::parse();

    let start_time = Instant::now();
    let engine = IntelEngine::new(EngineConfig {
        confidence_threshold: args.confidence_threshold,
        reply_seed: args.seed,
        ..EngineConfig::default()
    })?;
    info!("Engine built in {:.2?}", start_time.elapsed());

    match args.command {
        Command::Serve { addr } => server::serve(Arc::new(engine), &addr).await?,
        Command::Report { text } => {
            println!("{}", serde_json::to_string_pretty(&engine.classify_report(&text))?);
        }
        Command::Chat { text } => {
            println!("{}", serde_json::to_string_pretty(&engine.respond_to_chat(&text))?);
        }
    }

    Ok(())
}
