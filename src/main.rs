//! Inventory Service
//!
//! A demonstration microservice built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────────┐
//!                  │                  INVENTORY SERVICE                    │
//!                  │                                                       │
//!   Request        │  ┌──────────┐   ┌─────────────┐   ┌───────────────┐   │
//!   ───────────────┼─▶│  http    │──▶│ propagation │──▶│     span      │   │
//!   (traceparent)  │  │ server   │   │  extractor  │   │  start / tag  │   │
//!                  │  └──────────┘   └─────────────┘   └───────┬───────┘   │
//!                  │                                           ▼           │
//!   Response       │  ┌──────────┐   ┌─────────────┐   ┌───────────────┐   │
//!   ◀──────────────┼──│ handler  │◀──│   finish    │◀──│ availability  │   │
//!                  │  └──────────┘   └──────┬──────┘   │  rule + delay │   │
//!                  │                        │          └───────────────┘   │
//!                  │                        ▼                              │
//!                  │                 batched OTLP export ──────────────────┼──▶ Collector
//!                  └──────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use inventory_service::lifecycle::startup;

#[derive(Parser)]
#[command(name = "inventory-service")]
#[command(about = "Inventory Service with distributed tracing", long_about = None)]
struct Cli {
    /// Optional TOML configuration file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    startup::launch(cli.config.as_deref())?;
    Ok(())
}
