use clap::{Parser, Subcommand};
use inventory_service::client::InventoryClient;

#[derive(Parser)]
#[command(name = "inventory-cli")]
#[command(about = "Command-line client for the Inventory Service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// W3C traceparent to continue an existing trace.
    #[arg(short, long)]
    traceparent: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the service is alive
    Health,
    /// Check whether a product is available
    Check {
        /// Product identifier
        product_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut client = InventoryClient::new(&cli.url);
    if let Some(traceparent) = cli.traceparent {
        client = client.with_traceparent(traceparent);
    }

    match cli.command {
        Commands::Health => {
            println!("{}", client.health().await?);
        }
        Commands::Check { product_id } => {
            let res = client.check_available(&product_id).await?;
            let verdict = if res.available { "AVAILABLE" } else { "NOT_AVAILABLE" };
            println!("{}: {}", verdict, res.message);
        }
    }

    Ok(())
}
