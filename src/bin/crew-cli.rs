//! Roster and gateway client for a running crew board.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use crew_board::config::{load_config, BoardConfig};
use crew_board::observability::logging;
use crew_board::roster::{fetch_live, FileMount, GatewayClient, RosterView, CREWS};

#[derive(Parser)]
#[command(name = "crew-cli")]
#[command(about = "Roster and gateway client for a running crew board", long_about = None)]
struct Cli {
    /// Gateway base URL. Falls back to `roster.gateway_url` from the config.
    #[arg(short, long)]
    gateway: Option<String>,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the board to an HTML file (offline first, then live)
    Render {
        #[arg(short, long, default_value = "board.html")]
        out: PathBuf,
    },
    /// Print who is live right now
    Live,
    /// Print a station response
    Station { id: String },
    /// Print a channel's post section
    Posts { id: String },
    /// Download a live thumbnail
    Thumb {
        bno: String,
        #[arg(short, long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BoardConfig::default(),
    };
    logging::init("warn");

    let gateway = cli.gateway.unwrap_or(config.roster.gateway_url);
    let client = GatewayClient::new(&gateway);

    match cli.command {
        Commands::Render { out } => {
            let view = RosterView::new(CREWS, client);
            let snapshot = view.init(&mut FileMount::new(&out)).await?;
            println!(
                "Wrote {} ({} live, {} lookups failed)",
                out.display(),
                snapshot.table.len(),
                snapshot.failed_count()
            );
        }
        Commands::Live => {
            let snapshot = fetch_live(CREWS, &client).await;
            println!("{}", serde_json::to_string_pretty(&snapshot.table)?);
            if snapshot.failed_count() > 0 {
                eprintln!("{} lookups failed", snapshot.failed_count());
            }
        }
        Commands::Station { id } => print_json(&client.station(&id).await?)?,
        Commands::Posts { id } => print_json(&client.posts(&id).await?)?,
        Commands::Thumb { bno, out } => {
            let bytes = client.thumbnail(&bno).await?;
            std::fs::write(&out, &bytes)?;
            println!("Wrote {} bytes to {}", bytes.len(), out.display());
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
