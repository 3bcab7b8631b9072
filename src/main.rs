use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

use syncboard::server;
use syncboard::sync::remote;

#[derive(Parser)]
#[command(name = "syncboard")]
#[command(
    about = "Real-time collaborative task board with whole-snapshot replication and live presence signaling",
    version
)]
#[command(after_help = "Syncboard Features:
- One authoritative board, replicated in full to every participant on each change
- Last-write-wins arbitration of concurrent edits, no merge conflicts to resolve
- Live highlight of which participant is touching which task
- Participant count kept consistent across all connected clients
- Self-healing protocol: a missed broadcast is recovered by the next full snapshot
- Read-only /board endpoint and a terminal observer for demos and debugging")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the coordinating board server
    Serve {
        #[arg(short, long, default_value = "5001")]
        port: u16,

        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Join a board as a terminal observer
    Join {
        #[arg(short, long, default_value = "ws://localhost:5001/ws")]
        url: String,
    },
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Some(cmd) => cmd,
        None => Commands::Serve {
            port: 5001,
            bind: "0.0.0.0".to_string(),
        },
    };

    match command {
        Commands::Serve { port, bind } => {
            init_tracing();
            println!(
                "{}",
                format!("🌐 Starting board server on port {}...", port)
                    .cyan()
                    .bold()
            );
            server::start(port, &bind).await?;
        }

        Commands::Join { url } => {
            println!("{}", "👁  Joining shared board...".cyan().bold());
            remote::watch(&url).await?;
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("syncboard=info")),
        )
        .init();
}
