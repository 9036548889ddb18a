use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// folio - portfolio contact service
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio contact form relay to Telegram and email", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Fill in and submit the contact form against a running server
    Send {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,

        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = folio::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    folio::observability::init_observability(
        "folio",
        env!("CARGO_PKG_VERSION"),
        &config.logging,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Send {
            name,
            email,
            message,
            endpoint,
        } => cli::send::send(&endpoint, &name, &email, &message).await,
    }
}
