use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mercado_core::config::MercadoConfig;
use mercado_infrastructure::ConfigService;

mod commands;

#[derive(Parser)]
#[command(name = "mercado")]
#[command(about = "Mercado Fácil back-office tools", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every data migration pass and print the report
    Migrate {
        /// Store directory (overrides the configured one)
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,

        /// Writes per committed batch
        #[arg(long, value_name = "N")]
        batch_size: Option<usize>,
    },
    /// Send a test push notification
    Notify {
        #[command(subcommand)]
        target: Option<NotifyTarget>,
    },
}

#[derive(Subcommand)]
enum NotifyTarget {
    /// Send to one device registration token
    Token { token: String },
    /// Broadcast to a topic
    Topic { topic: String },
}

fn init_tracing(config: &MercadoConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigService::new(cli.config.as_deref())?.load()?;
    init_tracing(&config);

    match cli.command {
        None => commands::migrate::run(&config, None, None).await?,
        Some(Commands::Migrate { store, batch_size }) => {
            commands::migrate::run(&config, store, batch_size).await?
        }
        Some(Commands::Notify { target }) => {
            let target = target.map(|t| match t {
                NotifyTarget::Token { token } => commands::notify::Target::Token(token),
                NotifyTarget::Topic { topic } => commands::notify::Target::Topic(topic),
            });
            commands::notify::run(&config, target).await?
        }
    }

    Ok(())
}
