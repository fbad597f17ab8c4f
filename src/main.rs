use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use parley::core::config;
use parley::{server, tui};

#[derive(Parser)]
#[command(name = "parley", about = "Terminal chat with a generative-text relay")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Chat from the terminal (default)
    Chat {
        /// Relay server URL, e.g. http://localhost:3000
        #[arg(long)]
        server: Option<String>,
    },
    /// Run the relay server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to parley.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("parley.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    });

    match args.command.unwrap_or(Command::Chat { server: None }) {
        Command::Serve { port } => {
            let resolved = config::resolve(&file_config, port, None);
            // One required secret; refuse to start without it.
            let Some(api_key) = resolved.gemini_api_key.clone() else {
                log::error!("GEMINI_API_KEY is not set; refusing to start");
                eprintln!(
                    "ERROR: GEMINI_API_KEY is not set (environment, .env file, or ~/.parley/config.toml)"
                );
                std::process::exit(1);
            };
            log::info!("Parley relay starting on port {}", resolved.port);
            server::run(api_key, &resolved).await
        }
        Command::Chat { server } => {
            let resolved = config::resolve(&file_config, None, server.as_deref());
            log::info!("Parley chat starting against {}", resolved.server_url);
            tui::run(&resolved)
        }
    }
}
