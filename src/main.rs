use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use quiz_attempt::protocol::DEFAULT_PORT;
use quiz_attempt::{client, server, AppError, LocalService, RemoteService};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Take a quiz from a remote quiz service
    Take {
        /// Service host to connect to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Service port
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Quiz id to start directly (otherwise pick from the list)
        #[arg(short, long)]
        quiz: Option<String>,
    },

    /// Practice offline against a local quiz bank file
    Practice {
        /// JSON file to load the quiz bank from
        #[arg(short, long)]
        bank: PathBuf,

        /// Quiz id to start directly (otherwise pick from the list)
        #[arg(short, long)]
        quiz: Option<String>,
    },

    /// Host the quiz service
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// JSON file to load the quiz bank from
        #[arg(short, long)]
        bank: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Take { host, port, quiz } => take(&host, port, quiz).await,
        Command::Practice { bank, quiz } => practice(&bank, quiz).await,
        Command::Serve { port, bank } => {
            pretty_env_logger::init();
            server::run(port, bank).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn take(host: &str, port: u16, quiz: Option<String>) -> Result<(), AppError> {
    let service = RemoteService::connect(host, port).await?;
    client::run(service, quiz).await
}

async fn practice(bank: &PathBuf, quiz: Option<String>) -> Result<(), AppError> {
    let service = LocalService::from_json(bank)?;
    client::run(service, quiz).await
}
