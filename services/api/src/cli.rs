use clap::{Args, Parser, Subcommand};

use crate::demo::{run_charts, run_estimate, EstimateArgs};
use crate::server;
use prevention_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Prevention Risk Service",
    about = "Estimate relative diabetes risk for a planned lifestyle change",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Submit one comparison to a running server and print the outcome
    Estimate(EstimateArgs),
    /// List the featured visualizations (slug and caption)
    Charts,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args).await,
        Command::Charts => {
            run_charts();
            Ok(())
        }
    }
}
