use crate::demo::{run_catalog_check, run_demo, CatalogCheckArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use process_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Process Match",
    about = "Run and demonstrate the employee process matching service from the command line",
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
    /// Inspect process catalog files without starting the service
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Run an end-to-end CLI demo covering matching, placement, and reporting
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Validate a catalog CSV file and print its capacity breakdown
    Check(CatalogCheckArgs),
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
        Command::Catalog {
            command: CatalogCommand::Check(args),
        } => run_catalog_check(args),
        Command::Demo(args) => run_demo(args),
    }
}
