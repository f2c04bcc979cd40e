use crate::demo::{run_demo, DemoArgs};
use crate::report::{run_assess, run_diseases, AssessArgs, DiseasesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use risk_coach::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Risk Coach",
    about = "Score chronic disease risk and serve the risk coach API",
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
    /// Score a questionnaire stored as JSON and print the report
    Assess(AssessArgs),
    /// List the configured diseases and where each table was loaded from
    Diseases(DiseasesArgs),
    /// Score a built-in sample profile to show the full report
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Directory holding the disease, guideline and test tables
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Diseases(args) => run_diseases(args),
        Command::Demo(args) => run_demo(args),
    }
}
