use crate::demo::{run_demo, run_score, run_weights_validate, ScoreArgs, WeightsValidateArgs};
use crate::server;
use capability_scoring::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Capability Scoring",
    about = "Score capability assessments from the command line or over HTTP",
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
    /// Score an assessment submission or a CSV ratings export
    Score(ScoreArgs),
    /// Inspect question-type weight configurations
    Weights {
        #[command(subcommand)]
        command: WeightsCommand,
    },
    /// Score a built-in sample assessment
    Demo,
}

#[derive(Subcommand, Debug)]
enum WeightsCommand {
    /// Parse a question-type config and check that the weights total 100
    Validate(WeightsValidateArgs),
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
        Command::Score(args) => run_score(args),
        Command::Weights {
            command: WeightsCommand::Validate(args),
        } => run_weights_validate(args),
        Command::Demo => run_demo(),
    }
}
