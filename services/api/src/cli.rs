use crate::commands::{run_audit, run_evaluate, run_export, AuditArgs, EvaluateArgs, ExportArgs};
use crate::server;
use assessment_engine::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Assessment Engine",
    about = "Score questionnaire answers against an editable assessment configuration",
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
    /// Score a JSON answer list and print per-category results
    Evaluate(EvaluateArgs),
    /// Export or inspect assessment configuration documents
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a configuration document (the sample rubric unless --config is given)
    Export(ExportArgs),
    /// List orphaned references, overlapping ranges, and other integrity issues
    Audit(AuditArgs),
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Config {
            command: ConfigCommand::Export(args),
        } => run_export(args),
        Command::Config {
            command: ConfigCommand::Audit(args),
        } => run_audit(args),
    }
}
