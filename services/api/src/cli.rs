use crate::commands::{
    run_apply_preview, run_format, run_postings_list, run_postings_show, ApplyPreviewArgs,
    FormatCommand, PostingsListArgs, PostingsShowArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use jobhub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "JobHub",
    about = "Serve the job board API or run its formatting and payload tools from the command line",
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
    /// Run a single display formatter and print the result
    Format {
        #[command(subcommand)]
        command: FormatCommand,
    },
    /// Browse postings from a CSV export
    Postings {
        #[command(subcommand)]
        command: PostingsCommand,
    },
    /// Build hiring API payloads without sending them
    Apply {
        #[command(subcommand)]
        command: ApplyCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PostingsCommand {
    /// List active postings as cards, newest first
    List(PostingsListArgs),
    /// Show the detail panel for one posting
    Show(PostingsShowArgs),
}

#[derive(Subcommand, Debug)]
enum ApplyCommand {
    /// Print the payload an application would submit
    Preview(ApplyPreviewArgs),
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
        Command::Format { command } => run_format(command),
        Command::Postings {
            command: PostingsCommand::List(args),
        } => run_postings_list(args),
        Command::Postings {
            command: PostingsCommand::Show(args),
        } => run_postings_show(args),
        Command::Apply {
            command: ApplyCommand::Preview(args),
        } => run_apply_preview(args).await,
    }
}
