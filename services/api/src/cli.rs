use crate::commands::{
    run_gate_check, run_outpass_queue, run_outpass_report, run_profile_check, GateCheckArgs,
    OutpassQueueArgs, OutpassReportArgs, ProfileCheckArgs,
};
use crate::server;
use campus_portal::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Campus Portal Evaluators",
    about = "Serve or run the profile completeness and outpass approval evaluators",
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
    /// Check student profiles against a completeness policy
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Summarize, queue, or gate-check outpass records
    Outpass {
        #[command(subcommand)]
        command: OutpassCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Report completeness percentage and missing fields for a profile document
    Check(ProfileCheckArgs),
}

#[derive(Subcommand, Debug)]
enum OutpassCommand {
    /// Print status counts, role workload and approval timelines
    Report(OutpassReportArgs),
    /// List the records awaiting a reviewer's decision
    Queue(OutpassQueueArgs),
    /// Check whether a record clears the gate on a given day
    Gate(GateCheckArgs),
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
        Command::Profile {
            command: ProfileCommand::Check(args),
        } => run_profile_check(args),
        Command::Outpass { command } => match command {
            OutpassCommand::Report(args) => run_outpass_report(args),
            OutpassCommand::Queue(args) => run_outpass_queue(args),
            OutpassCommand::Gate(args) => run_gate_check(args),
        },
    }
}
