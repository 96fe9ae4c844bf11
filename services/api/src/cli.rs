use crate::server;
use crate::students::{self, StudentsArgs};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use student_marks::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Student Marks Manager",
    about = "Serve the student marks store or manage its records from the command line",
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
    /// List, add, edit, or delete students through a running store
    Students(StudentsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the store from a CSV roster with a name,course,mark header
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Students(args) => students::run(args).await,
    }
}
