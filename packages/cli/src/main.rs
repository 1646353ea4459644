mod commands;
mod config;

use clap::{Parser, Subcommand};
use commands::{init, inspect, publish, InitArgs, InspectArgs, PublishArgs};

/// Pageforge CLI - static publishing for pageforge projects
#[derive(Parser, Debug)]
#[command(name = "pageforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new pageforge project file
    Init(InitArgs),

    /// Publish a project to a static bundle
    Publish(PublishArgs),

    /// Summarize the pages and nodes of a project file
    Inspect(InspectArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    match cli.command {
        Command::Init(args) => init::init(args, &cwd),
        Command::Publish(args) => publish::publish(args, &cwd),
        Command::Inspect(args) => inspect::inspect(args, &cwd),
    }
}
