mod cmd;
mod output;
mod root;
mod wizard;

use clap::{Parser, Subcommand};
use cmd::init::InitArgs;

#[derive(Parser)]
#[command(
    name = "claude-hooks",
    about = "Scaffold typed TypeScript hook handlers into .claude/hooks",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Options for the default `init` command
    #[command(flatten)]
    init: InitArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate .claude/hooks/{index,lib,session}.ts and register them in settings.json (default)
    Init(InitArgs),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = match cli.command {
        Some(Commands::Init(args)) => args,
        None => cli.init,
    };
    let root = root::resolve_root(args.root.as_deref());

    if let Err(e) = cmd::init::run(&root, &args) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
