use clap::{Parser, Subcommand};
use forwardgate_core::cli;
use forwardgate_core::logging::{LogMode, default_log_mode, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "forwardgate",
    version,
    about = "Forwardgate: trusted-proxy client address resolution"
)]
struct Cli {
    /// Human-readable log output
    #[arg(long, global = true, conflicts_with = "json_logs")]
    pretty_logs: bool,

    /// JSON log output
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Config tooling
    Config {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },

    /// Run one request through the trust gate and print the result
    Resolve(cli::resolve::ResolveArgs),
}

fn main() {
    let cli = Cli::parse();

    let mode = if cli.pretty_logs {
        LogMode::Pretty
    } else if cli.json_logs {
        LogMode::Json
    } else {
        default_log_mode()
    };
    init_logging(mode);

    let result = match cli.command {
        Command::Config { cmd } => cli::conf::run(cmd),
        Command::Resolve(args) => cli::resolve::run(args),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
