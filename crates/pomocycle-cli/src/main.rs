use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod notifier;

#[derive(Parser)]
#[command(name = "pomocycle", version, about = "Pomocycle focus/break timer")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive timer session in the foreground
    Run {
        /// Start the first focus phase immediately
        #[arg(long)]
        start: bool,
    },
    /// Print the effective length of each phase as JSON
    Durations,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Run { start } => commands::session::run(start),
        Commands::Durations => commands::config::durations(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
