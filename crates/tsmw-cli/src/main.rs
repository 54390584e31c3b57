//! CLI frontend for tsmw, the table-side skill-check middleware.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tsmw",
    about = "tsmw: skill checks and a hidden world bible behind bracketed control lines",
    version,
    propagate_version = true
)]
struct Cli {
    /// World file (overrides the config file)
    #[arg(short, long, global = true)]
    world: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `silent` (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter world file
    Init {
        /// File to create
        file: PathBuf,
    },

    /// Show a character's skills
    Sheet {
        /// Character id
        who: String,
    },

    /// Roll a skill check for a character
    Check {
        /// Character id
        who: String,

        /// Skill name (case-sensitive)
        skill: String,

        /// Context, e.g. "light:dim;distance:far" or "challenging"
        #[arg(long, default_value = "")]
        context: String,

        /// Use this roll instead of rolling (physical dice)
        #[arg(short, long)]
        roll: Option<i64>,

        /// Reason recorded with the check
        #[arg(long, default_value = "cli")]
        reason: String,
    },

    /// Roll d100 against a bare threshold
    Roll {
        /// Target number
        #[arg(allow_negative_numbers = true)]
        threshold: i32,

        /// Use this roll instead of rolling
        #[arg(short, long)]
        roll: Option<i64>,

        /// Named difficulty applied to the threshold
        #[arg(short, long)]
        difficulty: Option<String>,
    },

    /// Print the value at a dotted path
    Get {
        /// Dotted path, e.g. cities.rio.gm.clocks
        path: String,
    },

    /// Write a value at a dotted path
    Set {
        /// Dotted path
        path: String,

        /// Value (numbers and true/false are coerced)
        value: String,

        /// Allow writes outside the gated namespace
        #[arg(long)]
        unrestricted: bool,

        /// Reason recorded with the write
        #[arg(long, default_value = "cli")]
        reason: String,
    },

    /// Move a city clock
    Tick {
        /// City id
        city: String,

        /// Clock key
        key: String,

        /// Signed step, e.g. +2 or -1
        #[arg(allow_negative_numbers = true)]
        delta: i64,

        /// Reason recorded with the change
        #[arg(long, default_value = "cli")]
        reason: String,
    },

    /// Run control lines through the middleware (one line, or stdin)
    Process {
        /// A single line to process; omit to read lines from stdin
        line: Option<String>,
    },

    /// Serve the HTTP endpoints
    Serve {
        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1:5050")]
        addr: String,
    },
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match commands::load_config(
        cli.config.as_deref(),
        cli.world.as_deref(),
        cli.log_level.as_deref(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    init_logging(&config.tracing_filter());

    let result = match cli.command {
        Commands::Init { file } => commands::init::run(&file),
        Commands::Sheet { who } => commands::sheet::run(&config, &who),
        Commands::Check {
            who,
            skill,
            context,
            roll,
            reason,
        } => commands::check::run(config, who, skill, context, reason, roll),
        Commands::Roll {
            threshold,
            roll,
            difficulty,
        } => commands::roll::run(&config, threshold, roll, difficulty.as_deref()),
        Commands::Get { path } => commands::get::run(&config, &path),
        Commands::Set {
            path,
            value,
            unrestricted,
            reason,
        } => commands::set::run(config, path, value, reason, unrestricted),
        Commands::Tick {
            city,
            key,
            delta,
            reason,
        } => commands::tick::run(config, city, key, delta, reason),
        Commands::Process { line } => commands::process::run(config, line.as_deref()),
        Commands::Serve { addr } => commands::serve::run(config, &addr),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
