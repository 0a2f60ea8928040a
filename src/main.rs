//! Binary entrypoint for the guildquest CLI.
//!
//! Commands:
//! - `start [--console]` - run the bot on Discord, or on stdin/stdout with `--console`
//! - `init` - write a starter `config.toml`
//! - `servers [--json]` - print the configured server codes
//!
//! See the library crate docs for module-level details: `guildquest::`.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::sync::Arc;

use guildquest::bot::{console, discord, CommandParser, Dispatcher};
use guildquest::config::Config;
use guildquest::logutil::AUDIT_TARGET;
use guildquest::metrics;
use guildquest::quest::{QuestController, ResetScheduler};

#[derive(Parser)]
#[command(name = "guildquest")]
#[command(about = "A guild quest tracking bot with daily quotas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Start {
        /// Read commands from stdin instead of connecting to Discord
        #[arg(long)]
        console: bool,
    },
    /// Write a default configuration file
    Init,
    /// List the configured server codes
    Servers {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start { console } => {
            let config = Config::load_or_default(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            note_missing_config(&cli.config);
            config.validate().context("Invalid configuration")?;
            info!(
                "Starting {} (guildquest v{})",
                config.bot.name,
                env!("CARGO_PKG_VERSION")
            );

            let registry = config.registry()?;
            info!(
                "Tracking {} servers; limits: {} adds, {} claims per day",
                registry.len(),
                config.quests.add_limit,
                config.quests.claim_limit
            );
            let board = QuestController::new(registry, config.quests.policy()).into_shared();
            let dispatcher = Arc::new(Dispatcher::new(
                CommandParser::new(config.bot.command_prefix.clone()),
                board.clone(),
            ));
            let scheduler = Arc::new(ResetScheduler::new(
                config.schedule.tz()?,
                config.schedule.check_interval(),
            ));

            if console {
                scheduler.start(board);
                console::run(dispatcher).await?;
            } else {
                discord::run(&config, dispatcher, scheduler).await?;
            }
            info!("Shutting down: {}", metrics::snapshot().summary());
        }
        Commands::Init => {
            init_logging(&None, cli.verbose);
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Servers { json } => {
            let config = Config::load_or_default(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            note_missing_config(&cli.config);
            let registry = config.registry()?;
            if json {
                println!("{}", serde_json::to_string_pretty(registry.entries())?);
            } else {
                println!("{}", registry.listing());
            }
        }
    }

    Ok(())
}

fn note_missing_config(path: &str) {
    if !std::path::Path::new(path).exists() {
        info!("No config file at {}; using built-in defaults", path);
    }
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Base level from CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|cfg| cfg.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    // serenity is chatty below warn
    builder.filter_module("serenity", log::LevelFilter::Warn);

    let audit_path = config.as_ref().and_then(|cfg| cfg.logging.audit_file.clone());
    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    // Foreground runs keep console output even when a log file is configured
    let is_tty = atty::is(atty::Stream::Stdout);
    let file_mutex = log_file.map(|f| std::sync::Arc::new(std::sync::Mutex::new(f)));

    builder.format(move |fmt, record| {
        let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let line = format!("{} [{}] {}", ts, record.level(), record.args());

        if let Some(ref file) = file_mutex {
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "{}", line);
            }
        }

        if record.target() == AUDIT_TARGET {
            if let Some(ref path) = audit_path {
                if let Ok(mut af) = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                {
                    let _ = writeln!(af, "{}", line);
                }
            }
        }

        if file_mutex.is_none() || is_tty {
            writeln!(fmt, "{}", line)
        } else {
            Ok(())
        }
    });
    let _ = builder.try_init();
}
