use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use rilow_bot::application::errors::{BotError, ConfigError};
use rilow_bot::application::messaging::CommandRouter;
use rilow_bot::application::services::{Flow, MessageService};
use rilow_bot::application::state::BotState;
use rilow_bot::domain::traits::Bot;
use rilow_bot::extensions::builtin_host;
use rilow_bot::infrastructure::adapters::console::ConsoleAdapter;
use rilow_bot::infrastructure::config::Config;
use rilow_bot::infrastructure::lang::Translator;
use rilow_bot::infrastructure::storage::JsonStore;

/// File the DEBUG log layer writes to, inside the log directory
const LOG_FILE: &str = "current.log";

#[derive(Parser)]
#[command(name = "rilow-bot")]
#[command(about = "A small guild chat bot with hot-swappable extensions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Launcher config file path
    #[arg(short, long, default_value = "rilow.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot on the console
    Run {
        /// User id the console speaks as (overrides config)
        #[arg(long)]
        author: Option<u64>,

        /// Guild id the console speaks in (overrides config)
        #[arg(long)]
        guild: Option<u64>,
    },
    /// Show version
    Version,
    /// Write a default launcher config
    InitConfig,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { author, guild } => {
            let code = run_bot(&cli.config, author, guild);
            std::process::exit(code);
        }
        Commands::Version => {
            println!("rilow-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            if let Err(e) = init_config(&cli.config) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

/// stderr at `RUST_LOG` (default info), plus everything from DEBUG up in
/// `<log_dir>/current.log` when a directory is given and can be created.
fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let stderr = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let mut setup_error = None;
    let (file, guard) = match log_dir.map(|dir| (dir, std::fs::create_dir_all(dir))) {
        Some((dir, Ok(()))) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(writer)
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), Some(guard))
        }
        Some((dir, Err(e))) => {
            setup_error = Some(format!("Cannot create log directory {}: {}", dir.display(), e));
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(stderr).with(file).init();

    if let Some(e) = setup_error {
        tracing::warn!("{}", e);
    }
    guard
}

/// Returns the process exit code.
fn run_bot(config_path: &Path, author: Option<u64>, guild: Option<u64>) -> i32 {
    let mut config = match Config::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            let _guard = init_logging(None);
            tracing::error!("{}", e);
            return 1;
        }
    };
    if let Some(author) = author {
        config.console.author_id = author;
    }
    if guild.is_some() {
        config.console.guild_id = guild;
    }

    let _guard = init_logging(Some(&config.logging.directory));
    tracing::info!("Starting {}", config.bot.name);

    let router = match build_router(&config) {
        Ok(router) => router,
        Err(e) => {
            tracing::error!("Failed to start: {}", e);
            return 1;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return 1;
        }
    };

    let bot = ConsoleAdapter::new(config.bot.name.clone(), config.console.clone());
    let mut service = MessageService::new(bot, router);
    let code = rt.block_on(run_console_bot(&mut service));

    // A pending stdin read would block a regular runtime shutdown
    rt.shutdown_background();
    code
}

/// Open both stores, load the language and the initial extensions.
fn build_router(config: &Config) -> Result<CommandRouter, BotError> {
    let config_store = JsonStore::open(config.storage.config_file.clone())?;
    let data_store = JsonStore::open(config.storage.data_file.clone())?;

    let mut lang = Translator::new(config.lang.directory.clone());
    if let Err(e) = lang.set_language(config.lang.language.as_deref()) {
        tracing::warn!("Failed to load language: {}", e);
    }
    tracing::info!("Language: {} ({} entries)", lang.language(), lang.len());

    let state = BotState::new(config_store, data_store, lang);
    let mut router = CommandRouter::new(state, builtin_host());
    for name in &config.extensions.initial {
        router.load_extension(name)?;
    }
    tracing::info!("Extensions loaded: {}", router.extensions().loaded_names().join(", "));

    Ok(router)
}

async fn run_console_bot(service: &mut MessageService<ConsoleAdapter>) -> i32 {
    if let Err(e) = service.bot().start().await {
        tracing::error!("Failed to start bot: {}", e);
        return 1;
    }

    let info = service.bot().bot_info();
    let guild = service.bot().identity().guild_id;
    tracing::info!(
        "Bot started: {} (prefix '{}')",
        info.name,
        service.router().prefix_for(guild)
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let message = service.bot().message_from_line(&line);
                    if service.process(message).await == Flow::Shutdown {
                        break;
                    }
                }
                Ok(None) => {
                    tracing::info!("End of input");
                    break;
                }
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    if let Err(e) = service.shutdown().await {
        tracing::error!("Failed to shut down cleanly: {}", e);
    }
    0
}

/// Write the default launcher config to `path`, never over an existing file.
fn init_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::InvalidValue(format!("{} already exists", path.display())));
    }
    Config::default().save(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
