/*
[INPUT]:  CLI arguments, YAML configuration file, AGRISYNC__* environment
[OUTPUT]: Task TUI, plain task listing, or a generated config file
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or logging setup
*/

mod cli;
mod tui;

use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use agrisync_tasks::config::{AppConfig, LoggingConfig, default_config_path};
use agrisync_tasks::{Session, TaskListController};

use crate::tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory};

#[derive(Parser, Debug)]
#[command(name = "agrisync-tasks", version, about = "AgriSync farm task manager")]
struct Cli {
    /// Config file; defaults to <config dir>/agrisync/config.yaml
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "base-url", value_name = "URL", global = true)]
    base_url: Option<String>,
    #[arg(long = "token", value_name = "TOKEN", global = true)]
    token: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive task screen (default)
    Tui,
    /// Print the task list for the configured user
    List,
    /// Write a new config file interactively
    Init {
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

enum LogTarget {
    Stderr,
    Buffer(LogBufferHandle),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    match args.command.as_ref().unwrap_or(&Command::Tui) {
        Command::Init { output } => {
            let output = output
                .clone()
                .or_else(default_config_path)
                .context("no config directory available; pass --output")?;
            cli::init::run_init(output)
        }
        Command::List => {
            let config = load_config(&args)?;
            let _guard = init_tracing(&config.logging, LogTarget::Stderr)?;
            let controller = build_controller(&config)?;
            let stdout = std::io::stdout();
            cli::list::run_list(controller, &mut stdout.lock()).await
        }
        Command::Tui => {
            let config = load_config(&args)?;
            let log_buffer: LogBufferHandle =
                Arc::new(StdMutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY)));
            let _guard = init_tracing(&config.logging, LogTarget::Buffer(log_buffer.clone()))?;
            info!(base_url = %config.api.base_url, "starting agrisync-tasks");
            let controller = build_controller(&config)?;
            tui::run_tui(controller, log_buffer).await
        }
    }
}

fn load_config(args: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(args.config_path.as_deref()).context("load config")?;
    config.apply_overrides(
        args.base_url.clone(),
        args.token.clone(),
        args.log_level.clone(),
    );
    Ok(config)
}

fn build_controller(config: &AppConfig) -> Result<TaskListController> {
    let client = config.build_client().context("build API client")?;
    let session = Session::new(config.session_user());
    Ok(TaskListController::new(Arc::new(client), session))
}

/// Install the subscriber; the returned guard flushes the log file on drop
fn init_tracing(logging: &LoggingConfig, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&logging.level).context("invalid log level")?;

    let (file_layer, guard) = match &logging.file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let file_name = path
                .file_name()
                .context("log file path must name a file")?;
            std::fs::create_dir_all(&directory)
                .with_context(|| format!("create log directory {}", directory.display()))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    let result = match target {
        LogTarget::Stderr => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogTarget::Buffer(buffer) => registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(LogWriterFactory::new(buffer)),
            )
            .try_init(),
    };
    result
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}
