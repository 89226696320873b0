//! Pomodoro Dashboard Timer CLI
//!
//! Runs the dashboard's Pomodoro countdown in a terminal:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after every 4 work cycles

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;

use pomodoro_dashboard::cli::{
    spawn_stdin_reader, Cli, Commands, Display, DurationArgs, RunArgs, TerminalDisplay,
    TerminalNotifier,
};
use pomodoro_dashboard::engine::{run, Control, TimerEngine};
use pomodoro_dashboard::settings;
use pomodoro_dashboard::types::Durations;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so the countdown on stdout stays readable.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run_session(args).await?,
        Some(Commands::Settings(args)) => {
            let durations = resolve_durations(&args.durations)?;
            Display::show_settings(&durations).context("failed to print settings")?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Resolves durations from the settings file and flags.
fn resolve_durations(args: &DurationArgs) -> Result<Durations> {
    settings::resolve(args.config.as_deref(), args.overrides()).map_err(|err| {
        let hint = err.suggestion();
        anyhow::Error::new(err).context(format!("could not load settings ({hint})"))
    })
}

/// Runs an interactive session until `quit`, end of input or Ctrl-C.
async fn run_session(args: RunArgs) -> Result<()> {
    let durations = resolve_durations(&args.durations)?;
    tracing::info!(?durations, "Starting timer session");

    let (tx, mut rx) = mpsc::unbounded_channel();

    if args.autostart {
        tx.send(Control::Start)
            .context("failed to queue autostart")?;
    }

    let interrupt_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted");
            let _ = interrupt_tx.send(Control::Quit);
        }
    });

    spawn_stdin_reader(tx).context("failed to start input reader")?;

    Display::show_controls();
    let mut engine = TimerEngine::new(
        durations,
        TerminalDisplay::stdout(),
        TerminalNotifier::stderr(),
    );
    let summary = run(&mut engine, &mut rx).await;

    println!();
    println!("{}", summary.summary());
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
