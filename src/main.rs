// ABOUTME: Main entry point for the anonmode TUI and its headless subcommands

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, Terminal};
use std::{
    io,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use anonmode::app::{App, EventHandler};
use anonmode::components::LayoutComponent;
use anonmode::config::AppConfig;
use anonmode::headless::{self, HeadlessCommand};
use anonmode::host::SystemHost;

#[derive(Parser, Debug)]
#[command(name = "anonmode", version, about = "Terminal control panel for Tor, proxychains, AnonSurf and ProtonVPN")]
struct Cli {
    /// Config file (defaults to ~/.config/anonmode/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Network interface for MAC spoofing
    #[arg(long, value_name = "IF")]
    interface: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full anonymous mode sequence
    Start,
    /// Stop AnonSurf, ProtonVPN and Tor
    Stop,
    /// Check required tools
    Check {
        /// Install missing packages without asking
        #[arg(long)]
        install: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;
    if let Some(interface) = cli.interface {
        config.interface = interface;
    }

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    setup_logging();

    let host = Arc::new(SystemHost::new());

    if let Some(command) = cli.command {
        let command = match command {
            Commands::Start => HeadlessCommand::Start,
            Commands::Stop => HeadlessCommand::Stop,
            Commands::Check { install } => HeadlessCommand::Check { install },
        };
        if !nix::unistd::Uid::effective().is_root() {
            eprintln!("[Warning] Not running as root. Please run with sudo.");
        }
        headless::run(command, config, host, io::stdout()).await?;
        return Ok(());
    }

    setup_panic_handler();

    let mut app = App::new(config, host);
    app.init();
    let mut layout = LayoutComponent::new();

    run_tui(&mut app, &mut layout).await?;

    Ok(())
}

async fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    if let Err(e) = crossterm::terminal::is_raw_mode_enabled() {
        eprintln!("Cannot check terminal raw mode: {}", e);
        return Err(anyhow::anyhow!("Terminal not compatible: {}", e));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    // Start the initial check before the first frame
    app.tick()?;

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == event::KeyEventKind::Press {
                    if let Some(app_event) =
                        EventHandler::handle_key_event(key_event, &mut app.state)
                    {
                        EventHandler::process_event(app_event, &mut app.state);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if let Err(e) = app.tick() {
                tracing::error!("Error during app tick: {}", e);
            }
            last_tick = Instant::now();

            if app.needs_ui_refresh() {
                terminal.draw(|frame| {
                    layout.render(frame, &app.state);
                })?;
            }
        }

        if app.state.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = dirs::home_dir()
        .map(|home| home.join(".anonmode").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".anonmode/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!(
        "anonmode-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    // Logging is best effort; without a file the app still runs
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anonmode=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Restore the terminal before reporting
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stderr(), LeaveAlternateScreen, DisableMouseCapture);

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs in ~/.anonmode/logs for more details.");
    }));
}
