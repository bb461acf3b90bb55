mod animation;
mod app;
mod braille;
mod color;
mod config;
mod connector;
mod field;
mod particle;
mod presets;
mod render;
mod settings;
mod surface;
mod ui;

use anyhow::Context;
use app::App;
use clap::Parser;
use config::AppConfig;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use presets::PresetManager;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "blueprint-network")]
#[command(about = "Animated particle network rendered in the terminal")]
struct Args {
    // === Configuration ===
    /// Load settings from a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective config to a JSON file and exit
    #[arg(long = "export-config")]
    export_config: Option<PathBuf>,

    /// Start from a named preset (see --list-presets)
    #[arg(long)]
    preset: Option<String>,

    /// Print the available presets and exit
    #[arg(long = "list-presets")]
    list_presets: bool,

    // === Animation ===
    /// Fixed random seed for a reproducible layout
    #[arg(long)]
    seed: Option<u64>,

    /// Surface area in pixels per particle
    #[arg(long)]
    density: Option<f32>,

    /// Maximum distance at which particles are connected
    #[arg(long)]
    distance: Option<f32>,

    /// Surface pixels covered by one braille dot (1-16)
    #[arg(long = "pixels-per-dot")]
    pixels_per_dot: Option<f32>,

    /// Target frames per second (1-240)
    #[arg(long)]
    fps: Option<u32>,

    // === Display ===
    /// Show the stats overlay
    #[arg(long)]
    stats: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// Layer defaults, preset, config file and flags into one config
fn build_config(args: &Args, presets: &PresetManager) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(name) = &args.preset {
        config.settings = presets.find(name)?.settings.clone();
    }
    if let Some(path) = &args.config {
        config = AppConfig::load_over(path, &config)?;
    }

    let settings = &mut config.settings;
    if let Some(density) = args.density {
        settings.set_area_per_particle(density);
    }
    if let Some(distance) = args.distance {
        settings.connect_distance = distance;
    }
    if let Some(ppd) = args.pixels_per_dot {
        settings.set_pixels_per_dot(ppd);
    }
    if let Some(fps) = args.fps {
        settings.set_frame_rate(fps);
    }
    config.show_stats |= args.stats;

    config.settings.validate()?;
    Ok(config)
}

/// One line per preset: name, then description
fn list_presets(presets: &PresetManager, out: &mut impl Write) -> io::Result<()> {
    for preset in presets.all_presets() {
        writeln!(out, "{:<16} {}", preset.name, preset.description)?;
    }
    Ok(())
}

fn export_config(config: &AppConfig, path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    config.save_to_file(path)?;
    writeln!(out, "Config written to {}", path.display())?;
    Ok(())
}

/// Raw mode plus alternate screen; both are undone on drop, on every exit path
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> anyhow::Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut guard = Self { out };
        execute!(guard.out, EnterAlternateScreen).context("failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        // Best effort: a failed step must not skip the rest
        if let Err(err) = disable_raw_mode() {
            warn!(%err, "failed to disable raw mode");
        }
        if let Err(err) = execute!(self.out, LeaveAlternateScreen, Show) {
            warn!(%err, "failed to leave alternate screen");
        }
    }
}

/// Route tracing output to a file; the terminal belongs to the UI
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let presets = PresetManager::new();
    if args.list_presets {
        list_presets(&presets, &mut io::stdout())?;
        return Ok(());
    }

    let config = build_config(&args, &presets)?;
    if let Some(path) = &args.export_config {
        return export_config(&config, path, &mut io::stdout());
    }
    info!(settings = ?config.settings, seed = ?args.seed, "starting");

    let mut app = App::new(config.settings, args.seed, config.show_stats);

    // Setup terminal
    let guard = TerminalGuard::enter(io::stdout())?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, &mut app);

    // Cleanup
    drop(terminal);
    drop(guard);

    info!(frames = app.last_stats.frame, "shutting down");
    res.context("animation loop failed")
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let frame_duration = app.settings.frame_interval();

    let size = terminal.size()?;
    app.start(size.width, size.height);

    loop {
        // Book the next frame before doing this one's work
        let next_frame = Instant::now() + frame_duration;

        app.tick();
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events until the next frame is due
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    _ => {}
                },
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }
    }
}
