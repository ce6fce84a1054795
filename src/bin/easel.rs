// src/bin/easel.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use easel_render::RecordingSurface;
use easel_runtime::{dashed_rect_timer, HostConfig, RenderHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    /// Simulated clock, prints the final frame
    Headless,
    /// Real-time rendering in the terminal
    Terminal,
}

#[derive(Parser)]
#[command(name = "easel")]
#[command(about = "Renders the anchored text layout scene with its timers")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = BackendKind::Headless)]
    backend: BackendKind,

    /// Canvas width. Overrides the config file.
    #[arg(long)]
    width: Option<f32>,

    /// Canvas height. Overrides the config file.
    #[arg(long)]
    height: Option<f32>,

    /// Simulated seconds to run headless
    #[arg(long)]
    seconds: Option<f32>,

    #[arg(long)]
    fps: Option<f32>,

    /// Draw the background grid
    #[arg(long)]
    grid: bool,

    /// Outline the computed text rectangles
    #[arg(long)]
    show_bounds: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Print the resolved configuration without rendering
    #[arg(short, long)]
    info: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug)?;

    let config = resolve_config(&args)?;
    if args.info {
        return print_info(&config);
    }

    let surface = RecordingSurface::new(config.canvas.width, config.canvas.height)
        .with_probe(config.probe()?)
        .discarding_history();
    let mut host = RenderHost::new(surface)
        .with_probe(config.probe()?)
        .with_scene(config.scene()?);
    if let Some(rect) = config.dashed_rect()? {
        host.register_timer(dashed_rect_timer(rect), config.dashed_rect.interval)?;
    }

    match args.backend {
        BackendKind::Headless => run_headless(host, &config),
        BackendKind::Terminal => run_terminal(host, &config),
    }
}

fn init_logging(debug: bool) -> Result<()> {
    let level = if debug { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let subscriber = tracing_subscriber::fmt().with_max_level(level).with_target(false).compact().finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}

fn resolve_config(args: &Args) -> Result<HostConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config: {}", path.display());
            HostConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => HostConfig::default(),
    };

    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }
    if let Some(seconds) = args.seconds {
        config.run.seconds = seconds;
    }
    if let Some(fps) = args.fps {
        config.run.fps = fps;
    }
    config.grid.enabled |= args.grid;
    config.layout.show_bounds |= args.show_bounds;

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn print_info(config: &HostConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    println!("{}", rendered);
    Ok(())
}

fn run_headless(mut host: RenderHost<RecordingSurface>, config: &HostConfig) -> Result<()> {
    info!(
        "Simulating {}s at {} fps on a {}x{} canvas",
        config.run.seconds, config.run.fps, config.canvas.width, config.canvas.height
    );
    let stats = host
        .run_simulated(config.run.seconds, config.frame_step())
        .context("Simulation failed")?;

    print!("{}", host.surface().frame_dump());
    println!();
    println!(
        "ticks: {}  frames: {}  skipped: {}  timer fires: {}  dash offset: {}  elapsed: {:.3}s",
        stats.ticks,
        stats.frames,
        stats.skipped_frames,
        stats.timer_fires,
        host.frame().state.dash_offset(),
        stats.elapsed
    );
    Ok(())
}

#[cfg(feature = "terminal")]
fn run_terminal(mut host: RenderHost<RecordingSurface>, config: &HostConfig) -> Result<()> {
    use std::io;

    use crossterm::{
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, LeaveAlternateScreen},
    };

    enable_raw_mode()?;
    let result = terminal_loop(&mut host, config);

    // Restore the terminal, even when setup or the loop failed
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    info!("Terminal renderer shutdown complete.");
    result
}

#[cfg(feature = "terminal")]
fn terminal_loop(host: &mut RenderHost<RecordingSurface>, config: &HostConfig) -> Result<()> {
    use std::io;
    use std::time::{Duration, Instant};

    use crossterm::{
        event::{self, Event as CrosstermEvent, KeyCode},
        execute,
        terminal::EnterAlternateScreen,
    };
    use easel_ratatui::TerminalPresenter;
    use glam::Vec2;
    use ratatui::prelude::CrosstermBackend;
    use tracing::error;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut presenter = TerminalPresenter::new(CrosstermBackend::new(stdout))?;

    let canvas = Vec2::new(config.canvas.width, config.canvas.height);
    let frame_time = Duration::from_secs_f32(config.frame_step());
    info!("Starting terminal render loop... (Press 'q' to quit)");

    let mut last_frame_time = Instant::now();
    loop {
        if event::poll(frame_time)? {
            if let CrosstermEvent::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
                    info!("Exit requested.");
                    return Ok(());
                }
            }
        }

        let dt = last_frame_time.elapsed().as_secs_f32();
        last_frame_time = Instant::now();
        let report = host.tick(dt)?;
        if report.rendered {
            if let Err(e) = presenter.present(host.surface().current_frame(), canvas) {
                error!("Failed to present frame: {}", e);
                return Err(e.into());
            }
        }
    }
}

#[cfg(not(feature = "terminal"))]
fn run_terminal(_host: RenderHost<RecordingSurface>, _config: &HostConfig) -> Result<()> {
    anyhow::bail!("this build has no terminal backend; rebuild with `--features terminal`")
}
