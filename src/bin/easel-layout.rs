// src/bin/easel-layout.rs
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;

use easel_core::{FontDescriptor, Rectangle};
use easel_layout::{place_text, AnchorPosition, TextPlacement};
use easel_render::{RecordingSurface, TextMetricsProbe};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "easel-layout")]
#[command(about = "Prints where each anchored label lands on a canvas")]
struct Args {
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Inset of the parent rectangle from the canvas edges
    #[arg(long, default_value_t = 20.0)]
    margin: f32,

    /// Font shorthand, e.g. "20px sans-serif"
    #[arg(long, default_value = "20px sans-serif")]
    font: FontDescriptor,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")?;

    let placements = compute_placements(&args)?;
    match args.format {
        OutputFormat::Table => print_table(&placements),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&placements).context("Failed to serialize placements")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn compute_placements(args: &Args) -> Result<Vec<TextPlacement>> {
    let canvas = Rectangle::new(0.0, 0.0, args.width, args.height).context("Invalid canvas size")?;
    if !(args.margin >= 0.0) {
        anyhow::bail!("margin must not be negative, got {}", args.margin);
    }
    let parent = canvas.inset(args.margin);
    debug!("parent rectangle: {:?}", parent);

    let mut surface = RecordingSurface::new(args.width, args.height);
    let probe = TextMetricsProbe::default();

    AnchorPosition::ALL
        .iter()
        .map(|anchor| {
            let label = anchor.label();
            let metrics = probe
                .measure(&mut surface, label, &args.font)
                .with_context(|| format!("Failed to measure '{}'", label))?;
            place_text(*anchor, label, &parent, metrics).with_context(|| format!("Failed to place '{}'", label))
        })
        .collect()
}

fn print_table(placements: &[TextPlacement]) {
    println!(
        "{:<16} {:>8} {:>8} {:>8} {:>8}  {:>8} {:>8}  {:<7} {:<7}",
        "anchor", "x", "y", "width", "height", "marker x", "marker y", "align", "baseline"
    );
    for placement in placements {
        let bounds = placement.bounds;
        println!(
            "{:<16} {:>8.2} {:>8.2} {:>8.2} {:>8.2}  {:>8.2} {:>8.2}  {:<7} {:<7}",
            placement.anchor.label(),
            bounds.x(),
            bounds.y(),
            bounds.width(),
            bounds.height(),
            placement.marker.x,
            placement.marker.y,
            placement.align.as_str(),
            placement.baseline.as_str()
        );
    }
}
