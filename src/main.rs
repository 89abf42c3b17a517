//! Glade Runner - Entry Point
//!
//! Generates a world from settings, prints a colour preview to the terminal
//! and optionally replays the unlock route through the progression tracker.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
};

use glade_runner::config::DEFAULT_SETTINGS_PATH;
use glade_runner::world::TilePos;
use glade_runner::{
    ProgressionEvent, ProgressionTracker, RegionLabel, TileType, WorldMap, WorldSettings, WorldVariant,
};

/// Widest preview printed, in terminal columns
const MAX_PREVIEW_COLUMNS: i32 = 128;

#[derive(Parser, Debug)]
#[command(name = "glade_runner")]
#[command(about = "Generate Glade Runner worlds and preview them in the terminal")]
struct Args {
    /// RON settings file (defaults to assets/config/world.ron)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width in tiles
    #[arg(short = 'W', long)]
    width: Option<i32>,

    /// Height in tiles
    #[arg(short = 'H', long)]
    height: Option<i32>,

    /// Coastline seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// banded, valley or island
    #[arg(short, long)]
    variant: Option<WorldVariant>,

    /// Write the island layout as JSON
    #[arg(long)]
    layout_json: Option<PathBuf>,

    /// Write the effective settings as RON and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Replay the unlock route through the progression tracker
    #[arg(long)]
    walk: bool,

    /// Skip the terminal preview
    #[arg(long)]
    no_preview: bool,
}

impl Args {
    fn settings(&self) -> WorldSettings {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
        let mut settings = WorldSettings::load_or_default(path);
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(variant) = self.variant {
            settings.variant = variant;
        }
        settings
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = args.settings();
    log::info!("Starting Glade Runner v{}", env!("CARGO_PKG_VERSION"));

    if let Some(path) = &args.write_config {
        settings
            .save(path)
            .with_context(|| format!("writing settings to {}", path.display()))?;
        log::info!("Wrote settings to {}", path.display());
        return Ok(());
    }

    let mut map = WorldMap::generate(&settings)
        .with_context(|| format!("generating {} world", settings.variant))?;

    print_summary(&map)?;
    if !args.no_preview {
        print_preview(&map)?;
    }

    if let Some(path) = &args.layout_json {
        let layout = map
            .layout()
            .with_context(|| format!("{} worlds have no layout", map.variant()))?;
        let json = serde_json::to_string_pretty(layout)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote layout to {}", path.display());
    }

    if args.walk {
        walk_unlock_route(&mut map)?;
    }

    Ok(())
}

fn print_summary(map: &WorldMap) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} world, {}x{} tiles ({}x{} px)",
        map.variant(),
        map.width(),
        map.height(),
        map.pixel_width(),
        map.pixel_height()
    )?;
    for tile in TileType::ALL {
        let count = map.count_tiles(tile);
        if count > 0 {
            writeln!(out, "  {} {:<14} {:>6}", tile.glyph(), tile.name(), count)?;
        }
    }
    Ok(())
}

/// One coloured cell per sampled tile
fn print_preview(map: &WorldMap) -> Result<()> {
    let step = (map.width() + MAX_PREVIEW_COLUMNS - 1) / MAX_PREVIEW_COLUMNS;
    let step = step.max(1) as usize;

    let mut out = io::stdout().lock();
    for row in map.rows().step_by(step) {
        for tile in row.iter().step_by(step) {
            let (r, g, b) = tile.color();
            queue!(
                out,
                SetBackgroundColor(Color::Rgb { r, g, b }),
                Print(' ')
            )?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()?;
    Ok(())
}

/// Visit the unlock tiles in order and log what the tracker reports
fn walk_unlock_route(map: &mut WorldMap) -> Result<()> {
    let mut tracker = ProgressionTracker::new(map).context("walking the unlock route")?;
    let layout = tracker.layout().clone();

    let mut route: Vec<(&str, TilePos)> = vec![
        ("town centre", layout.town_center),
        ("town unlock", layout.town_unlock),
        ("forest unlock", layout.forest_unlock),
    ];
    for region in [RegionLabel::Mountain, RegionLabel::Volcano] {
        if let Some(spawn) = layout.spawn(region) {
            route.push((region.display_name(), spawn));
        }
    }

    for (name, tile) in route {
        let (x, y) = tile.pixel_center();
        let events = tracker.update(map, x, y, 1.0 / 60.0);
        log::info!("{} {:?}: {} event(s)", name, tile, events.len());
        for event in events {
            if let ProgressionEvent::RegionChanged { to, .. } = &event {
                log::info!("  ambient -> {}", to.ambient_key());
            }
            log::info!("  {:?}", event);
        }
        if let Some(banner) = tracker.banner() {
            log::info!("  banner: {}", banner);
        }
    }

    let unlocked: Vec<_> = tracker.state().unlocked.iter().map(|g| g.name()).collect();
    log::info!("Unlocked gates: {:?}", unlocked);
    log::info!("Gate tiles left closed: {}", map.count_tiles(TileType::Gate));
    Ok(())
}
