//! Hexshot: hexagonal bubble shooter with a move-suggestion assistant, in the terminal.

mod app;
mod cluster;
mod game;
mod grid;
mod highscores;
mod hint;
mod input;
mod placement;
mod sweep;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Rules derived from the CLI that shape a session (board size, row pressure, levels, colours).
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub columns: usize,
    pub initial_rows: usize,
    pub max_initial_colors: usize,
    pub shots_per_row: u32,
    pub level_threshold: u32,
    pub max_rows: usize,
    pub mode: PlayMode,
    pub hints: bool,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            initial_rows: 6,
            max_initial_colors: 4,
            shots_per_row: 6,
            level_threshold: 520,
            max_rows: 13,
            mode: PlayMode::Standard,
            hints: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Keep the board usable: at least one column and row, and no more starting rows than
    /// `max_rows` (a deeper deal would already be over the limit).
    pub fn clamped(mut self) -> Self {
        self.columns = self.columns.max(1);
        self.max_rows = self.max_rows.max(1);
        self.initial_rows = self.initial_rows.min(self.max_rows);
        self
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = args.log_file.as_deref() {
        init_logging(path)?;
    }
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_else(|e| {
        log::warn!("theme not loaded, using defaults: {}", e);
        theme::Theme::default()
    });
    let config = GameConfig {
        columns: args.columns,
        initial_rows: args.initial_rows,
        max_initial_colors: usize::from(args.max_initial_colors),
        shots_per_row: args.shots_per_row,
        level_threshold: args.level_threshold,
        max_rows: args.max_rows,
        mode: args.mode,
        hints: !args.no_hints,
        seed: args.seed,
    }
    .clamped();
    log::info!("starting hexshot with {:?}", config);
    let mut app = App::new(args, config, theme)?;
    app.run()?;
    Ok(())
}

/// Route `log` output to a file; the terminal belongs to the UI. Level comes from RUST_LOG.
fn init_logging(path: &std::path::Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Hexagonal bubble shooter in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "hexshot",
    version,
    about = "Hexagonal bubble shooter in the terminal. Match three or more bubbles of one colour; detached bubbles fall.",
    long_about = "Hexshot is a terminal bubble shooter on a staggered hex grid.\n\n\
        Aim and shoot the current bubble into the grid. Three or more connected bubbles of one \
        colour pop; bubbles no longer hanging from the ceiling fall for bonus points. Every few \
        shots a new row is pushed in from the top (disabled in zen mode). The assistant \
        highlights the cell that would pop the largest group.\n\n\
        CONTROLS:\n  Left/Right h/l  Aim       Up/Down k/j  Power\n  Space/Enter     Shoot     H            Toggle hints\n  Z               Toggle zen    P        Pause      Q / Esc    Quit"
)]
pub struct Args {
    /// Play mode: standard (rows keep coming) or zen (no automatic rows).
    #[arg(short, long, default_value = "standard")]
    pub mode: PlayMode,

    /// Bubbles per row. Clamped so the board fits the terminal.
    #[arg(short, long, default_value = "10", value_name = "COLS")]
    pub columns: usize,

    /// Rows filled at the start of a round.
    #[arg(long, default_value = "6", value_name = "ROWS")]
    pub initial_rows: usize,

    /// A new row is pushed in after this many shots (standard mode).
    #[arg(long, default_value = "6", value_name = "N")]
    pub shots_per_row: u32,

    /// More rows than this ends the round.
    #[arg(long, default_value = "13", value_name = "ROWS")]
    pub max_rows: usize,

    /// Colours in play at level 1 (one more unlocks every 3 levels, up to 6).
    #[arg(long, default_value = "4", value_name = "N", value_parser = clap::value_parser!(u8).range(1..=6))]
    pub max_initial_colors: u8,

    /// Points per level.
    #[arg(long, default_value = "520", value_name = "POINTS")]
    pub level_threshold: u32,

    /// Start with the move assistant switched off.
    #[arg(long)]
    pub no_hints: bool,

    /// Seed for the colour generator (reproducible boards).
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Name recorded on the local leaderboard. Defaults to $USER.
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Path to theme file (btop-style theme[key]=\"value\"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<std::path::PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Disable the pop animation.
    #[arg(long)]
    pub no_animation: bool,

    /// Skip main menu and start game immediately.
    #[arg(long)]
    pub no_menu: bool,

    /// Simulation ticks per second.
    #[arg(long, default_value = "60.0", value_name = "RATE")]
    pub tick_rate: f64,

    /// Write logs to this file (level from RUST_LOG, default info).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<std::path::PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    #[default]
    Standard,
    Zen,
}

impl PlayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Zen => "zen",
        }
    }
}
