//! Game session: grid, colour queue, aim, projectile, row pressure, score/combo/level, events.

use crate::grid::{BubbleColor, Cell, HexCoord, HexGrid, RowWidths};
use crate::hint::{Suggestion, find_best_suggestion};
use crate::placement::{BoardLayout, Placement, Settled, place_bubble};
use crate::{GameConfig, PlayMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Number of distinct bubble colours the palette offers.
pub const PALETTE_SIZE: usize = 6;

/// Field rows below `max_rows` left free for the shooter.
pub const SHOOTER_ROWS: usize = 3;

/// Aim limits (radians, measured upwards from +x).
const MIN_AIM_ANGLE: f32 = 15.0 * std::f32::consts::PI / 180.0;
const MAX_AIM_ANGLE: f32 = 165.0 * std::f32::consts::PI / 180.0;
pub const AIM_NUDGE: f32 = 0.07;
const MIN_POWER: f32 = 0.35;
const MIN_FIRE_POWER: f32 = 0.4;
const POWER_STEP: f32 = 0.04;

/// Shot speed in radii per second.
const BASE_SHOT_SPEED: f32 = 12.5;
const MIN_SHOT_SPEED: f32 = 23.5;

/// Longest single simulation step in seconds.
const MAX_STEP_SECS: f32 = 0.02;

/// Contact distance is `2 * radius - COLLISION_SLACK * radius`.
const COLLISION_SLACK: f32 = 0.1;

/// Popups live this long (ms).
const POPUP_LIFETIME_MS: u32 = 1500;

/// Random bubble colours; more colours unlock as the level rises.
#[derive(Debug, Clone)]
pub struct ColorSource {
    rng: StdRng,
    max_initial_colors: usize,
}

impl ColorSource {
    pub fn new(seed: Option<u64>, max_initial_colors: usize) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            max_initial_colors,
        }
    }

    /// Colours in play at `level`.
    pub fn color_count(&self, level: u32) -> usize {
        let unlocked = self.max_initial_colors + (level.saturating_sub(1) / 3) as usize;
        unlocked.clamp(1, PALETTE_SIZE)
    }

    pub fn next(&mut self, level: u32) -> BubbleColor {
        let count = self.color_count(level);
        BubbleColor(self.rng.random_range(0..count) as u8)
    }
}

/// Bubble in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: BubbleColor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    /// Radians upwards from +x; PI/2 is straight up.
    pub angle: f32,
    /// 0..=1
    pub power: f32,
}

impl Default for Aim {
    fn default() -> Self {
        Self {
            angle: std::f32::consts::FRAC_PI_2,
            power: 0.45,
        }
    }
}

/// Facts for the UI, logging and persistence layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ClusterRemoved {
        cells: usize,
        floating: usize,
        points: u32,
        combo: u32,
    },
    ComboReset,
    RowAdded,
    ShotDropped {
        target: HexCoord,
    },
    LevelUp {
        level: u32,
    },
    HintComputed {
        target: HexCoord,
        size: usize,
    },
    HintUnavailable,
    HintsToggled {
        enabled: bool,
    },
    ZenToggled {
        enabled: bool,
    },
    ZenToggleRefused,
    GameOver {
        score: u32,
        level: u32,
        max_combo: u32,
        mode: PlayMode,
    },
}

#[derive(Debug, Clone)]
pub struct ScorePopup {
    pub at: HexCoord,
    pub amount: u32,
    pub combo: u32,
    pub age_ms: u32,
}

/// One play session. The grid is owned here; nothing in the grid points back.
#[derive(Debug)]
pub struct GameState {
    pub grid: HexGrid<RowWidths>,
    pub layout: BoardLayout,
    config: GameConfig,
    colors: ColorSource,
    pub score: u32,
    pub best_score: u32,
    pub level: u32,
    pub shots: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub current_color: BubbleColor,
    pub next_color: BubbleColor,
    pub projectile: Option<Projectile>,
    pub aim: Aim,
    pub game_over: bool,
    pub hints_enabled: bool,
    pub zen_mode: bool,
    needs_hint: bool,
    /// Latest assistant target, if any.
    pub assistant: Option<Suggestion>,
    /// Cells of the last popped cluster, kept for the pop animation.
    pub popped: Vec<(HexCoord, BubbleColor)>,
    pub pop_in_progress: bool,
    pub popups: Vec<ScorePopup>,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(config: &GameConfig, best_score: u32) -> Self {
        let columns = config.columns.max(1);
        let layout = BoardLayout::for_columns(columns, config.max_rows + SHOOTER_ROWS);
        let mut colors = ColorSource::new(config.seed, config.max_initial_colors);
        let current_color = colors.next(1);
        let next_color = colors.next(1);
        let mut state = Self {
            grid: HexGrid::new(RowWidths::uniform(columns)),
            layout,
            config: config.clone(),
            colors,
            score: 0,
            best_score,
            level: 1,
            shots: 0,
            combo: 0,
            max_combo: 0,
            current_color,
            next_color,
            projectile: None,
            aim: Aim::default(),
            game_over: false,
            hints_enabled: config.hints,
            zen_mode: config.mode == PlayMode::Zen,
            needs_hint: true,
            assistant: None,
            popped: Vec::new(),
            pop_in_progress: false,
            popups: Vec::new(),
            events: Vec::new(),
        };
        state.restart();
        state
    }

    /// Start a fresh round on the same settings (keeps best score, hint and zen flags).
    pub fn restart(&mut self) {
        self.score = 0;
        self.level = 1;
        self.shots = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.game_over = false;
        self.projectile = None;
        self.aim = Aim::default();
        self.popped.clear();
        self.pop_in_progress = false;
        self.popups.clear();
        self.assistant = None;

        let colors = &mut self.colors;
        self.grid
            .reset(self.config.initial_rows, |_, _| Cell::Bubble(colors.next(1)));
        self.current_color = self.colors.next(1);
        self.next_color = self.colors.next(1);
        self.needs_hint = true;
        log::info!(
            "new round: {} rows x {} cols, {} colours",
            self.grid.row_count(),
            self.config.columns,
            self.colors.color_count(1)
        );
        self.update_assistant(true);
    }

    pub fn mode(&self) -> PlayMode {
        if self.zen_mode {
            PlayMode::Zen
        } else {
            PlayMode::Standard
        }
    }

    /// Board height in rows, shooter line included.
    pub fn field_rows(&self) -> usize {
        self.config.max_rows + SHOOTER_ROWS
    }

    /// First row index that ends the round once it exists.
    pub fn danger_row(&self) -> usize {
        self.config.max_rows
    }

    /// Fraction of the way from this level's threshold to the next.
    pub fn level_progress(&self) -> f64 {
        let threshold = self.config.level_threshold;
        if threshold == 0 {
            return 0.0;
        }
        let floor = (self.level - 1) * threshold;
        (self.score.saturating_sub(floor) as f64 / threshold as f64).clamp(0.0, 1.0)
    }

    /// Shots left before the next row is pushed in; `None` when rows are not being added.
    pub fn shots_until_row(&self) -> Option<u32> {
        let n = self.config.shots_per_row;
        if self.zen_mode || n == 0 {
            return None;
        }
        Some(n - self.shots % n)
    }

    /// Take all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn nudge_aim(&mut self, delta: f32) {
        if self.game_over {
            return;
        }
        self.aim.angle = (self.aim.angle + delta).clamp(MIN_AIM_ANGLE, MAX_AIM_ANGLE);
        self.aim.power = (self.aim.power + POWER_STEP).clamp(MIN_POWER, 1.0);
    }

    pub fn adjust_power(&mut self, delta: f32) {
        if self.game_over {
            return;
        }
        self.aim.power = (self.aim.power + delta).clamp(MIN_POWER, 1.0);
    }

    /// Launch the current colour along the aim. Refused while a shot is in flight.
    pub fn fire(&mut self) -> bool {
        if self.projectile.is_some() || self.game_over {
            return false;
        }
        let power = self.aim.power.clamp(MIN_FIRE_POWER, 1.0);
        let speed = (MIN_SHOT_SPEED * self.layout.radius).max(self.layout.width * 0.7) * power
            + BASE_SHOT_SPEED * self.layout.radius;
        let (sin, cos) = self.aim.angle.sin_cos();
        self.projectile = Some(Projectile {
            x: self.layout.shooter_x,
            y: self.layout.shooter_y,
            vx: cos * speed,
            // World y grows downwards.
            vy: -sin * speed,
            color: self.current_color,
        });
        true
    }

    /// Advance the simulation by `elapsed`, in steps of at most `MAX_STEP_SECS`.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.game_over {
            return;
        }
        let mut remaining = elapsed.as_secs_f32();
        while remaining > 0.0 && self.projectile.is_some() && !self.game_over {
            let dt = remaining.min(MAX_STEP_SECS);
            remaining -= dt;
            self.step_projectile(dt);
        }
        self.update_assistant(false);
    }

    fn step_projectile(&mut self, dt: f32) {
        let Some(mut p) = self.projectile else {
            return;
        };
        p.x += p.vx * dt;
        p.y += p.vy * dt;

        let left = self.layout.left_bound();
        let right = self.layout.right_bound();
        if p.x <= left {
            p.x = left;
            p.vx = -p.vx;
        }
        if p.x >= right {
            p.x = right;
            p.vx = -p.vx;
        }

        if p.y <= self.layout.top_offset + self.layout.radius || self.touches_bubble(p.x, p.y) {
            self.projectile = None;
            self.settle(p.x, p.y, p.color);
        } else {
            self.projectile = Some(p);
        }
    }

    fn touches_bubble(&self, x: f32, y: f32) -> bool {
        let reach = self.layout.radius * (2.0 - COLLISION_SLACK);
        self.grid.bubbles().any(|(at, _)| {
            let (bx, by) = self.layout.grid_to_world(at.row, at.col);
            (x - bx).hypot(y - by) <= reach
        })
    }

    /// Commit a bubble at a world point and run the consequences of the shot.
    fn settle(&mut self, x: f32, y: f32, color: BubbleColor) {
        match place_bubble(&mut self.grid, &self.layout, x, y, color) {
            Placement::Dropped { target } => {
                log::warn!("shot at {} dropped: no free cell reachable", target);
                self.events.push(GameEvent::ShotDropped { target });
            }
            Placement::Settled(settled) => self.after_settle(&settled),
        }
        self.check_game_over();
    }

    fn after_settle(&mut self, settled: &Settled) {
        self.shots += 1;
        self.needs_hint = true;

        if settled.matched() {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
            let base = settled.popped.len() as u32 * 10 + settled.floating as u32 * 15;
            // 1 + (combo - 1) * 0.25, floored.
            let points = base * (self.combo + 3) / 4;
            self.score += points;
            self.popped = settled
                .popped
                .iter()
                .map(|&at| (at, settled.color))
                .collect();
            self.pop_in_progress = true;
            if self.grid.is_empty() {
                log::info!("board cleared at shot {}", self.shots);
            }
            self.popups.push(ScorePopup {
                at: settled.cell,
                amount: points,
                combo: self.combo,
                age_ms: 0,
            });
            self.events.push(GameEvent::ClusterRemoved {
                cells: settled.popped.len(),
                floating: settled.floating,
                points,
                combo: self.combo,
            });
        } else if self.combo > 0 {
            self.combo = 0;
            self.events.push(GameEvent::ComboReset);
        }

        if !self.zen_mode && self.config.shots_per_row > 0 && self.shots % self.config.shots_per_row == 0 {
            let level = self.level;
            let colors = &mut self.colors;
            self.grid.add_top_row(|_, _| Cell::Bubble(colors.next(level)));
            self.events.push(GameEvent::RowAdded);
            log::debug!("row pressure: {} rows after shot {}", self.grid.row_count(), self.shots);
        }

        self.current_color = self.next_color;
        self.next_color = self.colors.next(self.level);

        while self.config.level_threshold > 0 && self.score > self.level * self.config.level_threshold {
            self.level += 1;
            self.events.push(GameEvent::LevelUp { level: self.level });
        }

        if self.score > self.best_score {
            self.best_score = self.score;
        }
    }

    /// Too many rows, or a bubble reaching the shooter line (a backstop for custom layouts).
    fn check_game_over(&mut self) {
        if self.game_over {
            return;
        }
        let too_tall = self.grid.row_count() > self.config.max_rows;
        let too_low = || {
            self.grid.bubbles().any(|(at, _)| {
                let (_, y) = self.layout.grid_to_world(at.row, at.col);
                y + self.layout.radius >= self.layout.bottom_limit
            })
        };
        if too_tall || too_low() {
            self.game_over = true;
            self.projectile = None;
            log::info!(
                "game over: score {}, level {}, max combo {}",
                self.score,
                self.level,
                self.max_combo
            );
            self.events.push(GameEvent::GameOver {
                score: self.score,
                level: self.level,
                max_combo: self.max_combo,
                mode: self.mode(),
            });
        }
    }

    /// Recompute the hint when the board changed (or when forced).
    pub fn update_assistant(&mut self, force: bool) {
        if !self.hints_enabled {
            self.assistant = None;
            return;
        }
        if !force && !self.needs_hint {
            return;
        }
        // Search with one spare empty row so cells under the lowest bubbles count too.
        let mut probe = self.grid.clone();
        probe.ensure_rows(probe.row_count());
        self.assistant = find_best_suggestion(&probe, self.current_color);
        self.events.push(match self.assistant {
            Some(s) => GameEvent::HintComputed {
                target: s.cell,
                size: s.size,
            },
            None => GameEvent::HintUnavailable,
        });
        self.needs_hint = false;
    }

    pub fn toggle_hints(&mut self) {
        self.hints_enabled = !self.hints_enabled;
        self.needs_hint = true;
        self.events.push(GameEvent::HintsToggled {
            enabled: self.hints_enabled,
        });
        self.update_assistant(true);
    }

    /// Zen mode stops new rows. Cannot change while a shot is in flight.
    pub fn toggle_zen(&mut self) {
        if self.projectile.is_some() {
            self.events.push(GameEvent::ZenToggleRefused);
            return;
        }
        self.zen_mode = !self.zen_mode;
        self.events.push(GameEvent::ZenToggled {
            enabled: self.zen_mode,
        });
    }

    /// Called once the pop animation has finished.
    pub fn finish_pop(&mut self) {
        self.popped.clear();
        self.pop_in_progress = false;
    }

    pub fn tick_popups(&mut self, delta_ms: u32) {
        self.popups.retain_mut(|p| {
            p.age_ms += delta_ms;
            p.age_ms < POPUP_LIFETIME_MS
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig {
            columns: 8,
            initial_rows: 2,
            max_initial_colors: 4,
            shots_per_row: 3,
            level_threshold: 520,
            max_rows: 13,
            mode: PlayMode::Standard,
            hints: true,
            seed: Some(7),
        }
    }

    /// Fill the first `rows` rows with one colour that never occurs in shots below.
    fn uniform_board(state: &mut GameState, rows: usize) {
        state.grid.reset(rows, |_, _| Cell::Bubble(BubbleColor(40)));
    }

    fn settle_at(state: &mut GameState, row: i32, col: i32, color: BubbleColor) {
        let (x, y) = state.layout.grid_to_world(row, col);
        state.settle(x, y, color);
    }

    #[test]
    fn test_new_session_has_initial_rows() {
        let state = GameState::new(&config(), 0);
        assert_eq!(state.grid.row_count(), 2);
        assert_eq!(state.grid.occupied_count(), 16);
        assert!(state.current_color.0 < 4);
        assert!(!state.game_over);
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = GameState::new(&config(), 0);
        let b = GameState::new(&config(), 0);
        assert!(a.grid.bubbles().eq(b.grid.bubbles()));
        assert_eq!(a.current_color, b.current_color);
    }

    #[test]
    fn test_color_count_grows_with_level() {
        let colors = ColorSource::new(Some(1), 4);
        assert_eq!(colors.color_count(1), 4);
        assert_eq!(colors.color_count(4), 5);
        assert_eq!(colors.color_count(40), PALETTE_SIZE);
    }

    #[test]
    fn test_row_added_every_n_shots() {
        let mut state = GameState::new(&config(), 0);
        uniform_board(&mut state, 2);
        settle_at(&mut state, 2, 0, BubbleColor(10));
        settle_at(&mut state, 2, 3, BubbleColor(11));
        assert_eq!(state.grid.row_count(), 3);
        settle_at(&mut state, 2, 6, BubbleColor(12));
        assert_eq!(state.shots, 3);
        assert_eq!(state.grid.row_count(), 4);
        // Everything moved down one row.
        assert_eq!(state.grid.get(3, 0).color(), Some(BubbleColor(10)));
        assert_eq!(state.grid.get(3, 6).color(), Some(BubbleColor(12)));
        let added = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::RowAdded)
            .count();
        assert_eq!(added, 1);
    }

    #[test]
    fn test_zen_mode_suppresses_new_rows() {
        let mut state = GameState::new(&config(), 0);
        uniform_board(&mut state, 2);
        state.toggle_zen();
        assert!(state.zen_mode);
        for (i, col) in [0, 3, 6].into_iter().enumerate() {
            settle_at(&mut state, 2, col, BubbleColor(10 + i as u8));
        }
        assert_eq!(state.grid.row_count(), 3);
        assert_eq!(state.mode(), PlayMode::Zen);
    }

    #[test]
    fn test_occupied_target_keeps_occupant_colour() {
        let mut state = GameState::new(&config(), 0);
        uniform_board(&mut state, 2);
        state.grid.ensure_rows(2);
        settle_at(&mut state, 1, 4, BubbleColor(10));
        assert_eq!(state.grid.get(1, 4).color(), Some(BubbleColor(40)));
        assert_eq!(state.shots, 1);
        assert_eq!(state.grid.occupied_count(), 17);
    }

    #[test]
    fn test_saturated_board_drops_the_shot() {
        let mut state = GameState::new(&config(), 0);
        uniform_board(&mut state, 2);
        settle_at(&mut state, 1, 4, BubbleColor(10));
        assert_eq!(state.shots, 0);
        assert_eq!(state.grid.occupied_count(), 16);
        assert!(state.drain_events().contains(&GameEvent::ShotDropped {
            target: HexCoord::new(1, 4)
        }));
    }

    #[test]
    fn test_match_scores_and_builds_combo() {
        let mut state = GameState::new(&config(), 0);
        uniform_board(&mut state, 1);
        state.grid.set(1, 0, Cell::Bubble(BubbleColor(10)));
        state.grid.set(1, 1, Cell::Bubble(BubbleColor(10)));
        settle_at(&mut state, 1, 2, BubbleColor(10));
        assert_eq!(state.combo, 1);
        assert_eq!(state.score, 30);
        assert_eq!(state.popped.len(), 3);
        assert!(state.pop_in_progress);

        state.grid.set(1, 0, Cell::Bubble(BubbleColor(11)));
        state.grid.set(1, 1, Cell::Bubble(BubbleColor(11)));
        settle_at(&mut state, 1, 2, BubbleColor(11));
        assert_eq!(state.combo, 2);
        // 30 * 1.25
        assert_eq!(state.score, 30 + 37);
        assert_eq!(state.best_score, state.score);

        settle_at(&mut state, 1, 5, BubbleColor(12));
        assert_eq!(state.combo, 0);
        assert_eq!(state.max_combo, 2);
        assert!(state.drain_events().contains(&GameEvent::ComboReset));
    }

    #[test]
    fn test_floating_bubbles_score_extra() {
        let mut state = GameState::new(&config(), 0);
        state.grid.reset(1, |_, c| {
            if c < 2 {
                Cell::Bubble(BubbleColor(10))
            } else {
                Cell::Empty
            }
        });
        state.grid.set(1, 0, Cell::Bubble(BubbleColor(20)));
        settle_at(&mut state, 0, 2, BubbleColor(10));
        // 3 popped + 1 floating
        assert_eq!(state.score, 3 * 10 + 15);
        assert!(state.grid.is_empty());
    }

    #[test]
    fn test_too_many_rows_ends_the_game() {
        let mut state = GameState::new(&config(), 0);
        uniform_board(&mut state, 13);
        state.toggle_zen();
        settle_at(&mut state, 13, 0, BubbleColor(10));
        assert!(state.game_over);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { mode: PlayMode::Zen, .. })));
        assert!(!state.fire());
    }

    #[test]
    fn test_bubble_at_shooter_line_ends_the_game() {
        let mut state = GameState::new(&config(), 0);
        uniform_board(&mut state, 2);
        state.check_game_over();
        assert!(!state.game_over);

        // Raise the line to the lower edge of row 1, well within the row limit.
        let (_, y) = state.layout.grid_to_world(1, 0);
        state.layout.bottom_limit = y + state.layout.radius;
        state.check_game_over();
        assert!(state.game_over);
        assert!(state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_default_layout_trips_row_limit_before_shooter_line() {
        let state = GameState::new(&config(), 0);
        let last = state.config.max_rows as i32 - 1;
        let (_, y) = state.layout.grid_to_world(last, 0);
        assert!(y + state.layout.radius < state.layout.bottom_limit);
    }

    #[test]
    fn test_fire_refused_while_in_flight() {
        let mut state = GameState::new(&config(), 0);
        assert!(state.fire());
        assert!(!state.fire());
        state.toggle_zen();
        assert!(!state.zen_mode);
        assert!(state.drain_events().contains(&GameEvent::ZenToggleRefused));
    }

    #[test]
    fn test_projectile_flies_up_and_settles() {
        let mut state = GameState::new(&config(), 0);
        let next = state.next_color;
        let before = state.grid.occupied_count();
        assert!(state.fire());
        for _ in 0..400 {
            state.tick(Duration::from_millis(16));
            if state.projectile.is_none() {
                break;
            }
        }
        assert!(state.projectile.is_none());
        assert_eq!(state.shots, 1);
        assert!(state.grid.occupied_count() != before || state.score > 0);
        assert_eq!(state.current_color, next);
    }

    #[test]
    fn test_row_countdown_and_level_progress() {
        let mut state = GameState::new(&config(), 0);
        uniform_board(&mut state, 2);
        assert_eq!(state.shots_until_row(), Some(3));
        settle_at(&mut state, 2, 0, BubbleColor(10));
        assert_eq!(state.shots_until_row(), Some(2));
        state.toggle_zen();
        assert_eq!(state.shots_until_row(), None);

        state.score = 260;
        assert!((state.level_progress() - 0.5).abs() < 1e-9);
        assert_eq!(state.field_rows(), 16);
    }

    #[test]
    fn test_aim_is_clamped() {
        let mut state = GameState::new(&config(), 0);
        for _ in 0..100 {
            state.nudge_aim(AIM_NUDGE);
        }
        assert!((state.aim.angle - MAX_AIM_ANGLE).abs() < 1e-6);
        assert!((state.aim.power - 1.0).abs() < 1e-6);
        for _ in 0..100 {
            state.nudge_aim(-AIM_NUDGE);
        }
        assert!((state.aim.angle - MIN_AIM_ANGLE).abs() < 1e-6);
    }

    #[test]
    fn test_hints_follow_toggle() {
        let mut state = GameState::new(&config(), 0);
        state.grid.reset(1, |_, c| {
            if c < 2 {
                Cell::Bubble(BubbleColor(10))
            } else {
                Cell::Bubble(BubbleColor(11))
            }
        });
        state.grid.ensure_rows(1);
        state.current_color = BubbleColor(10);
        state.update_assistant(true);
        assert_eq!(state.assistant.map(|s| s.size), Some(3));

        state.toggle_hints();
        assert!(state.assistant.is_none());
        state.toggle_hints();
        assert!(state.assistant.is_some());
    }
}
