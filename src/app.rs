//! App: terminal init, main loop, tick, key handling and event bookkeeping.

use crate::game::{AIM_NUDGE, GameEvent, GameState};
use crate::highscores::Store;
use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use crate::{Args, GameConfig, PlayMode};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tachyonfx::Effect;

/// Power change per key press.
const POWER_NUDGE: f32 = 0.05;
/// Redraw roughly 60 times a second.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
    QuitMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitOption {
    Resume,
    MainMenu,
    Exit,
}

impl QuitOption {
    fn next(self) -> Self {
        match self {
            Self::Resume => Self::MainMenu,
            Self::MainMenu => Self::Exit,
            Self::Exit => Self::Resume,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Resume => Self::Exit,
            Self::MainMenu => Self::Resume,
            Self::Exit => Self::MainMenu,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTab {
    Mode,
    Hints,
    Start,
}

impl MenuTab {
    fn next(self) -> Self {
        match self {
            Self::Mode => Self::Hints,
            Self::Hints => Self::Start,
            Self::Start => Self::Mode,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Mode => Self::Start,
            Self::Hints => Self::Mode,
            Self::Start => Self::Hints,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    pub current_tab: MenuTab,
    pub selected_mode: PlayMode,
    pub hints: bool,
    pub animation_start: Instant,
}

impl MenuState {
    fn new(config: &GameConfig) -> Self {
        Self {
            current_tab: MenuTab::Mode,
            selected_mode: config.mode,
            hints: config.hints,
            animation_start: Instant::now(),
        }
    }
}

/// Outcome of the last finished round, for the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundSummary {
    /// 1-based leaderboard position, if the round made the board.
    pub rank: Option<usize>,
    pub new_record: bool,
}

pub struct App {
    args: Args,
    config: GameConfig,
    theme: Theme,
    state: GameState,
    store: Store,
    player_name: String,
    screen: Screen,
    paused: bool,
    last_tick: Instant,
    tick_interval: Duration,
    /// TachyonFX fade for the popped cluster (created when the pop starts).
    pop_effect: Option<Effect>,
    /// Last time the pop effect was processed (for delta).
    pop_effect_process_time: Option<Instant>,
    menu_state: MenuState,
    quit_selected: QuitOption,
    /// One-line feedback shown in the sidebar.
    status: String,
    summary: RoundSummary,
    /// Best score when the current round began, for the new-record flag.
    round_start_best: u32,
}

impl App {
    pub fn new(args: Args, config: GameConfig, theme: Theme) -> Result<Self> {
        let store = Store::open();
        log::info!("scores at {}", store.path().display());
        let round_start_best = store.best_score();
        let state = GameState::new(&config, store.best_score());
        let screen = if args.no_menu {
            Screen::Playing
        } else {
            Screen::Menu
        };
        let player_name = args
            .name
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_default();
        let rate = if args.tick_rate.is_finite() && args.tick_rate > 0.0 {
            args.tick_rate
        } else {
            60.0
        };
        Ok(Self {
            menu_state: MenuState::new(&config),
            args,
            config,
            theme,
            state,
            store,
            player_name,
            screen,
            paused: false,
            last_tick: Instant::now(),
            tick_interval: Duration::from_secs_f64(1.0 / rate),
            pop_effect: None,
            pop_effect_process_time: None,
            quit_selected: QuitOption::Resume,
            status: String::from("Aim with ←/→, shoot with space"),
            summary: RoundSummary::default(),
            round_start_best,
        })
    }

    /// New round with the current config; the best score carries over from the store.
    fn reset_game(&mut self) {
        let best = self.store.best_score().max(self.state.best_score);
        self.state = GameState::new(&self.config, best);
        self.round_start_best = best;
        self.screen = Screen::Playing;
        self.paused = false;
        self.last_tick = Instant::now();
        self.pop_effect = None;
        self.pop_effect_process_time = None;
        self.summary = RoundSummary::default();
        self.status = format!("New {} round", self.config.mode.as_str());
    }

    fn start_from_menu(&mut self) {
        self.config.mode = self.menu_state.selected_mode;
        self.config.hints = self.menu_state.hints;
        self.reset_game();
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::AimLeft => self.state.nudge_aim(AIM_NUDGE),
            Action::AimRight => self.state.nudge_aim(-AIM_NUDGE),
            Action::PowerUp => self.state.adjust_power(POWER_NUDGE),
            Action::PowerDown => self.state.adjust_power(-POWER_NUDGE),
            Action::Fire => {
                if !self.state.fire() {
                    log::debug!("fire ignored: shot already in flight");
                }
            }
            Action::ToggleHints => self.state.toggle_hints(),
            Action::ToggleZen => self.state.toggle_zen(),
            Action::Restart => self.reset_game(),
            Action::Pause => self.paused = true,
            Action::Quit => {
                self.screen = Screen::QuitMenu;
                self.quit_selected = QuitOption::Resume;
            }
            Action::None => {}
        }
    }

    /// Log, surface and persist what the session reported since the last frame.
    fn handle_game_events(&mut self) {
        for ev in self.state.drain_events() {
            match ev {
                GameEvent::HintComputed { target, size } => {
                    log::trace!("hint at {} pops {}", target, size);
                }
                GameEvent::HintUnavailable => log::trace!("no hint"),
                _ => log::debug!("{:?}", ev),
            }
            if let Some(msg) = status_message(&ev) {
                self.status = msg;
            }
            if matches!(ev, GameEvent::ClusterRemoved { .. }) {
                // A new pop restarts the fade over the new cells.
                self.pop_effect = None;
                self.pop_effect_process_time = None;
            }
            if let GameEvent::GameOver {
                score,
                level,
                max_combo,
                mode,
            } = ev
            {
                self.record_round(score, level, max_combo, mode);
                self.screen = Screen::GameOver;
            }
        }
        self.persist_best();
    }

    /// Write a new best score as soon as it is reached, so quitting mid-round keeps it.
    fn persist_best(&mut self) {
        match self.store.save_best(self.state.best_score) {
            Ok(true) => log::debug!("new best {} saved", self.state.best_score),
            Ok(false) => {}
            Err(e) => {
                log::warn!("could not save best score to {}: {}", self.store.path().display(), e);
            }
        }
    }

    fn record_round(&mut self, score: u32, level: u32, max_combo: u32, mode: PlayMode) {
        let rank = self
            .store
            .submit(&self.player_name, score, level, max_combo, mode);
        self.store.record_best(self.state.best_score);
        if let Err(e) = self.store.save() {
            log::warn!("could not save scores to {}: {}", self.store.path().display(), e);
            self.status = String::from("Scores not saved");
        }
        self.summary = RoundSummary {
            rank,
            new_record: score > self.round_start_best,
        };
        log::info!("round recorded: score {} rank {:?}", score, rank);
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        // Shrink the board so board + sidebar fit on screen.
        let (term_cols, term_rows) = size()?;
        let (fit_cols, fit_rows) = crate::ui::board_size_for_terminal(term_cols, term_rows);
        let columns = self.config.columns.min(fit_cols);
        let max_rows = self.config.max_rows.min(fit_rows);
        if columns != self.config.columns || max_rows != self.config.max_rows {
            log::info!(
                "board clamped to terminal: {} cols, {} rows (asked {}, {})",
                columns,
                max_rows,
                self.config.columns,
                self.config.max_rows
            );
            self.config = GameConfig {
                columns,
                max_rows,
                ..self.config.clone()
            }
            .clamped();
            self.state = GameState::new(&self.config, self.store.best_score());
        }

        let result = self.run_loop(&mut terminal);

        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut last_frame = Instant::now();
        loop {
            let now = Instant::now();
            let view = crate::ui::View {
                screen: self.screen,
                state: &self.state,
                theme: &self.theme,
                paused: self.paused,
                menu_state: &self.menu_state,
                quit_selected: (self.screen == Screen::QuitMenu).then_some(self.quit_selected),
                leaderboard: self.store.top(5),
                summary: self.summary,
                status: &self.status,
                no_animation: self.args.no_animation,
                now,
            };
            terminal.draw(|f| {
                crate::ui::draw(
                    f,
                    &view,
                    &mut self.pop_effect,
                    &mut self.pop_effect_process_time,
                )
            })?;

            if self.state.pop_in_progress
                && (self.args.no_animation || self.pop_effect.as_ref().is_some_and(|e| e.done()))
            {
                self.state.finish_pop();
                self.pop_effect = None;
                self.pop_effect_process_time = None;
            }

            let frame_ms = now.duration_since(last_frame).as_millis().min(u32::MAX as u128) as u32;
            last_frame = now;
            self.state.tick_popups(frame_ms);

            let timeout = FRAME.saturating_sub(now.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    let Event::Key(key) = event::read()? else {
                        continue;
                    };
                    let action = key_to_action(key);
                    // Held aim/power keys repeat; everything else fires once per press.
                    let repeatable = matches!(
                        action,
                        Action::AimLeft | Action::AimRight | Action::PowerUp | Action::PowerDown
                    );
                    let accept = key.kind == KeyEventKind::Press
                        || (repeatable && key.kind == KeyEventKind::Repeat);
                    if !accept {
                        continue;
                    }
                    if self.handle_action(action) {
                        return Ok(());
                    }
                }
            }

            if self.screen == Screen::Playing && !self.paused {
                let elapsed = self.last_tick.elapsed();
                if elapsed >= self.tick_interval {
                    self.last_tick = Instant::now();
                    self.state.tick(elapsed);
                }
                self.handle_game_events();
            } else {
                // Keep the simulation clock from jumping after menus and pauses.
                self.last_tick = Instant::now();
            }
        }
    }

    /// Route one action through the current screen. Returns true to exit.
    fn handle_action(&mut self, action: Action) -> bool {
        match self.screen {
            Screen::Menu => match action {
                Action::Quit => return true,
                Action::AimLeft | Action::AimRight => match self.menu_state.current_tab {
                    MenuTab::Mode => {
                        self.menu_state.selected_mode = match self.menu_state.selected_mode {
                            PlayMode::Standard => PlayMode::Zen,
                            PlayMode::Zen => PlayMode::Standard,
                        };
                    }
                    MenuTab::Hints => self.menu_state.hints = !self.menu_state.hints,
                    MenuTab::Start => {}
                },
                Action::PowerDown => self.menu_state.current_tab = self.menu_state.current_tab.next(),
                Action::PowerUp => self.menu_state.current_tab = self.menu_state.current_tab.prev(),
                Action::Fire => {
                    if self.menu_state.current_tab == MenuTab::Start {
                        self.start_from_menu();
                    } else {
                        self.menu_state.current_tab = MenuTab::Start;
                    }
                }
                _ => {}
            },
            Screen::Playing => {
                if self.paused {
                    match action {
                        Action::Pause => self.paused = false,
                        Action::Quit => {
                            self.screen = Screen::QuitMenu;
                            self.quit_selected = QuitOption::Resume;
                        }
                        _ => {}
                    }
                } else {
                    self.apply_action(action);
                    self.handle_game_events();
                }
            }
            Screen::QuitMenu => match action {
                Action::PowerDown | Action::AimRight => self.quit_selected = self.quit_selected.next(),
                Action::PowerUp | Action::AimLeft => self.quit_selected = self.quit_selected.prev(),
                Action::Fire => match self.quit_selected {
                    QuitOption::Resume => self.screen = Screen::Playing,
                    QuitOption::MainMenu => {
                        self.menu_state.animation_start = Instant::now();
                        self.screen = Screen::Menu;
                    }
                    QuitOption::Exit => return true,
                },
                Action::Pause | Action::Quit => self.screen = Screen::Playing,
                _ => {}
            },
            Screen::GameOver => match action {
                Action::Quit => return true,
                Action::Restart => self.reset_game(),
                Action::Fire => {
                    self.menu_state.animation_start = Instant::now();
                    self.screen = Screen::Menu;
                }
                _ => {}
            },
        }
        false
    }
}

/// Sidebar line for an event; `None` keeps the previous message.
pub fn status_message(event: &GameEvent) -> Option<String> {
    let msg = match event {
        GameEvent::ClusterRemoved {
            cells,
            floating,
            points,
            combo,
        } => {
            let mut msg = format!("Popped {} (+{})", cells, points);
            if *floating > 0 {
                msg.push_str(&format!(", {} fell", floating));
            }
            if *combo > 1 {
                msg.push_str(&format!(" combo x{}", combo));
            }
            msg
        }
        GameEvent::ComboReset => "Combo lost".to_string(),
        GameEvent::RowAdded => "A new row drops in".to_string(),
        GameEvent::ShotDropped { target } => format!("No room near {}, shot lost", target),
        GameEvent::LevelUp { level } => format!("Level {}!", level),
        GameEvent::HintsToggled { enabled } => {
            format!("Hints {}", if *enabled { "on" } else { "off" })
        }
        GameEvent::ZenToggled { enabled } => {
            format!("Zen mode {}", if *enabled { "on" } else { "off" })
        }
        GameEvent::ZenToggleRefused => "Wait for the shot to land".to_string(),
        GameEvent::GameOver { score, .. } => format!("Game over: {} points", score),
        GameEvent::HintComputed { .. } | GameEvent::HintUnavailable => return None,
    };
    Some(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::HexCoord;

    #[test]
    fn test_status_message_for_clusters() {
        let msg = status_message(&GameEvent::ClusterRemoved {
            cells: 4,
            floating: 2,
            points: 85,
            combo: 2,
        });
        assert_eq!(msg.as_deref(), Some("Popped 4 (+85), 2 fell combo x2"));
    }

    #[test]
    fn test_hint_events_keep_previous_status() {
        assert_eq!(status_message(&GameEvent::HintUnavailable), None);
        assert_eq!(
            status_message(&GameEvent::HintComputed {
                target: HexCoord::new(1, 1),
                size: 3
            }),
            None
        );
        assert!(status_message(&GameEvent::ShotDropped {
            target: HexCoord::new(0, 0)
        })
        .is_some());
    }

    #[test]
    fn test_menu_and_quit_cycles_wrap() {
        assert_eq!(MenuTab::Start.next(), MenuTab::Mode);
        assert_eq!(MenuTab::Mode.prev(), MenuTab::Start);
        assert_eq!(QuitOption::Exit.next(), QuitOption::Resume);
        assert_eq!(QuitOption::Resume.prev(), QuitOption::Exit);
    }
}
