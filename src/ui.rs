//! Layout and drawing: menu, hex board, aim guide, pause, game over, sidebar.

use crate::PlayMode;
use crate::app::{MenuState, MenuTab, QuitOption, RoundSummary, Screen};
use crate::game::{GameState, SHOOTER_ROWS};
use crate::grid::{BubbleColor, HexCoord};
use crate::highscores::LeaderboardEntry;
use crate::placement::BoardLayout;
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Widget};
use std::collections::HashSet;
use std::time::Instant;
use tachyonfx::{
    CellFilter, Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx, ref_count,
};

/// A bubble is two terminal cells wide.
const BUBBLE: &str = "▐▌";
const HINT_MARK: &str = "<>";
const AIM_DOT: &str = "·";
const DANGER_MARK: &str = "┄";

const SIDEBAR_WIDTH: u16 = 28;
/// Rows the sidebar sections need.
const SIDEBAR_HEIGHT: u16 = 19;

/// Duration of the pop fade (TachyonFX) in ms.
const POP_FADE_MS: u32 = 350;

/// Popups rise one line per this many ms.
const POPUP_RISE_MS: u32 = 500;

/// Everything the renderer reads for one frame.
pub struct View<'a> {
    pub screen: Screen,
    pub state: &'a GameState,
    pub theme: &'a Theme,
    pub paused: bool,
    pub menu_state: &'a MenuState,
    pub quit_selected: Option<QuitOption>,
    pub leaderboard: &'a [LeaderboardEntry],
    pub summary: RoundSummary,
    pub status: &'a str,
    pub no_animation: bool,
    pub now: Instant,
}

/// Largest (columns, max_rows) whose board plus sidebar fit a terminal of the given size.
pub fn board_size_for_terminal(term_cols: u16, term_rows: u16) -> (usize, usize) {
    // Border on each side, plus the half-bubble shift of odd rows.
    let cols = term_cols.saturating_sub(SIDEBAR_WIDTH + 2 + 1) / 2;
    let rows = term_rows.saturating_sub(2).saturating_sub(SHOOTER_ROWS as u16);
    (cols as usize, rows as usize)
}

/// Board size in terminal cells, border included.
fn board_outer_size(state: &GameState) -> (u16, u16) {
    (state.layout.width as u16 + 2, state.field_rows() as u16 + 2)
}

/// Split `area` into the centred board (outer, with border) and sidebar.
fn game_areas(area: Rect, state: &GameState) -> (Rect, Rect) {
    let (bw, bh) = board_outer_size(state);
    let total_w = bw + SIDEBAR_WIDTH;
    let total_h = bh.max(SIDEBAR_HEIGHT);

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_h),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(bw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);
    let board = Rect {
        height: bh.min(inner[0].height),
        ..inner[0]
    };
    (board, inner[1])
}

/// Board cells inside the border.
fn board_inner(outer: Rect) -> Rect {
    Rect {
        x: outer.x + 1,
        y: outer.y + 1,
        width: outer.width.saturating_sub(2),
        height: outer.height.saturating_sub(2),
    }
}

/// Left cell of the bubble-sized slot nearest a world point; `None` when it falls off the board.
fn world_to_screen(board: Rect, layout: &BoardLayout, x: f32, y: f32) -> Option<(u16, u16)> {
    let cx = (x - layout.radius).round();
    let cy = ((y - layout.top_offset) / layout.row_height).round();
    if cx < 0.0 || cy < 0.0 {
        return None;
    }
    let (cx, cy) = (cx as u16, cy as u16);
    (cx + 1 < board.width && cy < board.height).then_some((board.x + cx, board.y + cy))
}

fn cell_to_screen(board: Rect, layout: &BoardLayout, at: HexCoord) -> Option<(u16, u16)> {
    let (x, y) = layout.grid_to_world(at.row, at.col);
    world_to_screen(board, layout, x, y)
}

fn draw_bubble(buf: &mut Buffer, pos: (u16, u16), color: Color, bg: Color) {
    buf.set_string(pos.0, pos.1, BUBBLE, Style::default().fg(color).bg(bg));
}

/// Dotted guide from the shooter along the aim, bouncing off the walls, up to the first bubble.
/// Length grows with power.
pub fn aim_path(state: &GameState) -> Vec<(f32, f32)> {
    let layout = &state.layout;
    let (sin, cos) = state.aim.angle.sin_cos();
    let (mut dx, dy) = (cos, -sin);
    let (mut x, mut y) = (layout.shooter_x, layout.shooter_y);
    let dots = (6.0 + state.aim.power * 14.0) as usize;
    let mut path = Vec::with_capacity(dots);
    for _ in 0..dots {
        // Two half-unit steps per dot so walls are hit precisely.
        for _ in 0..2 {
            x += dx * 0.5;
            y += dy * 0.5;
            if x <= layout.left_bound() || x >= layout.right_bound() {
                x = x.clamp(layout.left_bound(), layout.right_bound());
                dx = -dx;
            }
        }
        if y <= layout.top_offset {
            break;
        }
        let cell = layout.world_to_grid(x, y);
        if state.grid.is_valid_coord(cell) && !state.grid.get_at(cell).is_empty() {
            break;
        }
        path.push((x, y));
    }
    path
}

/// Create or update the pop fade and process it (TachyonFX: fade popped cells to bg).
fn apply_pop_effect(
    frame: &mut Frame,
    view: &View,
    pop_effect: &mut Option<Effect>,
    pop_process_time: &mut Option<Instant>,
) {
    let state = view.state;
    let (outer, _) = game_areas(frame.area(), state);
    let board = board_inner(outer);
    let delta = pop_process_time
        .map(|t| view.now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    *pop_process_time = Some(view.now);

    if pop_effect.is_none() {
        let cells: HashSet<(u16, u16)> = state
            .popped
            .iter()
            .filter_map(|&(at, _)| cell_to_screen(board, &state.layout, at))
            .flat_map(|(x, y)| [(x, y), (x + 1, y)])
            .collect();
        let filter = CellFilter::PositionFn(ref_count(move |pos: Position| {
            cells.contains(&(pos.x, pos.y))
        }));
        let bg = view.theme.bg;
        let effect = fx::fade_to(bg, bg, (POP_FADE_MS, Interpolation::Linear))
            .with_filter(filter)
            .with_area(board);
        *pop_effect = Some(effect);
    }

    if let Some(effect) = pop_effect {
        frame.render_effect(effect, board, TfxDuration::from_millis(delta_ms));
    }
}

/// Draw the current screen. While a pop is in progress (and animation is on) the TachyonFX fade
/// runs over the popped cells and `pop_effect` / `pop_process_time` are updated.
pub fn draw(
    frame: &mut Frame,
    view: &View,
    pop_effect: &mut Option<Effect>,
    pop_process_time: &mut Option<Instant>,
) {
    let area = frame.area();
    match view.screen {
        Screen::Menu => draw_menu(frame, view, area),
        Screen::Playing => {
            draw_game(frame, view, area);
            if view.paused {
                draw_pause_overlay(frame, view.theme, area);
            }
            if view.state.pop_in_progress && !view.state.popped.is_empty() && !view.no_animation {
                apply_pop_effect(frame, view, pop_effect, pop_process_time);
            }
        }
        Screen::QuitMenu => {
            draw_game(frame, view, area);
            if let Some(opt) = view.quit_selected {
                draw_quit_menu(frame, view.theme, opt);
            }
        }
        Screen::GameOver => {
            draw_game(frame, view, area);
            draw_game_over(frame, view, area);
        }
    }
}

fn draw_menu(frame: &mut Frame, view: &View, area: Rect) {
    let theme = view.theme;
    let menu = view.menu_state;
    let popup_w = 46u16;
    let popup_h = 19u16;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };

    let title = Line::from(vec![
        Span::styled(" Hex", Style::default().fg(theme.bubbles[0]).bold()),
        Span::styled("shot ", Style::default().fg(theme.main_fg).bold()),
    ]);
    let bubbles_line = Line::from(
        theme
            .bubbles
            .iter()
            .map(|&c| Span::styled(BUBBLE, Style::default().fg(c)))
            .collect::<Vec<_>>(),
    );

    let highlight_style = Style::default().fg(Color::Black).bg(theme.bubbles[1]).bold();
    let selected_style = Style::default().fg(theme.bubbles[1]).bold();
    let normal_style = Style::default().fg(theme.main_fg);
    let option = |label: &'static str, tab: MenuTab, chosen: bool| {
        let style = if menu.current_tab == tab && chosen {
            highlight_style
        } else if chosen {
            selected_style
        } else {
            normal_style
        };
        Span::styled(label, style)
    };

    let start_btn = if menu.current_tab == MenuTab::Start {
        Span::styled(" [ START ] ", highlight_style)
    } else {
        Span::styled(" [ START ] ", normal_style)
    };
    let key_style = Style::default().fg(theme.bubbles[1]);
    let section_style = Style::default().fg(theme.div_line);

    let lines = vec![
        Line::from(""),
        title,
        bubbles_line,
        Line::from(""),
        Line::from(Span::styled(" ─ MODE ─ ", section_style)),
        Line::from(vec![
            option(" STANDARD ", MenuTab::Mode, menu.selected_mode == PlayMode::Standard),
            Span::from("  "),
            option(" ZEN ", MenuTab::Mode, menu.selected_mode == PlayMode::Zen),
        ]),
        Line::from(""),
        Line::from(Span::styled(" ─ ASSISTANT ─ ", section_style)),
        Line::from(vec![
            option(" ON ", MenuTab::Hints, menu.hints),
            Span::from("  "),
            option(" OFF ", MenuTab::Hints, !menu.hints),
        ]),
        Line::from(""),
        Line::from(start_btn),
        Line::from(""),
        Line::from(vec![
            Span::styled(" ↕ ", key_style),
            Span::from("NAVIGATE   "),
            Span::styled(" ↔ ", key_style),
            Span::from("CHANGE   "),
            Span::styled(" ENTER ", key_style),
            Span::from("PLAY"),
        ]),
        Line::from(""),
        Line::from(Span::styled(" [Q] QUIT ", Style::default().fg(theme.bubbles[0]))),
    ];

    let p = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
    );

    // Slide in from below, ease-out cubic.
    let elapsed = view.now.duration_since(menu.animation_start).as_millis() as u32;
    let t = (elapsed as f32 / 500.0).min(1.0);
    let eased = 1.0 - (1.0 - t).powi(3);
    let mut anim_popup = popup;
    anim_popup.y += ((1.0 - eased) * 10.0) as u16;
    p.render(anim_popup.intersection(area), frame.buffer_mut());
}

fn draw_pause_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let popup_w = 34u16;
    let popup_h = 10u16;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };
    let fg = Style::default().fg(theme.main_fg);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Paused ",
            Style::default().fg(Color::Black).bg(theme.title),
        )),
        Line::from(""),
        Line::from(Span::styled("←/→ h/l aim   ↑/↓ k/j power", fg)),
        Line::from(Span::styled("space shoot   H hints   z zen", fg)),
        Line::from(Span::styled("r restart", fg)),
        Line::from(""),
        Line::from(Span::styled(" P Resume    Q Quit ", fg)),
    ];
    let p = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
    );
    p.render(popup, frame.buffer_mut());
}

fn leaderboard_line(rank: usize, entry: &LeaderboardEntry, style: Style) -> Line<'static> {
    Line::from(Span::styled(
        format!(
            "{:>2}. {:<12.12} {:>6}  L{:<2} {}",
            rank,
            entry.player_name,
            entry.score,
            entry.level,
            entry.mode.as_str()
        ),
        style,
    ))
}

fn draw_game_over(frame: &mut Frame, view: &View, area: Rect) {
    let state = view.state;
    let theme = view.theme;
    let popup_w = 40u16;
    let popup_h = 16u16 + view.leaderboard.len() as u16;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };
    let fg = Style::default().fg(theme.main_fg);
    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Game Over ",
            Style::default().fg(Color::White).bg(theme.bubbles[0]),
        )),
        Line::from(""),
        Line::from(Span::styled(format!(" Score: {} ", state.score), fg)),
        Line::from(Span::styled(format!(" Best: {} ", state.best_score), fg)),
        Line::from(Span::styled(
            format!(" Level {}   Max combo x{} ", state.level, state.max_combo),
            fg,
        )),
    ];
    if view.summary.new_record {
        lines.push(Line::from(Span::styled(
            " New record! ",
            Style::default().fg(theme.title).bold(),
        )));
    } else if let Some(rank) = view.summary.rank {
        lines.push(Line::from(Span::styled(format!(" Rank #{} ", rank), fg)));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " ─ LEADERBOARD ─ ",
        Style::default().fg(theme.div_line),
    )));
    if view.leaderboard.is_empty() {
        lines.push(Line::from(Span::styled(
            " no scores yet ",
            Style::default().fg(theme.inactive_fg),
        )));
    }
    for (i, entry) in view.leaderboard.iter().enumerate() {
        let style = if view.summary.rank == Some(i + 1) {
            Style::default().fg(theme.title).bold()
        } else {
            fg
        };
        lines.push(leaderboard_line(i + 1, entry, style));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " R Restart   Enter Menu   Q Quit ",
        fg,
    )));
    let p = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
            .title(Span::styled(" Hexshot ", theme.title)),
    );
    p.render(popup, frame.buffer_mut());
}

/// Board + sidebar, centred in the full area.
fn draw_game(frame: &mut Frame, view: &View, area: Rect) {
    let (board_area, sidebar_area) = game_areas(area, view.state);
    draw_board(frame, view, board_area);
    draw_sidebar(frame, view, sidebar_area);
}

fn draw_board(frame: &mut Frame, view: &View, area: Rect) {
    let state = view.state;
    let theme = view.theme;
    let layout = &state.layout;
    let title = if state.zen_mode {
        " Hexshot  zen ".to_string()
    } else {
        format!(" Hexshot  Level {} ", state.level)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(title, theme.title));
    let board = block.inner(area);
    block.render(area, frame.buffer_mut());

    let buf = frame.buffer_mut();
    let bg = theme.bg;
    buf.set_style(board, Style::default().bg(bg));

    // Rows past this line end the round.
    let danger_y = board.y + state.danger_row() as u16;
    if danger_y < board.y + board.height {
        for x in board.x..board.x + board.width {
            buf[(x, danger_y)]
                .set_symbol(DANGER_MARK)
                .set_style(Style::default().fg(theme.div_line).bg(bg));
        }
    }

    for (at, color) in state.grid.bubbles() {
        if let Some(pos) = cell_to_screen(board, layout, at) {
            draw_bubble(buf, pos, theme.bubble_color(color), bg);
        }
    }

    // Popped bubbles stay visible until the fade has run.
    if state.pop_in_progress && !view.no_animation {
        for &(at, color) in &state.popped {
            if let Some(pos) = cell_to_screen(board, layout, at) {
                draw_bubble(buf, pos, theme.bubble_color(color), bg);
            }
        }
    }

    let hint_pos = state
        .assistant
        .filter(|_| state.hints_enabled && state.projectile.is_none())
        .and_then(|hint| cell_to_screen(board, layout, hint.cell));
    if let Some((x, y)) = hint_pos {
        let style = Style::default()
            .fg(theme.hint)
            .bg(theme.bubble_color(state.current_color))
            .bold();
        buf.set_string(x, y, HINT_MARK, style);
    }

    if !state.game_over && state.projectile.is_none() {
        for (x, y) in aim_path(state) {
            if let Some((sx, sy)) = world_to_screen(board, layout, x, y) {
                // The slot's right cell sits on the dot's x.
                buf[(sx + 1, sy)]
                    .set_symbol(AIM_DOT)
                    .set_style(Style::default().fg(theme.main_fg).bg(bg));
            }
        }
    }

    if let Some(p) = state.projectile {
        if let Some(pos) = world_to_screen(board, layout, p.x, p.y) {
            draw_bubble(buf, pos, theme.bubble_color(p.color), bg);
        }
    }

    if let Some(pos) = world_to_screen(board, layout, layout.shooter_x, layout.shooter_y) {
        let shooter_color = if state.projectile.is_some() {
            theme.inactive_fg
        } else {
            theme.bubble_color(state.current_color)
        };
        draw_bubble(buf, pos, shooter_color, bg);
    }

    for popup in &state.popups {
        let Some((x, y)) = cell_to_screen(board, layout, popup.at) else {
            continue;
        };
        let rise = (popup.age_ms / POPUP_RISE_MS) as u16;
        let y = y.saturating_sub(rise).max(board.y);
        let label = if popup.combo > 1 {
            format!("+{} x{}", popup.amount, popup.combo)
        } else {
            format!("+{}", popup.amount)
        };
        let style = Style::default().fg(theme.title).bg(bg).bold();
        let max_w = (board.x + board.width).saturating_sub(x) as usize;
        buf.set_stringn(x, y, label, max_w, style);
    }
}

fn draw_sidebar(frame: &mut Frame, view: &View, area: Rect) {
    let state = view.state;
    let theme = view.theme;
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let border_style = Style::default().fg(theme.div_line).bg(theme.bg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Bubbles: now / next
            Constraint::Length(6), // Stats
            Constraint::Length(3), // Level gauge
            Constraint::Length(4), // Assistant
            Constraint::Min(2),    // Status
        ])
        .split(area);

    let bubble_span = |color: BubbleColor| {
        Span::styled(BUBBLE, Style::default().fg(theme.bubble_color(color)))
    };

    // --- Bubbles ---
    let bubbles_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" Bubbles ", title_style));
    let bubbles_inner = bubbles_block.inner(chunks[0]);
    bubbles_block.render(chunks[0], frame.buffer_mut());
    let mode_label = if state.zen_mode { "zen" } else { "standard" };
    Paragraph::new(Text::from(vec![
        Line::from(vec![
            Span::styled("Now ", title_style),
            bubble_span(state.current_color),
            Span::styled("   Next ", title_style),
            bubble_span(state.next_color),
        ]),
        Line::from(Span::styled(format!("Mode: {}", mode_label), fg_style)),
    ]))
    .render(bubbles_inner, frame.buffer_mut());

    // --- Stats ---
    let stats_block = Block::default().borders(Borders::ALL).border_style(border_style);
    let stats_inner = stats_block.inner(chunks[1]);
    stats_block.render(chunks[1], frame.buffer_mut());
    let row_in = state
        .shots_until_row()
        .map_or_else(|| "-".to_string(), |n| format!("{} shots", n));
    let stat = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, title_style),
            Span::styled(value, fg_style),
        ])
    };
    let combo = if state.combo > 0 {
        format!("x{} (max x{})", state.combo, state.max_combo)
    } else {
        format!("- (max x{})", state.max_combo)
    };
    Paragraph::new(Text::from(vec![
        stat("Score: ", state.score.to_string()),
        stat("Best: ", state.best_score.to_string()),
        stat("Combo: ", combo),
        stat("Next row: ", row_in),
    ]))
    .render(stats_inner, frame.buffer_mut());

    // --- Level progress ---
    let level_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(format!(" Level {} ", state.level), title_style));
    let level_inner = level_block.inner(chunks[2]);
    level_block.render(chunks[2], frame.buffer_mut());
    Gauge::default()
        .ratio(state.level_progress())
        .gauge_style(Style::default().fg(theme.bubbles[2]).bg(theme.bg))
        .render(level_inner, frame.buffer_mut());

    // --- Assistant ---
    let assist_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" Assistant ", title_style));
    let assist_inner = assist_block.inner(chunks[3]);
    assist_block.render(chunks[3], frame.buffer_mut());
    let assist_lines = if !state.hints_enabled {
        vec![Line::from(Span::styled(
            "off (H to enable)",
            Style::default().fg(theme.inactive_fg),
        ))]
    } else if let Some(s) = state.assistant {
        vec![
            Line::from(vec![
                Span::styled("Aim for ", fg_style),
                Span::styled(HINT_MARK, Style::default().fg(theme.hint).bold()),
                Span::styled(format!(" {}", s.cell), fg_style),
            ]),
            Line::from(Span::styled(format!("pops {} bubbles", s.size), fg_style)),
        ]
    } else {
        vec![Line::from(Span::styled(
            "no match for this colour",
            Style::default().fg(theme.inactive_fg),
        ))]
    };
    Paragraph::new(Text::from(assist_lines)).render(assist_inner, frame.buffer_mut());

    // --- Status ---
    Paragraph::new(Line::from(Span::styled(view.status, fg_style)))
        .render(chunks[4], frame.buffer_mut());
}

pub fn draw_quit_menu(frame: &mut Frame, theme: &Theme, selected: QuitOption) {
    let area = frame.area();
    let qw = 24;
    let qh = 8;
    let quit_rect = Rect {
        x: area.x + area.width.saturating_sub(qw) / 2,
        y: area.y + area.height.saturating_sub(qh) / 2,
        width: qw,
        height: qh,
    }
    .intersection(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.title))
        .title(" Quit? ");

    frame
        .buffer_mut()
        .set_style(quit_rect, Style::default().bg(theme.bg));
    let inner = block.inner(quit_rect);
    block.render(quit_rect, frame.buffer_mut());

    let options = [
        (QuitOption::Resume, " Resume "),
        (QuitOption::MainMenu, " Main Menu "),
        (QuitOption::Exit, " Exit "),
    ];

    for (i, (opt, label)) in options.iter().enumerate() {
        let style = if *opt == selected {
            Style::default().fg(theme.bg).bg(theme.title).bold()
        } else {
            Style::default().fg(theme.title)
        };
        let rx = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        let ry = inner.y + 1 + i as u16 * 2;
        if ry < inner.y + inner.height {
            frame.buffer_mut().set_string(rx, ry, label, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::grid::Cell;

    fn state() -> GameState {
        let config = GameConfig {
            columns: 8,
            initial_rows: 3,
            seed: Some(3),
            ..GameConfig::default()
        };
        GameState::new(&config, 0)
    }

    #[test]
    fn test_board_size_for_terminal() {
        assert_eq!(board_size_for_terminal(80, 24), (24, 19));
        assert_eq!(board_size_for_terminal(10, 3), (0, 0));
    }

    #[test]
    fn test_bubbles_map_to_two_cell_slots() {
        let state = state();
        let board = Rect::new(1, 1, state.layout.width as u16, state.field_rows() as u16);
        assert_eq!(cell_to_screen(board, &state.layout, HexCoord::new(0, 0)), Some((1, 1)));
        assert_eq!(cell_to_screen(board, &state.layout, HexCoord::new(0, 1)), Some((3, 1)));
        // Odd rows are shifted by one cell.
        assert_eq!(cell_to_screen(board, &state.layout, HexCoord::new(1, 0)), Some((2, 2)));
        assert_eq!(cell_to_screen(board, &state.layout, HexCoord::new(1, 7)), Some((16, 2)));
        assert_eq!(cell_to_screen(board, &state.layout, HexCoord::new(40, 0)), None);
    }

    #[test]
    fn test_straight_aim_path_goes_up() {
        let state = state();
        let path = aim_path(&state);
        assert!(!path.is_empty());
        assert!(path.iter().all(|&(x, _)| (x - state.layout.shooter_x).abs() < 1e-3));
        assert!(path.windows(2).all(|w| w[1].1 < w[0].1));
        let last = path[path.len() - 1];
        let (_, lowest_y) = state.layout.grid_to_world(2, 0);
        assert!(last.1 > lowest_y);
    }

    #[test]
    fn test_angled_aim_path_bounces_inside_walls() {
        let mut state = state();
        state.grid.reset(0, |_, _| Cell::Empty);
        state.aim.angle = 0.3;
        state.aim.power = 1.0;
        let path = aim_path(&state);
        let (left, right) = (state.layout.left_bound(), state.layout.right_bound());
        assert!(path.iter().all(|&(x, _)| x >= left && x <= right));
        assert!(path.iter().any(|&(x, _)| (x - right).abs() < 1.0));
    }
}
