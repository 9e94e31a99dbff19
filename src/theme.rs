//! Colours: bubble palette and UI roles, loadable from a btop-style `theme[key]="value"` file.

use crate::Palette;
use crate::grid::BubbleColor;
use crate::game::PALETTE_SIZE;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Bubble colours plus the handful of UI roles the renderer needs.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Indexed by `BubbleColor`: red, blue, green, yellow, magenta, cyan.
    pub bubbles: [Color; PALETTE_SIZE],
    /// Board background.
    pub bg: Color,
    /// Borders, walls and the aim guide.
    pub div_line: Color,
    pub main_fg: Color,
    pub title: Color,
    /// Secondary text (hints off, empty leaderboard).
    pub inactive_fg: Color,
    /// Assistant target marker.
    pub hint: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::onedark_default()
    }
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

const ONEDARK_BUBBLES: [Color; PALETTE_SIZE] = [
    rgb(0xE06C75),
    rgb(0x61AFEF),
    rgb(0x98C379),
    rgb(0xE5C07B),
    rgb(0xC678DD),
    rgb(0x56B6C2),
];

const HIGH_CONTRAST_BUBBLES: [Color; PALETTE_SIZE] = [
    rgb(0xFF0000),
    rgb(0x0088FF),
    rgb(0x00FF00),
    rgb(0xFFFF00),
    rgb(0xFF00FF),
    rgb(0x00FFFF),
];

// Paul Tol's "vibrant" set, ordered so the first four stay distinguishable under deuteranopia.
const COLORBLIND_BUBBLES: [Color; PALETTE_SIZE] = [
    rgb(0xCC3311),
    rgb(0x0077BB),
    rgb(0xEE7733),
    rgb(0x009988),
    rgb(0xEE3377),
    rgb(0xBBBB00),
];

impl Theme {
    pub fn onedark_default() -> Self {
        Self {
            bubbles: ONEDARK_BUBBLES,
            bg: rgb(0x282C34),
            div_line: rgb(0x3F444F),
            main_fg: rgb(0xABB2BF),
            title: rgb(0xE5C07B),
            inactive_fg: rgb(0x5C6370),
            hint: rgb(0xFFFFFF),
        }
    }

    /// Load theme from a btop-style file, then apply `palette`.
    /// Missing path (or no path) yields the One Dark defaults.
    pub fn load(path: Option<&Path>, palette: Palette) -> Result<Self, ThemeError> {
        let mut theme = match path {
            Some(p) if p.exists() => {
                let s = std::fs::read_to_string(p)?;
                Self::from_map(&parse_theme_file(&s))
            }
            Some(p) => {
                log::warn!("theme file {} not found", p.display());
                Self::onedark_default()
            }
            None => Self::onedark_default(),
        };
        theme.apply_palette(palette);
        Ok(theme)
    }

    /// Replace the bubble colours for the accessibility palettes; UI roles are untouched.
    pub fn apply_palette(&mut self, palette: Palette) {
        match palette {
            Palette::Normal => {}
            Palette::HighContrast => self.bubbles = HIGH_CONTRAST_BUBBLES,
            Palette::Colorblind => self.bubbles = COLORBLIND_BUBBLES,
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |keys: &[&str], fallback: Color| {
            keys.iter()
                .find_map(|k| map.get(*k).and_then(|v| parse_hex(v).ok()))
                .unwrap_or(fallback)
        };
        let d = Self::onedark_default();
        Self {
            bubbles: [
                get(&["cpu_end", "temp_end"], d.bubbles[0]),
                get(&["cpu_box"], d.bubbles[1]),
                get(&["mem_box", "cpu_start"], d.bubbles[2]),
                get(&["cpu_mid"], d.bubbles[3]),
                get(&["net_box"], d.bubbles[4]),
                get(&["proc_misc", "hi_fg"], d.bubbles[5]),
            ],
            bg: get(&["main_bg"], d.bg),
            div_line: get(&["div_line"], d.div_line),
            main_fg: get(&["main_fg"], d.main_fg),
            title: get(&["title"], d.title),
            inactive_fg: get(&["inactive_fg"], d.inactive_fg),
            hint: get(&["selected_fg", "hi_fg"], d.hint),
        }
    }

    /// Colour for a bubble; indices past the palette wrap around.
    #[inline]
    pub fn bubble_color(&self, color: BubbleColor) -> Color {
        self.bubbles[color.0 as usize % PALETTE_SIZE]
    }
}

/// Parse btop-style theme text into a key -> value map. Comments and blank lines are skipped.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some((key, rest)) = stripped.split_once(']') else {
            continue;
        };
        let Some((_, value)) = rest.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').trim_matches('\'');
        if !value.is_empty() {
            map.insert(key.trim().to_string(), value.to_string());
        }
    }
    map
}

/// Parse "#RRGGBB" or "#RGB".
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let digits = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(digits.to_string());
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(invalid)
    };
    match digits.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        let c = parse_hex("#98C379").unwrap();
        assert!(matches!(c, Color::Rgb(0x98, 0xC3, 0x79)));
    }

    #[test]
    fn test_parse_hex_3() {
        let c = parse_hex("#FFF").unwrap();
        assert!(matches!(c, Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#GG0000").is_err());
    }

    #[test]
    fn test_parse_theme_line() {
        let map = parse_theme_file(
            "# comment\ntheme[main_bg]=\"#31353F\"\ntheme[cpu_box]='#0000ff'\nnot a theme line",
        );
        assert_eq!(map.get("main_bg"), Some(&"#31353F".to_string()));
        assert_eq!(map.get("cpu_box"), Some(&"#0000ff".to_string()));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_theme_file_overrides_bubble_colour() {
        let theme = Theme::from_map(&parse_theme_file("theme[cpu_box]=\"#0000ff\""));
        assert_eq!(theme.bubble_color(BubbleColor(1)), Color::Rgb(0, 0, 255));
        assert_eq!(theme.bubble_color(BubbleColor(0)), ONEDARK_BUBBLES[0]);
    }

    #[test]
    fn test_palette_replaces_bubbles_only() {
        let mut theme = Theme::default();
        let bg = theme.bg;
        theme.apply_palette(Palette::HighContrast);
        assert_eq!(theme.bubble_color(BubbleColor(0)), Color::Rgb(255, 0, 0));
        assert_eq!(theme.bg, bg);
    }

    #[test]
    fn test_bubble_color_wraps() {
        let theme = Theme::default();
        assert_eq!(theme.bubble_color(BubbleColor(7)), theme.bubble_color(BubbleColor(1)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let theme = Theme::load(Some(Path::new("/nonexistent/hexshot.theme")), Palette::Normal)
            .unwrap();
        assert_eq!(theme.bubbles, ONEDARK_BUBBLES);
    }
}
