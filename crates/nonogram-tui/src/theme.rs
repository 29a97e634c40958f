use crossterm::style::Color;
use nonogram_core::RenderStyle;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Unfilled cell background
    pub empty_cell: Color,
    /// Cross drawn in unfilled cells
    pub cross: Color,
    /// Crosshair behind the hovered row/column clues
    pub hover_band: Color,
    /// Outline of the hovered cell
    pub hover_outline: Color,
    /// Heavy separators
    pub separator: Color,
    /// Selected palette entry marker
    pub selected: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Light theme (default); clue colors are written for a light page
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 250, g: 250, b: 250 },
            fg: Color::Rgb { r: 20, g: 20, b: 20 },
            empty_cell: Color::Rgb { r: 255, g: 255, b: 255 },
            cross: Color::Rgb { r: 170, g: 170, b: 170 },
            hover_band: Color::Rgb { r: 211, g: 211, b: 211 },
            hover_outline: Color::Rgb { r: 0, g: 0, b: 255 },
            separator: Color::Rgb { r: 0, g: 0, b: 0 },
            selected: Color::Rgb { r: 0, g: 90, b: 200 },
            key: Color::Rgb { r: 160, g: 90, b: 0 },
        }
    }

    /// Dark theme; black clues are lifted to grey by [`Theme::clue_color`]
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            empty_cell: Color::Rgb { r: 40, g: 44, b: 58 },
            cross: Color::Rgb { r: 90, g: 95, b: 115 },
            hover_band: Color::Rgb { r: 55, g: 65, b: 90 },
            hover_outline: Color::Rgb { r: 255, g: 210, b: 100 },
            separator: Color::Rgb { r: 130, g: 140, b: 170 },
            selected: Color::Rgb { r: 80, g: 180, b: 255 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Pure black and white with a yellow hover
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Rgb { r: 255, g: 255, b: 255 },
            fg: Color::Rgb { r: 0, g: 0, b: 0 },
            empty_cell: Color::Rgb { r: 255, g: 255, b: 255 },
            cross: Color::Rgb { r: 0, g: 0, b: 0 },
            hover_band: Color::Rgb { r: 255, g: 235, b: 0 },
            hover_outline: Color::Rgb { r: 0, g: 0, b: 0 },
            separator: Color::Rgb { r: 0, g: 0, b: 0 },
            selected: Color::Rgb { r: 0, g: 0, b: 0 },
            key: Color::Rgb { r: 0, g: 0, b: 0 },
        }
    }

    pub fn named(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "high_contrast" => Self::high_contrast(),
            _ => Self::light(),
        }
    }

    /// Render style for the core frame, as CSS tokens [`css_color`] reads back
    pub fn style(&self) -> RenderStyle {
        RenderStyle {
            empty_cell: css(self.empty_cell),
            cell_border: css(self.cross),
            hover_band: css(self.hover_band),
            hover_outline: css(self.hover_outline),
            separator: css(self.separator),
            ..RenderStyle::default()
        }
    }

    /// Terminal color for a puzzle color token, kept readable on `bg`
    pub fn clue_color(&self, token: &str) -> Color {
        match css_color(token) {
            Some(Color::Rgb { r: 0, g: 0, b: 0 }) => self.fg,
            Some(color) => color,
            None => self.fg,
        }
    }
}

fn css(color: Color) -> String {
    match color {
        Color::Rgb { r, g, b } => format!("rgb({}, {}, {})", r, g, b),
        _ => "black".to_string(),
    }
}

/// Parse a CSS-style color token: a common color name, `#rrggbb`, `#rgb` or
/// `rgb(r, g, b)`
pub fn css_color(token: &str) -> Option<Color> {
    let token = token.trim().to_ascii_lowercase();
    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(body) = token.strip_prefix("rgb(").and_then(|t| t.strip_suffix(')')) {
        let parts: Vec<u8> = body
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .ok()?;
        if let [r, g, b] = parts[..] {
            return Some(Color::Rgb { r, g, b });
        }
        return None;
    }
    let (r, g, b) = match token.as_str() {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (220, 30, 30),
        "green" => (0, 150, 0),
        "blue" => (30, 60, 220),
        "yellow" => (240, 200, 0),
        "orange" => (255, 140, 0),
        "purple" => (128, 0, 128),
        "pink" => (255, 150, 190),
        "brown" => (140, 80, 30),
        "cyan" => (0, 190, 210),
        "magenta" => (210, 0, 210),
        "grey" | "gray" => (128, 128, 128),
        "lightgrey" | "lightgray" => (211, 211, 211),
        _ => return None,
    };
    Some(Color::Rgb { r, g, b })
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
        }),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color::Rgb {
                r: expand(0)?,
                g: expand(1)?,
                b: expand(2)?,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color_forms() {
        assert_eq!(css_color("Red"), Some(Color::Rgb { r: 220, g: 30, b: 30 }));
        assert_eq!(css_color("#102030"), Some(Color::Rgb { r: 16, g: 32, b: 48 }));
        assert_eq!(css_color("#fff"), Some(Color::Rgb { r: 255, g: 255, b: 255 }));
        assert_eq!(
            css_color("rgb(1, 2, 3)"),
            Some(Color::Rgb { r: 1, g: 2, b: 3 })
        );
        assert_eq!(css_color("rgb(1, 2)"), None);
        assert_eq!(css_color("#12"), None);
        assert_eq!(css_color("chartreuse-ish"), None);
    }

    #[test]
    fn test_style_round_trips_through_css() {
        let theme = Theme::dark();
        let style = theme.style();
        assert_eq!(css_color(&style.hover_outline), Some(theme.hover_outline));
        assert_eq!(css_color(&style.empty_cell), Some(theme.empty_cell));
    }

    #[test]
    fn test_named() {
        assert_eq!(Theme::named("dark").bg, Theme::dark().bg);
        assert_eq!(Theme::named("high_contrast").hover_band, Theme::high_contrast().hover_band);
        assert_eq!(Theme::named("nope").bg, Theme::light().bg);
    }

    #[test]
    fn test_black_clues_readable_on_dark() {
        let theme = Theme::dark();
        assert_eq!(theme.clue_color("black"), theme.fg);
        assert_eq!(theme.clue_color("blue"), css_color("blue").unwrap());
    }
}
