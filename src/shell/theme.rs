// Theme for the shell UI
//
// A small fixed palette, switchable between dark and light at runtime.

use ratatui::style::{Color, Modifier, Style};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
        }
    }

    /// Get the theme configuration
    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
        }
    }

    /// Parse a theme name from config, falling back to the default
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub highlight: Color,
    pub dim: Color,
    pub accent: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(24, 26, 32),
            fg: Color::Rgb(220, 223, 228),
            border: Color::Rgb(92, 99, 112),
            highlight: Color::Rgb(97, 175, 239),
            dim: Color::Rgb(130, 137, 151),
            accent: Color::Rgb(152, 195, 121),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(250, 250, 250),
            fg: Color::Rgb(56, 58, 66),
            border: Color::Rgb(160, 161, 167),
            highlight: Color::Rgb(64, 120, 242),
            dim: Color::Rgb(130, 131, 137),
            accent: Color::Rgb(80, 161, 79),
        }
    }

    /// Style for the selected tab title
    pub fn tab_highlight(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed helper text
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycle_covers_both_kinds() {
        assert_eq!(ThemeKind::Dark.next(), ThemeKind::Light);
        assert_eq!(ThemeKind::Light.next(), ThemeKind::Dark);
    }

    #[test]
    fn theme_name_parsing_falls_back_to_dark() {
        assert_eq!(ThemeKind::from_name("light"), ThemeKind::Light);
        assert_eq!(ThemeKind::from_name("Light"), ThemeKind::Light);
        assert_eq!(ThemeKind::from_name("no-such-theme"), ThemeKind::Dark);
    }
}
