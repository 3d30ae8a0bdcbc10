//! Marquee theme for reeltui
//!
//! Color palette and style helpers for the TUI: dark auditorium background,
//! marquee gold for focus, curtain red for the brand.

use ratatui::style::{Color, Modifier, Style};

/// Color palette and shared styles
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0d0b10
    pub const BACKGROUND: Color = Color::Rgb(0x0d, 0x0b, 0x10);

    /// Primary: #f5c518 (marquee gold)
    pub const PRIMARY: Color = Color::Rgb(0xf5, 0xc5, 0x18);

    /// Secondary: #e50914 (curtain red)
    pub const SECONDARY: Color = Color::Rgb(0xe5, 0x09, 0x14);

    /// Accent: #4fc3f7 (projector blue)
    pub const ACCENT: Color = Color::Rgb(0x4f, 0xc3, 0xf7);

    /// Text: #ece6da (screen white)
    pub const TEXT: Color = Color::Rgb(0xec, 0xe6, 0xda);

    /// Dim: #6b6470
    pub const DIM: Color = Color::Rgb(0x6b, 0x64, 0x70);

    /// Success: #5dd39e
    pub const SUCCESS: Color = Color::Rgb(0x5d, 0xd3, 0x9e);

    /// Warning: #ffa552
    pub const WARNING: Color = Color::Rgb(0xff, 0xa5, 0x52);

    /// Error: #ff5c5c
    pub const ERROR: Color = Color::Rgb(0xff, 0x5c, 0x5c);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Card background
    pub const CARD: Color = Color::Rgb(0x1a, 0x16, 0x1f);

    /// Border color (dim gold)
    pub const BORDER: Color = Color::Rgb(0x5c, 0x4a, 0x12);

    /// Border color when focused
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn brand() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Key hint (e.g. `[n]`)
    pub fn keybind() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::CARD)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn year() -> Style {
        Style::default().fg(Self::DIM)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENT STYLES
    // ═══════════════════════════════════════════════════════════════════════

    pub fn tab_active() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Enabled navigation control
    pub fn control() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    /// Disabled navigation control
    pub fn control_disabled() -> Style {
        Style::default()
            .fg(Self::DIM)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn card() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::CARD)
    }

    pub fn card_border(selected: bool) -> Style {
        if selected {
            Self::border_focused()
        } else {
            Self::border()
        }
    }

    /// Color a rating by band
    pub fn rating(vote_average: f64) -> Style {
        let color = if vote_average >= 7.5 {
            Self::SUCCESS
        } else if vote_average >= 6.0 {
            Self::PRIMARY
        } else if vote_average >= 4.0 {
            Self::WARNING
        } else {
            Self::ERROR
        };
        Style::default().fg(color)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CONTRAST
// ═══════════════════════════════════════════════════════════════════════════

/// Relative luminance of an sRGB color (WCAG 2.x)
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// Contrast ratio between two colors, from 1.0 to 21.0
pub fn contrast_ratio(fg: Color, bg: Color) -> Option<f64> {
    let (fr, fg_, fb) = color_to_rgb(fg)?;
    let (br, bg_, bb) = color_to_rgb(bg)?;
    let l1 = relative_luminance(fr, fg_, fb);
    let l2 = relative_luminance(br, bg_, bb);
    let (hi, lo) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    Some((hi + 0.05) / (lo + 0.05))
}

pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_readable_on_background() {
        for color in [Theme::TEXT, Theme::PRIMARY, Theme::ACCENT, Theme::ERROR] {
            let ratio = contrast_ratio(color, Theme::BACKGROUND).unwrap();
            assert!(ratio >= 4.5, "{:?} has contrast {:.2}", color, ratio);
        }
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(Theme::rating(8.1).fg, Some(Theme::SUCCESS));
        assert_eq!(Theme::rating(6.5).fg, Some(Theme::PRIMARY));
        assert_eq!(Theme::rating(5.0).fg, Some(Theme::WARNING));
        assert_eq!(Theme::rating(2.0).fg, Some(Theme::ERROR));
    }

    #[test]
    fn test_contrast_extremes() {
        let black = Color::Rgb(0, 0, 0);
        let white = Color::Rgb(255, 255, 255);
        let ratio = contrast_ratio(white, black).unwrap();
        assert!((ratio - 21.0).abs() < 0.01);
        assert!(contrast_ratio(Color::Red, black).is_none());
    }
}
