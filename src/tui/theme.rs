//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;
use crate::output::{score_band, ScoreBand};

/// Brand accent (orange-red)
pub const ACCENT: Color = Color::Rgb(255, 107, 53);
/// Secondary accent (yellow)
pub const HIGHLIGHT: Color = Color::Rgb(255, 244, 105);

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Score-based colors (traffic light pattern, high is healthy)
    pub score_strong: Color,
    pub score_mixed: Color,
    pub score_weak: Color,
    pub bar_empty: Color,

    // Hero counters
    pub counter_primary: Color,
    pub counter_muted: Color,
    pub counter_highlight: Color,

    // Styles
    pub title_style: Style,
    pub section_style: Style,
    pub option_selected: Style,

    // General colors
    pub text: Color,
    pub muted: Color,
    pub accent: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Panels
    pub panel_border: Color,
    pub risk_color: Color,
    pub strength_color: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            score_strong: Color::Green,
            score_mixed: Color::Yellow,
            score_weak: Color::Red,
            bar_empty: Color::DarkGray,
            counter_primary: ACCENT,
            counter_muted: Color::Gray,
            counter_highlight: HIGHLIGHT,
            title_style: Style::new().fg(ACCENT).bold(),
            section_style: Style::new().fg(ACCENT).bold(),
            option_selected: Style::new().reversed(),
            text: Color::White,
            muted: Color::Gray,
            accent: ACCENT,
            status_bar_bg: Color::Indexed(236),
            status_key_color: ACCENT,
            flash_success: Color::Green,
            flash_error: Color::Red,
            panel_border: Color::Indexed(240),
            risk_color: Color::LightRed,
            strength_color: Color::LightGreen,
            popup_border: ACCENT,
            popup_title: Style::new().fg(ACCENT).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            score_strong: Color::Indexed(28),
            score_mixed: Color::Indexed(136),
            score_weak: Color::Indexed(160),
            bar_empty: Color::Indexed(250),
            counter_primary: Color::Indexed(166),
            counter_muted: Color::Indexed(242),
            counter_highlight: Color::Indexed(136),
            title_style: Style::new().fg(Color::Indexed(166)).bold(),
            section_style: Style::new().fg(Color::Indexed(166)).bold(),
            option_selected: Style::new().reversed(),
            text: Color::Black,
            muted: Color::Indexed(242),
            accent: Color::Indexed(166),
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Indexed(166),
            flash_success: Color::Indexed(28),
            flash_error: Color::Indexed(160),
            panel_border: Color::Indexed(248),
            risk_color: Color::Indexed(160),
            strength_color: Color::Indexed(28),
            popup_border: Color::Indexed(166),
            popup_title: Style::new().fg(Color::Indexed(166)).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    /// Returns the color for a 0-100 health score
    pub fn score_color(&self, score: u8) -> Color {
        match score_band(score) {
            ScoreBand::Strong => self.score_strong,
            ScoreBand::Mixed => self.score_mixed,
            ScoreBand::Weak => self.score_weak,
        }
    }
}

/// Pick a palette. `Auto` asks the terminal for its background luma.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_color_bands() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.score_color(90), Color::Green);
        assert_eq!(theme.score_color(50), Color::Yellow);
        assert_eq!(theme.score_color(10), Color::Red);
    }

    #[test]
    fn test_explicit_modes_skip_detection() {
        assert_eq!(resolve_theme(ThemeMode::Light).text, Color::Black);
        assert_eq!(resolve_theme(ThemeMode::Dark).text, Color::White);
    }
}
