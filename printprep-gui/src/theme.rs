//! Theme system for the printprep GUI.
//!
//! Centralized color management with light and dark mode support. UI
//! components take colors from the theme rather than hardcoding values.

use iced::{Background, Border, Color, Shadow};

/// Theme mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Complete theme definition with all colors used in the application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Current theme mode
    pub mode: ThemeMode,
    /// Color palette
    pub colors: ThemeColors,
}

/// All colors used throughout the application.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Base colors
    /// Main background color
    pub background: Color,
    /// Surface color for cards and panels
    pub surface: Color,

    // Text colors
    /// Primary text color
    pub text_primary: Color,
    /// Secondary/dimmed text color
    pub text_secondary: Color,
    /// Muted/disabled text color
    pub text_muted: Color,

    // Semantic colors
    /// Success state (e.g., printer connected)
    pub success: Color,
    /// Warning state (e.g., customized settings)
    pub warning: Color,
    /// Error state
    pub error: Color,

    // Profile panel
    /// Accent for the active menu entry
    pub accent: Color,
    /// Customized-settings indicator tint
    pub customized: Color,

    // Printer states
    /// Printer reachable
    pub printer_online: Color,
    /// Printer absent or closed
    pub printer_offline: Color,

    // Borders and dividers
    /// Border color for cards and inputs
    pub border: Color,
    /// Divider line color (profile group separator)
    pub divider: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Create a light theme.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            colors: ThemeColors {
                background: Color::from_rgb(0.95, 0.95, 0.96),
                surface: Color::WHITE,

                text_primary: Color::from_rgb(0.1, 0.1, 0.1),
                text_secondary: Color::from_rgb(0.4, 0.4, 0.4),
                text_muted: Color::from_rgb(0.6, 0.6, 0.6),

                success: Color::from_rgb(0.2, 0.7, 0.3),
                warning: Color::from_rgb(0.9, 0.6, 0.1),
                error: Color::from_rgb(0.9, 0.3, 0.3),

                accent: Color::from_rgb(0.2, 0.5, 0.8),
                customized: Color::from_rgb(0.9, 0.6, 0.1),

                printer_online: Color::from_rgb(0.2, 0.7, 0.3),
                printer_offline: Color::from_rgb(0.6, 0.6, 0.6),

                border: Color::from_rgb(0.85, 0.85, 0.85),
                divider: Color::from_rgb(0.78, 0.78, 0.8),
            },
        }
    }

    /// Create a dark theme.
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            colors: ThemeColors {
                background: Color::from_rgb(0.1, 0.1, 0.12),
                surface: Color::from_rgb(0.15, 0.15, 0.18),

                text_primary: Color::from_rgb(0.93, 0.93, 0.93),
                text_secondary: Color::from_rgb(0.7, 0.7, 0.7),
                text_muted: Color::from_rgb(0.5, 0.5, 0.5),

                success: Color::from_rgb(0.3, 0.8, 0.4),
                warning: Color::from_rgb(1.0, 0.7, 0.2),
                error: Color::from_rgb(1.0, 0.4, 0.4),

                accent: Color::from_rgb(0.3, 0.6, 0.9),
                customized: Color::from_rgb(1.0, 0.7, 0.2),

                printer_online: Color::from_rgb(0.3, 0.8, 0.4),
                printer_offline: Color::from_rgb(0.5, 0.5, 0.5),

                border: Color::from_rgb(0.3, 0.3, 0.35),
                divider: Color::from_rgb(0.35, 0.35, 0.4),
            },
        }
    }

    /// Toggle between light and dark mode.
    pub fn toggle(&self) -> Self {
        match self.mode {
            ThemeMode::Light => Self::dark(),
            ThemeMode::Dark => Self::light(),
        }
    }

    /// Check if dark mode is active.
    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Container style for cards on the main background.
    pub fn card_style(&self) -> iced::widget::container::Style {
        iced::widget::container::Style {
            background: Some(Background::Color(self.colors.surface)),
            border: Border {
                radius: 8.0.into(),
                width: 1.0,
                color: self.colors.border,
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
                offset: iced::Vector::new(0.0, 1.0),
                blur_radius: 3.0,
            },
            ..iced::widget::container::Style::default()
        }
    }

    /// Create a tooltip style for this theme.
    ///
    /// Tooltips have a solid background with good contrast for readability
    /// in both light and dark modes, with a subtle border and shadow.
    pub fn tooltip_style(&self) -> iced::widget::container::Style {
        let (bg_color, text_color, border_color) = if self.is_dark() {
            (
                Color::from_rgb(0.2, 0.2, 0.24),
                Color::from_rgb(0.93, 0.93, 0.93),
                Color::from_rgb(0.35, 0.35, 0.4),
            )
        } else {
            (
                Color::from_rgb(0.15, 0.15, 0.18),
                Color::from_rgb(0.95, 0.95, 0.95),
                Color::from_rgb(0.1, 0.1, 0.12),
            )
        };

        iced::widget::container::Style {
            background: Some(Background::Color(bg_color)),
            text_color: Some(text_color),
            border: Border {
                radius: 4.0.into(),
                width: 1.0,
                color: border_color,
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                offset: iced::Vector::new(0.0, 2.0),
                blur_radius: 4.0,
            },
            ..iced::widget::container::Style::default()
        }
    }
}
