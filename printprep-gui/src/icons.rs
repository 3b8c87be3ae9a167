//! SVG icon system for the printprep GUI.
//!
//! Embedded SVG icons instead of Unicode glyphs, so rendering does not depend
//! on which fonts a system has installed. All icons use `currentColor` and
//! can be tinted per theme.

use iced::widget::svg::{Handle, Svg};
use iced::{Color, Length};

/// All available icons in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    // Profile menu
    /// Dropdown closed
    ChevronDown,
    /// Dropdown open
    ChevronUp,
    /// Customized-settings indicator
    Pencil,

    // Profile actions
    /// Create profile from current settings
    Plus,
    /// Update profile with current settings
    RefreshCw,
    /// Discard current changes
    RotateCcw,
    /// Manage profiles
    Sliders,
    /// Duplicate a profile
    Copy,
    /// Delete a profile
    Trash,

    // Dialog controls
    Check,
    X,

    // Header
    Printer,
    /// Switch to light mode
    Sun,
    /// Switch to dark mode
    Moon,
}

impl Icon {
    /// Returns the raw SVG bytes for this icon.
    fn bytes(self) -> &'static [u8] {
        match self {
            Icon::ChevronDown => include_bytes!("../icons/chevron-down.svg"),
            Icon::ChevronUp => include_bytes!("../icons/chevron-up.svg"),
            Icon::Pencil => include_bytes!("../icons/pencil.svg"),

            Icon::Plus => include_bytes!("../icons/plus.svg"),
            Icon::RefreshCw => include_bytes!("../icons/refresh-cw.svg"),
            Icon::RotateCcw => include_bytes!("../icons/rotate-ccw.svg"),
            Icon::Sliders => include_bytes!("../icons/sliders.svg"),
            Icon::Copy => include_bytes!("../icons/copy.svg"),
            Icon::Trash => include_bytes!("../icons/trash.svg"),

            Icon::Check => include_bytes!("../icons/check.svg"),
            Icon::X => include_bytes!("../icons/x.svg"),

            Icon::Printer => include_bytes!("../icons/printer.svg"),
            Icon::Sun => include_bytes!("../icons/sun.svg"),
            Icon::Moon => include_bytes!("../icons/moon.svg"),
        }
    }

    /// Creates an SVG widget with the default size (16x16).
    pub fn svg(self) -> Svg<'static> {
        Svg::new(Handle::from_memory(self.bytes()))
            .width(Length::Fixed(16.0))
            .height(Length::Fixed(16.0))
    }

    /// Creates an SVG widget with a custom size.
    pub fn svg_sized(self, size: f32) -> Svg<'static> {
        Svg::new(Handle::from_memory(self.bytes()))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
    }

    /// Creates an SVG widget with a specific size and color.
    ///
    /// Note: This requires the SVG to use `currentColor` for stroke/fill.
    pub fn svg_sized_colored(self, size: f32, color: Color) -> Svg<'static> {
        use iced::widget::svg;
        self.svg_sized(size)
            .style(move |_theme, _status| svg::Style { color: Some(color) })
    }
}
