//! UI state management for the printprep GUI.
//!
//! Holds transient view state that belongs to no model entity: the floating
//! tooltip and the printer panel visibility.

use iced::Point;

/// A tooltip requested by a panel, rendered by the main view
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    /// Tooltip text
    pub text: String,
    /// Anchor position, updated while the pointer moves over the anchor
    pub position: Point,
}

/// Manager for transient UI state.
#[derive(Debug, Clone, Default)]
pub struct UiStateManager {
    /// The currently shown tooltip, if any
    tooltip: Option<TooltipState>,
    /// Runtime override for the printer panel (from settings at startup)
    show_printer_panel: bool,
}

impl UiStateManager {
    /// Creates a new UI state manager.
    pub fn new(show_printer_panel: bool) -> Self {
        Self {
            tooltip: None,
            show_printer_panel,
        }
    }

    /// Show a tooltip with the given text at the origin; the position is
    /// refined by subsequent move events.
    pub fn show_tooltip(&mut self, text: String) {
        self.tooltip = Some(TooltipState {
            text,
            position: Point::ORIGIN,
        });
    }

    /// Update the anchor position of the visible tooltip. Ignored when no
    /// tooltip is shown.
    pub fn move_tooltip(&mut self, position: Point) {
        if let Some(tooltip) = &mut self.tooltip {
            tooltip.position = position;
        }
    }

    /// Hide the tooltip.
    pub fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }

    /// The currently visible tooltip, if any.
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.as_ref()
    }

    /// Whether the printer status panel is shown.
    pub fn show_printer_panel(&self) -> bool {
        self.show_printer_panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_show_move_hide() {
        let mut ui_state = UiStateManager::new(true);
        assert!(ui_state.tooltip().is_none());

        ui_state.show_tooltip("hello".to_string());
        assert_eq!(ui_state.tooltip().unwrap().text, "hello");
        assert_eq!(ui_state.tooltip().unwrap().position, Point::ORIGIN);

        ui_state.move_tooltip(Point::new(12.0, 34.0));
        assert_eq!(ui_state.tooltip().unwrap().position, Point::new(12.0, 34.0));

        ui_state.hide_tooltip();
        assert!(ui_state.tooltip().is_none());
    }

    #[test]
    fn test_move_without_tooltip_is_ignored() {
        let mut ui_state = UiStateManager::new(true);
        ui_state.move_tooltip(Point::new(1.0, 2.0));
        assert!(ui_state.tooltip().is_none());
    }
}
