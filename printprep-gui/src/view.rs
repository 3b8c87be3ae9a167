//! Main view composition for the printprep GUI.
//!
//! Lays out the header, the profile selector card, the active configuration
//! card and the printer status panel, and stacks the manage dialog and the
//! floating tooltip on top. The floating tooltip is rendered here, by the
//! container - the selector panel only emits the show/hide signals.

use iced::widget::{column, container, row, space, text};
use iced::{Alignment, Element, Length};

use printprep_model::{OutputDeviceManager, ProfileStore};
use printprep_shared::profiles::QualitySettings;

use crate::icons::Icon;
use crate::messages::AppMessage;
use crate::profile::{ManageDialog, ProfileSelector};
use crate::theme::Theme;
use crate::ui_state::{TooltipState, UiStateManager};

/// Renders the main application view
pub fn render_main_view<'a>(
    store: &'a ProfileStore,
    devices: &'a OutputDeviceManager,
    selector: &'a ProfileSelector,
    manage_dialog: &'a ManageDialog,
    ui_state: &'a UiStateManager,
    theme: &'a Theme,
) -> Element<'a, AppMessage> {
    let header = render_header(devices, theme);
    let profile_card = render_profile_card(store, selector, theme);
    let configuration_card = render_configuration_card(store, theme);

    let mut content = column![header, profile_card, configuration_card].spacing(12);
    if ui_state.show_printer_panel() {
        content = content.push(render_printer_panel(devices, theme));
    }

    let background = theme.colors.background;
    let main_content = container(content)
        .padding(12)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| iced::widget::container::Style {
            background: Some(iced::Background::Color(background)),
            ..iced::widget::container::Style::default()
        });

    // Overlays: the manage dialog dims the main view; the tooltip floats
    // near its anchor.
    match (manage_dialog.is_visible(), ui_state.tooltip()) {
        (true, _) => iced::widget::stack![
            main_content,
            manage_dialog
                .view(store.catalog(), store.active_profile_id(), theme)
                .map(AppMessage::ManageDialog)
        ]
        .into(),
        (false, Some(tooltip)) => {
            iced::widget::stack![main_content, render_tooltip(tooltip, theme)].into()
        }
        (false, None) => main_content.into(),
    }
}

/// Renders the application header with printer status and theme toggle
fn render_header<'a>(devices: &'a OutputDeviceManager, theme: &'a Theme) -> Element<'a, AppMessage> {
    let text_secondary = theme.colors.text_secondary;

    let theme_icon = if theme.is_dark() { Icon::Sun } else { Icon::Moon };
    let theme_button = iced::widget::button(theme_icon.svg_sized_colored(14.0, text_secondary))
        .padding(6)
        .style(iced::widget::button::text)
        .on_press(AppMessage::ToggleThemeMode);

    let header = row![
        Icon::Printer.svg_sized_colored(18.0, theme.colors.text_primary),
        text("printprep").size(18),
        space().width(Length::Fill),
        render_printer_summary(devices, theme),
        theme_button,
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let style = theme.card_style();
    container(header)
        .padding(12)
        .style(move |_| style)
        .into()
}

/// One-line printer summary in the header
fn render_printer_summary<'a>(
    devices: &'a OutputDeviceManager,
    theme: &'a Theme,
) -> Element<'a, AppMessage> {
    let (summary, color) = if devices.is_empty() {
        ("No printer connected".to_string(), theme.colors.printer_offline)
    } else {
        let mut summary = format!(
            "{} printer(s), {} online",
            devices.len(),
            devices.online_count()
        );
        if let Some(progress) = devices.overall_progress() {
            summary.push_str(&format!(" - printing {:.0}%", progress));
        }
        (summary, theme.colors.printer_online)
    };

    text(summary)
        .size(13)
        .style(move |_| iced::widget::text::Style { color: Some(color) })
        .into()
}

/// The quality profile card hosting the selector panel
fn render_profile_card<'a>(
    store: &'a ProfileStore,
    selector: &'a ProfileSelector,
    theme: &'a Theme,
) -> Element<'a, AppMessage> {
    let caption_color = theme.colors.text_secondary;
    let caption = text("Print quality")
        .size(12)
        .style(move |_| iced::widget::text::Style {
            color: Some(caption_color),
        });

    let panel = selector
        .view(
            store.catalog(),
            store.active_profile_id(),
            store.has_customized_values(),
            theme,
        )
        .map(AppMessage::ProfilePanel);

    let style = theme.card_style();
    container(column![caption, panel].spacing(6))
        .padding(12)
        .width(Length::Fill)
        .style(move |_| style)
        .into()
}

/// The active configuration: effective settings plus pending overrides
fn render_configuration_card<'a>(
    store: &'a ProfileStore,
    theme: &'a Theme,
) -> Element<'a, AppMessage> {
    let caption_color = theme.colors.text_secondary;
    let caption = text("Active configuration")
        .size(12)
        .style(move |_| iced::widget::text::Style {
            color: Some(caption_color),
        });

    let mut rows = column![caption].spacing(4);

    if let Some(settings) = store.effective_settings() {
        for (label, value) in setting_rows(&settings) {
            let muted = theme.colors.text_muted;
            rows = rows.push(
                row![
                    text(label).size(13).width(Length::Fixed(140.0)).style(
                        move |_| iced::widget::text::Style { color: Some(muted) }
                    ),
                    text(value).size(13),
                ]
                .spacing(8),
            );
        }
    }

    if store.has_customized_values() {
        let warning = theme.colors.warning;
        let keys: Vec<String> = store.overrides().keys().cloned().collect();
        rows = rows.push(
            text(format!("Modified settings: {}", keys.join(", ")))
                .size(12)
                .style(move |_| iced::widget::text::Style {
                    color: Some(warning),
                }),
        );
    }

    let style = theme.card_style();
    container(rows)
        .padding(12)
        .width(Length::Fill)
        .style(move |_| style)
        .into()
}

/// Human-readable rows for the settings table
fn setting_rows(settings: &QualitySettings) -> Vec<(String, String)> {
    vec![
        (
            "Layer height".to_string(),
            format!("{} mm", settings.layer_height_mm),
        ),
        (
            "Wall lines".to_string(),
            settings.wall_line_count.to_string(),
        ),
        (
            "Infill density".to_string(),
            format!("{} %", settings.infill_density_percent),
        ),
        (
            "Print speed".to_string(),
            format!("{} mm/s", settings.print_speed_mms),
        ),
        (
            "Support".to_string(),
            if settings.support_enabled {
                "enabled".to_string()
            } else {
                "disabled".to_string()
            },
        ),
        ("Adhesion".to_string(), settings.adhesion.to_string()),
    ]
}

/// Per-device rows for the printer status panel
fn render_printer_panel<'a>(
    devices: &'a OutputDeviceManager,
    theme: &'a Theme,
) -> Element<'a, AppMessage> {
    let caption_color = theme.colors.text_secondary;
    let caption = text("Printers")
        .size(12)
        .style(move |_| iced::widget::text::Style {
            color: Some(caption_color),
        });

    let mut rows = column![caption].spacing(4);

    if devices.is_empty() {
        let muted = theme.colors.text_muted;
        rows = rows.push(
            text("No printers detected. Connect a printer via USB.")
                .size(13)
                .style(move |_| iced::widget::text::Style { color: Some(muted) }),
        );
    }

    for device in devices.devices() {
        let state = device.connection_state();
        let state_color = if state.is_online() {
            theme.colors.printer_online
        } else {
            theme.colors.printer_offline
        };

        let mut line = row![
            Icon::Printer.svg_sized_colored(13.0, state_color),
            text(device.port()).size(13),
            text(state.to_string())
                .size(12)
                .style(move |_| iced::widget::text::Style {
                    color: Some(state_color),
                }),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        if let Some(progress) = device.telemetry().progress {
            line = line.push(text(format!("{:.0}%", progress)).size(12));
        }

        rows = rows.push(line);
    }

    let style = theme.card_style();
    container(rows)
        .padding(12)
        .width(Length::Fill)
        .style(move |_| style)
        .into()
}

/// The floating tooltip, offset from its anchor position
fn render_tooltip<'a>(tooltip: &'a TooltipState, theme: &Theme) -> Element<'a, AppMessage> {
    let style = theme.tooltip_style();
    let tip = container(text(tooltip.text.as_str()).size(12))
        .padding([4, 8])
        .max_width(320)
        .style(move |_| style);

    // Spacer-based positioning keeps the rest of the overlay layer empty so
    // pointer events reach the widgets below.
    column![
        space().height(Length::Fixed(tooltip.position.y + 48.0)),
        row![space().width(Length::Fixed(tooltip.position.x + 24.0)), tip],
    ]
    .into()
}
