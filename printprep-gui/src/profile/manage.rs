//! The manage-profiles dialog.
//!
//! Opened from the profile menu or by clicking the customized indicator.
//! Lists every profile with its group and offers activate, duplicate, rename
//! and delete. Rename edits go through a draft that is only committed on
//! confirmation; built-in profiles expose no rename or delete controls.

use iced::widget::{button, column, container, row, scrollable, space, text, text_input};
use iced::{Alignment, Element, Length};

use printprep_shared::profiles::ProfileCatalog;

use crate::icons::Icon;
use crate::messages::ManageDialogMessage;
use crate::theme::Theme;

/// Manage-profiles dialog state
#[derive(Debug, Clone, Default)]
pub struct ManageDialog {
    /// Whether the dialog is visible
    visible: bool,
    /// Profile selected for renaming
    selected_id: Option<String>,
    /// Uncommitted rename text
    name_draft: String,
}

impl ManageDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Open the dialog with no row selected
    pub fn open(&mut self) {
        self.visible = true;
        self.selected_id = None;
        self.name_draft.clear();
    }

    /// Close the dialog and drop any rename draft
    pub fn close(&mut self) {
        self.visible = false;
        self.selected_id = None;
        self.name_draft.clear();
    }

    /// Select a row and start a rename draft from its current name
    pub fn select(&mut self, id: String, current_name: &str) {
        self.selected_id = Some(id);
        self.name_draft = current_name.to_string();
    }

    /// The selected row, if any
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Update the rename draft text
    pub fn set_name_draft(&mut self, draft: String) {
        self.name_draft = draft;
    }

    /// Take the committed rename, clearing the selection.
    ///
    /// Returns `None` when nothing is selected or the draft is blank.
    pub fn take_rename(&mut self) -> Option<(String, String)> {
        let id = self.selected_id.take()?;
        let name = std::mem::take(&mut self.name_draft);
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some((id, name.to_string()))
    }

    /// Render the dialog card (the caller stacks it over the main view)
    pub fn view<'a>(
        &'a self,
        catalog: &'a ProfileCatalog,
        active_id: Option<&'a str>,
        theme: &Theme,
    ) -> Element<'a, ManageDialogMessage> {
        let header = row![
            text("Manage profiles").size(16),
            space().width(Length::Fill),
            button(Icon::X.svg_sized_colored(14.0, theme.colors.text_secondary))
                .padding(4)
                .style(button::text)
                .on_press(ManageDialogMessage::Close),
        ]
        .align_y(Alignment::Center);

        let mut rows: Vec<Element<'a, ManageDialogMessage>> = Vec::new();
        for profile in catalog.profiles() {
            rows.push(self.profile_row(
                &profile.id,
                &profile.name,
                profile.read_only,
                active_id == Some(profile.id.as_str()),
                theme,
            ));
        }

        let list = scrollable(column(rows).spacing(4)).height(Length::Fixed(320.0));

        let surface = theme.colors.surface;
        let border_color = theme.colors.border;
        let card = container(column![header, list].spacing(12))
            .padding(16)
            .width(Length::Fixed(460.0))
            .style(move |_| iced::widget::container::Style {
                background: Some(iced::Background::Color(surface)),
                border: iced::Border {
                    radius: 8.0.into(),
                    width: 1.0,
                    color: border_color,
                },
                ..iced::widget::container::Style::default()
            });

        // Dim the main view behind the card.
        container(card)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Alignment::Center)
            .align_y(Alignment::Center)
            .style(|_| iced::widget::container::Style {
                background: Some(iced::Background::Color(iced::Color::from_rgba(
                    0.0, 0.0, 0.0, 0.4,
                ))),
                ..iced::widget::container::Style::default()
            })
            .into()
    }

    fn profile_row<'a>(
        &'a self,
        id: &'a str,
        name: &'a str,
        read_only: bool,
        is_active: bool,
        theme: &Theme,
    ) -> Element<'a, ManageDialogMessage> {
        let renaming = self.selected_id.as_deref() == Some(id) && !read_only;

        let name_cell: Element<'a, ManageDialogMessage> = if renaming {
            row![
                text_input("Profile name", &self.name_draft)
                    .size(13)
                    .on_input(ManageDialogMessage::NameDraftChanged)
                    .on_submit(ManageDialogMessage::ConfirmRename),
                button(Icon::Check.svg_sized_colored(13.0, theme.colors.success))
                    .padding(4)
                    .style(button::text)
                    .on_press(ManageDialogMessage::ConfirmRename),
            ]
            .spacing(4)
            .align_y(Alignment::Center)
            .into()
        } else {
            text(name).size(13).into()
        };

        let group_color = theme.colors.text_muted;
        let group_tag = text(if read_only { "built-in" } else { "custom" })
            .size(11)
            .style(move |_| iced::widget::text::Style {
                color: Some(group_color),
            });

        let mut controls = row![].spacing(4).align_y(Alignment::Center);
        if !is_active {
            controls = controls.push(
                button(text("Activate").size(12))
                    .padding([2, 8])
                    .style(button::secondary)
                    .on_press(ManageDialogMessage::Activate(id.to_string())),
            );
        }
        controls = controls.push(
            button(Icon::Copy.svg_sized_colored(13.0, theme.colors.text_secondary))
                .padding(4)
                .style(button::text)
                .on_press(ManageDialogMessage::Duplicate(id.to_string())),
        );
        if !read_only {
            controls = controls.push(
                button(Icon::Pencil.svg_sized_colored(13.0, theme.colors.text_secondary))
                    .padding(4)
                    .style(button::text)
                    .on_press(ManageDialogMessage::Select(id.to_string())),
            );
            controls = controls.push(
                button(Icon::Trash.svg_sized_colored(13.0, theme.colors.error))
                    .padding(4)
                    .style(button::text)
                    .on_press(ManageDialogMessage::Delete(id.to_string())),
            );
        }

        let accent = theme.colors.accent;
        let mut entry = row![name_cell, group_tag].spacing(8).align_y(Alignment::Center);
        if is_active {
            entry = entry.push(text("active").size(11).style(move |_| {
                iced::widget::text::Style {
                    color: Some(accent),
                }
            }));
        }

        row![entry, space().width(Length::Fill), controls]
            .spacing(8)
            .align_y(Alignment::Center)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_starts_hidden() {
        let dialog = ManageDialog::new();
        assert!(!dialog.is_visible());
    }

    #[test]
    fn test_open_close() {
        let mut dialog = ManageDialog::new();
        dialog.open();
        assert!(dialog.is_visible());
        dialog.close();
        assert!(!dialog.is_visible());
    }

    #[test]
    fn test_select_starts_draft_from_current_name() {
        let mut dialog = ManageDialog::new();
        dialog.open();
        dialog.select("mine".to_string(), "Mine");
        assert_eq!(dialog.selected_id(), Some("mine"));
        assert_eq!(dialog.name_draft, "Mine");
    }

    #[test]
    fn test_take_rename_commits_trimmed_draft() {
        let mut dialog = ManageDialog::new();
        dialog.open();
        dialog.select("mine".to_string(), "Mine");
        dialog.set_name_draft("  Renamed  ".to_string());

        let rename = dialog.take_rename();
        assert_eq!(rename, Some(("mine".to_string(), "Renamed".to_string())));
        // Committing clears the selection.
        assert!(dialog.selected_id().is_none());
    }

    #[test]
    fn test_take_rename_rejects_blank_draft() {
        let mut dialog = ManageDialog::new();
        dialog.open();
        dialog.select("mine".to_string(), "Mine");
        dialog.set_name_draft("   ".to_string());
        assert!(dialog.take_rename().is_none());
    }

    #[test]
    fn test_take_rename_without_selection() {
        let mut dialog = ManageDialog::new();
        assert!(dialog.take_rename().is_none());
    }

    #[test]
    fn test_reopen_clears_stale_draft() {
        let mut dialog = ManageDialog::new();
        dialog.open();
        dialog.select("mine".to_string(), "Mine");
        dialog.close();
        dialog.open();
        assert!(dialog.selected_id().is_none());
        assert!(dialog.name_draft.is_empty());
    }
}
