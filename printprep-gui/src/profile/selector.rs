//! The profile selector panel.
//!
//! Shows the active quality profile and, when expanded, a menu of all
//! profiles with a separator between the built-in and user-defined groups,
//! followed by the delegated profile actions. The panel is a stateless
//! renderer over the externally-owned catalog: it holds only view state (menu
//! open, cached separator position) and requests every change through its
//! message type.

use iced::widget::{button, column, container, mouse_area, row, rule, text};
use iced::{Alignment, Element, Length};

use printprep_shared::profiles::{ProfileCatalog, QualityProfile};

use crate::icons::Icon;
use crate::messages::ProfileSelectorMessage;
use crate::theme::Theme;

/// Profile selection panel component
#[derive(Debug, Clone, Default)]
pub struct ProfileSelector {
    /// Whether the profile menu is open
    expanded: bool,
    /// Cached separator position, valid for `seen_revision`
    separator_index: Option<usize>,
    /// Catalog revision the cache was computed from
    seen_revision: Option<u64>,
}

impl ProfileSelector {
    /// Create a collapsed selector with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the profile menu is open
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Open or close the profile menu
    pub fn toggle_dropdown(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Close the profile menu (after a selection or action)
    pub fn close_dropdown(&mut self) {
        self.expanded = false;
    }

    /// Refresh the cached separator position from the catalog.
    ///
    /// The position is computed once per catalog rebuild: a changed revision
    /// means the list was fully rebuilt, so the cache is recomputed rather
    /// than patched. Calling this with an unchanged revision is free.
    pub fn populate(&mut self, catalog: &ProfileCatalog) {
        if self.seen_revision == Some(catalog.revision()) {
            return;
        }
        self.separator_index = separator_index(catalog.profiles());
        self.seen_revision = Some(catalog.revision());
    }

    /// The cached separator position (entry index the separator precedes)
    pub fn separator_index(&self) -> Option<usize> {
        self.separator_index
    }

    /// Render the panel.
    ///
    /// Takes the live catalog, the active profile id and the customization
    /// flag; all three are owned elsewhere and only read here.
    pub fn view<'a>(
        &self,
        catalog: &'a ProfileCatalog,
        active_id: Option<&'a str>,
        has_customized: bool,
        theme: &Theme,
    ) -> Element<'a, ProfileSelectorMessage> {
        let label = active_label(catalog, active_id);
        let chevron = if self.expanded {
            Icon::ChevronUp
        } else {
            Icon::ChevronDown
        };

        let selector_button = button(
            row![
                text(label).size(14),
                chevron.svg_sized_colored(12.0, theme.colors.text_secondary),
            ]
            .spacing(6)
            .align_y(Alignment::Center),
        )
        .padding([4, 10])
        .style(button::secondary)
        .on_press(ProfileSelectorMessage::ToggleDropdown);

        let mut header = row![selector_button].spacing(8).align_y(Alignment::Center);

        // The indicator is only in the tree while the flag is set, so its
        // visibility tracks the externally computed value exactly.
        if has_customized {
            header = header.push(self.indicator(catalog, active_id, theme));
        }

        if !self.expanded {
            return header.into();
        }

        column![header, self.menu(catalog, active_id, theme)]
            .spacing(6)
            .into()
    }

    /// The customized-settings indicator with its tooltip signals.
    fn indicator<'a>(
        &self,
        catalog: &ProfileCatalog,
        active_id: Option<&str>,
        theme: &Theme,
    ) -> Element<'a, ProfileSelectorMessage> {
        let tooltip_text = customized_tooltip(&active_label(catalog, active_id));

        mouse_area(
            container(Icon::Pencil.svg_sized_colored(14.0, theme.colors.customized)).padding(4),
        )
        .on_press(ProfileSelectorMessage::IndicatorClicked)
        .on_enter(ProfileSelectorMessage::TooltipRequested { text: tooltip_text })
        .on_move(ProfileSelectorMessage::TooltipMoved)
        .on_exit(ProfileSelectorMessage::TooltipDismissed)
        .into()
    }

    /// The expanded profile menu: all entries, one group separator, then the
    /// delegated actions.
    fn menu<'a>(
        &self,
        catalog: &'a ProfileCatalog,
        active_id: Option<&'a str>,
        theme: &Theme,
    ) -> Element<'a, ProfileSelectorMessage> {
        let mut entries: Vec<Element<'a, ProfileSelectorMessage>> = Vec::new();

        for (index, profile) in catalog.profiles().iter().enumerate() {
            if self.separator_index == Some(index) {
                entries.push(rule::horizontal(1).into());
            }

            let is_active = active_id == Some(profile.id.as_str());
            entries.push(
                button(text(profile.name.as_str()).size(13))
                    .width(Length::Fill)
                    .padding([4, 10])
                    .style(if is_active {
                        button::primary
                    } else {
                        button::text
                    })
                    .on_press(ProfileSelectorMessage::ProfileSelected(profile.id.clone()))
                    .into(),
            );
        }

        entries.push(rule::horizontal(1).into());
        entries.push(action_entry(
            Icon::Plus,
            "Create profile from current settings...",
            ProfileSelectorMessage::AddProfile,
            theme,
        ));
        entries.push(action_entry(
            Icon::RefreshCw,
            "Update profile with current settings",
            ProfileSelectorMessage::UpdateProfile,
            theme,
        ));
        entries.push(action_entry(
            Icon::RotateCcw,
            "Discard current changes",
            ProfileSelectorMessage::ResetProfile,
            theme,
        ));
        entries.push(action_entry(
            Icon::Sliders,
            "Manage profiles...",
            ProfileSelectorMessage::ManageProfiles,
            theme,
        ));

        let border_color = theme.colors.border;
        let surface = theme.colors.surface;
        container(column(entries).spacing(2))
            .padding(6)
            .width(Length::Fixed(280.0))
            .style(move |_| iced::widget::container::Style {
                background: Some(iced::Background::Color(surface)),
                border: iced::Border {
                    radius: 6.0.into(),
                    width: 1.0,
                    color: border_color,
                },
                ..iced::widget::container::Style::default()
            })
            .into()
    }
}

/// A delegated action entry at the bottom of the menu
fn action_entry<'a>(
    icon: Icon,
    label: &'a str,
    message: ProfileSelectorMessage,
    theme: &Theme,
) -> Element<'a, ProfileSelectorMessage> {
    button(
        row![
            icon.svg_sized_colored(12.0, theme.colors.text_secondary),
            text(label).size(13),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding([4, 10])
    .style(button::text)
    .on_press(message)
    .into()
}

/// The label shown on the collapsed selector: the name of the profile whose
/// id equals the active id.
pub fn active_label(catalog: &ProfileCatalog, active_id: Option<&str>) -> String {
    active_id
        .and_then(|id| catalog.find_by_id(id))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "No profile".to_string())
}

/// Tooltip text for the customized indicator
fn customized_tooltip(active_name: &str) -> String {
    format!(
        "Some current settings differ from the values stored in {}. \
         Click to manage profiles.",
        active_name
    )
}

/// First index where the read-only flag changes across adjacent entries.
///
/// The separator is drawn before this entry. `None` for uniform or empty
/// lists; the catalog keeps built-ins first, so at most one boundary exists.
fn separator_index(profiles: &[QualityProfile]) -> Option<usize> {
    profiles
        .windows(2)
        .position(|pair| pair[0].read_only != pair[1].read_only)
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use printprep_shared::profiles::{BuiltinQuality, QualitySettings};

    fn user_profile(id: &str, name: &str) -> QualityProfile {
        QualityProfile {
            id: id.to_string(),
            name: name.to_string(),
            read_only: false,
            settings: QualitySettings::default(),
        }
    }

    fn mixed_catalog() -> ProfileCatalog {
        let mut profiles: Vec<QualityProfile> =
            BuiltinQuality::all().iter().map(|q| q.profile()).collect();
        profiles.push(user_profile("mine", "Mine"));
        profiles.push(user_profile("other", "Other"));

        let mut catalog = ProfileCatalog::new();
        catalog.replace(profiles);
        catalog
    }

    #[test]
    fn test_selector_starts_collapsed() {
        let selector = ProfileSelector::new();
        assert!(!selector.is_expanded());
        assert!(selector.separator_index().is_none());
    }

    #[test]
    fn test_toggle_dropdown() {
        let mut selector = ProfileSelector::new();
        selector.toggle_dropdown();
        assert!(selector.is_expanded());
        selector.toggle_dropdown();
        assert!(!selector.is_expanded());

        selector.toggle_dropdown();
        selector.close_dropdown();
        assert!(!selector.is_expanded());
    }

    #[test]
    fn test_separator_at_group_boundary() {
        let catalog = mixed_catalog();
        let mut selector = ProfileSelector::new();
        selector.populate(&catalog);

        // Separator sits before the first user profile.
        assert_eq!(
            selector.separator_index(),
            Some(BuiltinQuality::all().len())
        );
    }

    #[test]
    fn test_no_separator_for_uniform_lists() {
        let mut builtins_only = ProfileCatalog::new();
        builtins_only.replace(BuiltinQuality::all().iter().map(|q| q.profile()).collect());

        let mut users_only = ProfileCatalog::new();
        users_only.replace(vec![user_profile("a", "A"), user_profile("b", "B")]);

        let mut selector = ProfileSelector::new();
        selector.populate(&builtins_only);
        assert_eq!(selector.separator_index(), None);

        let mut selector = ProfileSelector::new();
        selector.populate(&users_only);
        assert_eq!(selector.separator_index(), None);
    }

    #[test]
    fn test_no_separator_for_empty_or_single() {
        assert_eq!(separator_index(&[]), None);
        assert_eq!(separator_index(&[user_profile("a", "A")]), None);
    }

    #[test]
    fn test_first_boundary_wins() {
        // A degenerate ordering with two boundaries; only the first counts.
        let profiles = vec![
            BuiltinQuality::Draft.profile(),
            user_profile("u1", "U1"),
            BuiltinQuality::Fine.profile(),
        ];
        assert_eq!(separator_index(&profiles), Some(1));
    }

    #[test]
    fn test_cache_recomputes_only_on_revision_change() {
        let mut catalog = mixed_catalog();
        let mut selector = ProfileSelector::new();
        selector.populate(&catalog);
        let cached = selector.separator_index();

        // Same revision: populate is a no-op even when called repeatedly.
        selector.populate(&catalog);
        assert_eq!(selector.separator_index(), cached);

        // Rebuild without user profiles: the revision moves and the cache
        // follows.
        catalog.replace(BuiltinQuality::all().iter().map(|q| q.profile()).collect());
        selector.populate(&catalog);
        assert_eq!(selector.separator_index(), None);
    }

    #[test]
    fn test_active_label_matches_active_id() {
        let catalog = mixed_catalog();

        assert_eq!(active_label(&catalog, Some("mine")), "Mine");
        assert_eq!(active_label(&catalog, Some("standard")), "Standard");
        assert_eq!(active_label(&catalog, Some("missing")), "No profile");
        assert_eq!(active_label(&catalog, None), "No profile");
    }

    #[test]
    fn test_customized_tooltip_names_active_profile() {
        let text = customized_tooltip("Fine");
        assert!(text.contains("Fine"));
    }
}
