//! Main application state and message handling for the printprep GUI.
//!
//! Follows the Elm architecture used by iced: all state lives here, every
//! change goes through [`PrintPrep::update`], and the view is re-evaluated
//! from current state after each message. The profile store and the device
//! manager are the externally-owned model the panels render; panels request
//! changes through their message types and never touch the model directly.

use iced::{Element, Subscription, Task};
use tracing::{debug, info, warn};

use printprep_model::{
    ModelEvent, OutputDeviceManager, ProfileStorage, ProfileStore, SerialPortProbe, POLL_INTERVAL,
};

use crate::messages::{AppMessage, ManageDialogMessage, ProfileSelectorMessage};
use crate::model_bridge::{self, BridgeEvent};
use crate::profile::{ManageDialog, ProfileSelector};
use crate::settings::GuiSettings;
use crate::theme::{Theme, ThemeMode};
use crate::ui_state::UiStateManager;
use crate::view::render_main_view;

/// Main application state.
///
/// # Message flow
///
/// ```text
/// Panel messages ─► update ─► ProfileStore ─► ModelEvent channel
///       ▲                                          │
///       └────────── re-render ◄── subscription ◄───┘
/// ```
pub struct PrintPrep {
    /// The profile-management subsystem (externally owned model)
    store: ProfileStore,
    /// Profile file loading and saving
    storage: ProfileStorage,
    /// Tracked printer output devices
    devices: OutputDeviceManager,
    /// Port probe the device manager polls
    probe: SerialPortProbe,
    /// The profile selector panel
    selector: ProfileSelector,
    /// The manage-profiles dialog
    manage_dialog: ManageDialog,
    /// Transient UI state (tooltip, panel visibility)
    ui_state: UiStateManager,
    /// Persistent GUI settings
    settings: GuiSettings,
    /// Active color theme
    theme: Theme,
}

impl PrintPrep {
    /// Creates the application with default storage and saved settings.
    pub fn new() -> (Self, Task<AppMessage>) {
        Self::with_config(ProfileStorage::new(), GuiSettings::load())
    }

    /// Creates the application with explicit storage and settings.
    pub fn with_config(storage: ProfileStorage, settings: GuiSettings) -> (Self, Task<AppMessage>) {
        let mut store = ProfileStore::new();
        let (profiles, load_errors) = storage.load_all_with_errors();
        for load_error in &load_errors {
            warn!("{}", load_error);
        }
        store.load_user_profiles(profiles);

        let mut selector = ProfileSelector::new();
        selector.populate(store.catalog());

        let theme = match ThemeMode::from(settings.theme_mode) {
            ThemeMode::Light => Theme::light(),
            ThemeMode::Dark => Theme::dark(),
        };
        let ui_state = UiStateManager::new(settings.show_printer_panel);

        let app = Self {
            store,
            storage,
            devices: OutputDeviceManager::new(),
            probe: SerialPortProbe::default(),
            selector,
            manage_dialog: ManageDialog::new(),
            ui_state,
            settings,
            theme,
        };

        (app, Task::none())
    }

    /// Updates application state in response to messages.
    pub fn update(&mut self, message: AppMessage) -> Task<AppMessage> {
        match message {
            AppMessage::ProfilePanel(panel_message) => {
                self.handle_panel_message(panel_message);
            }

            AppMessage::ManageDialog(dialog_message) => {
                self.handle_dialog_message(dialog_message);
            }

            AppMessage::Model(event) => self.handle_model_event(event),

            AppMessage::ModelChannelReady(sender) => {
                self.store.attach_notifier(sender);
            }

            AppMessage::PollPrinters => {
                for event in self.devices.poll(&self.probe) {
                    debug!("device event: {:?}", event);
                }
            }

            AppMessage::ToggleThemeMode => {
                self.apply_theme_toggle();
                if let Err(e) = self.settings.save() {
                    warn!("Failed to save settings: {}", e);
                }
            }
        }

        Task::none()
    }

    /// Routes profile panel messages to the store and the UI state.
    fn handle_panel_message(&mut self, message: ProfileSelectorMessage) {
        match message {
            ProfileSelectorMessage::ToggleDropdown => {
                self.selector.toggle_dropdown();
            }
            ProfileSelectorMessage::ProfileSelected(id) => {
                self.selector.close_dropdown();
                if let Err(e) = self.store.activate_profile(&id) {
                    warn!("Failed to activate profile '{}': {}", id, e);
                }
            }
            ProfileSelectorMessage::AddProfile => {
                self.selector.close_dropdown();
                let base = self
                    .store
                    .active_profile()
                    .map(|p| format!("{} (custom)", p.name))
                    .unwrap_or_else(|| "Custom profile".to_string());
                let name = self.store.unique_profile_name(&base);
                match self.store.add_profile_from_current(&name) {
                    Ok(id) => {
                        info!("Created profile '{}' ({})", name, id);
                        self.persist_user_profiles();
                    }
                    Err(e) => warn!("Failed to create profile: {}", e),
                }
            }
            ProfileSelectorMessage::UpdateProfile => {
                self.selector.close_dropdown();
                match self.store.update_active_profile() {
                    Ok(()) => self.persist_user_profiles(),
                    Err(e) => warn!("Failed to update profile: {}", e),
                }
            }
            ProfileSelectorMessage::ResetProfile => {
                self.selector.close_dropdown();
                self.store.reset_active_profile();
            }
            ProfileSelectorMessage::ManageProfiles => {
                self.selector.close_dropdown();
                self.manage_dialog.open();
            }
            ProfileSelectorMessage::IndicatorClicked => {
                // The indicator delegates to the manage-profiles action.
                self.manage_dialog.open();
            }
            ProfileSelectorMessage::TooltipRequested { text } => {
                self.ui_state.show_tooltip(text);
            }
            ProfileSelectorMessage::TooltipMoved(position) => {
                self.ui_state.move_tooltip(position);
            }
            ProfileSelectorMessage::TooltipDismissed => {
                self.ui_state.hide_tooltip();
            }
        }

        // Catch up with any rebuild the operation caused; no-op while the
        // catalog revision is unchanged.
        self.selector.populate(self.store.catalog());
    }

    /// Routes manage dialog messages to the store.
    fn handle_dialog_message(&mut self, message: ManageDialogMessage) {
        match message {
            ManageDialogMessage::Close => self.manage_dialog.close(),
            ManageDialogMessage::Select(id) => {
                let current_name = self
                    .store
                    .catalog()
                    .find_by_id(&id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                self.manage_dialog.select(id, &current_name);
            }
            ManageDialogMessage::NameDraftChanged(draft) => {
                self.manage_dialog.set_name_draft(draft);
            }
            ManageDialogMessage::ConfirmRename => {
                if let Some((id, name)) = self.manage_dialog.take_rename() {
                    match self.store.rename_profile(&id, &name) {
                        Ok(()) => self.persist_user_profiles(),
                        Err(e) => warn!("Failed to rename profile '{}': {}", id, e),
                    }
                }
            }
            ManageDialogMessage::Activate(id) => {
                if let Err(e) = self.store.activate_profile(&id) {
                    warn!("Failed to activate profile '{}': {}", id, e);
                }
            }
            ManageDialogMessage::Duplicate(id) => match self.store.duplicate_profile(&id) {
                Ok(new_id) => {
                    info!("Duplicated profile '{}' as '{}'", id, new_id);
                    self.persist_user_profiles();
                }
                Err(e) => warn!("Failed to duplicate profile '{}': {}", id, e),
            },
            ManageDialogMessage::Delete(id) => match self.store.remove_profile(&id) {
                Ok(()) => self.persist_user_profiles(),
                Err(e) => warn!("Failed to delete profile '{}': {}", id, e),
            },
        }

        self.selector.populate(self.store.catalog());
    }

    /// Reacts to model change notifications.
    fn handle_model_event(&mut self, event: ModelEvent) {
        match event {
            ModelEvent::ProfilesChanged { revision } => {
                debug!("profile list rebuilt (revision {})", revision);
                self.selector.populate(self.store.catalog());
            }
            ModelEvent::ActiveProfileChanged { profile_id } => {
                debug!("active profile is now '{}'", profile_id);
            }
            ModelEvent::CustomizedChanged { customized } => {
                debug!("customized flag: {}", customized);
                // The indicator vanishes with the flag; drop a tooltip that
                // was anchored to it.
                if !customized {
                    self.ui_state.hide_tooltip();
                }
            }
        }
    }

    /// Flip the theme and mirror it into the persistent settings.
    fn apply_theme_toggle(&mut self) {
        self.theme = self.theme.toggle();
        self.settings.theme_mode = self.theme.mode.into();
    }

    /// Write the user profile set to disk, if storage allows saving.
    fn persist_user_profiles(&self) {
        if !self.storage.can_save() {
            debug!("no user profile directory configured, skipping save");
            return;
        }
        if let Err(e) = self.storage.save_user_profiles(&self.store.user_profiles()) {
            warn!("Failed to save user profiles: {}", e);
        }
    }

    /// Renders the application view.
    pub fn view(&self) -> Element<'_, AppMessage> {
        render_main_view(
            &self.store,
            &self.devices,
            &self.selector,
            &self.manage_dialog,
            &self.ui_state,
            &self.theme,
        )
    }

    /// Sets up subscriptions: the model event bridge and the printer poll.
    pub fn subscription(&self) -> Subscription<AppMessage> {
        Subscription::batch(vec![
            model_bridge::subscription().map(|event| match event {
                BridgeEvent::ChannelReady(sender) => AppMessage::ModelChannelReady(sender),
                BridgeEvent::Model(model_event) => AppMessage::Model(model_event),
            }),
            iced::time::every(POLL_INTERVAL).map(|_| AppMessage::PollPrinters),
        ])
    }
}

impl Default for PrintPrep {
    fn default() -> Self {
        let (app, _) = Self::new();
        app
    }
}
