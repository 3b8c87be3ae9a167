//! Application message hierarchy.
//!
//! The profile selector and the manage dialog have their own message types;
//! the app routes them to the model layer. The panel messages are the "action
//! set" the selector is constructed against - it never reaches into the model
//! itself.

use tokio::sync::mpsc;

use printprep_shared::events::ModelEvent;

/// Top-level application messages
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A message from the profile selector panel
    ProfilePanel(ProfileSelectorMessage),
    /// A message from the manage-profiles dialog
    ManageDialog(ManageDialogMessage),
    /// A change notification from the model layer
    Model(ModelEvent),
    /// The model event bridge handed over its sender (channel handshake)
    ModelChannelReady(mpsc::UnboundedSender<ModelEvent>),
    /// Periodic printer port scan tick
    PollPrinters,
    /// Switch between light and dark mode
    ToggleThemeMode,
}

/// Messages emitted by the profile selector panel.
///
/// The four delegated actions (add, update, reset, manage) carry no payload;
/// their behavior is implemented entirely by the container routing them to
/// the profile store.
#[derive(Debug, Clone)]
pub enum ProfileSelectorMessage {
    /// Open or close the profile menu
    ToggleDropdown,
    /// A menu entry was chosen; activate the profile with this id
    ProfileSelected(String),
    /// Create a profile from the current settings
    AddProfile,
    /// Update the active profile with the current settings
    UpdateProfile,
    /// Discard the current setting changes
    ResetProfile,
    /// Open the manage-profiles view
    ManageProfiles,
    /// The customized indicator was clicked
    IndicatorClicked,
    /// Show-tooltip signal: the pointer entered the indicator
    TooltipRequested { text: String },
    /// The pointer moved over the indicator (tooltip anchor position)
    TooltipMoved(iced::Point),
    /// Hide-tooltip signal: the pointer left the indicator
    TooltipDismissed,
}

/// Messages emitted by the manage-profiles dialog
#[derive(Debug, Clone)]
pub enum ManageDialogMessage {
    /// Close the dialog
    Close,
    /// Select a profile row (starts a rename draft for user profiles)
    Select(String),
    /// The rename text input changed
    NameDraftChanged(String),
    /// Commit the rename draft
    ConfirmRename,
    /// Activate the profile with this id
    Activate(String),
    /// Create an editable copy of the profile with this id
    Duplicate(String),
    /// Delete the user profile with this id
    Delete(String),
}
