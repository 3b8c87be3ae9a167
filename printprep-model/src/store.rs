//! The profile store.
//!
//! Owns the quality profile catalog, the active profile reference and the
//! per-setting overrides of the current job configuration. All mutation goes
//! through the operations here; the store enforces that at most one profile
//! is active at any time and notifies observers through an attached event
//! channel.

use std::collections::BTreeMap;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use printprep_shared::errors::{ProfileError, ProfileResult};
use printprep_shared::events::ModelEvent;
use printprep_shared::profiles::{
    BuiltinQuality, ProfileCatalog, QualityProfile, QualitySettings,
};

/// Profile management subsystem.
///
/// The catalog keeps built-in profiles first, then user profiles sorted by
/// name. Every structural change rebuilds the catalog and bumps its revision;
/// nothing is patched in place.
pub struct ProfileStore {
    catalog: ProfileCatalog,
    active_id: Option<String>,
    overrides: BTreeMap<String, String>,
    notifier: Option<mpsc::UnboundedSender<ModelEvent>>,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore {
    /// Create a store with the built-in profiles and the standard quality
    /// active.
    pub fn new() -> Self {
        let mut store = Self {
            catalog: ProfileCatalog::new(),
            active_id: None,
            overrides: BTreeMap::new(),
            notifier: None,
        };
        store.rebuild(Vec::new());
        store.active_id = Some(BuiltinQuality::default().id().to_string());
        store
    }

    /// Attach the channel model events are sent through.
    ///
    /// Replaces any previously attached notifier; events emitted while no
    /// notifier is attached are dropped.
    pub fn attach_notifier(&mut self, sender: mpsc::UnboundedSender<ModelEvent>) {
        debug!("model event notifier attached");
        self.notifier = Some(sender);
    }

    /// Merge user profiles loaded from storage into the catalog.
    ///
    /// Profiles whose id collides with a built-in or an earlier entry are
    /// skipped with a warning. The active profile is kept if it survives the
    /// merge, otherwise the standard built-in becomes active.
    pub fn load_user_profiles(&mut self, profiles: Vec<QualityProfile>) {
        let builtin_ids: Vec<&str> = BuiltinQuality::all().iter().map(|q| q.id()).collect();
        let mut user: Vec<QualityProfile> = Vec::new();

        for mut profile in profiles {
            if builtin_ids.contains(&profile.id.as_str()) {
                warn!(
                    "user profile '{}' shadows built-in id '{}', skipping",
                    profile.name, profile.id
                );
                continue;
            }
            if user.iter().any(|p| p.id == profile.id) {
                warn!("duplicate user profile id '{}', skipping", profile.id);
                continue;
            }
            // Nothing loaded from disk is ever read-only.
            profile.read_only = false;
            user.push(profile);
        }

        self.rebuild(user);

        let active_survives = self
            .active_id
            .as_deref()
            .map(|id| self.catalog.find_by_id(id).is_some())
            .unwrap_or(false);
        if !active_survives {
            self.set_active(BuiltinQuality::default().id().to_string());
        }
    }

    /// The catalog the GUI renders
    pub fn catalog(&self) -> &ProfileCatalog {
        &self.catalog
    }

    /// Identifier of the active profile
    pub fn active_profile_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// The active profile record, if the reference resolves
    pub fn active_profile(&self) -> Option<&QualityProfile> {
        self.active_id
            .as_deref()
            .and_then(|id| self.catalog.find_by_id(id))
    }

    /// Whether the current configuration diverges from the active profile's
    /// stored settings
    pub fn has_customized_values(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// The pending per-setting overrides
    pub fn overrides(&self) -> &BTreeMap<String, String> {
        &self.overrides
    }

    /// The user-defined profiles currently in the catalog
    pub fn user_profiles(&self) -> Vec<&QualityProfile> {
        self.catalog
            .profiles()
            .iter()
            .filter(|p| !p.read_only)
            .collect()
    }

    /// The active profile's settings with pending overrides applied
    pub fn effective_settings(&self) -> Option<QualitySettings> {
        let mut settings = self.active_profile()?.settings.clone();
        apply_overrides(&mut settings, &self.overrides);
        Some(settings)
    }

    /// Make the profile with the given id the active one.
    ///
    /// Pending overrides survive a profile switch; they describe the job
    /// configuration, not the profile. Activating the already-active profile
    /// is a no-op and emits nothing.
    pub fn activate_profile(&mut self, id: &str) -> ProfileResult<()> {
        if self.catalog.find_by_id(id).is_none() {
            return Err(ProfileError::NotFound { id: id.to_string() });
        }
        if self.active_id.as_deref() == Some(id) {
            return Ok(());
        }
        self.set_active(id.to_string());
        Ok(())
    }

    /// Override a single setting of the current configuration.
    ///
    /// Setting a value identical to the active profile's stored value removes
    /// the override instead of recording a no-op divergence.
    pub fn set_override(&mut self, key: &str, value: &str) -> ProfileResult<()> {
        // Validate key and value before touching state.
        QualitySettings::default().set(key, value)?;

        let stored = self.active_profile().and_then(|p| p.settings.get(key));
        let was_customized = self.has_customized_values();

        if stored.as_deref() == Some(value) {
            self.overrides.remove(key);
        } else {
            self.overrides.insert(key.to_string(), value.to_string());
        }

        self.emit_customized_transition(was_customized);
        Ok(())
    }

    /// Remove a single pending override, if present
    pub fn clear_override(&mut self, key: &str) {
        let was_customized = self.has_customized_values();
        self.overrides.remove(key);
        self.emit_customized_transition(was_customized);
    }

    /// Discard all pending overrides, returning the configuration to the
    /// active profile's stored settings
    pub fn reset_active_profile(&mut self) {
        let was_customized = self.has_customized_values();
        self.overrides.clear();
        self.emit_customized_transition(was_customized);
    }

    /// Create a user profile from the current configuration (active settings
    /// plus overrides), clear the overrides and activate the new profile.
    ///
    /// Returns the new profile's id. The id is derived from the name; use
    /// [`ProfileStore::unique_profile_name`] to avoid collisions.
    pub fn add_profile_from_current(&mut self, name: &str) -> ProfileResult<String> {
        let active = self
            .active_profile()
            .ok_or(ProfileError::NoActiveProfile)?;

        let id = slugify(name);
        if self.catalog.find_by_id(&id).is_some() {
            return Err(ProfileError::DuplicateId { id });
        }

        let mut settings = active.settings.clone();
        apply_overrides(&mut settings, &self.overrides);

        let profile = QualityProfile {
            id: id.clone(),
            name: name.to_string(),
            read_only: false,
            settings,
        };

        let mut user = self.user_profiles_owned();
        user.push(profile);
        self.rebuild(user);

        let was_customized = self.has_customized_values();
        self.overrides.clear();
        self.emit_customized_transition(was_customized);

        self.set_active(id.clone());
        Ok(id)
    }

    /// Fold the pending overrides into the active profile's stored settings.
    ///
    /// Errors if the active profile is read-only; built-in profiles are never
    /// modified.
    pub fn update_active_profile(&mut self) -> ProfileResult<()> {
        let active = self
            .active_profile()
            .ok_or(ProfileError::NoActiveProfile)?;
        if active.read_only {
            return Err(ProfileError::ReadOnly {
                name: active.name.clone(),
            });
        }

        let active_id = active.id.clone();
        let mut user = self.user_profiles_owned();
        if let Some(profile) = user.iter_mut().find(|p| p.id == active_id) {
            apply_overrides(&mut profile.settings, &self.overrides);
        }
        self.rebuild(user);

        let was_customized = self.has_customized_values();
        self.overrides.clear();
        self.emit_customized_transition(was_customized);
        Ok(())
    }

    /// Create an editable copy of any profile (built-in or user) and return
    /// the new profile's id. The copy is not activated.
    pub fn duplicate_profile(&mut self, id: &str) -> ProfileResult<String> {
        let source = self
            .catalog
            .find_by_id(id)
            .ok_or_else(|| ProfileError::NotFound { id: id.to_string() })?
            .clone();

        let name = self.unique_profile_name(&format!("{} copy", source.name));
        let new_id = slugify(&name);

        let profile = QualityProfile {
            id: new_id.clone(),
            name,
            read_only: false,
            settings: source.settings,
        };

        let mut user = self.user_profiles_owned();
        user.push(profile);
        self.rebuild(user);
        Ok(new_id)
    }

    /// Rename a user profile. The id stays stable; only the display name and
    /// the catalog ordering change.
    pub fn rename_profile(&mut self, id: &str, new_name: &str) -> ProfileResult<()> {
        let profile = self
            .catalog
            .find_by_id(id)
            .ok_or_else(|| ProfileError::NotFound { id: id.to_string() })?;
        if profile.read_only {
            return Err(ProfileError::ReadOnly {
                name: profile.name.clone(),
            });
        }

        let mut user = self.user_profiles_owned();
        if let Some(profile) = user.iter_mut().find(|p| p.id == id) {
            profile.name = new_name.to_string();
        }
        self.rebuild(user);
        Ok(())
    }

    /// Remove a user profile. If the removed profile was active, the standard
    /// built-in becomes active.
    pub fn remove_profile(&mut self, id: &str) -> ProfileResult<()> {
        let profile = self
            .catalog
            .find_by_id(id)
            .ok_or_else(|| ProfileError::NotFound { id: id.to_string() })?;
        if profile.read_only {
            return Err(ProfileError::ReadOnly {
                name: profile.name.clone(),
            });
        }

        let user = self
            .user_profiles_owned()
            .into_iter()
            .filter(|p| p.id != id)
            .collect();
        self.rebuild(user);

        if self.active_id.as_deref() == Some(id) {
            self.set_active(BuiltinQuality::default().id().to_string());
        }
        Ok(())
    }

    /// Derive a display name not yet taken by any profile, appending a
    /// counter when needed ("Standard (custom)", "Standard (custom) 2", ...)
    pub fn unique_profile_name(&self, base: &str) -> String {
        let taken = |name: &str| {
            self.catalog
                .profiles()
                .iter()
                .any(|p| p.name == name || p.id == slugify(name))
        };

        if !taken(base) {
            return base.to_string();
        }
        let mut counter = 2;
        loop {
            let candidate = format!("{} {}", base, counter);
            if !taken(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    fn user_profiles_owned(&self) -> Vec<QualityProfile> {
        self.catalog
            .profiles()
            .iter()
            .filter(|p| !p.read_only)
            .cloned()
            .collect()
    }

    /// Rebuild the catalog: built-ins in fixed order, then the given user
    /// profiles sorted by name.
    fn rebuild(&mut self, mut user: Vec<QualityProfile>) {
        user.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let mut profiles: Vec<QualityProfile> =
            BuiltinQuality::all().iter().map(|q| q.profile()).collect();
        profiles.extend(user);

        self.catalog.replace(profiles);
        self.notify(ModelEvent::ProfilesChanged {
            revision: self.catalog.revision(),
        });
    }

    fn set_active(&mut self, id: String) {
        self.active_id = Some(id.clone());
        self.notify(ModelEvent::ActiveProfileChanged { profile_id: id });
    }

    fn emit_customized_transition(&self, was_customized: bool) {
        let customized = self.has_customized_values();
        if customized != was_customized {
            self.notify(ModelEvent::CustomizedChanged { customized });
        }
    }

    fn notify(&self, event: ModelEvent) {
        if let Some(sender) = &self.notifier {
            if sender.send(event).is_err() {
                debug!("model event dropped, notifier channel closed");
            }
        }
    }
}

/// Apply overrides onto settings, ignoring entries that no longer parse.
/// Overrides are validated when they are set, so failures here only happen
/// for stale keys and are logged rather than propagated.
fn apply_overrides(settings: &mut QualitySettings, overrides: &BTreeMap<String, String>) {
    for (key, value) in overrides {
        if let Err(e) = settings.set(key, value) {
            warn!("skipping stale override '{}': {}", key, e);
        }
    }
}

/// Derive a catalog id from a display name: lowercase, alphanumeric runs
/// joined by single dashes.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "profile".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printprep_shared::profiles::AdhesionType;

    fn drain(receiver: &mut mpsc::UnboundedReceiver<ModelEvent>) -> Vec<ModelEvent> {
        let mut events = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
        events
    }

    fn store_with_events() -> (ProfileStore, mpsc::UnboundedReceiver<ModelEvent>) {
        let mut store = ProfileStore::new();
        let (tx, rx) = mpsc::unbounded_channel();
        store.attach_notifier(tx);
        (store, rx)
    }

    #[test]
    fn test_new_store_defaults() {
        let store = ProfileStore::new();
        assert_eq!(store.active_profile_id(), Some("standard"));
        assert_eq!(store.catalog().len(), BuiltinQuality::all().len());
        assert!(!store.has_customized_values());
    }

    #[test]
    fn test_at_most_one_active_profile() {
        let mut store = ProfileStore::new();
        store.activate_profile("fine").unwrap();
        store.activate_profile("draft").unwrap();
        // The reference is a single id; activating a second profile replaces it.
        assert_eq!(store.active_profile_id(), Some("draft"));
    }

    #[test]
    fn test_activate_unknown_profile_changes_nothing() {
        let (mut store, mut rx) = store_with_events();
        let err = store.activate_profile("missing").unwrap_err();
        assert!(matches!(err, ProfileError::NotFound { .. }));
        assert_eq!(store.active_profile_id(), Some("standard"));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_activate_emits_single_event() {
        let (mut store, mut rx) = store_with_events();
        store.activate_profile("fine").unwrap();

        let events = drain(&mut rx);
        assert_eq!(
            events,
            vec![ModelEvent::ActiveProfileChanged {
                profile_id: "fine".to_string()
            }]
        );

        // Re-activating the active profile is silent.
        store.activate_profile("fine").unwrap();
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_override_sets_customized_flag() {
        let (mut store, mut rx) = store_with_events();

        store.set_override("layer_height", "0.15").unwrap();
        assert!(store.has_customized_values());
        assert_eq!(
            drain(&mut rx),
            vec![ModelEvent::CustomizedChanged { customized: true }]
        );

        // A second override does not flip the flag again.
        store.set_override("print_speed", "45").unwrap();
        assert!(drain(&mut rx).is_empty());

        store.reset_active_profile();
        assert!(!store.has_customized_values());
        assert_eq!(
            drain(&mut rx),
            vec![ModelEvent::CustomizedChanged { customized: false }]
        );
    }

    #[test]
    fn test_override_matching_stored_value_is_removed() {
        let mut store = ProfileStore::new();
        let stored = store
            .active_profile()
            .unwrap()
            .settings
            .get("layer_height")
            .unwrap();

        store.set_override("layer_height", "0.15").unwrap();
        assert!(store.has_customized_values());

        store.set_override("layer_height", &stored).unwrap();
        assert!(!store.has_customized_values());
    }

    #[test]
    fn test_override_invalid_key_rejected() {
        let mut store = ProfileStore::new();
        assert!(store.set_override("nozzle", "0.4").is_err());
        assert!(store.set_override("layer_height", "thick").is_err());
        assert!(!store.has_customized_values());
    }

    #[test]
    fn test_overrides_survive_activation() {
        let mut store = ProfileStore::new();
        store.set_override("layer_height", "0.15").unwrap();
        store.activate_profile("fine").unwrap();
        assert!(store.has_customized_values());
        assert_eq!(
            store.effective_settings().unwrap().layer_height_mm,
            0.15
        );
    }

    #[test]
    fn test_add_profile_from_current() {
        let mut store = ProfileStore::new();
        store.set_override("layer_height", "0.15").unwrap();
        store.set_override("support_enabled", "true").unwrap();

        let id = store.add_profile_from_current("My Profile").unwrap();
        assert_eq!(id, "my-profile");

        // Overrides are folded into the new profile and cleared.
        let profile = store.catalog().find_by_id(&id).unwrap();
        assert!(!profile.read_only);
        assert_eq!(profile.settings.layer_height_mm, 0.15);
        assert!(profile.settings.support_enabled);
        assert!(!store.has_customized_values());

        // The new profile becomes active.
        assert_eq!(store.active_profile_id(), Some("my-profile"));
    }

    #[test]
    fn test_add_profile_duplicate_id() {
        let mut store = ProfileStore::new();
        store.add_profile_from_current("Custom").unwrap();
        let err = store.add_profile_from_current("Custom").unwrap_err();
        assert!(matches!(err, ProfileError::DuplicateId { .. }));
    }

    #[test]
    fn test_user_profiles_sorted_after_builtins() {
        let mut store = ProfileStore::new();
        store.add_profile_from_current("Zebra").unwrap();
        store.activate_profile("standard").unwrap();
        store.add_profile_from_current("alpha").unwrap();

        let names: Vec<&str> = store
            .catalog()
            .profiles()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Draft", "Standard", "Fine", "Extra Fine", "alpha", "Zebra"]
        );
    }

    #[test]
    fn test_update_active_profile_read_only() {
        let mut store = ProfileStore::new();
        store.set_override("layer_height", "0.15").unwrap();
        let err = store.update_active_profile().unwrap_err();
        assert!(matches!(err, ProfileError::ReadOnly { .. }));
        // The failed operation leaves state untouched.
        assert!(store.has_customized_values());
    }

    #[test]
    fn test_update_active_profile_folds_overrides() {
        let mut store = ProfileStore::new();
        let id = store.add_profile_from_current("Tuned").unwrap();

        store.set_override("infill_density", "42").unwrap();
        store.update_active_profile().unwrap();

        let profile = store.catalog().find_by_id(&id).unwrap();
        assert_eq!(profile.settings.infill_density_percent, 42.0);
        assert!(!store.has_customized_values());
    }

    #[test]
    fn test_duplicate_profile() {
        let mut store = ProfileStore::new();
        let id = store.duplicate_profile("fine").unwrap();

        let copy = store.catalog().find_by_id(&id).unwrap();
        assert_eq!(copy.name, "Fine copy");
        assert!(!copy.read_only);
        assert_eq!(copy.settings.adhesion, AdhesionType::Brim);
        // Duplicating does not steal the active reference.
        assert_eq!(store.active_profile_id(), Some("standard"));

        // A second copy gets a counter suffix.
        let id2 = store.duplicate_profile("fine").unwrap();
        assert_eq!(store.catalog().find_by_id(&id2).unwrap().name, "Fine copy 2");
    }

    #[test]
    fn test_rename_profile() {
        let mut store = ProfileStore::new();
        let id = store.add_profile_from_current("Before").unwrap();

        store.rename_profile(&id, "After").unwrap();
        let profile = store.catalog().find_by_id(&id).unwrap();
        assert_eq!(profile.name, "After");
        // Renaming keeps the id stable.
        assert_eq!(profile.id, "before");
    }

    #[test]
    fn test_rename_builtin_rejected() {
        let mut store = ProfileStore::new();
        let err = store.rename_profile("draft", "Scribble").unwrap_err();
        assert!(matches!(err, ProfileError::ReadOnly { .. }));
    }

    #[test]
    fn test_remove_active_falls_back_to_standard() {
        let mut store = ProfileStore::new();
        let id = store.add_profile_from_current("Doomed").unwrap();
        assert_eq!(store.active_profile_id(), Some(id.as_str()));

        store.remove_profile(&id).unwrap();
        assert!(store.catalog().find_by_id(&id).is_none());
        assert_eq!(store.active_profile_id(), Some("standard"));
    }

    #[test]
    fn test_remove_builtin_rejected() {
        let mut store = ProfileStore::new();
        let err = store.remove_profile("standard").unwrap_err();
        assert!(matches!(err, ProfileError::ReadOnly { .. }));
    }

    #[test]
    fn test_revision_bumps_only_on_structural_change() {
        let mut store = ProfileStore::new();
        let before = store.catalog().revision();

        store.activate_profile("fine").unwrap();
        store.set_override("layer_height", "0.1").unwrap();
        assert_eq!(store.catalog().revision(), before);

        store.add_profile_from_current("Structural").unwrap();
        assert_eq!(store.catalog().revision(), before + 1);
    }

    #[test]
    fn test_load_user_profiles_skips_collisions() {
        let mut store = ProfileStore::new();
        let shadowing = QualityProfile {
            id: "standard".to_string(),
            name: "Imposter".to_string(),
            read_only: false,
            settings: QualitySettings::default(),
        };
        let ok = QualityProfile {
            id: "valid".to_string(),
            name: "Valid".to_string(),
            read_only: true, // storage never yields read-only; forced off
            settings: QualitySettings::default(),
        };

        store.load_user_profiles(vec![shadowing, ok.clone(), ok]);

        assert_eq!(store.catalog().find_by_id("standard").unwrap().name, "Standard");
        let valid = store.catalog().find_by_id("valid").unwrap();
        assert!(!valid.read_only);
        assert_eq!(store.user_profiles().len(), 1);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Profile"), "my-profile");
        assert_eq!(slugify("  PETG @ 0.2mm!  "), "petg-0-2mm");
        assert_eq!(slugify("???"), "profile");
    }
}
