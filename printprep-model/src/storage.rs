//! Profile storage - file-based loading and saving of user profiles.
//!
//! User profiles are `.json5` files, one per profile. Directories are scanned
//! in priority order so user profiles can override system-installed ones with
//! the same id. Saving writes the whole user profile set into the user
//! directory and removes files for profiles that no longer exist.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use printprep_shared::errors::{StorageError, StorageResult};
use printprep_shared::profile_json::{parse_profile_file, ProfileFile};
use printprep_shared::profiles::QualityProfile;

/// Default system profile directory (installed via package)
pub const SYSTEM_PROFILE_DIR: &str = "/usr/share/printprep/profiles";

/// User profile directory below the platform config dir
pub const USER_PROFILE_DIR: &str = "printprep/profiles";

/// Error information for a profile file that failed to load
#[derive(Debug, Clone)]
pub struct ProfileLoadError {
    /// Path to the file that failed to load
    pub file_path: String,
    /// Error message
    pub error: String,
}

impl std::fmt::Display for ProfileLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to load profile from {}: {}",
            self.file_path, self.error
        )
    }
}

/// Profile storage scanning prioritized directories for `.json5` files.
///
/// Later directories override profiles with the same id from earlier ones;
/// the user directory is also where saves go.
#[derive(Debug, Clone)]
pub struct ProfileStorage {
    /// Directories to scan, in priority order (later overrides earlier)
    directories: Vec<PathBuf>,
    /// Where user profiles are written; `None` disables saving
    user_dir: Option<PathBuf>,
}

impl Default for ProfileStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStorage {
    /// Create storage with the default directories.
    ///
    /// Scan order (later wins): system dir, user config dir, `./profiles`.
    /// Saves go to the user config dir.
    pub fn new() -> Self {
        let mut directories = vec![PathBuf::from(SYSTEM_PROFILE_DIR)];

        let user_dir = dirs::config_dir().map(|config| config.join(USER_PROFILE_DIR));
        if let Some(dir) = &user_dir {
            directories.push(dir.clone());
        }

        directories.push(PathBuf::from("./profiles"));

        Self {
            directories,
            user_dir,
        }
    }

    /// Create storage over custom directories only. Saving is disabled until
    /// [`ProfileStorage::with_user_dir`] sets a target.
    pub fn with_directories(directories: Vec<PathBuf>) -> Self {
        Self {
            directories,
            user_dir: None,
        }
    }

    /// Set the directory saves are written to (also appended to the scan
    /// list with highest priority).
    pub fn with_user_dir(mut self, dir: PathBuf) -> Self {
        self.directories.push(dir.clone());
        self.user_dir = Some(dir);
        self
    }

    /// Add a directory to scan (appended with highest priority)
    pub fn add_directory(&mut self, dir: PathBuf) {
        self.directories.push(dir);
    }

    /// The directories being scanned
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Load all user profiles, also returning per-file load errors.
    ///
    /// Profiles are loaded in directory order, with later directories
    /// overriding profiles with the same id from earlier directories. The
    /// result is sorted by id for deterministic output.
    pub fn load_all_with_errors(&self) -> (Vec<QualityProfile>, Vec<ProfileLoadError>) {
        let mut profiles: HashMap<String, QualityProfile> = HashMap::new();
        let mut errors: Vec<ProfileLoadError> = Vec::new();

        for dir in &self.directories {
            if !dir.exists() {
                debug!("profile directory does not exist, skipping: {:?}", dir);
                continue;
            }

            match self.load_from_directory(dir) {
                Ok((loaded, dir_errors)) => {
                    let count = loaded.len();
                    for profile in loaded {
                        let id = profile.id.clone();
                        if profiles.contains_key(&id) {
                            debug!(
                                "profile '{}' from {:?} overrides previous definition",
                                id, dir
                            );
                        }
                        profiles.insert(id, profile);
                    }
                    errors.extend(dir_errors);
                    if count > 0 {
                        info!("Loaded {} profiles from {:?}", count, dir);
                    }
                }
                Err(e) => {
                    warn!("Failed to load profiles from {:?}: {}", dir, e);
                }
            }
        }

        let mut profiles: Vec<QualityProfile> = profiles.into_values().collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        (profiles, errors)
    }

    /// Load all user profiles, discarding load errors
    pub fn load_all(&self) -> Vec<QualityProfile> {
        self.load_all_with_errors().0
    }

    /// Load profiles from a single directory, returning profiles and errors
    fn load_from_directory(
        &self,
        dir: &Path,
    ) -> Result<(Vec<QualityProfile>, Vec<ProfileLoadError>)> {
        let mut profiles = Vec::new();
        let mut errors = Vec::new();

        let entries =
            std::fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?;

        for entry in entries {
            let entry =
                entry.with_context(|| format!("Failed to read directory entry in {:?}", dir))?;
            let path = entry.path();

            // Only process .json5 files
            if path.extension().and_then(|e| e.to_str()) != Some("json5") {
                continue;
            }

            debug!("Loading profile from {:?}", path);
            match parse_profile_file(&path) {
                Ok(profile) => profiles.push(profile),
                Err(e) => {
                    warn!("Failed to load profile from {:?}: {}", path, e);
                    errors.push(ProfileLoadError {
                        file_path: path.display().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok((profiles, errors))
    }

    /// Write the full user profile set into the user directory.
    ///
    /// One `<id>.json5` file per profile; stale files for removed profiles
    /// are deleted. Errors with [`StorageError::NoConfigDir`] when no user
    /// directory is configured.
    pub fn save_user_profiles(&self, profiles: &[&QualityProfile]) -> StorageResult<()> {
        let dir = self.user_dir.as_ref().ok_or(StorageError::NoConfigDir)?;
        std::fs::create_dir_all(dir)?;

        for profile in profiles {
            let path = dir.join(format!("{}.json5", profile.id));
            let content = ProfileFile::from_profile(profile).to_json5_string();
            std::fs::write(&path, content)?;
            debug!("Saved profile '{}' to {:?}", profile.id, path);
        }

        // Remove files for profiles that no longer exist.
        let live: Vec<String> = profiles.iter().map(|p| format!("{}.json5", p.id)).collect();
        for entry in std::fs::read_dir(dir)?.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json5") {
                continue;
            }
            let stale = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|name| !live.iter().any(|l| l == name))
                .unwrap_or(false);
            if stale {
                debug!("Removing stale profile file {:?}", path);
                std::fs::remove_file(&path)?;
            }
        }

        info!("Saved {} user profiles to {:?}", profiles.len(), dir);
        Ok(())
    }

    /// Whether saving is possible (a user directory is configured)
    pub fn can_save(&self) -> bool {
        self.user_dir.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn profile_json(id: &str, name: &str, layer_height: f32) -> String {
        format!(
            r#"{{
    id: "{}",
    name: "{}",
    layer_height: {}
}}"#,
            id, name, layer_height
        )
    }

    #[test]
    fn test_default_storage_has_directories() {
        let storage = ProfileStorage::new();
        assert!(!storage.directories().is_empty());
    }

    #[test]
    fn test_load_from_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("minis.json5"),
            profile_json("minis", "Miniatures", 0.1),
        )
        .unwrap();

        let storage = ProfileStorage::with_directories(vec![temp.path().to_path_buf()]);
        let profiles = storage.load_all();

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id, "minis");
        assert_eq!(profiles[0].name, "Miniatures");
        assert_eq!(profiles[0].settings.layer_height_mm, 0.1);
        assert!(!profiles[0].read_only);
    }

    #[test]
    fn test_directory_priority_override() {
        let dir1 = TempDir::new().unwrap();
        let dir2 = TempDir::new().unwrap();

        fs::write(
            dir1.path().join("p.json5"),
            profile_json("same-id", "From Dir 1", 0.2),
        )
        .unwrap();
        fs::write(
            dir2.path().join("p.json5"),
            profile_json("same-id", "From Dir 2", 0.3),
        )
        .unwrap();

        // dir2 has higher priority (comes later)
        let storage = ProfileStorage::with_directories(vec![
            dir1.path().to_path_buf(),
            dir2.path().to_path_buf(),
        ]);
        let profiles = storage.load_all();

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "From Dir 2");
    }

    #[test]
    fn test_skip_non_json5_files() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("valid.json5"),
            profile_json("valid", "Valid", 0.2),
        )
        .unwrap();
        fs::write(temp.path().join("readme.txt"), "not a profile").unwrap();
        fs::write(temp.path().join("other.json"), r#"{"not": "scanned"}"#).unwrap();

        let storage = ProfileStorage::with_directories(vec![temp.path().to_path_buf()]);
        let profiles = storage.load_all();

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id, "valid");
    }

    #[test]
    fn test_invalid_files_reported_not_fatal() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("valid.json5"),
            profile_json("valid", "Valid", 0.2),
        )
        .unwrap();
        fs::write(temp.path().join("broken.json5"), "{ not valid }}}").unwrap();

        let storage = ProfileStorage::with_directories(vec![temp.path().to_path_buf()]);
        let (profiles, errors) = storage.load_all_with_errors();

        assert_eq!(profiles.len(), 1);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].file_path.ends_with("broken.json5"));
    }

    #[test]
    fn test_nonexistent_directory() {
        let storage = ProfileStorage::with_directories(vec![PathBuf::from(
            "/nonexistent/directory/that/should/not/exist",
        )]);
        assert!(storage.load_all().is_empty());
    }

    #[test]
    fn test_save_requires_user_dir() {
        let storage = ProfileStorage::with_directories(vec![]);
        assert!(!storage.can_save());
        let result = storage.save_user_profiles(&[]);
        assert!(matches!(result, Err(StorageError::NoConfigDir)));
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let temp = TempDir::new().unwrap();
        let storage =
            ProfileStorage::with_directories(vec![]).with_user_dir(temp.path().to_path_buf());

        let profile = QualityProfile {
            id: "saved".to_string(),
            name: "Saved".to_string(),
            read_only: false,
            settings: Default::default(),
        };
        storage.save_user_profiles(&[&profile]).unwrap();

        let reloaded = storage.load_all();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0], profile);
    }

    #[test]
    fn test_save_removes_stale_files() {
        let temp = TempDir::new().unwrap();
        let storage =
            ProfileStorage::with_directories(vec![]).with_user_dir(temp.path().to_path_buf());

        let a = QualityProfile {
            id: "a".to_string(),
            name: "A".to_string(),
            read_only: false,
            settings: Default::default(),
        };
        let b = QualityProfile {
            id: "b".to_string(),
            name: "B".to_string(),
            read_only: false,
            settings: Default::default(),
        };

        storage.save_user_profiles(&[&a, &b]).unwrap();
        assert_eq!(storage.load_all().len(), 2);

        // Saving without `b` deletes its file.
        storage.save_user_profiles(&[&a]).unwrap();
        let reloaded = storage.load_all();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].id, "a");
    }
}
