//! JSON5 parsing for user profile files.
//!
//! User-defined quality profiles are stored as one JSON5 file per profile.
//! Any setting missing from the file falls back to the standard defaults, so
//! a profile only needs to record what it changes.
//!
//! # Example profile file
//!
//! ```json5
//! {
//!     id: "miniatures",
//!     name: "Miniatures",
//!     layer_height: 0.1,
//!     wall_line_count: 3,
//!     support_enabled: true,
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::profiles::{AdhesionType, QualityProfile, QualitySettings};

/// Error type for profile file parsing
#[derive(Debug)]
pub enum ProfileParseError {
    /// JSON5 parsing error
    Json5Error(String),
    /// File I/O error
    IoError(String),
}

impl std::fmt::Display for ProfileParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileParseError::Json5Error(msg) => write!(f, "JSON5 parse error: {}", msg),
            ProfileParseError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ProfileParseError {}

impl From<std::io::Error> for ProfileParseError {
    fn from(err: std::io::Error) -> Self {
        ProfileParseError::IoError(err.to_string())
    }
}

/// On-disk representation of a user profile.
///
/// Settings are flattened into the top level; absent settings take the
/// standard defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileFile {
    pub id: String,
    pub name: String,
    pub layer_height: Option<f32>,
    pub wall_line_count: Option<u32>,
    pub infill_density: Option<f32>,
    pub print_speed: Option<f32>,
    pub support_enabled: Option<bool>,
    pub adhesion: Option<AdhesionType>,
}

impl ProfileFile {
    /// Convert to a catalog profile, filling absent settings with defaults.
    /// Profiles loaded from files are always user-defined (not read-only).
    pub fn into_profile(self) -> QualityProfile {
        let defaults = QualitySettings::default();
        let settings = QualitySettings {
            layer_height_mm: self.layer_height.unwrap_or(defaults.layer_height_mm),
            wall_line_count: self.wall_line_count.unwrap_or(defaults.wall_line_count),
            infill_density_percent: self
                .infill_density
                .unwrap_or(defaults.infill_density_percent),
            print_speed_mms: self.print_speed.unwrap_or(defaults.print_speed_mms),
            support_enabled: self.support_enabled.unwrap_or(defaults.support_enabled),
            adhesion: self.adhesion.unwrap_or(defaults.adhesion),
        };

        QualityProfile {
            id: self.id,
            name: self.name,
            read_only: false,
            settings,
        }
    }

    /// Build the on-disk representation of a profile. All settings are
    /// written explicitly so the file survives future default changes.
    pub fn from_profile(profile: &QualityProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            layer_height: Some(profile.settings.layer_height_mm),
            wall_line_count: Some(profile.settings.wall_line_count),
            infill_density: Some(profile.settings.infill_density_percent),
            print_speed: Some(profile.settings.print_speed_mms),
            support_enabled: Some(profile.settings.support_enabled),
            adhesion: Some(profile.settings.adhesion),
        }
    }

    /// Serialize to a pretty-printed string.
    ///
    /// JSON5 has no pretty printer, so serde_json formats the output; JSON is
    /// a subset of JSON5 and parses back fine.
    pub fn to_json5_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Parse a profile from a JSON5 string
pub fn parse_profile(json5_content: &str) -> Result<QualityProfile, ProfileParseError> {
    let file: ProfileFile = json5::from_str(json5_content)
        .map_err(|e| ProfileParseError::Json5Error(e.to_string()))?;
    Ok(file.into_profile())
}

/// Parse a profile from a file path
pub fn parse_profile_file(path: &std::path::Path) -> Result<QualityProfile, ProfileParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_profile(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_profile() {
        let json5 = r#"
        {
            id: "test",
            name: "Test Profile"
        }
        "#;

        let profile = parse_profile(json5).unwrap();
        assert_eq!(profile.id, "test");
        assert_eq!(profile.name, "Test Profile");
        assert!(!profile.read_only);
        assert_eq!(profile.settings, QualitySettings::default());
    }

    #[test]
    fn test_parse_partial_settings() {
        let json5 = r#"
        {
            id: "minis",
            name: "Miniatures",
            layer_height: 0.1,
            support_enabled: true
        }
        "#;

        let profile = parse_profile(json5).unwrap();
        assert_eq!(profile.settings.layer_height_mm, 0.1);
        assert!(profile.settings.support_enabled);
        // Absent settings fall back to defaults
        assert_eq!(
            profile.settings.wall_line_count,
            QualitySettings::default().wall_line_count
        );
    }

    #[test]
    fn test_parse_adhesion_variants() {
        let json5 = r#"
        {
            id: "raft",
            name: "Raft",
            adhesion: "raft"
        }
        "#;

        let profile = parse_profile(json5).unwrap();
        assert_eq!(profile.settings.adhesion, AdhesionType::Raft);
    }

    #[test]
    fn test_parse_json5_with_comments() {
        let json5 = r#"
        {
            // tuned for vase mode
            id: "vase",
            name: "Vase",
            wall_line_count: 1, // trailing comment
        }
        "#;

        let profile = parse_profile(json5).unwrap();
        assert_eq!(profile.id, "vase");
        assert_eq!(profile.settings.wall_line_count, 1);
    }

    #[test]
    fn test_parse_invalid_json5() {
        let result = parse_profile("{ this is not valid json5 }}}");
        assert!(matches!(result, Err(ProfileParseError::Json5Error(_))));
    }

    #[test]
    fn test_file_roundtrip() {
        let original = QualityProfile {
            id: "roundtrip".to_string(),
            name: "Round Trip".to_string(),
            read_only: false,
            settings: QualitySettings {
                layer_height_mm: 0.16,
                wall_line_count: 4,
                infill_density_percent: 35.0,
                print_speed_mms: 45.0,
                support_enabled: true,
                adhesion: AdhesionType::Brim,
            },
        };

        let written = ProfileFile::from_profile(&original).to_json5_string();
        let reloaded = parse_profile(&written).unwrap();
        assert_eq!(reloaded, original);
    }
}
