use serde::{Deserialize, Serialize};

use crate::errors::ProfileError;

/// Bed adhesion helper printed alongside the model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdhesionType {
    /// A single outline around the model, primes the nozzle
    #[default]
    Skirt,
    /// A flat area attached to the first layer
    Brim,
    /// A thick grid the model is printed on
    Raft,
    /// No adhesion helper at all
    None,
}

impl AdhesionType {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "skirt" => Some(AdhesionType::Skirt),
            "brim" => Some(AdhesionType::Brim),
            "raft" => Some(AdhesionType::Raft),
            "none" => Some(AdhesionType::None),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            AdhesionType::Skirt => "skirt",
            AdhesionType::Brim => "brim",
            AdhesionType::Raft => "raft",
            AdhesionType::None => "none",
        }
    }
}

impl std::fmt::Display for AdhesionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The print settings a quality profile stores.
///
/// Settings can also be addressed by key (see [`QualitySettings::set`]) so
/// that per-setting overrides can be applied on top of a profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualitySettings {
    /// Layer height in millimeters
    pub layer_height_mm: f32,
    /// Number of wall lines around the model
    pub wall_line_count: u32,
    /// Infill density percentage (0.0-100.0)
    pub infill_density_percent: f32,
    /// Print head speed in mm/s
    pub print_speed_mms: f32,
    /// Whether support structures are generated
    pub support_enabled: bool,
    /// Bed adhesion helper type
    pub adhesion: AdhesionType,
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self {
            layer_height_mm: 0.2,
            wall_line_count: 2,
            infill_density_percent: 20.0,
            print_speed_mms: 60.0,
            support_enabled: false,
            adhesion: AdhesionType::Skirt,
        }
    }
}

/// Setting keys accepted by [`QualitySettings::set`] and [`QualitySettings::get`].
pub const SETTING_KEYS: &[&str] = &[
    "layer_height",
    "wall_line_count",
    "infill_density",
    "print_speed",
    "support_enabled",
    "adhesion",
];

impl QualitySettings {
    /// Set a setting by key from its string representation.
    ///
    /// Returns an error for unknown keys or values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ProfileError> {
        let invalid = || ProfileError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "layer_height" => self.layer_height_mm = value.parse().map_err(|_| invalid())?,
            "wall_line_count" => self.wall_line_count = value.parse().map_err(|_| invalid())?,
            "infill_density" => {
                self.infill_density_percent = value.parse().map_err(|_| invalid())?
            }
            "print_speed" => self.print_speed_mms = value.parse().map_err(|_| invalid())?,
            "support_enabled" => self.support_enabled = value.parse().map_err(|_| invalid())?,
            "adhesion" => self.adhesion = AdhesionType::parse(value).ok_or_else(invalid)?,
            _ => {
                return Err(ProfileError::UnknownSetting {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Get a setting's string representation by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "layer_height" => Some(self.layer_height_mm.to_string()),
            "wall_line_count" => Some(self.wall_line_count.to_string()),
            "infill_density" => Some(self.infill_density_percent.to_string()),
            "print_speed" => Some(self.print_speed_mms.to_string()),
            "support_enabled" => Some(self.support_enabled.to_string()),
            "adhesion" => Some(self.adhesion.to_string()),
            _ => None,
        }
    }
}

/// A named quality profile, built-in or user-defined.
///
/// Built-in profiles are read-only; user profiles can be renamed, updated
/// and removed by the profile store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityProfile {
    /// Opaque identifier, unique across the catalog
    pub id: String,
    /// Display name
    pub name: String,
    /// Built-in profiles cannot be modified
    pub read_only: bool,
    /// The stored print settings
    pub settings: QualitySettings,
}

/// The built-in quality profiles shipped with the application
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum BuiltinQuality {
    /// Fast prints with visible layers (0.3 mm)
    Draft,
    /// The default balance of speed and quality (0.2 mm)
    #[default]
    Standard,
    /// Slower prints with finer layers (0.12 mm)
    Fine,
    /// The finest supported layer height (0.08 mm)
    ExtraFine,
}

impl BuiltinQuality {
    /// Get all built-in qualities in display order
    pub fn all() -> Vec<BuiltinQuality> {
        vec![
            BuiltinQuality::Draft,
            BuiltinQuality::Standard,
            BuiltinQuality::Fine,
            BuiltinQuality::ExtraFine,
        ]
    }

    /// Stable identifier used in the catalog
    pub fn id(&self) -> &'static str {
        match self {
            BuiltinQuality::Draft => "draft",
            BuiltinQuality::Standard => "standard",
            BuiltinQuality::Fine => "fine",
            BuiltinQuality::ExtraFine => "extra-fine",
        }
    }

    /// Display name shown in the profile menu
    pub fn display_name(&self) -> &'static str {
        match self {
            BuiltinQuality::Draft => "Draft",
            BuiltinQuality::Standard => "Standard",
            BuiltinQuality::Fine => "Fine",
            BuiltinQuality::ExtraFine => "Extra Fine",
        }
    }

    /// Get the stored settings for this quality
    pub fn settings(&self) -> QualitySettings {
        match self {
            BuiltinQuality::Draft => QualitySettings {
                layer_height_mm: 0.3,
                wall_line_count: 2,
                infill_density_percent: 15.0,
                print_speed_mms: 80.0,
                support_enabled: false,
                adhesion: AdhesionType::Skirt,
            },

            BuiltinQuality::Standard => QualitySettings {
                layer_height_mm: 0.2,
                wall_line_count: 2,
                infill_density_percent: 20.0,
                print_speed_mms: 60.0,
                support_enabled: false,
                adhesion: AdhesionType::Skirt,
            },

            BuiltinQuality::Fine => QualitySettings {
                layer_height_mm: 0.12,
                wall_line_count: 3,
                infill_density_percent: 20.0,
                print_speed_mms: 50.0,
                support_enabled: false,
                adhesion: AdhesionType::Brim,
            },

            BuiltinQuality::ExtraFine => QualitySettings {
                layer_height_mm: 0.08,
                wall_line_count: 3,
                infill_density_percent: 25.0,
                print_speed_mms: 40.0,
                support_enabled: false,
                adhesion: AdhesionType::Brim,
            },
        }
    }

    /// Build the read-only catalog entry for this quality
    pub fn profile(&self) -> QualityProfile {
        QualityProfile {
            id: self.id().to_string(),
            name: self.display_name().to_string(),
            read_only: true,
            settings: self.settings(),
        }
    }
}

impl std::fmt::Display for BuiltinQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The ordered profile list the GUI renders.
///
/// Built-in profiles come first, then user profiles sorted by name. The
/// `revision` counter increases on every structural rebuild; consumers that
/// cache anything derived from the ordering (such as the group separator
/// position) compare revisions to decide when to recompute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileCatalog {
    profiles: Vec<QualityProfile>,
    revision: u64,
}

impl ProfileCatalog {
    /// Create an empty catalog at revision zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full profile list and bump the revision.
    ///
    /// The catalog never patches entries in place; any change to the list
    /// shape goes through a full rebuild.
    pub fn replace(&mut self, profiles: Vec<QualityProfile>) {
        self.profiles = profiles;
        self.revision += 1;
    }

    /// All profiles in display order
    pub fn profiles(&self) -> &[QualityProfile] {
        &self.profiles
    }

    /// The current rebuild revision
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Find a profile by its identifier
    pub fn find_by_id(&self, id: &str) -> Option<&QualityProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
