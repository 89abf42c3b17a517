//! World configuration
//!
//! Settings consumed verbatim by the generator, loadable from RON with a
//! fallback to built-in defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Edge length of one tile in pixels
pub const TILE_PIXEL_SIZE: i32 = 64;

/// Default location of the settings file
pub const DEFAULT_SETTINGS_PATH: &str = "assets/config/world.ron";

/// Which generation pipeline to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorldVariant {
    /// Flat latitude bands, no passes
    Banded,
    /// Grass valley with rivers, roads and a village
    Valley,
    /// Island with walled regions, gates and progression layout
    #[default]
    Island,
}

impl WorldVariant {
    pub fn name(&self) -> &'static str {
        match self {
            WorldVariant::Banded => "banded",
            WorldVariant::Valley => "valley",
            WorldVariant::Island => "island",
        }
    }

    /// Whether maps of this variant carry regions and a layout
    pub fn has_regions(&self) -> bool {
        matches!(self, WorldVariant::Island)
    }
}

impl fmt::Display for WorldVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorldVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "banded" => Ok(WorldVariant::Banded),
            "valley" => Ok(WorldVariant::Valley),
            "island" => Ok(WorldVariant::Island),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Errors raised while loading or saving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialise settings: {0}")]
    Ron(#[from] ron::Error),

    #[error("unknown world variant `{0}` (expected banded, valley or island)")]
    UnknownVariant(String),
}

/// Generation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Width in tiles
    pub width: i32,
    /// Height in tiles
    pub height: i32,
    /// Seed for the coastline noise phases
    pub seed: u64,
    pub variant: WorldVariant,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            seed: 0x61AD_E5EE,
            variant: WorldVariant::Island,
        }
    }
}

impl WorldSettings {
    pub fn new(width: i32, height: i32, seed: u64, variant: WorldVariant) -> Self {
        Self {
            width,
            height,
            seed,
            variant,
        }
    }

    /// Parse settings from a RON document
    pub fn from_ron_str(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    /// Load settings from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_ron_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded world settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// malformed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("{}. Using default world settings.", e);
            Self::default()
        })
    }

    /// Serialise to pretty RON
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Write these settings as a RON file that `load` reads back
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_ron_string()?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Saved world settings to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let settings =
            WorldSettings::from_ron_str("(width: 64, height: 48, seed: 7, variant: Valley)").unwrap();
        assert_eq!(settings, WorldSettings::new(64, 48, 7, WorldVariant::Valley));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = WorldSettings::from_ron_str("(width: 200)").unwrap();
        assert_eq!(settings.width, 200);
        assert_eq!(settings.height, 128);
        assert_eq!(settings.variant, WorldVariant::Island);
    }

    #[test]
    fn test_ron_export_parses_back() {
        let settings = WorldSettings::new(90, 60, 42, WorldVariant::Banded);
        let text = settings.to_ron_string().unwrap();
        assert_eq!(WorldSettings::from_ron_str(&text).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = WorldSettings::load_or_default("does/not/exist/world.ron");
        assert_eq!(settings, WorldSettings::default());
        assert!(matches!(
            WorldSettings::load("does/not/exist/world.ron"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("Island".parse::<WorldVariant>().unwrap(), WorldVariant::Island);
        assert_eq!(" valley ".parse::<WorldVariant>().unwrap(), WorldVariant::Valley);
        assert!(matches!(
            "swamp".parse::<WorldVariant>(),
            Err(ConfigError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_saved_file_loads_back() {
        let path = std::env::temp_dir().join(format!("glade_runner_{}.ron", std::process::id()));
        let settings = WorldSettings::new(72, 40, 9, WorldVariant::Valley);
        settings.save(&path).unwrap();
        let loaded = WorldSettings::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), settings);
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let result = WorldSettings::default().save("does/not/exist/world.ron");
        assert!(matches!(result, Err(ConfigError::Write { .. })));
    }
}
