use crate::color::Rgba;
use crate::settings::NetworkSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum PresetError {
    #[error("unknown preset: {0} (try --list-presets)")]
    UnknownPreset(String),
}

/// A named set of animation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub settings: NetworkSettings,
}

impl Preset {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        settings: NetworkSettings,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            settings,
        }
    }
}

/// Built-in presets plus any the user keeps on disk
pub struct PresetManager {
    /// Built-in presets that ship with the app
    pub builtin: Vec<Preset>,
    /// User-created presets loaded from disk
    pub user: Vec<Preset>,
}

impl Default for PresetManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetManager {
    pub fn new() -> Self {
        let mut manager = Self::builtin_only();
        manager.load_user_presets();
        manager
    }

    /// Manager without user presets from disk
    pub fn builtin_only() -> Self {
        Self {
            builtin: Self::builtin_presets(),
            user: Vec::new(),
        }
    }

    fn builtin_presets() -> Vec<Preset> {
        vec![
            Preset::new(
                "Blueprint",
                "Blue points joined by violet lines (default)",
                NetworkSettings::default(),
            ),
            Preset::new(
                "Constellation",
                "Sparse, slow stars with long reach",
                NetworkSettings {
                    area_per_particle: 24000.0,
                    connect_distance: 180.0,
                    max_speed: 0.1,
                    particle_color: Rgba::new(230, 230, 255, 0.8),
                    line_color: Rgba::opaque(120, 140, 220),
                    background: Rgba::opaque(5, 5, 20),
                    ..Default::default()
                },
            ),
            Preset::new(
                "Dense Mesh",
                "Crowded field with short links",
                NetworkSettings {
                    area_per_particle: 5000.0,
                    connect_distance: 70.0,
                    ..Default::default()
                },
            ),
            Preset::new(
                "Drift",
                "Faster particles with warm links",
                NetworkSettings {
                    max_speed: 0.6,
                    particle_color: Rgba::new(250, 204, 21, 0.6),
                    line_color: Rgba::opaque(249, 115, 22),
                    ..Default::default()
                },
            ),
        ]
    }

    /// Get the presets directory path
    fn presets_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("blueprint-network").join("presets"))
    }

    fn load_user_presets(&mut self) {
        if let Some(dir) = Self::presets_dir() {
            self.load_user_presets_from(&dir);
        }
    }

    /// Load `*.json` presets from `dir`, skipping files that do not parse
    pub fn load_user_presets_from(&mut self, dir: &Path) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|e| e == "json") {
                continue;
            }
            let parsed = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    serde_json::from_str::<Preset>(&content).map_err(|e| e.to_string())
                });
            match parsed {
                Ok(preset) => {
                    debug!(name = %preset.name, path = %path.display(), "loaded user preset");
                    self.user.push(preset);
                }
                Err(err) => warn!(path = %path.display(), %err, "skipping unreadable preset"),
            }
        }
    }

    /// Get all presets (builtin + user)
    pub fn all_presets(&self) -> impl Iterator<Item = &Preset> {
        self.builtin.iter().chain(self.user.iter())
    }

    /// Find a preset by name
    pub fn find(&self, name: &str) -> Result<&Preset, PresetError> {
        self.all_presets()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| PresetError::UnknownPreset(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets_are_valid() {
        let manager = PresetManager::builtin_only();
        assert!(!manager.builtin.is_empty());
        for preset in manager.all_presets() {
            assert!(preset.settings.validate().is_ok(), "{} is invalid", preset.name);
        }
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let manager = PresetManager::builtin_only();
        let preset = manager.find("dense mesh").unwrap();
        assert_eq!(preset.name, "Dense Mesh");
        assert_eq!(preset.settings.connect_distance, 70.0);
    }

    #[test]
    fn test_default_preset_matches_defaults() {
        let manager = PresetManager::builtin_only();
        let preset = manager.find("Blueprint").unwrap();
        assert_eq!(preset.settings, NetworkSettings::default());
    }

    fn write_preset(dir: &Path, file: &str, preset: &Preset) {
        let json = serde_json::to_string_pretty(preset).unwrap();
        fs::write(dir.join(file), json).unwrap();
    }

    #[test]
    fn test_user_presets_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        let aurora = Preset::new(
            "Aurora",
            "Green glow",
            NetworkSettings {
                connect_distance: 150.0,
                ..Default::default()
            },
        );
        write_preset(dir.path(), "aurora.json", &aurora);
        write_preset(dir.path(), "ignored.txt", &Preset::new("Ignored", "", Default::default()));
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let mut manager = PresetManager::builtin_only();
        manager.load_user_presets_from(dir.path());

        assert_eq!(manager.user.len(), 1);
        assert_eq!(manager.all_presets().count(), manager.builtin.len() + 1);
        let found = manager.find("aurora").unwrap();
        assert_eq!(found.settings.connect_distance, 150.0);
        assert!(manager.find("Ignored").is_err());
    }

    #[test]
    fn test_missing_user_dir_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = PresetManager::builtin_only();
        manager.load_user_presets_from(&dir.path().join("absent"));
        assert!(manager.user.is_empty());
    }

    #[test]
    fn test_unknown_preset() {
        let manager = PresetManager::builtin_only();
        assert!(matches!(
            manager.find("nope"),
            Err(PresetError::UnknownPreset(name)) if name == "nope"
        ));
    }
}
