//! Harness settings with persistence
//!
//! Settings are read from `~/.config/stride/settings.toml`, or from a path
//! given on the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use stride_core::TimeConfig;
use stride_locomotion::LocomotionSettings;
use tracing::{info, warn};

/// All harness settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessSettings {
    pub time: TimeConfig,
    pub locomotion: LocomotionSettings,
    pub course: CourseSettings,
}

impl HarnessSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stride"))
    }

    /// Get the default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from the default location
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory, using defaults");
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    /// Load settings from `path`
    ///
    /// A missing or unreadable file falls back to defaults. A file that
    /// parses but describes an invalid clock or character is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let settings = match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        };

        settings
            .time
            .validate()
            .with_context(|| format!("invalid [time] section in {}", path.display()))?;
        settings
            .locomotion
            .validate()
            .with_context(|| format!("invalid [locomotion] section in {}", path.display()))?;
        Ok(settings)
    }

    /// Save settings to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let path = dir.join("settings.toml");
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Layout and length of the scripted demo course
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseSettings {
    /// Simulated run length in seconds
    pub duration: f32,
    /// Render frame rate the harness pretends to run at
    pub frame_rate: f32,
    /// Incline of the walkable ramp in degrees
    pub ramp_angle: f32,
    /// Incline of the ramp too steep to stand on, in degrees
    pub steep_angle: f32,
}

impl Default for CourseSettings {
    fn default() -> Self {
        Self {
            duration: 14.0,
            frame_rate: 144.0,
            ramp_angle: 20.0,
            steep_angle: 50.0,
        }
    }
}

impl CourseSettings {
    /// Render frame delta in seconds
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate.max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: HarnessSettings = toml::from_str(
            r#"
            [locomotion]
            walk_speed = 3.0

            [course]
            duration = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.locomotion.walk_speed, 3.0);
        assert_eq!(settings.locomotion.sprint_speed, LocomotionSettings::default().sprint_speed);
        assert_eq!(settings.course.duration, 2.0);
        assert_eq!(settings.course.ramp_angle, 20.0);
        assert_eq!(settings.time.fixed_timestep, 1.0 / 60.0);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("stride-missing-settings-file.toml");
        let settings = HarnessSettings::load_from(&path).unwrap();
        assert_eq!(settings.course.frame_rate, 144.0);
    }

    #[test]
    fn test_invalid_locomotion_is_rejected() {
        let path = std::env::temp_dir().join(format!("stride-invalid-{}.toml", std::process::id()));
        fs::write(&path, "[locomotion]\nwalk_speed = 8.0\nsprint_speed = 4.0\n").unwrap();

        let result = HarnessSettings::load_from(&path);
        let _ = fs::remove_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_stalling_clock_is_rejected() {
        for section in ["fixed_timestep = 0.0", "fixed_timestep = -0.01", "time_scale = -1.0"] {
            let path = std::env::temp_dir().join(format!("stride-clock-{}.toml", std::process::id()));
            fs::write(&path, format!("[time]\n{section}\n")).unwrap();

            let result = HarnessSettings::load_from(&path);
            let _ = fs::remove_file(&path);
            assert!(result.is_err(), "{section} should be rejected");
        }
    }

    #[test]
    fn test_unparsable_file_falls_back() {
        let path = std::env::temp_dir().join(format!("stride-garbage-{}.toml", std::process::id()));
        fs::write(&path, "this is = = not toml").unwrap();

        let result = HarnessSettings::load_from(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(result.unwrap().course.duration, 14.0);
    }
}
