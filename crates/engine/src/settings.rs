// Controller settings
// Loaded from ~/.config/stylegrid/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Tunable controller behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long a queued cell edit may wait for its input to mount before
    /// being dropped.
    pub edit_mount_timeout_ms: u64,

    /// Retry a failed delete/move request once before surfacing it.
    pub retry_failed_requests: bool,

    /// Letter of the primary-modifier chord that moves the selected rows.
    pub move_key: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            edit_mount_timeout_ms: 100,
            retry_failed_requests: true,
            move_key: 'm',
        }
    }
}

impl Settings {
    pub fn edit_mount_timeout(&self) -> Duration {
        Duration::from_millis(self.edit_mount_timeout_ms)
    }

    /// Path to the settings file, if a config directory exists.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stylegrid").join("settings.json"))
    }

    /// Load settings, falling back to defaults on a missing or unreadable
    /// file. A parse failure is logged, never fatal.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("failed to parse {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Persist settings as pretty-printed JSON.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.edit_mount_timeout(), Duration::from_millis(100));
        assert!(settings.retry_failed_requests);
        assert_eq!(settings.move_key, 'm');
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"move_key": "g"}"#).unwrap();
        assert_eq!(settings.move_key, 'g');
        assert_eq!(settings.edit_mount_timeout_ms, 100);
        assert!(settings.retry_failed_requests);
    }
}
