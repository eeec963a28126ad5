// Application settings
// Loaded from ~/.config/packlist/settings.json

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Production line stamped on accepted scans when --line is not given
    pub default_line: String,

    /// Store location; None = platform data dir
    pub data_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_line: "L-01".into(),
            data_file: None,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("packlist");
        config_dir.join("settings.json")
    }

    /// Resolve the store file, honoring the data_file override
    pub fn data_path(&self) -> PathBuf {
        match &self.data_file {
            Some(path) => path.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("packlist")
                .join("packlist.db"),
        }
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => {
                // Strip comments (lines starting with //)
                let cleaned: String = contents
                    .lines()
                    .filter(|line| !line.trim().starts_with("//"))
                    .collect::<Vec<_>>()
                    .join("\n");

                match serde_json::from_str(&cleaned) {
                    Ok(settings) => settings,
                    Err(e) => {
                        eprintln!("Error parsing settings.json: {}", e);
                        eprintln!("Using default settings");
                        Self::default()
                    }
                }
            }
            Err(e) => {
                eprintln!("Error reading settings.json: {}", e);
                Self::default()
            }
        }
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(&path, json).map_err(|e| e.to_string())
    }
}
