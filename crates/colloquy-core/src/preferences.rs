use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::messages::Role;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Preferences {
    #[serde(default)]
    pub ui: UiPreferences,

    #[serde(default)]
    pub editor: EditorPreferences,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UiPreferences {
    pub theme: Option<String>,
}

/// Labels and placeholders for the example list editor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorPreferences {
    pub input_label: String,
    pub output_label: String,
    pub input_placeholder: String,
    pub output_placeholder: String,
    pub start_disabled: bool,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            input_label: "input".to_string(),
            output_label: "output".to_string(),
            input_placeholder: "Enter an example input".to_string(),
            output_placeholder: "Enter an example output".to_string(),
            start_disabled: false,
        }
    }
}

impl EditorPreferences {
    /// Label shown in the role selector. `system` has no selector choice and
    /// shows its own name.
    pub fn role_label(&self, role: Role) -> &str {
        match role {
            Role::User => &self.input_label,
            Role::Assistant => &self.output_label,
            Role::System => "system",
        }
    }

    pub fn placeholder(&self, role: Role) -> &str {
        match role {
            Role::User => &self.input_placeholder,
            Role::Assistant | Role::System => &self.output_placeholder,
        }
    }
}

impl Preferences {
    /// Get the path to the preferences file
    pub fn config_path() -> Result<PathBuf, crate::error::Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::error::Error::Configuration("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("colloquy").join("preferences.toml"))
    }

    /// Load preferences from disk, or return defaults if not found
    pub fn load() -> Result<Self, crate::error::Error> {
        Self::load_from(&Self::config_path()?)
    }

    /// Like [`Preferences::load`], but a failure is logged and yields defaults.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load preferences: {e}. Using defaults.");
            Self::default()
        })
    }

    pub fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to load preferences from {}: {e}. Using defaults.",
                path.display()
            );
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, crate::error::Error> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            match toml::from_str(&contents) {
                Ok(prefs) => Ok(prefs),
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse preferences file at {:?}: {}. Using defaults.",
                        path,
                        e
                    );
                    Ok(Self::default())
                }
            }
        } else {
            Ok(Self::default())
        }
    }

    /// Write preferences as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), crate::error::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }
}
