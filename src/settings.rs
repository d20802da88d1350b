use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::{emotions::EmotionalConfig, windows::DEFAULT_BASE_Z_INDEX};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DesktopSettings {
    /// Stacking index of the first opened window.
    pub base_z_index: u32,
    pub emotional: EmotionalConfig,
}

impl Default for DesktopSettings {
    fn default() -> Self {
        Self {
            base_z_index: DEFAULT_BASE_Z_INDEX,
            emotional: EmotionalConfig::default(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<DesktopSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            let mut loaded: DesktopSettings = serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("ignoring malformed settings at {}: {err}", path.display());
                DesktopSettings::default()
            });
            if let Err(err) = loaded.emotional.validate() {
                log_warn!("ignoring emotional settings at {}: {err}", path.display());
                loaded.emotional = EmotionalConfig::default();
            }
            loaded
        } else {
            DesktopSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn desktop(&self) -> DesktopSettings {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Validates and persists `config`. Rejected configs leave both the file
    /// and the in-memory settings unchanged.
    pub fn update_emotional(&self, config: EmotionalConfig) -> Result<DesktopSettings> {
        config.validate()?;
        let mut guard = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.emotional = config;
        self.persist(&guard)?;
        Ok(guard.clone())
    }

    fn persist(&self, data: &DesktopSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create settings directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
