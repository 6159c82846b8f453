use super::schema::Settings;
use crate::error::SettingsError;
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_DIR: &str = ".linkdigest";
const SETTINGS_FILE: &str = "settings.json";

/// Reads and writes [`Settings`] at a single fixed path.
///
/// The store never holds settings itself: the caller owns the one mutable
/// instance and passes it in on save, or receives a fresh value on load.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.linkdigest/settings.json`
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or(SettingsError::HomeDirectory)?;
        Ok(home.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    pub fn at_default_location() -> Result<Self, SettingsError> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Startup load: defaults when the file is absent, an error when it is
    /// present but unreadable or malformed.
    pub fn load_or_default(&self) -> Result<Settings, SettingsError> {
        if self.path.exists() {
            self.load()
        } else {
            tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
    }

    /// Explicit load. The file must exist.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| SettingsError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace `settings` wholesale with the file's contents. On error the
    /// in-memory value is left untouched.
    pub fn reload_into(&self, settings: &mut Settings) -> Result<(), SettingsError> {
        *settings = self.load()?;
        tracing::info!(path = %self.path.display(), "settings reloaded");
        Ok(())
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings).map_err(SettingsError::Serialize)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, json).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
