use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::debug;

use crate::{Preferences, PreferencesError};

/// Preferences stored as a TOML table of booleans.
///
/// The file is rewritten on every [`put_bool`](Preferences::put_bool).
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    flags: BTreeMap<String, bool>,
}

impl FilePreferences {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        debug!("Loading preferences from: {:?}", path);

        let flags = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .with_context(|| format!("Failed to parse preferences file: {:?}", path))?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(PreferencesError::Io { path, source }),
        };

        Ok(Self { path, flags })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forget a flag and save.
    pub fn remove(&mut self, key: &str) -> Result<(), PreferencesError> {
        if self.flags.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PreferencesError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string_pretty(&self.flags)
            .context("Failed to serialize preferences to TOML")?;

        fs::write(&self.path, content).map_err(|source| PreferencesError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("Preferences saved to: {:?}", self.path);
        Ok(())
    }
}

impl Preferences for FilePreferences {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.flags.get(key).copied().unwrap_or(default)
    }

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), PreferencesError> {
        self.flags.insert(key.to_string(), value);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PREF_KEY_QUESTIONNAIRE_FINISHED;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::open(dir.path().join("prefs.toml")).unwrap();
        assert!(!prefs.get_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, false));
    }

    #[test]
    fn flags_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deeper").join("prefs.toml");

        let mut prefs = FilePreferences::open(&path).unwrap();
        prefs.put_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, true).unwrap();

        let reopened = FilePreferences::open(&path).unwrap();
        assert!(reopened.get_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, false));
        assert_eq!(
            fs::read_to_string(&path).unwrap().trim(),
            "questionnaire_complete = true"
        );
    }

    #[test]
    fn remove_clears_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let mut prefs = FilePreferences::open(&path).unwrap();
        prefs.put_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, true).unwrap();
        prefs.remove(PREF_KEY_QUESTIONNAIRE_FINISHED).unwrap();

        let reopened = FilePreferences::open(&path).unwrap();
        assert!(!reopened.get_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, false));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "questionnaire_complete = \"maybe\"").unwrap();

        assert!(matches!(
            FilePreferences::open(&path),
            Err(PreferencesError::Backend(_))
        ));
    }
}
