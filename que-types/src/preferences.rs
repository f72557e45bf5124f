use std::collections::HashMap;

use crate::PreferencesError;

/// Preference key recording that the questionnaire was completed.
pub const PREF_KEY_QUESTIONNAIRE_FINISHED: &str = "questionnaire_complete";

/// Persisted boolean flags.
pub trait Preferences {
    /// Read a flag, or `default` if it was never written.
    fn get_bool(&self, key: &str, default: bool) -> bool;

    /// Write a flag.
    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), PreferencesError>;
}

impl<T: Preferences + ?Sized> Preferences for &mut T {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        (**self).get_bool(key, default)
    }

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), PreferencesError> {
        (**self).put_bool(key, value)
    }
}

/// Preferences that live only as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    flags: HashMap<String, bool>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a flag already set.
    pub fn with_bool(mut self, key: impl Into<String>, value: bool) -> Self {
        self.flags.insert(key.into(), value);
        self
    }
}

impl Preferences for MemoryPreferences {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.flags.get(key).copied().unwrap_or(default)
    }

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), PreferencesError> {
        self.flags.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_until_written() {
        let mut prefs = MemoryPreferences::new();
        assert!(!prefs.get_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, false));
        assert!(prefs.get_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, true));

        prefs.put_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, true).unwrap();
        assert!(prefs.get_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, false));
    }

    #[test]
    fn preset_flag() {
        let prefs = MemoryPreferences::new().with_bool("seen_intro", true);
        assert!(prefs.get_bool("seen_intro", false));
    }
}
