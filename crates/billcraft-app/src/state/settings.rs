//! # Settings State
//!
//! In-memory mirror of the persisted business settings profile.
//!
//! Settings are always replaced wholesale: the settings screen edits a
//! copy and saves the entire profile back, so there is no field-level
//! merge logic here.

use std::sync::{Arc, Mutex};

use billcraft_core::SettingsProfile;

/// Managed state for the business settings.
#[derive(Debug, Clone)]
pub struct SettingsState {
    settings: Arc<Mutex<SettingsProfile>>,
}

impl SettingsState {
    /// Creates state with default settings (fresh install).
    pub fn new() -> Self {
        SettingsState {
            settings: Arc::new(Mutex::new(SettingsProfile::default())),
        }
    }

    /// Seeds the state from the persisted profile at startup.
    pub fn from_profile(profile: SettingsProfile) -> Self {
        SettingsState {
            settings: Arc::new(Mutex::new(profile)),
        }
    }

    /// Returns a copy of the current profile.
    pub fn get(&self) -> SettingsProfile {
        self.settings.lock().expect("Settings mutex poisoned").clone()
    }

    /// Replaces the profile wholesale.
    pub fn replace(&self, profile: SettingsProfile) {
        *self.settings.lock().expect("Settings mutex poisoned") = profile;
    }
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_is_wholesale() {
        let state = SettingsState::new();
        let mut profile = SettingsProfile::default();
        profile.business_name = "Sleepwell Cotton Works".to_string();
        profile.currency = "$".to_string();

        state.replace(profile.clone());
        assert_eq!(state.get(), profile);
    }
}
