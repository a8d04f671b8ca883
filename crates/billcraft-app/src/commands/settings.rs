//! # Settings Commands
//!
//! Command handlers for the business settings profile.

use tracing::info;

use billcraft_core::SettingsProfile;
use billcraft_db::Database;

use crate::error::ApiError;
use crate::state::SettingsState;

/// Returns the current settings profile.
pub async fn get_settings(settings: &SettingsState) -> Result<SettingsProfile, ApiError> {
    Ok(settings.get())
}

/// Replaces the settings profile wholesale and persists it.
pub async fn save_settings(
    db: &Database,
    settings: &SettingsState,
    profile: SettingsProfile,
) -> Result<(), ApiError> {
    settings.replace(profile.clone());
    db.store().save_settings(&profile).await?;

    info!(business = %profile.business_name, "Saved settings");
    Ok(())
}
