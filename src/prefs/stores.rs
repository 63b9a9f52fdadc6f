//! Domain wrappers over the preference store
//!
//! Each store loads its value (or the documented default) once at startup,
//! then serves reads from memory and enqueues a durable write on every
//! change. A load failure falls back to the default; the session keeps
//! running on in-memory state.

use super::{Prefs, keys};
use crate::Result;
use crate::record::{AnswerSettings, AnswerSettingsPatch, ThemeMode};
use crate::region::{Region, RegionCatalog};

/// Selected jurisdiction, persisted under `region`.
pub struct RegionStore {
    prefs: Prefs,
    region: Region,
}

impl RegionStore {
    /// Load the stored region, falling back to the default
    pub async fn load(prefs: Prefs) -> Self {
        let region = match prefs.load::<Region>(keys::REGION).await {
            Ok(Some(region)) => region,
            Ok(None) => Region::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load region, using default");
                Region::default()
            }
        };
        Self { prefs, region }
    }

    /// The current region
    pub fn get(&self) -> &Region {
        &self.region
    }

    /// Validate and set the region.
    ///
    /// Rejects a state that is not a registered subdivision of the country,
    /// so a country change can never leave a stale state behind.
    pub fn set(&mut self, region: Region) -> Result<()> {
        RegionCatalog::validate(&region)?;
        self.region = region;
        self.prefs.save(keys::REGION, &self.region)
    }
}

/// Answer display settings, persisted under `answerSettings`.
pub struct SettingsStore {
    prefs: Prefs,
    settings: AnswerSettings,
}

impl SettingsStore {
    /// Load the stored settings, falling back to defaults
    pub async fn load(prefs: Prefs) -> Self {
        let settings = match prefs.load::<AnswerSettings>(keys::ANSWER_SETTINGS).await {
            Ok(Some(settings)) => settings,
            Ok(None) => AnswerSettings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load answer settings, using defaults");
                AnswerSettings::default()
            }
        };
        Self { prefs, settings }
    }

    /// The current settings
    pub fn get(&self) -> &AnswerSettings {
        &self.settings
    }

    /// Merge a partial update over the current settings and persist the result
    pub fn update(&mut self, patch: AnswerSettingsPatch) -> Result<&AnswerSettings> {
        self.settings.apply(patch);
        self.prefs.save(keys::ANSWER_SETTINGS, &self.settings)?;
        Ok(&self.settings)
    }
}

/// Theme preference, persisted under `themePref` as `"dark"` / `"light"`.
pub struct ThemeStore {
    prefs: Prefs,
    mode: ThemeMode,
}

impl ThemeStore {
    /// Load the stored theme, falling back to light
    pub async fn load(prefs: Prefs) -> Self {
        let mode = match prefs.load_raw(keys::THEME_PREF).await {
            Ok(Some(text)) => text.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "unrecognized theme preference, using default");
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load theme preference, using default");
                ThemeMode::default()
            }
        };
        Self { prefs, mode }
    }

    /// The current theme mode
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flip between light and dark, persisting the new mode
    pub fn toggle(&mut self) -> ThemeMode {
        self.set(self.mode.toggled());
        self.mode
    }

    /// Set and persist a theme mode
    pub fn set(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.prefs.save_raw(keys::THEME_PREF, mode.as_str());
    }
}

/// Auth-skip flag, persisted under `authSkipped` as the sentinel `"true"`.
///
/// Third-party sign-in lives entirely in the excluded UI layer; the core
/// only tracks whether the user chose to proceed without an account.
pub struct AuthStore {
    prefs: Prefs,
    authenticated: bool,
}

impl AuthStore {
    /// Load the stored flag
    pub async fn load(prefs: Prefs) -> Self {
        let authenticated = match prefs.load_raw(keys::AUTH_SKIPPED).await {
            Ok(Some(text)) => text == "true",
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load auth flag, requiring sign-in");
                false
            }
        };
        Self {
            prefs,
            authenticated,
        }
    }

    /// Whether the user may use the assistant without signing in
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Record that the user skipped sign-in
    pub fn skip_auth(&mut self) {
        self.authenticated = true;
        self.prefs.save_raw(keys::AUTH_SKIPPED, "true");
    }

    /// Clear the auth-skip flag. Favorites, region and settings are untouched.
    pub fn sign_out(&mut self) {
        self.authenticated = false;
        self.prefs.delete(keys::AUTH_SKIPPED);
    }
}
