//! Composition root
//!
//! [`Assistant`] wires the resolver and the five preference stores together
//! and exposes the narrow operations front-ends call. Construct one at
//! process start and pass it down; stores are never reached through ambient
//! globals.

use crate::Result;
use crate::prefs::{AuthStore, FavoritesStore, Prefs, RegionStore, SettingsStore, ThemeStore};
use crate::record::{AnswerRecord, AnswerSettings, AnswerSettingsPatch, ThemeMode};
use crate::region::Region;
use crate::resolver::Resolver;
use std::time::{SystemTime, UNIX_EPOCH};

/// The assembled assistant core.
pub struct Assistant {
    prefs: Prefs,
    region: RegionStore,
    settings: SettingsStore,
    theme: ThemeStore,
    auth: AuthStore,
    favorites: FavoritesStore,
    resolver: Resolver,
    last_id_millis: i64,
}

impl Assistant {
    /// Load every store and stand up the assistant.
    ///
    /// Stores initialize independently; one that fails to load starts from
    /// its documented default.
    pub async fn open(prefs: Prefs, resolver: Resolver) -> Self {
        let region = RegionStore::load(prefs.clone()).await;
        let settings = SettingsStore::load(prefs.clone()).await;
        let theme = ThemeStore::load(prefs.clone()).await;
        let auth = AuthStore::load(prefs.clone()).await;
        let favorites = FavoritesStore::load(prefs.clone()).await;

        Self {
            prefs,
            region,
            settings,
            theme,
            auth,
            favorites,
            resolver,
            last_id_millis: 0,
        }
    }

    // ========== Questions ==========

    /// Ask a question scoped to the current region.
    ///
    /// Always produces a record; nothing is persisted until the caller saves
    /// it as a favorite.
    pub async fn ask(&mut self, question: &str) -> AnswerRecord {
        let resolution = self.resolver.resolve(question, self.region.get()).await;
        let millis = self.next_id_millis();

        let mut record = AnswerRecord::new(
            millis.to_string(),
            question,
            resolution.answer,
            self.region.get().clone(),
            millis,
        );
        record.standard = resolution.standard;
        record.clause = resolution.clause;
        record
    }

    /// Epoch-millisecond ids, bumped past the last issued value so two asks
    /// within the same millisecond still get distinct ids.
    fn next_id_millis(&mut self) -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0);
        let id = now.max(self.last_id_millis + 1);
        self.last_id_millis = id;
        id
    }

    // ========== Favorites ==========

    /// Save a record, or remove it when already saved.
    ///
    /// Returns whether the record is a favorite afterwards.
    pub fn toggle_favorite(&mut self, record: AnswerRecord) -> Result<bool> {
        if self.favorites.contains(&record.id) {
            self.favorites.remove(&record.id)?;
            Ok(false)
        } else {
            self.favorites.add(record)?;
            Ok(true)
        }
    }

    /// Save a record
    pub fn add_favorite(&mut self, record: AnswerRecord) -> Result<()> {
        self.favorites.add(record)
    }

    /// Remove a saved record; absent ids are a no-op
    pub fn remove_favorite(&mut self, id: &str) -> Result<()> {
        self.favorites.remove(id)
    }

    /// Whether a record id is saved
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// All saved records, in insertion order
    pub fn favorites(&self) -> &[AnswerRecord] {
        self.favorites.records()
    }

    /// Case-insensitive search over saved questions and answers
    pub fn search_favorites(&self, query: &str) -> Vec<&AnswerRecord> {
        self.favorites.search(query)
    }

    // ========== Preferences ==========

    /// The current region
    pub fn region(&self) -> &Region {
        self.region.get()
    }

    /// Validate and set the region
    pub fn set_region(&mut self, region: Region) -> Result<()> {
        self.region.set(region)
    }

    /// The current answer settings
    pub fn settings(&self) -> &AnswerSettings {
        self.settings.get()
    }

    /// Merge a partial update over the answer settings
    pub fn update_settings(&mut self, patch: AnswerSettingsPatch) -> Result<&AnswerSettings> {
        self.settings.update(patch)
    }

    /// The current theme mode
    pub fn theme(&self) -> ThemeMode {
        self.theme.mode()
    }

    /// Flip between light and dark
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle()
    }

    // ========== Auth ==========

    /// Whether the user may use the assistant without signing in
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Record that the user chose to proceed without an account
    pub fn skip_auth(&mut self) {
        self.auth.skip_auth();
    }

    /// Clear the auth-skip flag only; favorites, region and settings persist
    pub fn sign_out(&mut self) {
        self.auth.sign_out();
    }

    // ========== Lifecycle ==========

    /// Wait until every enqueued preference write has been applied
    pub async fn flush(&self) -> Result<()> {
        self.prefs.flush().await
    }

    /// Number of preference writes that failed this session
    pub fn failed_writes(&self) -> u64 {
        self.prefs.failed_writes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::CannedBackend;
    use std::time::Duration;

    async fn assistant(prefs: Prefs) -> Assistant {
        let resolver = Resolver::new(Box::new(CannedBackend::with_latency(Duration::ZERO)));
        Assistant::open(prefs, resolver).await
    }

    #[tokio::test]
    async fn test_ask_attaches_region_and_citation() {
        let prefs = Prefs::open_in_memory().unwrap();
        let mut assistant = assistant(prefs).await;

        let record = assistant
            .ask("what is the minimum height for a power outlet?")
            .await;

        assert_eq!(record.region, Region::default());
        assert_eq!(record.standard.as_deref(), Some("AS/NZS 3000:2018"));
        assert_eq!(record.clause.as_deref(), Some("4.4.2.2"));
        assert_eq!(record.id, record.timestamp.to_string());
    }

    #[tokio::test]
    async fn test_rapid_asks_get_distinct_ids() {
        let prefs = Prefs::open_in_memory().unwrap();
        let mut assistant = assistant(prefs).await;

        let first = assistant.ask("zzz one").await;
        let second = assistant.ask("zzz two").await;
        let third = assistant.ask("zzz three").await;

        assert_ne!(first.id, second.id);
        assert_ne!(second.id, third.id);
        assert!(second.timestamp > first.timestamp);
        assert!(third.timestamp > second.timestamp);
    }

    #[tokio::test]
    async fn test_toggle_favorite_roundtrip() {
        let prefs = Prefs::open_in_memory().unwrap();
        let mut assistant = assistant(prefs).await;

        let record = assistant.ask("requirements for bathroom lighting").await;
        let id = record.id.clone();

        assert!(assistant.toggle_favorite(record.clone()).unwrap());
        assert!(assistant.is_favorite(&id));

        assert!(!assistant.toggle_favorite(record).unwrap());
        assert!(!assistant.is_favorite(&id));
    }

    #[tokio::test]
    async fn test_sign_out_preserves_everything_else() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.db");

        {
            let prefs = Prefs::open(&path).unwrap();
            let mut assistant = assistant(prefs.clone()).await;

            assistant.skip_auth();
            assistant
                .set_region(Region::new("Canada", Some("Ontario".to_string())))
                .unwrap();
            assistant
                .update_settings(AnswerSettingsPatch {
                    max_words: Some(120),
                    ..Default::default()
                })
                .unwrap();
            let record = assistant.ask("zzz keep me").await;
            assistant.add_favorite(record).unwrap();

            assistant.sign_out();
            assistant.flush().await.unwrap();
        }

        let prefs = Prefs::open(&path).unwrap();
        let reopened = assistant(prefs).await;

        assert!(!reopened.is_authenticated());
        assert_eq!(reopened.region().country, "Canada");
        assert_eq!(reopened.settings().max_words, 120);
        assert_eq!(reopened.favorites().len(), 1);
    }

    #[tokio::test]
    async fn test_ask_uses_fallback_for_unknown_question() {
        let prefs = Prefs::open_in_memory().unwrap();
        let mut assistant = assistant(prefs).await;
        assistant.set_region(Region::country("Canada")).unwrap();

        let record = assistant.ask("zzz unrelated gibberish").await;

        assert_eq!(record.standard.as_deref(), Some("CSA C22.1"));
        assert_eq!(record.clause.as_deref(), Some("Various sections"));
    }
}
