//! Bookmarks, last-read marker and display settings.
//!
//! The store loads all three entities once, keeps them in memory for the
//! session and writes the whole affected entity back to [`Storage`] on every
//! mutation. Storage failures never reach the caller: unreadable entries fall
//! back to defaults and failed writes leave the in-memory state authoritative.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{AyatRef, Bookmark, LastRead, Settings, SettingsPatch, SurahRef};
use crate::store::{Storage, BOOKMARKS_KEY, LAST_READ_KEY, SETTINGS_KEY};

pub struct PreferenceStore<S: Storage> {
    storage: S,
    /// Newest first, by insertion.
    bookmarks: Vec<Bookmark>,
    last_read: Option<LastRead>,
    settings: Settings,
}

impl<S: Storage> PreferenceStore<S> {
    pub fn initialize(storage: S) -> Self {
        let bookmarks = load_entity::<Vec<Bookmark>>(&storage, BOOKMARKS_KEY)
            .map(dedup_bookmarks)
            .unwrap_or_default();
        let last_read = load_entity::<LastRead>(&storage, LAST_READ_KEY);
        let settings = load_entity::<Settings>(&storage, SETTINGS_KEY).unwrap_or_default();

        debug!(
            "Loaded preferences: {} bookmarks, last read {:?}",
            bookmarks.len(),
            last_read.as_ref().map(|l| l.surah.number)
        );

        Self {
            storage,
            bookmarks,
            last_read,
            settings,
        }
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn last_read(&self) -> Option<&LastRead> {
        self.last_read.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn is_bookmarked(&self, surah_number: u16, ayat_number: u16) -> bool {
        self.bookmarks
            .iter()
            .any(|b| b.matches(surah_number, ayat_number))
    }

    /// Newest bookmark inside the given surah.
    pub fn bookmark_for_surah(&self, surah_number: u16) -> Option<&Bookmark> {
        self.bookmarks
            .iter()
            .find(|b| b.surah.number == surah_number)
    }

    /// Inserts at the front. An existing bookmark for the same verse is left
    /// exactly where it is, timestamp included. Returns whether anything changed.
    pub fn add_bookmark(&mut self, surah: SurahRef, ayat: AyatRef) -> bool {
        if self.is_bookmarked(surah.number, ayat.number) {
            return false;
        }
        self.bookmarks.insert(0, Bookmark::new(surah, ayat));
        self.persist_bookmarks();
        true
    }

    pub fn remove_bookmark(&mut self, surah_number: u16, ayat_number: u16) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks
            .retain(|b| !b.matches(surah_number, ayat_number));
        if self.bookmarks.len() == before {
            return false;
        }
        self.persist_bookmarks();
        true
    }

    /// Returns the bookmarked state after the toggle.
    pub fn toggle_bookmark(&mut self, surah: SurahRef, ayat: AyatRef) -> bool {
        if self.remove_bookmark(surah.number, ayat.number) {
            false
        } else {
            self.add_bookmark(surah, ayat)
        }
    }

    pub fn set_last_read(&mut self, surah: SurahRef) {
        let last_read = LastRead::now(surah);
        persist_entity(&self.storage, LAST_READ_KEY, &last_read);
        self.last_read = Some(last_read);
    }

    /// Shallow merge. The font size is taken as given; bounding it is the
    /// input control's job.
    pub fn update_settings(&mut self, patch: &SettingsPatch) {
        self.settings.merge(patch);
        persist_entity(&self.storage, SETTINGS_KEY, &self.settings);
    }

    fn persist_bookmarks(&self) {
        persist_entity(&self.storage, BOOKMARKS_KEY, &self.bookmarks);
    }
}

fn load_entity<T: DeserializeOwned>(storage: &impl Storage, key: &str) -> Option<T> {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored value for {}", key);
            return None;
        }
        Err(e) => {
            warn!("Failed to read {}: {}. Using defaults.", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Stored {} is malformed: {}. Using defaults.", key, e);
            None
        }
    }
}

fn persist_entity<T: Serialize + ?Sized>(storage: &impl Storage, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Failed to serialize {}: {}", key, e);
            return;
        }
    };

    match storage.write(key, &raw) {
        Ok(()) => debug!("Persisted {}", key),
        Err(e) => warn!("Failed to persist {}: {}", key, e),
    }
}

/// Keeps the first (newest) entry per verse if another client stored duplicates.
fn dedup_bookmarks(bookmarks: Vec<Bookmark>) -> Vec<Bookmark> {
    let mut seen = std::collections::HashSet::new();
    bookmarks
        .into_iter()
        .filter(|b| seen.insert(b.key()))
        .collect()
}
