use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::app::error::{Result, TilawaError};
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::parallel::ParallelFetcher;
use crate::fetcher::Fetcher;
use crate::source::{ContentSource, RemoteSource};
use crate::store::{MemoryStorage, PreferenceStore, SqliteStorage, Storage};

pub type DynStorage = Box<dyn Storage + Send + Sync>;

pub struct AppContext {
    pub config: Config,
    pub preferences: PreferenceStore<DynStorage>,
    pub source: Arc<dyn ContentSource + Send + Sync>,
    pub parallel_fetcher: ParallelFetcher,
}

impl AppContext {
    /// Opens the preferences database. A database that cannot be opened or
    /// migrated never stops the reader: preferences then live in memory for
    /// this run.
    pub fn new(config: Config, db_path: Option<PathBuf>) -> Result<Self> {
        let storage = Self::open_storage(db_path);
        Self::with_storage(config, storage)
    }

    /// Preferences live only for this process.
    pub fn ephemeral(config: Config) -> Result<Self> {
        Self::with_storage(config, Box::new(MemoryStorage::new()))
    }

    pub fn with_storage(config: Config, storage: DynStorage) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.fetcher)?);
        let source: Arc<dyn ContentSource + Send + Sync> =
            Arc::new(RemoteSource::new(fetcher, config.api.clone()));
        Ok(Self::from_parts(config, storage, source))
    }

    pub fn from_parts(
        config: Config,
        storage: DynStorage,
        source: Arc<dyn ContentSource + Send + Sync>,
    ) -> Self {
        let preferences = PreferenceStore::initialize(storage);
        let parallel_fetcher = ParallelFetcher::with_workers(source.clone(), config.fetcher.workers);

        Self {
            config,
            preferences,
            source,
            parallel_fetcher,
        }
    }

    fn open_storage(db_path: Option<PathBuf>) -> DynStorage {
        let opened = match db_path {
            Some(p) => Ok(p),
            None => Self::default_db_path(),
        }
        .and_then(|path| SqliteStorage::new(&path));

        match opened {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                warn!("Preferences database unavailable: {}. Keeping preferences in memory.", e);
                Box::new(MemoryStorage::new())
            }
        }
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TilawaError::Config("Could not find data directory".into()))?;
        let tilawa_dir = data_dir.join("tilawa");
        std::fs::create_dir_all(&tilawa_dir)?;
        Ok(tilawa_dir.join("tilawa.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AyatRef, Settings, SurahRef};
    use crate::store::BOOKMARKS_KEY;

    #[test]
    fn test_corrupt_database_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tilawa.db");
        std::fs::write(&path, b"\x00\x01 definitely not sqlite \xff\xfe").unwrap();

        let mut ctx = AppContext::new(Config::default(), Some(path)).unwrap();

        assert_eq!(*ctx.preferences.settings(), Settings::default());
        assert!(ctx.preferences.bookmarks().is_empty());
        assert!(ctx.preferences.last_read().is_none());

        assert!(ctx
            .preferences
            .add_bookmark(SurahRef::new(1, "Al-Fatihah"), AyatRef::new(1)));
        assert!(ctx
            .preferences
            .storage()
            .read(BOOKMARKS_KEY)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_unopenable_path_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tilawa.db");

        let ctx = AppContext::new(Config::default(), Some(path)).unwrap();
        assert_eq!(*ctx.preferences.settings(), Settings::default());
    }

    #[test]
    fn test_valid_database_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tilawa.db");

        {
            let mut ctx = AppContext::new(Config::default(), Some(path.clone())).unwrap();
            ctx.preferences
                .set_last_read(SurahRef::new(18, "Al-Kahf"));
        }

        let ctx = AppContext::new(Config::default(), Some(path)).unwrap();
        assert_eq!(ctx.preferences.last_read().unwrap().surah.number, 18);
    }
}
