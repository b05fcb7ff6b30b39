pub mod memory;
pub mod preferences;
pub mod sqlite;

use crate::app::Result;

pub use memory::MemoryStorage;
pub use preferences::PreferenceStore;
pub use sqlite::SqliteStorage;

pub const BOOKMARKS_KEY: &str = "quran_bookmarks";
pub const LAST_READ_KEY: &str = "quran_last_read";
pub const SETTINGS_KEY: &str = "quran_settings";

/// Durable key-value port. Every value is one whole serialized entity.
pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
