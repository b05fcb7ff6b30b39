//! Request/response contracts of the external content services.

pub mod remote;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{
    Coordinates, Doa, Hadith, HadithBook, HadithRange, PrayerSchedule, QiblaBearing,
    SearchResults, SurahDetail, SurahSummary, Tafsir,
};

pub use remote::RemoteSource;

#[async_trait]
pub trait ContentSource {
    async fn surahs(&self) -> Result<Vec<SurahSummary>>;
    async fn surah(&self, number: u16) -> Result<SurahDetail>;
    async fn tafsir(&self, number: u16) -> Result<Tafsir>;

    async fn hadith_books(&self) -> Result<Vec<HadithBook>>;
    async fn hadith_range(&self, book_id: &str, range: &HadithRange) -> Result<(HadithBook, Vec<Hadith>)>;

    async fn doas(&self) -> Result<Vec<Doa>>;

    /// `timestamp` is epoch seconds.
    async fn prayer_times(&self, timestamp: i64, at: Coordinates, method: u32) -> Result<PrayerSchedule>;
    async fn qibla(&self, at: Coordinates) -> Result<QiblaBearing>;

    async fn search(&self, query: &str) -> Result<SearchResults>;
}
