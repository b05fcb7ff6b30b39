use std::sync::Arc;

use async_trait::async_trait;

use crate::app::Result;
use crate::config::ApiConfig;
use crate::domain::{
    Coordinates, Doa, Hadith, HadithBook, HadithRange, PrayerSchedule, QiblaBearing,
    SearchResults, SurahDetail, SurahSummary, Tafsir,
};
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;
use crate::source::ContentSource;

/// [`ContentSource`] backed by the public HTTP APIs named in [`ApiConfig`].
pub struct RemoteSource {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    api: ApiConfig,
}

impl RemoteSource {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, api: ApiConfig) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
            api,
        }
    }
}

#[async_trait]
impl ContentSource for RemoteSource {
    async fn surahs(&self) -> Result<Vec<SurahSummary>> {
        let body = self.fetcher.fetch(&self.api.surah_list_url()?).await?;
        self.normalizer.surah_list(&body)
    }

    async fn surah(&self, number: u16) -> Result<SurahDetail> {
        let body = self.fetcher.fetch(&self.api.surah_url(number)?).await?;
        self.normalizer.surah_detail(&body)
    }

    async fn tafsir(&self, number: u16) -> Result<Tafsir> {
        let body = self.fetcher.fetch(&self.api.tafsir_url(number)?).await?;
        self.normalizer.tafsir(&body)
    }

    async fn hadith_books(&self) -> Result<Vec<HadithBook>> {
        let body = self.fetcher.fetch(&self.api.hadith_books_url()?).await?;
        self.normalizer.hadith_books(&body)
    }

    async fn hadith_range(&self, book_id: &str, range: &HadithRange) -> Result<(HadithBook, Vec<Hadith>)> {
        let url = self.api.hadith_range_url(book_id, range)?;
        let body = self.fetcher.fetch(&url).await?;
        self.normalizer.hadith_range(&body)
    }

    async fn doas(&self) -> Result<Vec<Doa>> {
        let body = self.fetcher.fetch(&self.api.doa_url()?).await?;
        self.normalizer.doas(&body)
    }

    async fn prayer_times(&self, timestamp: i64, at: Coordinates, method: u32) -> Result<PrayerSchedule> {
        let url = self.api.timings_url(timestamp, at, method)?;
        let body = self.fetcher.fetch(&url).await?;
        self.normalizer.prayer_schedule(&body)
    }

    async fn qibla(&self, at: Coordinates) -> Result<QiblaBearing> {
        let body = self.fetcher.fetch(&self.api.qibla_url(at)?).await?;
        self.normalizer.qibla(&body)
    }

    async fn search(&self, query: &str) -> Result<SearchResults> {
        let body = self.fetcher.fetch(&self.api.search_url(query)?).await?;
        self.normalizer.search_results(&body)
    }
}
