//! Decodes external API payloads into domain models.
//!
//! Each upstream gets an explicit schema in its own submodule. Everything is
//! checked here, at the boundary, so the rest of the crate never sees raw
//! JSON.

mod aladhan;
mod doa;
mod equran;
mod hadith;
mod search;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::app::{Result, TilawaError};
use crate::domain::{
    Doa, Hadith, HadithBook, PrayerSchedule, QiblaBearing, SearchResults, SurahDetail,
    SurahSummary, Tafsir,
};

/// `{code, message|status, data}` wrapper shared by most upstreams.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<serde_json::Value>,
    #[serde(default)]
    data: serde_json::Value,
}

impl Envelope {
    fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        if self.code != 200 {
            let message = self
                .message
                .or_else(|| self.status.as_ref().and_then(|s| s.as_str()).map(String::from))
                .or_else(|| self.data.as_str().map(String::from))
                .unwrap_or_default();
            return Err(TilawaError::Api {
                code: self.code,
                message,
            });
        }
        Ok(serde_json::from_value(self.data)?)
    }
}

fn unwrap_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    envelope.into_data()
}

#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn surah_list(&self, body: &[u8]) -> Result<Vec<SurahSummary>> {
        let raw: Vec<equran::RawSurah> = unwrap_envelope(body)?;
        Ok(raw.into_iter().map(equran::RawSurah::into_summary).collect())
    }

    pub fn surah_detail(&self, body: &[u8]) -> Result<SurahDetail> {
        let raw: equran::RawSurahDetail = unwrap_envelope(body)?;
        raw.into_detail()
    }

    pub fn tafsir(&self, body: &[u8]) -> Result<Tafsir> {
        let raw: equran::RawTafsir = unwrap_envelope(body)?;
        Ok(raw.into_tafsir())
    }

    pub fn hadith_books(&self, body: &[u8]) -> Result<Vec<HadithBook>> {
        let raw: Vec<hadith::RawBook> = unwrap_envelope(body)?;
        Ok(raw.into_iter().map(HadithBook::from).collect())
    }

    pub fn hadith_range(&self, body: &[u8]) -> Result<(HadithBook, Vec<Hadith>)> {
        let raw: hadith::RawBookRange = unwrap_envelope(body)?;
        Ok(raw.into_parts())
    }

    pub fn doas(&self, body: &[u8]) -> Result<Vec<Doa>> {
        doa::decode(body)
    }

    pub fn prayer_schedule(&self, body: &[u8]) -> Result<PrayerSchedule> {
        let raw: aladhan::RawTimings = unwrap_envelope(body)?;
        Ok(raw.into_schedule())
    }

    pub fn qibla(&self, body: &[u8]) -> Result<QiblaBearing> {
        let raw: aladhan::RawQibla = unwrap_envelope(body)?;
        raw.into_bearing()
    }

    pub fn search_results(&self, body: &[u8]) -> Result<SearchResults> {
        let raw: search::RawSearch = unwrap_envelope(body)?;
        Ok(raw.into_results())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_surah_list() {
        let surahs = Normalizer::new().surah_list(SURAH_LIST.as_bytes()).unwrap();
        assert_eq!(surahs.len(), 2);
        assert_eq!(surahs[0].latin_name, "Al-Fatihah");
        assert_eq!(surahs[0].meaning, "Pembukaan");
        assert_eq!(surahs[1].verse_count, 286);
        assert_eq!(
            surahs[0].description,
            "Surat Al Faatihah (Pembukaan) & induk Al-Qur'an"
        );
    }

    #[test]
    fn test_surah_detail_with_absent_previous() {
        let detail = Normalizer::new()
            .surah_detail(SURAH_DETAIL.as_bytes())
            .unwrap();
        assert_eq!(detail.summary.number, 1);
        assert_eq!(detail.verses.len(), 2);
        assert_eq!(detail.verses[1].number, 2);
        assert_eq!(detail.previous, None);
        assert_eq!(detail.next.as_ref().map(|n| n.number), Some(2));
        assert_eq!(detail.verse_audio(1, "05"), Some("https://cdn.example/001001.mp3"));
    }

    #[test]
    fn test_tafsir() {
        let tafsir = Normalizer::new().tafsir(TAFSIR.as_bytes()).unwrap();
        assert_eq!(tafsir.surah_number, 1);
        assert_eq!(tafsir.for_verse(2), Some("Segala puji hanya milik Allah."));
    }

    #[test]
    fn test_hadith_books_and_range() {
        let normalizer = Normalizer::new();
        let books = normalizer.hadith_books(HADITH_BOOKS.as_bytes()).unwrap();
        assert_eq!(books[0].id, "bukhari");
        assert_eq!(books[1].available, 4930);

        let (book, hadiths) = normalizer.hadith_range(HADITH_RANGE.as_bytes()).unwrap();
        assert_eq!(book.name, "HR. Bukhari");
        assert_eq!(hadiths.len(), 2);
        assert_eq!(hadiths[0].number, 1);
        assert!(hadiths[0].translation.starts_with("Sesungguhnya"));
    }

    #[test]
    fn test_doas_accept_mixed_id_types() {
        let doas = Normalizer::new().doas(DOAS.as_bytes()).unwrap();
        assert_eq!(doas.len(), 2);
        assert_eq!(doas[0].id, "1");
        assert_eq!(doas[1].id, "2");
        assert_eq!(doas[1].title, "Doa bangun tidur");
    }

    #[test]
    fn test_prayer_schedule() {
        let schedule = Normalizer::new()
            .prayer_schedule(TIMINGS.as_bytes())
            .unwrap();
        assert_eq!(schedule.time_of("Maghrib"), Some("17:58"));
        assert_eq!(schedule.date_readable, "18 Oct 2026");
        assert_eq!(schedule.timezone, "Asia/Jakarta");
        assert_eq!(schedule.hijri_date.as_deref(), Some("07-05-1448"));
    }

    #[test]
    fn test_qibla() {
        let qibla = Normalizer::new().qibla(QIBLA.as_bytes()).unwrap();
        assert!((qibla.direction - 295.15).abs() < 1e-9);
    }

    #[test]
    fn test_search_results() {
        let results = Normalizer::new().search_results(SEARCH.as_bytes()).unwrap();
        assert_eq!(results.count, 2);
        assert_eq!(results.matches[0].reference(), "2:153");
        assert_eq!(results.matches[1].surah_english_name, "Al-Asr");
    }

    #[test]
    fn test_non_200_code_is_api_error() {
        let err = Normalizer::new()
            .search_results(NOT_FOUND.as_bytes())
            .unwrap_err();
        assert!(matches!(err, TilawaError::Api { code: 404, .. }));
    }

    #[test]
    fn test_malformed_payload_is_decode_error() {
        let err = Normalizer::new().surah_list(b"<html>").unwrap_err();
        assert!(matches!(err, TilawaError::Decode(_)));
    }
}
