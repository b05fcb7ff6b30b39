//! Endpoints of the external content APIs.

use serde::Deserialize;
use url::Url;

use crate::app::{Result, TilawaError};
use crate::domain::{Coordinates, HadithRange};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub quran_base: String,
    pub hadith_base: String,
    pub aladhan_base: String,
    pub search_base: String,
    pub search_edition: String,
    pub doa_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            quran_base: "https://equran.id/api/v2".to_string(),
            hadith_base: "https://api.hadith.gading.dev".to_string(),
            aladhan_base: "https://api.aladhan.com/v1".to_string(),
            search_base: "https://api.alquran.cloud/v1".to_string(),
            search_edition: "id.indonesian".to_string(),
            doa_url: "https://open-api.my.id/api/doa".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn surah_list_url(&self) -> Result<Url> {
        join(&self.quran_base, &["surat"])
    }

    pub fn surah_url(&self, surah: u16) -> Result<Url> {
        join(&self.quran_base, &["surat", &surah.to_string()])
    }

    pub fn tafsir_url(&self, surah: u16) -> Result<Url> {
        join(&self.quran_base, &["tafsir", &surah.to_string()])
    }

    pub fn hadith_books_url(&self) -> Result<Url> {
        join(&self.hadith_base, &["books"])
    }

    pub fn hadith_range_url(&self, book_id: &str, range: &HadithRange) -> Result<Url> {
        let mut url = join(&self.hadith_base, &["books", book_id])?;
        url.query_pairs_mut()
            .append_pair("range", &range.query_value());
        Ok(url)
    }

    pub fn timings_url(&self, timestamp: i64, at: Coordinates, method: u32) -> Result<Url> {
        let mut url = join(&self.aladhan_base, &["timings", &timestamp.to_string()])?;
        url.query_pairs_mut()
            .append_pair("latitude", &at.latitude.to_string())
            .append_pair("longitude", &at.longitude.to_string())
            .append_pair("method", &method.to_string());
        Ok(url)
    }

    pub fn qibla_url(&self, at: Coordinates) -> Result<Url> {
        join(
            &self.aladhan_base,
            &["qibla", &at.latitude.to_string(), &at.longitude.to_string()],
        )
    }

    pub fn search_url(&self, query: &str) -> Result<Url> {
        join(
            &self.search_base,
            &["search", query, "all", &self.search_edition],
        )
    }

    pub fn doa_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.doa_url)?)
    }
}

/// Appends percent-encoded path segments to `base`.
fn join(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| TilawaError::Config(format!("{} cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quran_urls() {
        let api = ApiConfig::default();
        assert_eq!(
            api.surah_list_url().unwrap().as_str(),
            "https://equran.id/api/v2/surat"
        );
        assert_eq!(
            api.surah_url(114).unwrap().as_str(),
            "https://equran.id/api/v2/surat/114"
        );
        assert_eq!(
            api.tafsir_url(2).unwrap().as_str(),
            "https://equran.id/api/v2/tafsir/2"
        );
    }

    #[test]
    fn test_trailing_slash_base() {
        let api = ApiConfig {
            quran_base: "https://equran.id/api/v2/".into(),
            ..Default::default()
        };
        assert_eq!(
            api.surah_url(1).unwrap().as_str(),
            "https://equran.id/api/v2/surat/1"
        );
    }

    #[test]
    fn test_hadith_range_url() {
        let api = ApiConfig::default();
        let url = api
            .hadith_range_url("bukhari", &HadithRange::containing(55, 20))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.hadith.gading.dev/books/bukhari?range=41-60"
        );
    }

    #[test]
    fn test_prayer_urls() {
        let api = ApiConfig::default();
        let at = Coordinates::new(-6.2088, 106.8456);
        assert_eq!(
            api.timings_url(1_700_000_000, at, 11).unwrap().as_str(),
            "https://api.aladhan.com/v1/timings/1700000000?latitude=-6.2088&longitude=106.8456&method=11"
        );
        assert_eq!(
            api.qibla_url(at).unwrap().as_str(),
            "https://api.aladhan.com/v1/qibla/-6.2088/106.8456"
        );
    }

    #[test]
    fn test_search_query_is_encoded() {
        let api = ApiConfig::default();
        assert_eq!(
            api.search_url("sabar dan shalat").unwrap().as_str(),
            "https://api.alquran.cloud/v1/search/sabar%20dan%20shalat/all/id.indonesian"
        );
    }

    #[test]
    fn test_non_base_url_rejected() {
        let api = ApiConfig {
            hadith_base: "mailto:someone@example.com".into(),
            ..Default::default()
        };
        assert!(api.hadith_books_url().is_err());
    }
}
