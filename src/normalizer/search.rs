use serde::Deserialize;

use crate::domain::{SearchResults, VerseMatch};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMatchSurah {
    number: u16,
    #[serde(default)]
    name: String,
    #[serde(default)]
    english_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMatch {
    #[serde(default)]
    text: String,
    surah: RawMatchSurah,
    number_in_surah: u16,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawSearch {
    #[serde(default)]
    count: u32,
    #[serde(default)]
    matches: Vec<RawMatch>,
}

impl RawSearch {
    pub(super) fn into_results(self) -> SearchResults {
        SearchResults {
            count: self.count,
            matches: self
                .matches
                .into_iter()
                .map(|m| VerseMatch {
                    surah_number: m.surah.number,
                    surah_name: m.surah.name,
                    surah_english_name: m.surah.english_name,
                    verse_number: m.number_in_surah,
                    text: m.text,
                })
                .collect(),
        }
    }
}
