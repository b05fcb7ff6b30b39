use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::SurahRef;

pub const SURAH_COUNT: u16 = 114;

/// Audio references keyed by reciter id ("01".."06").
pub type AudioRefs = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurahSummary {
    pub number: u16,
    pub name: String,
    pub latin_name: String,
    pub verse_count: u16,
    pub revelation_place: String,
    pub meaning: String,
    pub description: String,
    pub full_audio: AudioRefs,
}

impl SurahSummary {
    pub fn to_ref(&self) -> SurahRef {
        SurahRef::new(self.number, self.latin_name.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub number: u16,
    pub arabic: String,
    pub latin: String,
    pub translation: String,
    pub audio: AudioRefs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurahLink {
    pub number: u16,
    pub latin_name: String,
    pub verse_count: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurahDetail {
    pub summary: SurahSummary,
    pub verses: Vec<Verse>,
    pub previous: Option<SurahLink>,
    pub next: Option<SurahLink>,
}

impl SurahDetail {
    /// Al-Fatihah carries it as its first verse and At-Taubah has none.
    pub fn shows_bismillah(&self) -> bool {
        self.summary.number != 1 && self.summary.number != 9
    }

    pub fn verse(&self, number: u16) -> Option<&Verse> {
        self.verses.iter().find(|v| v.number == number)
    }

    pub fn full_audio(&self, reciter: &str) -> Option<&str> {
        self.summary.full_audio.get(reciter).map(String::as_str)
    }

    pub fn verse_audio(&self, number: u16, reciter: &str) -> Option<&str> {
        self.verse(number)
            .and_then(|v| v.audio.get(reciter))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TafsirEntry {
    pub verse: u16,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tafsir {
    pub surah_number: u16,
    pub entries: Vec<TafsirEntry>,
}

impl Tafsir {
    pub fn for_verse(&self, verse: u16) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.verse == verse)
            .map(|e| e.text.as_str())
    }
}
