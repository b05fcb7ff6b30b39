use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseMatch {
    pub surah_number: u16,
    pub surah_name: String,
    pub surah_english_name: String,
    pub verse_number: u16,
    pub text: String,
}

impl VerseMatch {
    pub fn reference(&self) -> String {
        format!("{}:{}", self.surah_number, self.verse_number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub count: u32,
    pub matches: Vec<VerseMatch>,
}
