use serde::Deserialize;

use crate::domain::{Hadith, HadithBook};

#[derive(Debug, Deserialize)]
pub(super) struct RawBook {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    available: u32,
}

impl From<RawBook> for HadithBook {
    fn from(raw: RawBook) -> Self {
        HadithBook {
            id: raw.id,
            name: raw.name,
            available: raw.available,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawHadith {
    number: u32,
    #[serde(default)]
    arab: String,
    /// Indonesian translation; the upstream names the field after the language code.
    #[serde(default)]
    id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawBookRange {
    #[serde(flatten)]
    book: RawBook,
    #[serde(default)]
    hadiths: Vec<RawHadith>,
}

impl RawBookRange {
    pub(super) fn into_parts(self) -> (HadithBook, Vec<Hadith>) {
        let hadiths = self
            .hadiths
            .into_iter()
            .map(|h| Hadith {
                number: h.number,
                arabic: h.arab,
                translation: h.id,
            })
            .collect();
        (self.book.into(), hadiths)
    }
}
