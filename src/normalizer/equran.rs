use serde::Deserialize;

use crate::app::{Result, TilawaError};
use crate::domain::surah::{AudioRefs, SURAH_COUNT};
use crate::domain::{SurahDetail, SurahLink, SurahSummary, Tafsir, TafsirEntry, Verse};
use crate::text_utils::clean_markup;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawSurah {
    nomor: u16,
    #[serde(default)]
    nama: String,
    #[serde(default)]
    nama_latin: String,
    #[serde(default)]
    jumlah_ayat: u16,
    #[serde(default)]
    tempat_turun: String,
    #[serde(default)]
    arti: String,
    #[serde(default)]
    deskripsi: String,
    #[serde(default)]
    audio_full: AudioRefs,
}

impl RawSurah {
    pub(super) fn into_summary(self) -> SurahSummary {
        SurahSummary {
            number: self.nomor,
            name: self.nama,
            latin_name: self.nama_latin,
            verse_count: self.jumlah_ayat,
            revelation_place: self.tempat_turun,
            meaning: self.arti,
            description: clean_markup(&self.deskripsi),
            full_audio: self.audio_full,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAyat {
    nomor_ayat: u16,
    #[serde(default)]
    teks_arab: String,
    #[serde(default)]
    teks_latin: String,
    #[serde(default)]
    teks_indonesia: String,
    #[serde(default)]
    audio: AudioRefs,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLinkedSurah {
    nomor: u16,
    #[serde(default)]
    nama_latin: String,
    #[serde(default)]
    jumlah_ayat: u16,
}

/// The neighbour links are `false` at either end of the mushaf.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLink {
    Surah(RawLinkedSurah),
    Absent(bool),
}

impl RawLink {
    fn into_link(self) -> Option<SurahLink> {
        match self {
            RawLink::Surah(s) => Some(SurahLink {
                number: s.nomor,
                latin_name: s.nama_latin,
                verse_count: s.jumlah_ayat,
            }),
            RawLink::Absent(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawSurahDetail {
    #[serde(flatten)]
    surah: RawSurah,
    #[serde(default)]
    ayat: Vec<RawAyat>,
    #[serde(default)]
    surat_selanjutnya: Option<RawLink>,
    #[serde(default)]
    surat_sebelumnya: Option<RawLink>,
}

impl RawSurahDetail {
    pub(super) fn into_detail(self) -> Result<SurahDetail> {
        if !(1..=SURAH_COUNT).contains(&self.surah.nomor) {
            return Err(TilawaError::NotFound(format!("surah {}", self.surah.nomor)));
        }

        let verses = self
            .ayat
            .into_iter()
            .map(|a| Verse {
                number: a.nomor_ayat,
                arabic: a.teks_arab,
                latin: a.teks_latin,
                translation: a.teks_indonesia,
                audio: a.audio,
            })
            .collect();

        Ok(SurahDetail {
            summary: self.surah.into_summary(),
            verses,
            previous: self.surat_sebelumnya.and_then(RawLink::into_link),
            next: self.surat_selanjutnya.and_then(RawLink::into_link),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawTafsirEntry {
    ayat: u16,
    #[serde(default)]
    teks: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawTafsir {
    nomor: u16,
    #[serde(default)]
    tafsir: Vec<RawTafsirEntry>,
}

impl RawTafsir {
    pub(super) fn into_tafsir(self) -> Tafsir {
        Tafsir {
            surah_number: self.nomor,
            entries: self
                .tafsir
                .into_iter()
                .map(|t| TafsirEntry {
                    verse: t.ayat,
                    text: t.teks,
                })
                .collect(),
        }
    }
}
