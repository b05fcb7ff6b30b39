use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

pub const MIN_FONT_SIZE: u32 = 18;
pub const MAX_FONT_SIZE: u32 = 48;
pub const FONT_SIZE_STEP: u32 = 2;
pub const DEFAULT_FONT_SIZE: u32 = 24;

/// Surah identity as carried inside bookmarks and the last-read marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahRef {
    #[serde(rename = "nomor")]
    pub number: u16,
    #[serde(rename = "namaLatin")]
    pub latin_name: String,
}

impl SurahRef {
    pub fn new(number: u16, latin_name: impl Into<String>) -> Self {
        Self {
            number,
            latin_name: latin_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AyatRef {
    #[serde(rename = "nomorAyat")]
    pub number: u16,
}

impl AyatRef {
    pub fn new(number: u16) -> Self {
        Self { number }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub surah: SurahRef,
    pub ayat: AyatRef,
    /// Epoch milliseconds at insertion.
    pub timestamp: i64,
}

impl Bookmark {
    pub fn new(surah: SurahRef, ayat: AyatRef) -> Self {
        Self {
            surah,
            ayat,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn matches(&self, surah_number: u16, ayat_number: u16) -> bool {
        self.surah.number == surah_number && self.ayat.number == ayat_number
    }

    pub fn key(&self) -> (u16, u16) {
        (self.surah.number, self.ayat.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastRead {
    pub surah: SurahRef,
    pub timestamp: i64,
}

impl LastRead {
    pub fn now(surah: SurahRef) -> Self {
        Self {
            surah,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ArabicFont {
    #[default]
    #[serde(rename = "LPMQ")]
    #[value(name = "lpmq")]
    Lpmq,
    #[serde(rename = "Amiri")]
    #[value(name = "amiri")]
    Amiri,
    #[serde(rename = "Uthmani")]
    #[value(name = "uthmani")]
    Uthmani,
}

impl ArabicFont {
    pub fn label(&self) -> &'static str {
        match self {
            ArabicFont::Lpmq => "LPMQ",
            ArabicFont::Amiri => "Amiri",
            ArabicFont::Uthmani => "Uthmani",
        }
    }
}

/// Display settings.
///
/// Missing fields decode to their defaults and the font size is clamped into
/// [`MIN_FONT_SIZE`, `MAX_FONT_SIZE`] whenever it is read from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub arabic_font: ArabicFont,
    #[serde(deserialize_with = "deserialize_font_size")]
    pub font_size: u32,
    pub show_translation: bool,
    pub show_latin: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arabic_font: ArabicFont::default(),
            font_size: DEFAULT_FONT_SIZE,
            show_translation: true,
            show_latin: true,
        }
    }
}

impl Settings {
    pub fn clamp_font_size(size: u32) -> u32 {
        size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }

    /// Shallow merge; fields absent from the patch are left unchanged.
    pub fn merge(&mut self, patch: &SettingsPatch) {
        if let Some(font) = patch.arabic_font {
            self.arabic_font = font;
        }
        if let Some(size) = patch.font_size {
            self.font_size = size;
        }
        if let Some(show) = patch.show_translation {
            self.show_translation = show;
        }
        if let Some(show) = patch.show_latin {
            self.show_latin = show;
        }
    }
}

fn deserialize_font_size<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    // Stored values may be negative or fractional if written by another client.
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Ok(DEFAULT_FONT_SIZE);
    }
    let clamped = raw.round().clamp(MIN_FONT_SIZE as f64, MAX_FONT_SIZE as f64);
    Ok(clamped as u32)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub arabic_font: Option<ArabicFont>,
    pub font_size: Option<u32>,
    pub show_translation: Option<bool>,
    pub show_latin: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_serializes_with_stored_field_names() {
        let bookmark = Bookmark {
            surah: SurahRef::new(2, "Al-Baqarah"),
            ayat: AyatRef::new(5),
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&bookmark).unwrap();
        assert_eq!(json["surah"]["nomor"], 2);
        assert_eq!(json["surah"]["namaLatin"], "Al-Baqarah");
        assert_eq!(json["ayat"]["nomorAyat"], 5);
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = Settings {
            arabic_font: ArabicFont::Uthmani,
            font_size: 36,
            show_translation: false,
            show_latin: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_settings_wire_format() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["arabicFont"], "LPMQ");
        assert_eq!(json["fontSize"], 24);
        assert_eq!(json["showTranslation"], true);
        assert_eq!(json["showLatin"], true);
    }

    #[test]
    fn test_settings_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"showLatin": false}"#).unwrap();
        assert!(!settings.show_latin);
        assert_eq!(settings.font_size, DEFAULT_FONT_SIZE);
        assert!(settings.show_translation);
        assert_eq!(settings.arabic_font, ArabicFont::Lpmq);
    }

    #[test]
    fn test_settings_font_size_clamped_on_decode() {
        let large: Settings = serde_json::from_str(r#"{"fontSize": 90}"#).unwrap();
        assert_eq!(large.font_size, MAX_FONT_SIZE);

        let small: Settings = serde_json::from_str(r#"{"fontSize": -4}"#).unwrap();
        assert_eq!(small.font_size, MIN_FONT_SIZE);
    }

    #[test]
    fn test_merge_only_touches_present_fields() {
        let mut settings = Settings::default();
        settings.merge(&SettingsPatch {
            show_latin: Some(false),
            ..Default::default()
        });
        assert!(!settings.show_latin);
        assert_eq!(settings.font_size, DEFAULT_FONT_SIZE);
        assert!(settings.show_translation);
        assert_eq!(settings.arabic_font, ArabicFont::Lpmq);
    }

    #[test]
    fn test_empty_patch() {
        assert!(SettingsPatch::default().is_empty());
        assert!(!SettingsPatch {
            font_size: Some(30),
            ..Default::default()
        }
        .is_empty());
    }
}
