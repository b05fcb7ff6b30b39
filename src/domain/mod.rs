pub mod doa;
pub mod hadith;
pub mod prayer;
pub mod preference;
pub mod search;
pub mod surah;

pub use doa::Doa;
pub use hadith::{Hadith, HadithBook, HadithRange};
pub use prayer::{Coordinates, Location, PrayerSchedule, QiblaBearing};
pub use preference::{ArabicFont, AyatRef, Bookmark, LastRead, Settings, SettingsPatch, SurahRef};
pub use search::{SearchResults, VerseMatch};
pub use surah::{SurahDetail, SurahLink, SurahSummary, Tafsir, TafsirEntry, Verse};
