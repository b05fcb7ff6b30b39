pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::preference::{FONT_SIZE_STEP, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::domain::surah::SURAH_COUNT;
use crate::domain::ArabicFont;

#[derive(Parser)]
#[command(name = "tilawa")]
#[command(about = "Read the Qur'an, hadith and daily prayers from the terminal", long_about = None)]
pub struct Cli {
    /// Number of parallel workers for batch lookups (overrides the config file)
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Path to the preferences database
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Path to an alternative config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep bookmarks and settings in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all surahs
    Surahs {
        /// Only show surahs whose latin name or meaning contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Read a surah and mark it as last read
    Read {
        #[arg(value_parser = surah_number)]
        surah: u16,
        /// Show the tafsir under every verse
        #[arg(long)]
        tafsir: bool,
    },
    /// Show the tafsir of a single verse
    Tafsir {
        #[arg(value_parser = surah_number)]
        surah: u16,
        ayat: u16,
    },
    /// Open the recitation of a surah or a single verse
    Play {
        #[arg(value_parser = surah_number)]
        surah: u16,
        /// Verse to play instead of the full surah
        #[arg(long)]
        ayat: Option<u16>,
    },
    /// Manage bookmarks
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },
    /// Show the last surah opened
    LastRead,
    /// Show or change display settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Browse hadith collections
    Hadith {
        #[command(subcommand)]
        action: HadithAction,
    },
    /// List daily prayers (doa)
    Doa {
        /// Only show doa whose title or translation contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Prayer times and qibla direction for a location
    Prayer {
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Qibla needle rotation, optionally following headings read from stdin
    Qibla {
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Read one heading per line from stdin (degrees, or a JSON
        /// orientation event) and print the needle rotation for each
        #[arg(short, long)]
        follow: bool,
    },
    /// Full-text verse search
    Search {
        /// Search terms
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum BookmarkAction {
    /// Bookmark a verse
    Add {
        #[arg(value_parser = surah_number)]
        surah: u16,
        ayat: u16,
    },
    /// Remove a bookmark
    Remove {
        #[arg(value_parser = surah_number)]
        surah: u16,
        ayat: u16,
    },
    /// Add the bookmark if missing, remove it otherwise
    Toggle {
        #[arg(value_parser = surah_number)]
        surah: u16,
        ayat: u16,
    },
    /// List bookmarks, newest first
    List {
        /// Fetch and show the translation of every bookmarked verse
        #[arg(long)]
        text: bool,
    },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings
    Show,
    /// Change one or more settings
    Set {
        #[arg(long, value_enum)]
        font: Option<ArabicFont>,
        /// Arabic font size in px (18-48, even numbers)
        #[arg(long, value_parser = font_size)]
        font_size: Option<u32>,
        #[arg(long)]
        translation: Option<bool>,
        #[arg(long)]
        latin: Option<bool>,
    },
}

#[derive(Subcommand)]
pub enum HadithAction {
    /// List the available collections
    Books,
    /// Read a page of a collection
    Read {
        /// Collection id, e.g. bukhari
        book: String,
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Jump to the page containing this hadith number
        #[arg(short, long)]
        jump: Option<String>,
        /// Only show hadith on this page containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Print one hadith as plain text for sharing
    Share {
        /// Collection id, e.g. bukhari
        book: String,
        /// Hadith number within the collection
        number: u32,
    },
}

fn surah_number(value: &str) -> Result<u16, String> {
    let number: u16 = value
        .parse()
        .map_err(|_| format!("`{}` is not a surah number", value))?;
    if (1..=SURAH_COUNT).contains(&number) {
        Ok(number)
    } else {
        Err(format!("surah must be between 1 and {}", SURAH_COUNT))
    }
}

fn font_size(value: &str) -> Result<u32, String> {
    let size: u32 = value
        .parse()
        .map_err(|_| format!("`{}` is not a font size", value))?;
    if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) || size % FONT_SIZE_STEP != 0 {
        return Err(format!(
            "font size must be an even number between {} and {}",
            MIN_FONT_SIZE, MAX_FONT_SIZE
        ));
    }
    Ok(size)
}
