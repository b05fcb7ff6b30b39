//! # Tilawa
//!
//! A terminal Qur'an reader with hadith, doa, prayer times and a qibla compass.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Source → CLI
//!                                  ↕
//!                          PreferenceStore → Storage
//! ```
//!
//! - [`fetcher`]: HTTP client and bounded parallel lookups
//! - [`normalizer`]: Decodes upstream JSON envelopes into domain models
//! - [`source`]: One async facade over every content API
//! - [`store`]: Bookmarks, last read and settings with write-through persistence
//! - [`qibla`]: Needle rotation from a qibla bearing and a device heading stream
//!
//! ## Quick Start
//!
//! ```bash
//! # Read Al-Kahf with tafsir
//! tilawa read 18 --tafsir
//!
//! # Bookmark a verse
//! tilawa bookmark add 2 255
//!
//! # Prayer times for the configured location
//! tilawa prayer
//!
//! # Follow headings piped in from a sensor
//! sensor-feed | tilawa qibla --follow
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together preferences,
/// the content source and the parallel fetcher.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/tilawa/config.toml`, supporting:
/// - API base URLs
/// - Default location and calculation method
/// - Reciter and hadith page size
pub mod config;

/// Core domain models.
///
/// - [`Bookmark`](domain::Bookmark), [`LastRead`](domain::LastRead) and
///   [`Settings`](domain::Settings): persisted reader preferences
/// - [`SurahDetail`](domain::SurahDetail), [`Hadith`](domain::Hadith),
///   [`Doa`](domain::Doa): fetched content
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for raw fetches
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): Concurrent surah lookups with semaphore
pub mod fetcher;

/// Device location lookup with fallback to a configured default.
pub mod location;

/// Upstream JSON decoding.
pub mod normalizer;

/// Qibla needle computation and heading streams.
pub mod qibla;

/// Content APIs behind one trait.
pub mod source;

/// Preference persistence.
///
/// - [`Storage`](store::Storage): Key-value trait
/// - [`SqliteStorage`](store::SqliteStorage) and [`MemoryStorage`](store::MemoryStorage)
/// - [`PreferenceStore`](store::PreferenceStore): In-memory state with write-through
pub mod store;

pub mod text_utils;
