use std::collections::HashMap;
use std::fmt::Write as _;

use chrono::{TimeZone, Utc};
use tracing::{info, warn};

use crate::app::{AppContext, Result};
use crate::domain::{
    AyatRef, Bookmark, Doa, Hadith, HadithRange, Settings, SettingsPatch, SurahDetail, SurahRef,
    Tafsir, Verse,
};
use crate::location::{resolve_location, FixedGeolocator};
use crate::qibla::{HeadingSource, LineHeadingSource, QiblaCompass};
use crate::text_utils::{contains_ignore_case, highlight};

const BISMILLAH: &str = "بِسْمِ اللّٰهِ الرَّحْمٰنِ الرَّحِيْمِ";
const MATCH_OPEN: &str = "\x1b[1;33m";
const MATCH_CLOSE: &str = "\x1b[0m";

/// Turns a failed fetch into the empty state; the failure is only logged.
fn fetched<T>(what: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to fetch {}: {}", what, e);
            None
        }
    }
}

fn mark(text: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => highlight(text, q, MATCH_OPEN, MATCH_CLOSE),
        _ => text.to_string(),
    }
}

fn format_millis(timestamp: i64) -> String {
    Utc.timestamp_millis_opt(timestamp)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub async fn list_surahs(ctx: &AppContext, filter: Option<&str>) -> Result<()> {
    if let Some(last) = ctx.preferences.last_read() {
        println!(
            "Last read: {}. {} ({})\n",
            last.surah.number,
            last.surah.latin_name,
            format_millis(last.timestamp)
        );
    }

    let surahs = fetched("surah list", ctx.source.surahs().await).unwrap_or_default();
    let query = filter.unwrap_or("");

    let visible: Vec<_> = surahs
        .iter()
        .filter(|s| {
            contains_ignore_case(&s.latin_name, query) || contains_ignore_case(&s.meaning, query)
        })
        .collect();

    if visible.is_empty() {
        println!("No surahs");
        return Ok(());
    }

    for surah in visible {
        let bookmark = ctx
            .preferences
            .bookmark_for_surah(surah.number)
            .map(|b| format!("  [bookmark: ayat {}]", b.ayat.number))
            .unwrap_or_default();
        println!(
            "{:>3}. {} ({}) - {} · {} ayat · {}{}",
            surah.number,
            surah.latin_name,
            surah.name,
            surah.meaning,
            surah.verse_count,
            surah.revelation_place,
            bookmark
        );
    }

    Ok(())
}

/// One verse block, honouring the latin/translation toggles.
pub fn render_verse(
    verse: &Verse,
    settings: &Settings,
    bookmarked: bool,
    tafsir: Option<&str>,
) -> String {
    let mut out = String::new();
    let marker = if bookmarked { " *" } else { "" };
    let _ = writeln!(out, "[{}]{}", verse.number, marker);
    let _ = writeln!(out, "{}", verse.arabic);
    if settings.show_latin {
        let _ = writeln!(out, "{}", verse.latin);
    }
    if settings.show_translation {
        let _ = writeln!(out, "{}", verse.translation);
    }
    if let Some(tafsir) = tafsir {
        let _ = writeln!(out, "\n  Tafsir ayat {}:\n  {}", verse.number, tafsir);
    }
    out
}

pub fn render_surah(
    surah: &SurahDetail,
    tafsir: Option<&Tafsir>,
    settings: &Settings,
    is_bookmarked: impl Fn(u16) -> bool,
) -> String {
    let mut out = String::new();
    let summary = &surah.summary;
    let _ = writeln!(out, "{} · {}", summary.name, summary.latin_name);
    let _ = writeln!(
        out,
        "{} · {} ayat · {}\n",
        summary.meaning, summary.verse_count, summary.revelation_place
    );
    if !summary.description.is_empty() {
        let _ = writeln!(out, "{}\n", summary.description);
    }

    if surah.shows_bismillah() {
        let _ = writeln!(out, "{}\n", BISMILLAH);
    }

    for verse in &surah.verses {
        let commentary = tafsir.and_then(|t| t.for_verse(verse.number));
        out.push_str(&render_verse(
            verse,
            settings,
            is_bookmarked(verse.number),
            commentary,
        ));
        out.push('\n');
    }

    if let Some(prev) = &surah.previous {
        let _ = writeln!(out, "← {}. {}", prev.number, prev.latin_name);
    }
    if let Some(next) = &surah.next {
        let _ = writeln!(out, "→ {}. {}", next.number, next.latin_name);
    }

    out
}

pub async fn read_surah(ctx: &mut AppContext, number: u16, with_tafsir: bool) -> Result<()> {
    let (surah, tafsir) = if with_tafsir {
        let (surah, tafsir) = tokio::join!(ctx.source.surah(number), ctx.source.tafsir(number));
        (surah, fetched("tafsir", tafsir))
    } else {
        (ctx.source.surah(number).await, None)
    };

    let Some(surah) = fetched("surah", surah) else {
        println!("Surah {} is unavailable", number);
        return Ok(());
    };

    ctx.preferences.set_last_read(surah.summary.to_ref());
    info!("Marked surah {} as last read", number);

    let preferences = &ctx.preferences;
    let rendered = render_surah(&surah, tafsir.as_ref(), preferences.settings(), |ayat| {
        preferences.is_bookmarked(number, ayat)
    });
    print!("{}", rendered);

    Ok(())
}

pub async fn show_tafsir(ctx: &AppContext, surah: u16, ayat: u16) -> Result<()> {
    let tafsir = fetched("tafsir", ctx.source.tafsir(surah).await).unwrap_or_default();

    match tafsir.for_verse(ayat) {
        Some(text) => println!("Tafsir {}:{}\n\n{}", surah, ayat, text),
        None => println!("No tafsir for {}:{}", surah, ayat),
    }

    Ok(())
}

pub async fn play(ctx: &AppContext, surah: u16, ayat: Option<u16>) -> Result<()> {
    let Some(detail) = fetched("surah", ctx.source.surah(surah).await) else {
        println!("Surah {} is unavailable", surah);
        return Ok(());
    };

    let reciter = ctx.config.reader.reciter.as_str();
    let (url, title) = match ayat {
        Some(n) => (
            detail.verse_audio(n, reciter),
            format!("{} - Ayat {}", detail.summary.latin_name, n),
        ),
        None => (
            detail.full_audio(reciter),
            format!("Full Surah {}", detail.summary.latin_name),
        ),
    };

    let Some(url) = url else {
        println!("No audio for {}", title);
        return Ok(());
    };

    println!("Playing {}\n{}", title, url);
    if let Err(e) = open::that(url) {
        warn!("Failed to open audio player: {}", e);
    }

    Ok(())
}

/// Looks the surah up so the stored reference carries its name, and checks
/// the verse exists. Prints why and returns `None` otherwise.
async fn verified_surah(ctx: &AppContext, surah: u16, ayat: u16) -> Option<SurahRef> {
    let Some(detail) = fetched("surah", ctx.source.surah(surah).await) else {
        println!("Surah {} is unavailable, bookmark not changed", surah);
        return None;
    };

    if ayat == 0 || ayat > detail.summary.verse_count {
        println!(
            "{} has {} ayat",
            detail.summary.latin_name, detail.summary.verse_count
        );
        return None;
    }

    Some(detail.summary.to_ref())
}

pub async fn add_bookmark(ctx: &mut AppContext, surah: u16, ayat: u16) -> Result<()> {
    let Some(surah_ref) = verified_surah(ctx, surah, ayat).await else {
        return Ok(());
    };
    let name = surah_ref.latin_name.clone();

    if ctx.preferences.add_bookmark(surah_ref, AyatRef::new(ayat)) {
        println!("Bookmarked {} ayat {}", name, ayat);
    } else {
        println!("Already bookmarked: {} ayat {}", name, ayat);
    }

    Ok(())
}

pub fn remove_bookmark(ctx: &mut AppContext, surah: u16, ayat: u16) -> Result<()> {
    if ctx.preferences.remove_bookmark(surah, ayat) {
        println!("Removed bookmark {}:{}", surah, ayat);
    } else {
        println!("No bookmark at {}:{}", surah, ayat);
    }
    Ok(())
}

/// Removing needs no lookup; adding goes through the same checks as `add`.
pub async fn toggle_bookmark(ctx: &mut AppContext, surah: u16, ayat: u16) -> Result<()> {
    let existing = ctx
        .preferences
        .bookmarks()
        .iter()
        .find(|b| b.matches(surah, ayat))
        .map(|b| b.surah.clone());

    let surah_ref = match existing {
        Some(surah_ref) => surah_ref,
        None => match verified_surah(ctx, surah, ayat).await {
            Some(surah_ref) => surah_ref,
            None => return Ok(()),
        },
    };
    let name = surah_ref.latin_name.clone();

    if ctx.preferences.toggle_bookmark(surah_ref, AyatRef::new(ayat)) {
        println!("Bookmarked {} ayat {}", name, ayat);
    } else {
        println!("Removed bookmark {} ayat {}", name, ayat);
    }

    Ok(())
}

pub async fn list_bookmarks(ctx: &AppContext, with_text: bool) -> Result<()> {
    let bookmarks = ctx.preferences.bookmarks();

    if bookmarks.is_empty() {
        println!("No bookmarks");
        return Ok(());
    }

    let surahs = if with_text {
        resolve_bookmarked_surahs(ctx, bookmarks).await
    } else {
        HashMap::new()
    };

    for bookmark in bookmarks {
        println!(
            "{}:{}  {} ayat {}  ({})",
            bookmark.surah.number,
            bookmark.ayat.number,
            bookmark.surah.latin_name,
            bookmark.ayat.number,
            format_millis(bookmark.timestamp)
        );
        if let Some(verse) = surahs
            .get(&bookmark.surah.number)
            .and_then(|s| s.verse(bookmark.ayat.number))
        {
            println!("    {}", verse.translation);
        }
    }

    Ok(())
}

async fn resolve_bookmarked_surahs(
    ctx: &AppContext,
    bookmarks: &[Bookmark],
) -> HashMap<u16, SurahDetail> {
    let mut numbers: Vec<u16> = Vec::new();
    for bookmark in bookmarks {
        if !numbers.contains(&bookmark.surah.number) {
            numbers.push(bookmark.surah.number);
        }
    }

    ctx.parallel_fetcher
        .fetch_surahs(numbers)
        .await
        .into_iter()
        .filter_map(|(number, result)| {
            fetched(&format!("surah {}", number), result).map(|detail| (number, detail))
        })
        .collect()
}

pub fn show_last_read(ctx: &AppContext) -> Result<()> {
    match ctx.preferences.last_read() {
        Some(last) => println!(
            "{}. {} ({})",
            last.surah.number,
            last.surah.latin_name,
            format_millis(last.timestamp)
        ),
        None => println!("Nothing read yet"),
    }
    Ok(())
}

pub fn show_settings(ctx: &AppContext) -> Result<()> {
    let settings = ctx.preferences.settings();
    println!("Arabic font:      {}", settings.arabic_font.label());
    println!("Font size:        {}px", settings.font_size);
    println!("Show translation: {}", settings.show_translation);
    println!("Show latin:       {}", settings.show_latin);
    Ok(())
}

pub fn update_settings(ctx: &mut AppContext, patch: SettingsPatch) -> Result<()> {
    if !patch.is_empty() {
        ctx.preferences.update_settings(&patch);
    }
    show_settings(ctx)
}

pub async fn list_hadith_books(ctx: &AppContext) -> Result<()> {
    let books = fetched("hadith books", ctx.source.hadith_books().await).unwrap_or_default();

    if books.is_empty() {
        println!("No hadith books");
        return Ok(());
    }

    for book in books {
        println!("{:<12} {} ({} hadith)", book.id, book.name, book.available);
    }

    Ok(())
}

/// Page to show: a numeric jump target wins, anything else falls back to `page`.
pub fn select_hadith_range(page: u32, jump: Option<&str>, page_size: u32) -> HadithRange {
    match jump.and_then(|j| j.trim().parse::<u32>().ok()) {
        Some(number) => HadithRange::containing(number, page_size),
        None => HadithRange::page(page, page_size),
    }
}

pub fn filter_hadiths<'a>(hadiths: &'a [Hadith], query: &str) -> Vec<&'a Hadith> {
    hadiths
        .iter()
        .filter(|h| {
            query.is_empty()
                || contains_ignore_case(&h.translation, query)
                || h.arabic.contains(query)
                || h.number.to_string().contains(query)
        })
        .collect()
}

pub async fn read_hadith(
    ctx: &AppContext,
    book_id: &str,
    page: u32,
    jump: Option<&str>,
    filter: Option<&str>,
) -> Result<()> {
    let range = select_hadith_range(page, jump, ctx.config.reader.hadith_page_size);

    let fetched_range = ctx.source.hadith_range(book_id, &range).await;
    let Some((book, hadiths)) = fetched("hadith range", fetched_range) else {
        println!("No hadith");
        return Ok(());
    };

    println!(
        "{} · showing {} - {} of {}\n",
        book.name, range.start, range.end, book.available
    );

    let query = filter.unwrap_or("").trim();
    let visible = filter_hadiths(&hadiths, query);
    if visible.is_empty() {
        println!("No hadith");
    }

    for hadith in visible {
        println!("No. {}", hadith.number);
        println!("{}", hadith.arabic);
        println!("{}\n", mark(&hadith.translation, Some(query)));
    }

    let available = Some(book.available).filter(|a| *a > 0);
    if let Some(prev) = range.prev() {
        println!("Previous: --page {}", prev.page_number());
    }
    if let Some(next) = range.next(available) {
        println!("Next: --page {}", next.page_number());
    }

    Ok(())
}

/// Shareable text of hadith `number`, if it is among `hadiths`.
pub fn shareable_hadith(hadiths: &[Hadith], number: u32, book_name: &str) -> Option<String> {
    hadiths
        .iter()
        .find(|h| h.number == number)
        .map(|h| h.share_text(book_name))
}

pub async fn share_hadith(ctx: &AppContext, book_id: &str, number: u32) -> Result<()> {
    let range = HadithRange::containing(number, ctx.config.reader.hadith_page_size);

    let fetched_range = ctx.source.hadith_range(book_id, &range).await;
    let Some((book, hadiths)) = fetched("hadith range", fetched_range) else {
        println!("No hadith");
        return Ok(());
    };

    match shareable_hadith(&hadiths, number, &book.name) {
        Some(text) => println!("{}", text),
        None => println!("{} has no hadith No. {}", book.name, number),
    }

    Ok(())
}

pub fn filter_doas<'a>(doas: &'a [Doa], query: &str) -> Vec<&'a Doa> {
    doas.iter()
        .filter(|d| {
            contains_ignore_case(&d.title, query) || contains_ignore_case(&d.translation, query)
        })
        .collect()
}

pub async fn list_doas(ctx: &AppContext, filter: Option<&str>) -> Result<()> {
    let doas = fetched("doa list", ctx.source.doas().await).unwrap_or_default();
    let query = filter.unwrap_or("").trim();
    let visible = filter_doas(&doas, query);

    println!("Showing {} doa\n", visible.len());

    for doa in visible {
        println!("{}", mark(&doa.title, Some(query)));
        println!("{}", doa.arabic);
        println!("{}", doa.latin);
        println!("{}\n", mark(&doa.translation, Some(query)));
    }

    Ok(())
}

pub async fn prayer_times(ctx: &AppContext, lat: Option<f64>, lon: Option<f64>) -> Result<()> {
    let location = resolve_location(
        &FixedGeolocator::new(lat, lon),
        &ctx.config.location.to_location(),
    )
    .await;
    let at = location.coordinates;
    let now = Utc::now().timestamp();

    let (schedule, qibla) = tokio::join!(
        ctx.source.prayer_times(now, at, ctx.config.prayer.method),
        ctx.source.qibla(at)
    );

    println!(
        "{} ({:.4}, {:.4})",
        location.city, at.latitude, at.longitude
    );

    match fetched("prayer times", schedule) {
        Some(schedule) => {
            println!("{} · {}\n", schedule.date_readable, schedule.timezone);
            for (name, time) in schedule.daily() {
                println!("{:<8} {}", name, time.unwrap_or("-"));
            }
        }
        None => println!("Prayer times unavailable"),
    }

    match fetched("qibla", qibla) {
        Some(qibla) => println!("\nQibla: {:.2}° from north", qibla.direction),
        None => println!("\nQibla direction unavailable"),
    }

    Ok(())
}

pub async fn qibla(ctx: &AppContext, lat: Option<f64>, lon: Option<f64>, follow: bool) -> Result<()> {
    let location = resolve_location(
        &FixedGeolocator::new(lat, lon),
        &ctx.config.location.to_location(),
    )
    .await;

    let mut compass = QiblaCompass::new();
    if let Some(bearing) = fetched("qibla", ctx.source.qibla(location.coordinates).await) {
        compass.set_bearing(bearing.direction);
        println!("Qibla: {:.2}° from north", bearing.direction);
    } else {
        println!("Qibla direction unavailable");
    }

    if !follow {
        println!("Needle: {:.1}°", compass.rotation());
        return Ok(());
    }

    let mut source = LineHeadingSource::new(std::io::BufReader::new(std::io::stdin()));
    let mut subscription = source.subscribe();

    tokio::select! {
        _ = compass.follow(&mut subscription, |rotation, status| {
            let suffix = if status.bearing_known { "" } else { " (bearing unknown)" };
            println!("Needle: {:.1}°{}", rotation, suffix);
        }) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping heading stream");
        }
    }

    subscription.unsubscribe();
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(());
    }

    let results = fetched("search results", ctx.source.search(query).await).unwrap_or_default();

    println!("Found {} matches for \"{}\"\n", results.count, query);

    for m in &results.matches {
        println!(
            "{}  {} ({})",
            m.reference(),
            m.surah_english_name,
            m.surah_name
        );
        println!("    {}", mark(&m.text, Some(query)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::normalizer::fixtures;
    use crate::normalizer::Normalizer;
    use crate::source::remote::testing::CannedFetcher;
    use crate::source::RemoteSource;
    use crate::store::MemoryStorage;

    fn context(fetcher: CannedFetcher) -> AppContext {
        let config = Config::default();
        let source = Arc::new(RemoteSource::new(Arc::new(fetcher), config.api.clone()));
        AppContext::from_parts(config, Box::new(MemoryStorage::new()), source)
    }

    fn fatihah() -> SurahDetail {
        Normalizer::new()
            .surah_detail(fixtures::SURAH_DETAIL.as_bytes())
            .unwrap()
    }

    #[test]
    fn test_render_verse_respects_toggles() {
        let surah = fatihah();
        let verse = &surah.verses[1];
        let settings = Settings {
            show_latin: false,
            ..Default::default()
        };

        let out = render_verse(verse, &settings, true, None);
        assert!(out.starts_with("[2] *\n"));
        assert!(out.contains(&verse.arabic));
        assert!(out.contains(&verse.translation));
        assert!(!out.contains(&verse.latin));
    }

    #[test]
    fn test_render_surah_bismillah_and_links() {
        let surah = fatihah();
        let out = render_surah(&surah, None, &Settings::default(), |_| false);
        // Al-Fatihah carries the basmala as its first verse
        assert!(!surah.shows_bismillah());
        assert_eq!(out.matches(surah.verses[0].arabic.as_str()).count(), 1);
        assert!(out.contains("→ 2. Al-Baqarah"));
        assert!(!out.contains('←'));
    }

    #[test]
    fn test_select_hadith_range() {
        let jumped = select_hadith_range(1, Some("55"), 20);
        assert_eq!((jumped.start, jumped.end), (41, 60));

        let ignored = select_hadith_range(2, Some("fifty"), 20);
        assert_eq!((ignored.start, ignored.end), (21, 40));

        let default = select_hadith_range(1, None, 20);
        assert_eq!((default.start, default.end), (1, 20));
    }

    #[test]
    fn test_filter_hadiths() {
        let (_, hadiths) = Normalizer::new()
            .hadith_range(fixtures::HADITH_RANGE.as_bytes())
            .unwrap();

        assert_eq!(filter_hadiths(&hadiths, "NIAT").len(), 1);
        assert_eq!(filter_hadiths(&hadiths, "2")[0].number, 2);
        assert_eq!(filter_hadiths(&hadiths, "نص").len(), 1);
        assert_eq!(filter_hadiths(&hadiths, "").len(), 2);
    }

    #[test]
    fn test_filter_doas() {
        let doas = Normalizer::new().doas(fixtures::DOAS.as_bytes()).unwrap();
        assert_eq!(filter_doas(&doas, "bangun").len(), 1);
        assert_eq!(filter_doas(&doas, "mati").len(), 1);
        assert_eq!(filter_doas(&doas, "DOA").len(), 2);
    }

    #[tokio::test]
    async fn test_read_surah_sets_last_read() {
        let mut ctx = context(
            CannedFetcher::new()
                .with("https://equran.id/api/v2/surat/1", fixtures::SURAH_DETAIL)
                .with("https://equran.id/api/v2/tafsir/1", fixtures::TAFSIR),
        );

        read_surah(&mut ctx, 1, true).await.unwrap();

        let last = ctx.preferences.last_read().unwrap();
        assert_eq!(last.surah.number, 1);
        assert_eq!(last.surah.latin_name, "Al-Fatihah");
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades() {
        let mut ctx = context(CannedFetcher::new());

        read_surah(&mut ctx, 1, false).await.unwrap();
        list_surahs(&ctx, None).await.unwrap();
        search(&ctx, "sabar").await.unwrap();
        prayer_times(&ctx, None, None).await.unwrap();

        assert!(ctx.preferences.last_read().is_none());
    }

    #[tokio::test]
    async fn test_add_bookmark_uses_surah_name() {
        let mut ctx = context(
            CannedFetcher::new().with("https://equran.id/api/v2/surat/1", fixtures::SURAH_DETAIL),
        );

        add_bookmark(&mut ctx, 1, 2).await.unwrap();
        add_bookmark(&mut ctx, 1, 2).await.unwrap();

        let bookmarks = ctx.preferences.bookmarks();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].surah.latin_name, "Al-Fatihah");

        toggle_bookmark(&mut ctx, 1, 2).await.unwrap();
        assert!(ctx.preferences.bookmarks().is_empty());
    }

    #[test]
    fn test_render_surah_shows_description() {
        let mut surah = fatihah();
        let out = render_surah(&surah, None, &Settings::default(), |_| false);
        assert!(!out.contains("induk"));

        surah.summary.description = "Surat Al Faatihah (Pembukaan) & induk Al-Qur'an".into();
        let out = render_surah(&surah, None, &Settings::default(), |_| false);
        let header: Vec<&str> = out.lines().take(4).collect();
        assert_eq!(header[3], "Surat Al Faatihah (Pembukaan) & induk Al-Qur'an");
    }

    #[test]
    fn test_shareable_hadith() {
        let (book, hadiths) = Normalizer::new()
            .hadith_range(fixtures::HADITH_RANGE.as_bytes())
            .unwrap();

        let text = shareable_hadith(&hadiths, 2, &book.name).unwrap();
        assert!(text.starts_with("نص\n\nAisyah"));
        assert!(text.ends_with("(HR. Bukhari No. 2)"));
        assert_eq!(shareable_hadith(&hadiths, 3, &book.name), None);
    }

    #[tokio::test]
    async fn test_share_hadith_fetches_containing_page() {
        let fetcher = Arc::new(CannedFetcher::new().with(
            "https://api.hadith.gading.dev/books/bukhari?range=1-20",
            fixtures::HADITH_RANGE,
        ));
        let config = Config::default();
        let source = Arc::new(RemoteSource::new(fetcher.clone(), config.api.clone()));
        let ctx = AppContext::from_parts(config, Box::new(MemoryStorage::new()), source);

        share_hadith(&ctx, "bukhari", 2).await.unwrap();
        assert_eq!(fetcher.request_count(), 1);
    }

    #[tokio::test]
    async fn test_toggle_removes_without_lookup() {
        let fetcher = Arc::new(CannedFetcher::new());
        let config = Config::default();
        let source = Arc::new(RemoteSource::new(fetcher.clone(), config.api.clone()));
        let mut ctx = AppContext::from_parts(config, Box::new(MemoryStorage::new()), source);
        ctx.preferences
            .add_bookmark(SurahRef::new(18, "Al-Kahf"), AyatRef::new(10));

        toggle_bookmark(&mut ctx, 18, 10).await.unwrap();

        assert!(ctx.preferences.bookmarks().is_empty());
        assert_eq!(fetcher.request_count(), 0);
    }

    #[tokio::test]
    async fn test_toggle_adds_with_surah_name() {
        let mut ctx = context(
            CannedFetcher::new().with("https://equran.id/api/v2/surat/1", fixtures::SURAH_DETAIL),
        );

        toggle_bookmark(&mut ctx, 1, 3).await.unwrap();
        assert!(ctx.preferences.is_bookmarked(1, 3));
        assert_eq!(ctx.preferences.bookmarks()[0].surah.latin_name, "Al-Fatihah");

        toggle_bookmark(&mut ctx, 1, 99).await.unwrap();
        assert_eq!(ctx.preferences.bookmarks().len(), 1);
    }

    #[tokio::test]
    async fn test_add_bookmark_rejects_missing_verse() {
        let mut ctx = context(
            CannedFetcher::new().with("https://equran.id/api/v2/surat/1", fixtures::SURAH_DETAIL),
        );

        add_bookmark(&mut ctx, 1, 99).await.unwrap();
        assert!(ctx.preferences.bookmarks().is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_is_silent() {
        let fetcher = Arc::new(CannedFetcher::new());
        let config = Config::default();
        let source = Arc::new(RemoteSource::new(fetcher.clone(), config.api.clone()));
        let ctx = AppContext::from_parts(config, Box::new(MemoryStorage::new()), source);

        search(&ctx, "   ").await.unwrap();
        assert_eq!(fetcher.request_count(), 0);
    }

    #[test]
    fn test_update_settings_with_empty_patch_keeps_defaults() {
        let mut ctx = context(CannedFetcher::new());
        update_settings(&mut ctx, SettingsPatch::default()).unwrap();
        assert_eq!(*ctx.preferences.settings(), Settings::default());

        update_settings(
            &mut ctx,
            SettingsPatch {
                font_size: Some(30),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(ctx.preferences.settings().font_size, 30);
    }
}
