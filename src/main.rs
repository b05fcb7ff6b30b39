use clap::Parser;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tilawa::app::AppContext;
use tilawa::cli::{commands, BookmarkAction, Cli, Commands, HadithAction, SettingsAction};
use tilawa::config::Config;
use tilawa::domain::SettingsPatch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Quiet by default, RUST_LOG overrides
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path.clone()),
        None => Config::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        Config::default()
    });
    if let Some(workers) = cli.workers {
        config.fetcher.workers = workers;
    }

    let mut ctx = if cli.ephemeral {
        AppContext::ephemeral(config)?
    } else {
        AppContext::new(config, cli.db)?
    };

    match cli.command {
        Commands::Surahs { filter } => {
            commands::list_surahs(&ctx, filter.as_deref()).await?;
        }
        Commands::Read { surah, tafsir } => {
            commands::read_surah(&mut ctx, surah, tafsir).await?;
        }
        Commands::Tafsir { surah, ayat } => {
            commands::show_tafsir(&ctx, surah, ayat).await?;
        }
        Commands::Play { surah, ayat } => {
            commands::play(&ctx, surah, ayat).await?;
        }
        Commands::Bookmark { action } => match action {
            BookmarkAction::Add { surah, ayat } => {
                commands::add_bookmark(&mut ctx, surah, ayat).await?;
            }
            BookmarkAction::Remove { surah, ayat } => {
                commands::remove_bookmark(&mut ctx, surah, ayat)?;
            }
            BookmarkAction::Toggle { surah, ayat } => {
                commands::toggle_bookmark(&mut ctx, surah, ayat).await?;
            }
            BookmarkAction::List { text } => {
                commands::list_bookmarks(&ctx, text).await?;
            }
        },
        Commands::LastRead => {
            commands::show_last_read(&ctx)?;
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::show_settings(&ctx)?,
            SettingsAction::Set {
                font,
                font_size,
                translation,
                latin,
            } => {
                let patch = SettingsPatch {
                    arabic_font: font,
                    font_size,
                    show_translation: translation,
                    show_latin: latin,
                };
                commands::update_settings(&mut ctx, patch)?;
            }
        },
        Commands::Hadith { action } => match action {
            HadithAction::Books => commands::list_hadith_books(&ctx).await?,
            HadithAction::Read {
                book,
                page,
                jump,
                filter,
            } => {
                commands::read_hadith(&ctx, &book, page, jump.as_deref(), filter.as_deref())
                    .await?;
            }
            HadithAction::Share { book, number } => {
                commands::share_hadith(&ctx, &book, number).await?;
            }
        },
        Commands::Doa { filter } => {
            commands::list_doas(&ctx, filter.as_deref()).await?;
        }
        Commands::Prayer { lat, lon } => {
            commands::prayer_times(&ctx, lat, lon).await?;
        }
        Commands::Qibla { lat, lon, follow } => {
            commands::qibla(&ctx, lat, lon, follow).await?;
        }
        Commands::Search { query } => {
            commands::search(&ctx, &query.join(" ")).await?;
        }
    }

    Ok(())
}
