//! Command-line interface for kitzur.
//!
//! Browses and searches the bundled chapters and manages reading
//! progress, bookmarks, and preferences from the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config;
use crate::content::hebrew::{normalize_hebrew, parse_gematria, to_gematria};
use crate::content::{Chapter, ContentRepository, Section};
use crate::progress::{LastReadPosition, ProgressStore, TextSize, ThemeMode};
use crate::state::AppState;
use crate::storage::FileStore;

/// kitzur - Kitzur Shulchan Aruch reader
#[derive(Parser, Debug)]
#[command(name = "kitzur")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all chapters
    Chapters,

    /// Show a chapter's sections
    Chapter {
        /// Chapter id, number, or Hebrew numeral (e.g. "kitzur_orach_chaim-001", "1", "א")
        chapter: String,
    },

    /// Read a section (records it as the last read position)
    Section {
        /// Section id
        section_id: String,
    },

    /// Search section text, chapter titles, and labels
    Search {
        /// Search query
        query: String,

        /// Maximum number of results to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show where you stopped reading
    Continue,

    /// Mark a chapter as completed
    Complete {
        /// Chapter id
        chapter_id: String,
    },

    /// Show completed chapters and streak
    Stats,

    /// Record today's study session for the streak
    Study,

    /// Reset reading progress
    Reset {
        /// Also remove all bookmarks
        #[arg(long)]
        bookmarks: bool,
    },

    /// Manage bookmarks
    Bookmark {
        #[command(subcommand)]
        command: BookmarkCommands,
    },

    /// Show or change display preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },

    /// Show the quote of the day
    Quote,

    /// Suggest a random chapter
    Random {
        /// Highest chapter number to draw from (defaults to the chapter count)
        #[arg(short, long)]
        max: Option<u32>,
    },

    /// Show resolved configuration (debug)
    Config,
}

#[derive(Subcommand, Debug)]
pub enum BookmarkCommands {
    /// Bookmark a section
    Add {
        /// Section id
        section_id: String,
    },

    /// Remove a bookmark
    Remove {
        /// Bookmark id (the section id)
        id: String,
    },

    /// List bookmarks
    List,
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommands {
    /// Show current preferences
    Show,

    /// Set the theme
    Theme {
        #[arg(value_enum)]
        mode: ThemeArg,
    },

    /// Set the reading text size
    TextSize {
        #[arg(value_enum)]
        size: TextSizeArg,
    },
}

/// Theme for CLI (maps to ThemeMode)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for ThemeMode {
    fn from(t: ThemeArg) -> Self {
        match t {
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::Dark => ThemeMode::Dark,
            ThemeArg::System => ThemeMode::System,
        }
    }
}

/// Text size for CLI (maps to TextSize)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TextSizeArg {
    Small,
    Medium,
    Large,
    Xlarge,
}

impl From<TextSizeArg> for TextSize {
    fn from(s: TextSizeArg) -> Self {
        match s {
            TextSizeArg::Small => TextSize::Small,
            TextSizeArg::Medium => TextSize::Medium,
            TextSizeArg::Large => TextSize::Large,
            TextSizeArg::Xlarge => TextSize::Xlarge,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Chapters => list_chapters().await,
            Commands::Chapter { chapter } => show_chapter(&chapter).await,
            Commands::Section { section_id } => read_section(&section_id).await,
            Commands::Search { query, limit } => search(&query, limit).await,
            Commands::Continue => show_last_read().await,
            Commands::Complete { chapter_id } => complete_chapter(&chapter_id).await,
            Commands::Stats => show_stats().await,
            Commands::Study => study().await,
            Commands::Reset { bookmarks } => reset(bookmarks).await,
            Commands::Bookmark { command } => execute_bookmark(command).await,
            Commands::Prefs { command } => execute_prefs(command).await,
            Commands::Quote => show_quote().await,
            Commands::Random { max } => random_chapter(max).await,
            Commands::Config => show_config().await,
        }
    }
}

/// Load the configured chapter bundle
async fn open_repository() -> Result<ContentRepository> {
    let dir = config::content_dir()?;
    ContentRepository::load_dir(&dir).await
}

/// Open the configured progress store
fn open_progress() -> Result<ProgressStore<FileStore>> {
    let prefix = config::config()?.chapter_id_prefix.clone();
    Ok(ProgressStore::new(FileStore::open_default()?).with_chapter_id_prefix(prefix))
}

async fn open_state() -> Result<AppState<FileStore>> {
    AppState::load(open_progress()?).await
}

/// Resolve a chapter by id, decimal number, or Hebrew numeral
fn resolve_chapter<'a>(repo: &'a ContentRepository, reference: &str) -> Option<&'a Chapter> {
    if let Some(chapter) = repo.get_chapter(reference) {
        return Some(chapter);
    }

    let number = reference
        .trim()
        .parse::<u32>()
        .ok()
        .or_else(|| parse_gematria(&normalize_hebrew(reference)))?;

    repo.list_chapters()
        .iter()
        .find(|c| c.number() == Some(number))
}

fn section_label(section: &Section) -> String {
    match to_gematria(section.number) {
        Some(numeral) => format!("סעיף {}", numeral),
        None => format!("סעיף {}", section.number),
    }
}

async fn list_chapters() -> Result<()> {
    let repo = open_repository().await?;
    let progress = open_progress()?;
    let completed = progress.get_completed_chapters().await?;

    if repo.chapter_count() == 0 {
        println!("No chapters found in {}", config::content_dir()?.display());
        return Ok(());
    }

    println!("{} chapters:\n", repo.chapter_count());
    for chapter in repo.list_chapters() {
        let mark = if completed.contains(&chapter.id) { "✓" } else { " " };
        println!(
            "{} {:<28} {} - {} ({} sections)",
            mark,
            chapter.id,
            chapter.label,
            chapter.title,
            chapter.sections.len()
        );
    }

    Ok(())
}

async fn show_chapter(reference: &str) -> Result<()> {
    let repo = open_repository().await?;
    let chapter = resolve_chapter(&repo, reference)
        .with_context(|| format!("Chapter not found: {}", reference))?;
    let state = open_state().await?;

    println!("{} - {}", chapter.label, chapter.title);
    if !chapter.category.is_empty() {
        println!("{}", chapter.category);
    }
    if state.progress().is_chapter_completed(&chapter.id).await? {
        println!("(completed)");
    }
    println!();

    for section in &chapter.sections {
        let mark = if state.is_bookmarked(&section.id) { "★" } else { " " };
        println!("{} [{}] {}", mark, section.id, section_label(section));
        println!("  {}\n", section.text);
    }

    Ok(())
}

async fn read_section(section_id: &str) -> Result<()> {
    let repo = open_repository().await?;
    let (chapter, section) = repo
        .find_section_by_id(section_id)
        .with_context(|| format!("Section not found: {}", section_id))?;

    let progress = open_progress()?;
    progress
        .save_last_read(&LastReadPosition::for_section(chapter, section))
        .await?;

    println!("{} - {}", chapter.label, chapter.title);
    println!("{}\n", section_label(section));
    println!("{}", section.text);

    Ok(())
}

async fn search(query: &str, limit: usize) -> Result<()> {
    let repo = open_repository().await?;
    let results = repo.search_content(query);

    if results.is_empty() {
        println!("No results for: {}", query);
        return Ok(());
    }

    println!("{} results for: {}\n", results.len(), query);
    for result in results.iter().take(limit) {
        println!(
            "[{:>2}] {} - {} / {} ({})",
            result.match_score,
            result.chapter.label,
            result.chapter.title,
            section_label(result.section),
            result.section.id
        );
        println!("     {}\n", result.section.text);
    }

    if results.len() > limit {
        println!("... and {} more", results.len() - limit);
    }

    Ok(())
}

async fn show_last_read() -> Result<()> {
    let progress = open_progress()?;

    match progress.get_last_read().await? {
        Some(position) => {
            println!(
                "Continue reading: {} - {} ({})",
                position.chapter_label, position.chapter_title, position.section_id
            );
            println!("  kitzur section {}", position.section_id);
        }
        None => println!("Nothing read yet. Start with `kitzur chapters`."),
    }

    Ok(())
}

async fn complete_chapter(chapter_id: &str) -> Result<()> {
    let repo = open_repository().await?;
    if repo.chapter_count() > 0 && repo.get_chapter(chapter_id).is_none() {
        anyhow::bail!("Chapter not found: {}", chapter_id);
    }

    let progress = open_progress()?;
    if progress.mark_chapter_completed(chapter_id).await? {
        println!("Marked {} as completed", chapter_id);
    } else {
        println!("{} was already completed", chapter_id);
    }

    Ok(())
}

async fn show_stats() -> Result<()> {
    let repo = open_repository().await?;
    let progress = open_progress()?;

    let completed = progress.get_completed_count().await?;
    let streak = progress.get_streak().await?;

    println!("Completed: {} / {} chapters", completed, repo.chapter_count());
    if streak.last_date.is_empty() {
        println!("Streak:    0 days");
    } else {
        println!("Streak:    {} days (last: {})", streak.count, streak.last_date);
    }

    Ok(())
}

async fn study() -> Result<()> {
    let progress = open_progress()?;
    let streak = progress.update_streak().await?;
    println!("Streak: {} days", streak.count);
    Ok(())
}

async fn reset(bookmarks: bool) -> Result<()> {
    let progress = open_progress()?;
    progress.reset_all_progress().await?;
    if bookmarks {
        progress.clear_bookmarks().await?;
        println!("Reading progress and bookmarks reset");
    } else {
        println!("Reading progress reset");
    }
    Ok(())
}

async fn execute_bookmark(command: BookmarkCommands) -> Result<()> {
    let mut state = open_state().await?;

    match command {
        BookmarkCommands::Add { section_id } => {
            let repo = open_repository().await?;
            let (chapter, section) = repo
                .find_section_by_id(&section_id)
                .with_context(|| format!("Section not found: {}", section_id))?;

            if state.is_bookmarked(&section.id) {
                println!("Already bookmarked: {}", section.id);
            } else {
                state.toggle_bookmark(chapter, section).await?;
                println!("Bookmarked {} - {}", chapter.label, section_label(section));
            }
        }
        BookmarkCommands::Remove { id } => {
            if state.is_bookmarked(&id) {
                state.remove_bookmark(&id).await?;
                println!("Removed bookmark: {}", id);
            } else {
                println!("No bookmark with id: {}", id);
            }
        }
        BookmarkCommands::List => {
            let bookmarks = state.bookmarks();
            if bookmarks.is_empty() {
                println!("No bookmarks");
            } else {
                println!("{} bookmarks:\n", bookmarks.len());
                for bookmark in bookmarks {
                    println!(
                        "  {:<16} {} - {} / סעיף {}",
                        bookmark.id,
                        bookmark.chapter_label,
                        bookmark.chapter_title,
                        bookmark.section_number
                    );
                }
            }
        }
    }

    Ok(())
}

async fn execute_prefs(command: PrefsCommands) -> Result<()> {
    let mut state = open_state().await?;

    match command {
        PrefsCommands::Show => {
            println!(
                "Theme:     {} (effective: {})",
                state.theme_mode(),
                state.effective_theme(None)
            );
            println!(
                "Text size: {} (x{:.2})",
                state.text_size(),
                state.text_size_multiplier()
            );
        }
        PrefsCommands::Theme { mode } => {
            state.set_theme_mode(mode.into()).await?;
            println!("Theme set to {}", state.theme_mode());
        }
        PrefsCommands::TextSize { size } => {
            state.set_text_size(size.into()).await?;
            println!("Text size set to {}", state.text_size());
        }
    }

    Ok(())
}

async fn show_quote() -> Result<()> {
    let quote = open_progress()?.get_daily_quote();
    println!("{}", quote.text);
    println!("  ({})", quote.source);
    Ok(())
}

async fn random_chapter(max: Option<u32>) -> Result<()> {
    let progress = open_progress()?;
    let max = match max {
        Some(max) => max,
        None => {
            let count = open_repository().await?.chapter_count();
            u32::try_from(count).unwrap_or(u32::MAX).max(1)
        }
    };

    println!("{}", progress.get_random_halacha_id(max));
    Ok(())
}

async fn show_config() -> Result<()> {
    let config = config::config()?;

    println!("Home:            {}", config.home.display());
    println!("Content:         {}", config.content.display());
    println!("Progress store:  {}", config.progress_path().display());
    println!("Chapter prefix:  {}", config.chapter_id_prefix);
    match &config.config_file {
        Some(path) => println!("Config file:     {}", path.display()),
        None => println!("Config file:     (none, using defaults)"),
    }

    Ok(())
}
