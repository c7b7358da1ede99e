//! Reading progress, bookmarks, and preferences over a key-value store.

use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::daily::{self, DailyQuote};
use super::types::{Bookmark, LastReadPosition, Preferences, Streak, TextSize, ThemeMode};
use crate::storage::{get_as, set_as, KeyValueStore, StorageError};

/// Storage keys owned by the progress store
pub mod keys {
    pub const LAST_READ: &str = "@kitzur/last_read";
    pub const COMPLETED_CHAPTERS: &str = "@kitzur/completed_chapters";
    pub const STREAK: &str = "@kitzur/streak";
    pub const BOOKMARKS: &str = "@kitzur/bookmarks";
    pub const THEME: &str = "@kitzur/theme";
    pub const TEXT_SIZE: &str = "@kitzur/text_size";
}

/// Default prefix for generated chapter ids
pub const DEFAULT_CHAPTER_ID_PREFIX: &str = "kitzur_orach_chaim";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// User reading state persisted through a [`KeyValueStore`]
pub struct ProgressStore<S> {
    store: S,
    chapter_id_prefix: String,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            chapter_id_prefix: DEFAULT_CHAPTER_ID_PREFIX.to_string(),
        }
    }

    /// Use a different prefix for ids produced by `get_random_halacha_id`
    pub fn with_chapter_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.chapter_id_prefix = prefix.into();
        self
    }

    /// The underlying store
    pub fn storage(&self) -> &S {
        &self.store
    }

    // Last read

    pub async fn save_last_read(&self, position: &LastReadPosition) -> Result<(), StorageError> {
        set_as(&self.store, keys::LAST_READ, position).await?;
        debug!(chapter = %position.chapter_id, section = %position.section_id, "saved last read");
        Ok(())
    }

    pub async fn get_last_read(&self) -> Result<Option<LastReadPosition>, StorageError> {
        get_as(&self.store, keys::LAST_READ).await
    }

    // Completed chapters

    /// Chapter ids marked completed, in the order they were first marked
    pub async fn get_completed_chapters(&self) -> Result<Vec<String>, StorageError> {
        Ok(get_as(&self.store, keys::COMPLETED_CHAPTERS)
            .await?
            .unwrap_or_default())
    }

    /// Mark a chapter completed; returns `false` if it already was
    pub async fn mark_chapter_completed(&self, chapter_id: &str) -> Result<bool, StorageError> {
        let mut completed = self.get_completed_chapters().await?;
        if completed.iter().any(|id| id == chapter_id) {
            return Ok(false);
        }

        completed.push(chapter_id.to_string());
        set_as(&self.store, keys::COMPLETED_CHAPTERS, &completed).await?;
        info!(chapter = chapter_id, total = completed.len(), "chapter completed");
        Ok(true)
    }

    pub async fn is_chapter_completed(&self, chapter_id: &str) -> Result<bool, StorageError> {
        let completed = self.get_completed_chapters().await?;
        Ok(completed.iter().any(|id| id == chapter_id))
    }

    pub async fn get_completed_count(&self) -> Result<usize, StorageError> {
        Ok(self.get_completed_chapters().await?.len())
    }

    // Streak

    /// Current streak, `{0, ""}` when never updated
    pub async fn get_streak(&self) -> Result<Streak, StorageError> {
        Ok(get_as(&self.store, keys::STREAK).await?.unwrap_or_default())
    }

    /// Count today's study session
    pub async fn update_streak(&self) -> Result<Streak, StorageError> {
        self.update_streak_on(Local::now().date_naive()).await
    }

    /// Count a study session on `date`.
    ///
    /// A second call on the same date is a no-op. Any other date adds one;
    /// missed days do not reset the count.
    pub async fn update_streak_on(&self, date: NaiveDate) -> Result<Streak, StorageError> {
        let mut streak = self.get_streak().await?;
        let today = date.format(DATE_FORMAT).to_string();

        if streak.last_date == today {
            return Ok(streak);
        }

        streak.count += 1;
        streak.last_date = today;
        set_as(&self.store, keys::STREAK, &streak).await?;
        debug!(count = streak.count, date = %streak.last_date, "streak updated");
        Ok(streak)
    }

    /// Clear last read position, completed chapters, and streak.
    ///
    /// Bookmarks and preferences are kept; see [`Self::clear_bookmarks`].
    pub async fn reset_all_progress(&self) -> Result<(), StorageError> {
        self.store.remove(keys::LAST_READ).await?;
        self.store.remove(keys::COMPLETED_CHAPTERS).await?;
        self.store.remove(keys::STREAK).await?;
        info!("reading progress reset");
        Ok(())
    }

    // Bookmarks

    /// Bookmarks in insertion order
    pub async fn get_bookmarks(&self) -> Result<Vec<Bookmark>, StorageError> {
        Ok(get_as(&self.store, keys::BOOKMARKS).await?.unwrap_or_default())
    }

    /// Add a bookmark, replacing one with the same id in place
    pub async fn add_bookmark(&self, bookmark: Bookmark) -> Result<(), StorageError> {
        let mut bookmarks = self.get_bookmarks().await?;
        match bookmarks.iter_mut().find(|b| b.id == bookmark.id) {
            Some(existing) => *existing = bookmark,
            None => bookmarks.push(bookmark),
        }
        set_as(&self.store, keys::BOOKMARKS, &bookmarks).await
    }

    /// Remove a bookmark; unknown ids are ignored
    pub async fn remove_bookmark(&self, id: &str) -> Result<(), StorageError> {
        let mut bookmarks = self.get_bookmarks().await?;
        let before = bookmarks.len();
        bookmarks.retain(|b| b.id != id);

        if bookmarks.len() != before {
            set_as(&self.store, keys::BOOKMARKS, &bookmarks).await?;
        }
        Ok(())
    }

    pub async fn is_bookmarked(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.get_bookmarks().await?.iter().any(|b| b.id == id))
    }

    pub async fn clear_bookmarks(&self) -> Result<(), StorageError> {
        self.store.remove(keys::BOOKMARKS).await?;
        info!("bookmarks cleared");
        Ok(())
    }

    // Preferences

    pub async fn get_theme(&self) -> Result<ThemeMode, StorageError> {
        self.get_or_default(keys::THEME).await
    }

    pub async fn set_theme(&self, mode: ThemeMode) -> Result<(), StorageError> {
        set_as(&self.store, keys::THEME, &mode).await
    }

    pub async fn get_text_size(&self) -> Result<TextSize, StorageError> {
        self.get_or_default(keys::TEXT_SIZE).await
    }

    pub async fn set_text_size(&self, size: TextSize) -> Result<(), StorageError> {
        set_as(&self.store, keys::TEXT_SIZE, &size).await
    }

    pub async fn get_preferences(&self) -> Result<Preferences, StorageError> {
        Ok(Preferences {
            theme_mode: self.get_theme().await?,
            text_size: self.get_text_size().await?,
        })
    }

    /// Read a value, falling back to the default when absent or unrecognised
    async fn get_or_default<T>(&self, key: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        match self.store.get(key).await? {
            None => Ok(T::default()),
            Some(value) => Ok(serde_json::from_value(value.clone()).unwrap_or_else(|_| {
                warn!(key, %value, "unrecognised stored value, using default");
                T::default()
            })),
        }
    }

    // Home screen helpers

    /// Quote of the day (local calendar date)
    pub fn get_daily_quote(&self) -> DailyQuote {
        daily::daily_quote_for(Local::now().date_naive())
    }

    /// Id of a uniformly chosen chapter in `[1, max_id]`
    pub fn get_random_halacha_id(&self, max_id: u32) -> String {
        daily::chapter_id(&self.chapter_id_prefix, daily::random_number(max_id))
    }
}
