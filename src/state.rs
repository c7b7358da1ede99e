//! App-wide reading state shared by the screens.
//!
//! `AppState` is owned by whoever drives the UI and handed to screens by
//! reference. It loads bookmarks and preferences once, serves reads from
//! its cache, and writes every change through to storage before updating
//! the cache.

use anyhow::Result;

use crate::content::{Chapter, Section};
use crate::progress::{Bookmark, ProgressStore, TextSize, Theme, ThemeMode};
use crate::storage::KeyValueStore;

pub struct AppState<S> {
    progress: ProgressStore<S>,
    bookmarks: Vec<Bookmark>,
    theme_mode: ThemeMode,
    text_size: TextSize,
}

impl<S: KeyValueStore> AppState<S> {
    /// Initialise from persisted bookmarks and preferences
    pub async fn load(progress: ProgressStore<S>) -> Result<Self> {
        let bookmarks = progress.get_bookmarks().await?;
        let prefs = progress.get_preferences().await?;

        Ok(Self {
            progress,
            bookmarks,
            theme_mode: prefs.theme_mode,
            text_size: prefs.text_size,
        })
    }

    /// The progress store backing this state
    pub fn progress(&self) -> &ProgressStore<S> {
        &self.progress
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.iter().any(|b| b.id == id)
    }

    pub async fn add_bookmark(&mut self, bookmark: Bookmark) -> Result<()> {
        self.progress.add_bookmark(bookmark).await?;
        self.refresh_bookmarks().await
    }

    pub async fn remove_bookmark(&mut self, id: &str) -> Result<()> {
        self.progress.remove_bookmark(id).await?;
        self.refresh_bookmarks().await
    }

    /// Bookmark the section, or remove its bookmark; returns the new state
    pub async fn toggle_bookmark(&mut self, chapter: &Chapter, section: &Section) -> Result<bool> {
        if self.is_bookmarked(&section.id) {
            self.remove_bookmark(&section.id).await?;
            Ok(false)
        } else {
            self.add_bookmark(Bookmark::for_section(chapter, section)).await?;
            Ok(true)
        }
    }

    /// Reload the bookmark cache from storage
    pub async fn refresh_bookmarks(&mut self) -> Result<()> {
        self.bookmarks = self.progress.get_bookmarks().await?;
        Ok(())
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub async fn set_theme_mode(&mut self, mode: ThemeMode) -> Result<()> {
        self.progress.set_theme(mode).await?;
        self.theme_mode = mode;
        Ok(())
    }

    /// Theme to render with, given the platform's current scheme
    pub fn effective_theme(&self, system: Option<Theme>) -> Theme {
        self.theme_mode.resolve(system)
    }

    pub fn text_size(&self) -> TextSize {
        self.text_size
    }

    pub async fn set_text_size(&mut self, size: TextSize) -> Result<()> {
        self.progress.set_text_size(size).await?;
        self.text_size = size;
        Ok(())
    }

    pub fn text_size_multiplier(&self) -> f32 {
        self.text_size.multiplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    async fn create_test_state() -> AppState<MemoryStore> {
        AppState::load(ProgressStore::new(MemoryStore::new()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_defaults() {
        let state = create_test_state().await;
        assert!(state.bookmarks().is_empty());
        assert_eq!(state.theme_mode(), ThemeMode::System);
        assert_eq!(state.text_size(), TextSize::Medium);
        assert_eq!(state.text_size_multiplier(), 1.0);
        assert_eq!(state.effective_theme(Some(Theme::Dark)), Theme::Dark);
    }

    #[tokio::test]
    async fn test_toggle_bookmark_writes_through() {
        let mut state = create_test_state().await;
        let chapter = Chapter::new("kitzur_orach_chaim-001", "פרק א", "הלכות השכמת הבוקר");
        let section = Section::new("section-1", 1, "צריך להתגבר");

        assert!(state.toggle_bookmark(&chapter, &section).await.unwrap());
        assert!(state.is_bookmarked("section-1"));
        assert!(state.progress().is_bookmarked("section-1").await.unwrap());

        assert!(!state.toggle_bookmark(&chapter, &section).await.unwrap());
        assert!(!state.is_bookmarked("section-1"));
        assert!(!state.progress().is_bookmarked("section-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_preferences_persist_across_loads() {
        let mut state = create_test_state().await;
        state.set_theme_mode(ThemeMode::Dark).await.unwrap();
        state.set_text_size(TextSize::Large).await.unwrap();

        let AppState { progress, .. } = state;
        let reloaded = AppState::load(progress).await.unwrap();

        assert_eq!(reloaded.theme_mode(), ThemeMode::Dark);
        assert_eq!(reloaded.effective_theme(Some(Theme::Light)), Theme::Dark);
        assert_eq!(reloaded.text_size(), TextSize::Large);
        assert_eq!(reloaded.text_size_multiplier(), 1.2);
    }
}
