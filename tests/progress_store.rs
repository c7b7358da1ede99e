//! Progress Store Integration Tests
//!
//! Tests for completion idempotency, streak transitions, reset, and
//! bookmarks over both storage backends.

use chrono::NaiveDate;
use kitzur::{
    AppState, Bookmark, Chapter, ContentRepository, FileStore, KeyValueStore, LastReadPosition,
    MemoryStore, ProgressStore, Section, Streak, TextSize, ThemeMode,
};
use tempfile::TempDir;

fn sample_repository() -> ContentRepository {
    ContentRepository::from_chapters(vec![
        Chapter::new("kitzur_orach_chaim-001", "פרק א", "הלכות השכמת הבוקר")
            .with_section(Section::new("section-1", 1, "צריך להתגבר כארי"))
            .with_section(Section::new("section-2", 2, "כשמתלבש יכוון")),
    ])
}

async fn exercise_progress<S: KeyValueStore>(progress: &ProgressStore<S>) {
    let repo = sample_repository();
    let (chapter, section) = repo.find_section_by_id("section-2").unwrap();

    // Navigation records last read
    progress
        .save_last_read(&LastReadPosition::for_section(chapter, section))
        .await
        .unwrap();
    let last = progress.get_last_read().await.unwrap().unwrap();
    assert_eq!(last.chapter_id, "kitzur_orach_chaim-001");
    assert_eq!(last.section_id, "section-2");
    assert_eq!(last.chapter_number, Some(1));

    // Completion is idempotent
    for _ in 0..3 {
        progress.mark_chapter_completed(&chapter.id).await.unwrap();
    }
    assert_eq!(progress.get_completed_count().await.unwrap(), 1);

    // Streak counts distinct days
    let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    progress.update_streak_on(day).await.unwrap();
    progress.update_streak_on(day).await.unwrap();
    assert_eq!(progress.get_streak().await.unwrap().count, 1);
    progress.update_streak_on(day.succ_opt().unwrap()).await.unwrap();
    assert_eq!(progress.get_streak().await.unwrap().count, 2);

    // Bookmarks
    let bookmark = Bookmark::for_section(chapter, section);
    progress.add_bookmark(bookmark.clone()).await.unwrap();
    assert!(progress.is_bookmarked(&bookmark.id).await.unwrap());
    progress.remove_bookmark(&bookmark.id).await.unwrap();
    assert!(!progress.is_bookmarked(&bookmark.id).await.unwrap());
    progress.remove_bookmark("no-such-bookmark").await.unwrap();

    // Reset
    progress.reset_all_progress().await.unwrap();
    assert!(progress.get_last_read().await.unwrap().is_none());
    assert_eq!(progress.get_completed_count().await.unwrap(), 0);
    assert_eq!(progress.get_streak().await.unwrap(), Streak::default());
}

#[tokio::test]
async fn test_progress_over_memory_store() {
    let progress = ProgressStore::new(MemoryStore::new());
    exercise_progress(&progress).await;
}

#[tokio::test]
async fn test_progress_over_file_store() {
    let temp = TempDir::new().unwrap();
    let progress = ProgressStore::new(FileStore::new(temp.path().join("progress.json")));
    exercise_progress(&progress).await;
}

#[tokio::test]
async fn test_progress_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("progress.json");

    {
        let progress = ProgressStore::new(FileStore::new(path.clone()));
        progress.mark_chapter_completed("kitzur_orach_chaim-001").await.unwrap();
        progress.set_text_size(TextSize::Small).await.unwrap();
        progress.update_streak().await.unwrap();
    }

    let progress = ProgressStore::new(FileStore::new(path));
    assert!(progress
        .is_chapter_completed("kitzur_orach_chaim-001")
        .await
        .unwrap());
    assert_eq!(progress.get_text_size().await.unwrap(), TextSize::Small);

    // Same local day as the write above
    progress.update_streak().await.unwrap();
    assert_eq!(progress.get_streak().await.unwrap().count, 1);
}

#[tokio::test]
async fn test_app_state_initialises_from_store() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("progress.json");
    let repo = sample_repository();
    let (chapter, section) = repo.find_section_by_id("section-1").unwrap();

    let progress = ProgressStore::new(FileStore::new(path.clone()));
    progress
        .add_bookmark(Bookmark::for_section(chapter, section))
        .await
        .unwrap();
    progress.set_theme(ThemeMode::Dark).await.unwrap();

    let mut state = AppState::load(ProgressStore::new(FileStore::new(path)))
        .await
        .unwrap();
    assert!(state.is_bookmarked("section-1"));
    assert_eq!(state.theme_mode(), ThemeMode::Dark);

    state.remove_bookmark("section-1").await.unwrap();
    assert!(state.bookmarks().is_empty());
    assert!(!progress.is_bookmarked("section-1").await.unwrap());
}

#[test]
fn test_daily_quote_and_random_id() {
    let progress = ProgressStore::new(MemoryStore::new());

    let quote = progress.get_daily_quote();
    assert!(!quote.text.is_empty());
    assert_eq!(progress.get_daily_quote(), quote);

    let ids: std::collections::HashSet<String> =
        (0..10).map(|_| progress.get_random_halacha_id(221)).collect();
    assert!(ids.len() > 1);
    assert!(ids.iter().all(|id| id.starts_with("kitzur_orach_chaim-")));
}
