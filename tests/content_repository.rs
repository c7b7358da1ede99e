//! Content Repository Integration Tests
//!
//! Tests for bundle loading, lookups, and search ordering.

use kitzur::content::repository::{LABEL_MATCH_SCORE, TEXT_MATCH_SCORE, TITLE_MATCH_SCORE};
use kitzur::{Chapter, ContentRepository, Section};
use proptest::prelude::*;
use tempfile::TempDir;

fn scenario_repository() -> ContentRepository {
    ContentRepository::from_chapters(vec![Chapter::new("c1", "פרק א", "הלכות השכמת הבוקר")
        .with_section(Section::new("s1", 1, "צריך להתגבר"))])
}

#[test]
fn test_single_chapter_scenario() {
    let repo = scenario_repository();

    let chapter = repo.get_chapter("c1").unwrap();
    assert_eq!(chapter.sections.len(), 1);

    let (chapter, section) = repo.find_section_by_id("s1").unwrap();
    assert_eq!(chapter.id, "c1");
    assert_eq!(section.id, "s1");

    let results = repo.search_content("להתגבר");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].section.id, "s1");
    assert_eq!(results[0].match_score, 10);
}

#[test]
fn test_get_chapter_returns_every_listed_chapter() {
    let repo = ContentRepository::from_chapters(vec![
        Chapter::new("siman-001", "פרק א", "א"),
        Chapter::new("siman-002", "פרק ב", "ב"),
        Chapter::new("siman-003", "פרק ג", "ג"),
    ]);

    for chapter in repo.list_chapters() {
        assert_eq!(repo.get_chapter(&chapter.id), Some(chapter));
    }
    assert!(repo.get_chapter("nonexistent").is_none());
}

#[tokio::test]
async fn test_load_dir_orders_by_file_name_and_skips_bad_files() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let second = Chapter::new("kitzur_orach_chaim-002", "פרק ב", "סדר נטילת ידים")
        .with_section(Section::new("section-1", 1, "נטילת ידים שחרית"));
    let first = Chapter::new("kitzur_orach_chaim-001", "פרק א", "הלכות השכמת הבוקר")
        .with_category("אורח חיים")
        .with_section(Section::new("section-1", 1, "צריך להתגבר כארי"));

    std::fs::write(
        dir.join("kitzur_orach_chaim-002.json"),
        serde_json::to_string(&second).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.join("kitzur_orach_chaim-001.json"),
        serde_json::to_string(&first).unwrap(),
    )
    .unwrap();
    std::fs::write(dir.join("broken.json"), "{ not json").unwrap();
    std::fs::write(dir.join("README.md"), "ignored").unwrap();

    let repo = ContentRepository::load_dir(dir).await.unwrap();

    assert_eq!(
        repo.chapter_ids(),
        vec!["kitzur_orach_chaim-001", "kitzur_orach_chaim-002"]
    );
    assert_eq!(repo.get_chapter("kitzur_orach_chaim-001"), Some(&first));
}

#[tokio::test]
async fn test_load_missing_dir_is_empty() {
    let temp = TempDir::new().unwrap();
    let repo = ContentRepository::load_dir(&temp.path().join("missing"))
        .await
        .unwrap();

    assert_eq!(repo.chapter_count(), 0);
    assert!(repo.search_content("anything").is_empty());
    assert!(repo.find_section_by_id("section-1").is_none());
}

#[tokio::test]
async fn test_load_dir_on_a_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("chapters.json");
    std::fs::write(&file, "[]").unwrap();

    assert!(ContentRepository::load_dir(&file).await.is_err());
}

#[test]
fn test_search_combined_score() {
    let repo = ContentRepository::from_chapters(vec![Chapter::new(
        "c1",
        "שבת",
        "הלכות שבת",
    )
    .with_section(Section::new("s1", 1, "שמירת שבת"))]);

    let results = repo.search_content("שבת");
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].match_score,
        TEXT_MATCH_SCORE + TITLE_MATCH_SCORE + LABEL_MATCH_SCORE
    );
}

/// Build a small registry from generated section texts
fn build_repository(texts: &[Vec<String>]) -> ContentRepository {
    let chapters = texts
        .iter()
        .enumerate()
        .map(|(c, sections)| {
            sections.iter().enumerate().fold(
                Chapter::new(format!("c{}", c), format!("l{}", c % 3), format!("t{}", c % 2)),
                |chapter, (s, text)| {
                    chapter.with_section(Section::new(
                        format!("s{}", s),
                        s as u32 + 1,
                        text.clone(),
                    ))
                },
            )
        })
        .collect();
    ContentRepository::from_chapters(chapters)
}

proptest! {
    /// Property: results are sorted by score and ties keep scan order
    #[test]
    fn search_is_stably_sorted(
        texts in prop::collection::vec(prop::collection::vec("[abt0-2 ]{0,8}", 0..5), 0..5),
        query in "[abt0-2]{1,2}",
    ) {
        let repo = build_repository(&texts);
        let results = repo.search_content(&query);

        // Scan position of each result
        let positions: Vec<(usize, usize)> = results
            .iter()
            .map(|r| {
                let c = repo.list_chapters().iter().position(|ch| ch.id == r.chapter.id).unwrap();
                let s = repo.list_chapters()[c]
                    .sections
                    .iter()
                    .position(|sec| sec.id == r.section.id)
                    .unwrap();
                (c, s)
            })
            .collect();

        for i in 1..results.len() {
            prop_assert!(results[i - 1].match_score >= results[i].match_score);
            if results[i - 1].match_score == results[i].match_score {
                prop_assert!(positions[i - 1] < positions[i]);
            }
        }
        prop_assert!(results.iter().all(|r| r.match_score > 0));
    }

    /// Property: any verbatim substring of a section's text is found
    #[test]
    fn verbatim_text_is_found(
        text in "[a-z ]{3,20}",
        start in 0usize..3,
        len in 1usize..4,
    ) {
        let needle: String = text.chars().skip(start).take(len).collect();
        prop_assume!(!needle.trim().is_empty());

        let repo = build_repository(&[vec![text.clone()]]);
        let results = repo.search_content(&needle);

        prop_assert!(!results.is_empty());
        prop_assert!(results.iter().all(|r| r.match_score > 0));
    }
}
