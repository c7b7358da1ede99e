//! Read-only repository over the bundled chapter registry.
//!
//! The registry is loaded once and never mutated, so every lookup is a
//! synchronous scan over borrowed data.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info, warn};

use super::chapter::{Chapter, Section};

/// Score contributed when the section text contains the query
pub const TEXT_MATCH_SCORE: u32 = 10;

/// Score contributed when the chapter title contains the query
pub const TITLE_MATCH_SCORE: u32 = 5;

/// Score contributed when the chapter label contains the query
pub const LABEL_MATCH_SCORE: u32 = 3;

/// A single search hit, borrowed from the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult<'a> {
    pub chapter: &'a Chapter,
    pub section: &'a Section,
    pub match_score: u32,
}

/// The fixed universe of chapters for one content bundle
#[derive(Debug, Clone, Default)]
pub struct ContentRepository {
    chapters: Vec<Chapter>,
}

impl ContentRepository {
    /// Build a repository from an in-memory registry, keeping its order
    pub fn from_chapters(chapters: Vec<Chapter>) -> Self {
        Self { chapters }
    }

    /// Load every `*.json` chapter file in `dir`, ordered by file name.
    ///
    /// A missing directory yields an empty repository. Files that fail to
    /// parse are skipped; producing a well-formed bundle is the packaging
    /// step's job.
    pub async fn load_dir(dir: &Path) -> Result<Self> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %dir.display(), "content directory not found, registry is empty");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read content directory: {}", dir.display())
                });
            }
        };

        let mut paths = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut chapters = Vec::with_capacity(paths.len());
        for path in paths {
            let content = fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read chapter file: {}", path.display()))?;

            match serde_json::from_str::<Chapter>(&content) {
                Ok(chapter) => {
                    debug!(id = %chapter.id, sections = chapter.sections.len(), "loaded chapter");
                    chapters.push(chapter);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping malformed chapter file");
                }
            }
        }

        info!(chapters = chapters.len(), path = %dir.display(), "content registry loaded");
        Ok(Self::from_chapters(chapters))
    }

    /// All chapters in registry order
    pub fn list_chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Look up a chapter by exact id
    pub fn get_chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Find the first section with this id, scanning chapters in registry order
    pub fn find_section_by_id(&self, section_id: &str) -> Option<(&Chapter, &Section)> {
        self.chapters
            .iter()
            .find_map(|c| c.section(section_id).map(|s| (c, s)))
    }

    /// Number of chapters in the registry
    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Chapter ids in registry order
    pub fn chapter_ids(&self) -> Vec<&str> {
        self.chapters.iter().map(|c| c.id.as_str()).collect()
    }

    /// Substring search over section text, chapter title, and chapter label.
    ///
    /// The query is trimmed and lowercased; an empty query yields no results.
    /// Results are ordered by descending score, ties keeping scan order.
    pub fn search_content(&self, query: &str) -> Vec<SearchResult<'_>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();

        for chapter in &self.chapters {
            let title = chapter.title.to_lowercase();
            let label = chapter.label.to_lowercase();

            let mut chapter_score = 0;
            if title.contains(&needle) {
                chapter_score += TITLE_MATCH_SCORE;
            }
            if label.contains(&needle) {
                chapter_score += LABEL_MATCH_SCORE;
            }

            for section in &chapter.sections {
                let mut score = chapter_score;
                if section.text.to_lowercase().contains(&needle) {
                    score += TEXT_MATCH_SCORE;
                }

                if score > 0 {
                    results.push(SearchResult {
                        chapter,
                        section,
                        match_score: score,
                    });
                }
            }
        }

        // Stable: equal scores keep scan order
        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        debug!(query = %needle, hits = results.len(), "search complete");
        results
    }
}
