//! Records persisted by the progress store.
//!
//! Field names are camelCase on disk so existing device data stays readable.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::content::{Chapter, Section};

/// Where the reader last stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastReadPosition {
    pub chapter_id: String,
    pub section_id: String,
    #[serde(default)]
    pub chapter_label: String,
    #[serde(default)]
    pub chapter_title: String,
    #[serde(default)]
    pub chapter_number: Option<u32>,

    /// Epoch milliseconds
    pub timestamp: i64,
}

impl LastReadPosition {
    /// Position for a section, stamped now
    pub fn for_section(chapter: &Chapter, section: &Section) -> Self {
        Self {
            chapter_id: chapter.id.clone(),
            section_id: section.id.clone(),
            chapter_label: chapter.label.clone(),
            chapter_title: chapter.title.clone(),
            chapter_number: chapter.number(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Daily study streak.
///
/// `last_date` is `YYYY-MM-DD`, empty when the streak was never updated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub count: u32,
    pub last_date: String,
}

/// A saved pointer to one section; `id` equals the section id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub chapter_id: String,
    pub section_id: String,
    pub section_number: u32,
    pub chapter_label: String,
    pub chapter_title: String,

    /// Epoch milliseconds
    pub timestamp: i64,
}

impl Bookmark {
    /// Bookmark for a section, stamped now
    pub fn for_section(chapter: &Chapter, section: &Section) -> Self {
        Self {
            id: section.id.clone(),
            chapter_id: chapter.id.clone(),
            section_id: section.id.clone(),
            section_number: section.number,
            chapter_label: chapter.label.clone(),
            chapter_title: chapter.title.clone(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Concrete color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// User theme choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Effective theme; `System` follows the platform and falls back to light
    pub fn resolve(self, system: Option<Theme>) -> Theme {
        match self {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::System => system.unwrap_or(Theme::Light),
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::System => write!(f, "system"),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Reading text size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
    Xlarge,
}

impl TextSize {
    /// Font scale relative to the base size
    pub fn multiplier(self) -> f32 {
        match self {
            TextSize::Small => 0.85,
            TextSize::Medium => 1.0,
            TextSize::Large => 1.2,
            TextSize::Xlarge => 1.4,
        }
    }
}

impl std::fmt::Display for TextSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextSize::Small => write!(f, "small"),
            TextSize::Medium => write!(f, "medium"),
            TextSize::Large => write!(f, "large"),
            TextSize::Xlarge => write!(f, "xlarge"),
        }
    }
}

/// Display preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme_mode: ThemeMode,
    pub text_size: TextSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.theme_mode, ThemeMode::System);
        assert_eq!(prefs.text_size, TextSize::Medium);
    }

    #[test]
    fn test_theme_resolution() {
        assert_eq!(ThemeMode::Dark.resolve(Some(Theme::Light)), Theme::Dark);
        assert_eq!(ThemeMode::Light.resolve(Some(Theme::Dark)), Theme::Light);
        assert_eq!(ThemeMode::System.resolve(Some(Theme::Dark)), Theme::Dark);
        assert_eq!(ThemeMode::System.resolve(None), Theme::Light);
    }

    #[test]
    fn test_text_size_serialized_names() {
        assert_eq!(serde_json::to_string(&TextSize::Xlarge).unwrap(), "\"xlarge\"");
        assert_eq!(serde_json::to_string(&ThemeMode::System).unwrap(), "\"system\"");
        assert!(TextSize::Small.multiplier() < TextSize::Xlarge.multiplier());
    }

    #[test]
    fn test_bookmark_for_section() {
        let chapter = Chapter::new("kitzur_orach_chaim-001", "פרק א", "הלכות השכמת הבוקר");
        let section = Section::new("section-2", 2, "text");

        let bookmark = Bookmark::for_section(&chapter, &section);
        assert_eq!(bookmark.id, "section-2");
        assert_eq!(bookmark.section_number, 2);
        assert_eq!(bookmark.chapter_label, "פרק א");
    }

    #[test]
    fn test_last_read_field_names() {
        let chapter = Chapter::new("kitzur_orach_chaim-003", "פרק ג", "t");
        let section = Section::new("section-1", 1, "text");

        let position = LastReadPosition::for_section(&chapter, &section);
        assert_eq!(position.chapter_number, Some(3));

        let json = serde_json::to_value(&position).unwrap();
        assert_eq!(json["chapterId"], "kitzur_orach_chaim-003");
        assert_eq!(json["sectionId"], "section-1");
    }
}
