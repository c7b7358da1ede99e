//! Chapter and section types as they appear in the bundled content.

use serde::{Deserialize, Serialize};

/// A numbered paragraph of text within a chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Identifier, unique within its chapter
    pub id: String,

    /// 1-based section number
    #[serde(rename = "section")]
    pub number: u32,

    /// Section body
    pub text: String,
}

impl Section {
    pub fn new(id: impl Into<String>, number: u32, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            number,
            text: text.into(),
        }
    }
}

/// A top-level content unit (a siman) holding its sections in reading order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Globally unique identifier (e.g. `kitzur_orach_chaim-001`)
    pub id: String,

    /// Display ordinal (e.g. `פרק א`)
    #[serde(rename = "chapterLabel")]
    pub label: String,

    /// Human-readable title
    pub title: String,

    /// Grouping such as `אורח חיים`
    #[serde(default)]
    pub category: String,

    /// Sections in canonical reading order
    pub sections: Vec<Section>,

    /// Content format version
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    1
}

impl Chapter {
    /// Create a chapter with no sections
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            title: title.into(),
            category: String::new(),
            sections: Vec::new(),
            version: default_version(),
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Append a section
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Numeric ordinal parsed from the trailing digits of the id.
    ///
    /// `kitzur_orach_chaim-012` yields `Some(12)`; ids without a numeric
    /// suffix yield `None`.
    pub fn number(&self) -> Option<u32> {
        let digits: String = self
            .id
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        digits.parse().ok()
    }

    /// Get a section by its id
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }
}
