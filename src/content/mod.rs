//! Bundled chapter content and search.
//!
//! # Bundle Layout
//!
//! ```text
//! <content_dir>/
//! ├── kitzur_orach_chaim-001.json
//! ├── kitzur_orach_chaim-002.json
//! └── ...                         # registry order = file name order
//! ```
//!
//! Each file holds one chapter: `{ id, chapterLabel, title, category,
//! sections: [{ id, section, text }], version }`.

pub mod chapter;
pub mod hebrew;
pub mod repository;

pub use chapter::{Chapter, Section};
pub use repository::{ContentRepository, SearchResult};
