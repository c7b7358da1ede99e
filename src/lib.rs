//! kitzur - Reader core for the Kitzur Shulchan Aruch
//!
//! Two independent components back the reading app:
//!
//! - A read-only content repository over the bundled chapters, with
//!   lookup by id and a substring relevance search
//! - A progress store that persists last read position, completed
//!   chapters, the daily streak, bookmarks, and display preferences
//!   through an asynchronous key-value store
//!
//! # Modules
//!
//! - `content`: Chapters, sections, search, Hebrew numerals
//! - `storage`: Key-value persistence (memory and JSON file backends)
//! - `progress`: Reading state over storage
//! - `state`: Cached app-wide state handed to the UI layer
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Browse and search
//! kitzur chapters
//! kitzur search "נטילת ידים"
//!
//! # Read a section and pick up later
//! kitzur section section-1
//! kitzur continue
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod progress;
pub mod state;
pub mod storage;

// Re-export main types at crate root for convenience
pub use content::{Chapter, ContentRepository, SearchResult, Section};
pub use progress::{
    Bookmark, DailyQuote, LastReadPosition, Preferences, ProgressStore, Streak, TextSize, Theme,
    ThemeMode,
};
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
