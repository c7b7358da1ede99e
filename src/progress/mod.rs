//! On-device reading state.
//!
//! Everything the user accumulates while reading lives here: last read
//! position, completed chapters, the daily streak, bookmarks, and display
//! preferences. All of it is persisted through a
//! [`KeyValueStore`](crate::storage::KeyValueStore).

pub mod daily;
pub mod store;
pub mod types;

pub use daily::DailyQuote;
pub use store::{ProgressStore, DEFAULT_CHAPTER_ID_PREFIX};
pub use types::{Bookmark, LastReadPosition, Preferences, Streak, TextSize, Theme, ThemeMode};
