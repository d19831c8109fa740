//! Where to resume reading.
//!
//! Three kinds of state live here: the last location the reader visited that
//! is not bookmarked (for a "return to where you were" jump), the last known
//! reading position overall, and a scroll offset for every chapter visited.

use crate::bookmark::BookmarkStore;
use crate::error::StoreResult;
use crate::keys::StoreKeys;
use crate::kv::{KeyValueStore, read_json, write_json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationPosition {
    pub book_name: String,
    pub chapter: u32,
    pub scroll_position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPosition {
    pub book_name: String,
    pub chapter: u32,
    pub scroll_position: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone)]
pub struct NavigationPositionStore {
    kv: Arc<dyn KeyValueStore>,
    bookmarks: BookmarkStore,
    keys: StoreKeys,
}

impl NavigationPositionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, bookmarks: BookmarkStore, keys: &StoreKeys) -> Self {
        Self {
            kv,
            bookmarks,
            keys: keys.clone(),
        }
    }

    /// Remember (book, chapter, scroll) unless that chapter is bookmarked.
    ///
    /// The check happens only here; a location bookmarked later is still
    /// returned by [`Self::last_non_bookmark`].
    pub fn save_last_non_bookmark(&self, book_name: &str, chapter: u32, scroll_position: f64) {
        if self.bookmarks.exists(book_name, chapter) {
            trace!(book = %book_name, chapter, "Bookmarked location; not saved as last position");
            return;
        }
        let position = NavigationPosition {
            book_name: book_name.to_string(),
            chapter,
            scroll_position: finite_or_zero(scroll_position),
        };
        self.write(&self.keys.last_non_bookmark_position(), &position);
    }

    pub fn try_last_non_bookmark(&self) -> StoreResult<Option<NavigationPosition>> {
        read_json(self.kv.as_ref(), &self.keys.last_non_bookmark_position())
    }

    pub fn last_non_bookmark(&self) -> Option<NavigationPosition> {
        self.try_last_non_bookmark().unwrap_or_else(|err| {
            warn!("Ignoring unreadable last position: {err}");
            None
        })
    }

    pub fn clear_last_non_bookmark(&self) {
        self.remove(&self.keys.last_non_bookmark_position());
    }

    pub fn save_chapter_scroll(&self, book_name: &str, chapter: u32, scroll_position: f64) {
        let scroll_position = finite_or_zero(scroll_position);
        self.write(&self.keys.chapter_scroll(book_name, chapter), &scroll_position);
    }

    /// Saved offset for the chapter, `0.0` when nothing usable is stored.
    pub fn chapter_scroll(&self, book_name: &str, chapter: u32) -> f64 {
        let key = self.keys.chapter_scroll(book_name, chapter);
        match read_json::<f64>(self.kv.as_ref(), &key) {
            Ok(value) => value.unwrap_or(0.0),
            Err(err) => {
                warn!(%key, "Ignoring unreadable scroll offset: {err}");
                0.0
            }
        }
    }

    pub fn clear_chapter_scroll(&self, book_name: &str, chapter: u32) {
        self.remove(&self.keys.chapter_scroll(book_name, chapter));
    }

    /// Record the reader settling on a chapter.
    ///
    /// Writes the last reading position and the per-chapter offset.
    pub fn save_reading_position(&self, book_name: &str, chapter: u32, scroll_position: f64) {
        let scroll_position = finite_or_zero(scroll_position);
        let position = ReadingPosition {
            book_name: book_name.to_string(),
            chapter,
            scroll_position,
            timestamp: Utc::now(),
        };
        self.write(&self.keys.reading_position(), &position);
        self.save_chapter_scroll(book_name, chapter, scroll_position);
        debug!(book = %book_name, chapter, scroll_position, "Saved reading position");
    }

    pub fn reading_position(&self) -> Option<ReadingPosition> {
        let key = self.keys.reading_position();
        read_json(self.kv.as_ref(), &key).unwrap_or_else(|err| {
            warn!(%key, "Ignoring unreadable reading position: {err}");
            None
        })
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(err) = write_json(self.kv.as_ref(), key, value) {
            warn!(%key, "Failed to persist navigation state: {err}");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = self.kv.remove(key) {
            warn!(%key, "Failed to clear navigation state: {err}");
        }
    }
}

/// JSON has no encoding for NaN or infinity, so those offsets are stored as `0.0`.
fn finite_or_zero(scroll_position: f64) -> f64 {
    if scroll_position.is_finite() {
        scroll_position
    } else {
        warn!(scroll_position, "Non-finite scroll offset stored as 0");
        0.0
    }
}
