//! The bookmark the reader is currently reading from.
//!
//! A full snapshot of the record is stored, not just its id. As the reader
//! pages forward the bookmark follows along: its location moves to the new
//! chapter while its id, color and slot in the list stay put.

use crate::bookmark::{BookmarkRecord, BookmarkStore};
use crate::error::StoreResult;
use crate::keys::StoreKeys;
use crate::kv::{KeyValueStore, read_json, write_json};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct CurrentBookmarkTracker {
    kv: Arc<dyn KeyValueStore>,
    bookmarks: BookmarkStore,
    key: String,
}

impl CurrentBookmarkTracker {
    pub fn new(kv: Arc<dyn KeyValueStore>, bookmarks: BookmarkStore, keys: &StoreKeys) -> Self {
        Self {
            kv,
            bookmarks,
            key: keys.current_bookmark(),
        }
    }

    /// Store `bookmark` as current, or forget the current one when `None`.
    pub fn set(&self, bookmark: Option<&BookmarkRecord>) {
        match bookmark {
            Some(record) => {
                if let Err(err) = write_json(self.kv.as_ref(), &self.key, record) {
                    warn!(key = %self.key, "Failed to persist current bookmark: {err}");
                } else {
                    debug!(id = %record.id, short_name = %record.short_name, "Set current bookmark");
                }
            }
            None => self.clear(),
        }
    }

    pub fn try_get(&self) -> StoreResult<Option<BookmarkRecord>> {
        read_json(self.kv.as_ref(), &self.key)
    }

    pub fn get(&self) -> Option<BookmarkRecord> {
        self.try_get().unwrap_or_else(|err| {
            warn!(key = %self.key, "Ignoring unreadable current bookmark: {err}");
            None
        })
    }

    pub fn clear(&self) {
        if let Err(err) = self.kv.remove(&self.key) {
            warn!(key = %self.key, "Failed to clear current bookmark: {err}");
        }
    }

    /// Move the current bookmark to (book, chapter) after the reader navigated there.
    ///
    /// Does nothing when no bookmark is current, when it no longer exists in
    /// the collection, when it already points at the location, or when another
    /// bookmark already holds the location. Returns the moved record.
    pub fn update_if_needed(&self, book_name: &str, chapter: u32) -> Option<BookmarkRecord> {
        let current = self.get()?;
        let all = self.bookmarks.all();
        let Some(stored) = all.iter().find(|record| record.id == current.id) else {
            debug!(id = %current.id, "Current bookmark no longer stored");
            return None;
        };
        if stored.is_at(book_name, chapter) {
            return None;
        }
        if let Some(other) = all
            .iter()
            .find(|record| record.id != stored.id && record.is_at(book_name, chapter))
        {
            debug!(
                book = %book_name,
                chapter,
                holder = %other.id,
                "Location already bookmarked; current bookmark left in place"
            );
            return None;
        }

        let moved = BookmarkRecord {
            id: stored.id,
            book_name: book_name.to_string(),
            chapter,
            short_name: self.bookmarks.short_name_for(book_name, chapter),
            color_hex: stored.color_hex.clone(),
            created_at: stored.created_at,
            order_index: stored.order_index,
        };
        if !self.bookmarks.replace(stored.id, &moved) {
            return None;
        }
        self.set(Some(&moved));
        info!(
            id = %moved.id,
            from = %stored.short_name,
            to = %moved.short_name,
            "Advanced current bookmark"
        );
        Some(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::kv::MemoryStore;
    use crate::palette::ColorAssigner;

    fn fixture() -> (Arc<MemoryStore>, BookmarkStore, CurrentBookmarkTracker) {
        let kv = Arc::new(MemoryStore::new());
        let keys = StoreKeys::default();
        let bookmarks = BookmarkStore::new(
            kv.clone(),
            Arc::new(Catalog::builtin()),
            Arc::new(ColorAssigner::seeded(5)),
            &keys,
        );
        let tracker = CurrentBookmarkTracker::new(kv.clone(), bookmarks.clone(), &keys);
        (kv, bookmarks, tracker)
    }

    #[test]
    fn set_get_clear_round_trip() {
        let (_, bookmarks, tracker) = fixture();
        assert_eq!(tracker.get(), None);

        let record = bookmarks.add("Romans", 8);
        tracker.set(Some(&record));
        assert_eq!(tracker.get(), Some(record));

        tracker.set(None);
        assert_eq!(tracker.get(), None);

        tracker.set(Some(&bookmarks.add("Romans", 9)));
        tracker.clear();
        assert_eq!(tracker.get(), None);
    }

    #[test]
    fn update_if_needed_moves_bookmark_in_place() {
        let (_, bookmarks, tracker) = fixture();
        bookmarks.add("Genesis", 1);
        bookmarks.add("Exodus", 1);
        let mark = bookmarks.add("Mark", 1);
        assert_eq!(mark.order_index, 2);
        tracker.set(Some(&mark));

        let moved = tracker.update_if_needed("Mark", 4).expect("bookmark moved");

        let current = tracker.get().expect("current bookmark");
        assert_eq!(current, moved);
        assert_eq!(current.id, mark.id);
        assert_eq!(current.book_name, "Mark");
        assert_eq!(current.chapter, 4);
        assert_eq!(current.short_name, "Mark 4");
        assert_eq!(current.color_hex, mark.color_hex);
        assert_eq!(current.order_index, 2);
        assert_eq!(current.created_at, mark.created_at);

        let all = bookmarks.all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2], current);
        assert!(!bookmarks.exists("Mark", 1));
    }

    #[test]
    fn update_if_needed_without_current_is_noop() {
        let (_, bookmarks, tracker) = fixture();
        let before = vec![bookmarks.add("Mark", 1)];

        assert_eq!(tracker.update_if_needed("Mark", 2), None);
        assert_eq!(bookmarks.all(), before);
        assert_eq!(tracker.get(), None);
    }

    #[test]
    fn update_if_needed_ignores_deleted_current() {
        let (_, bookmarks, tracker) = fixture();
        let record = bookmarks.add("Mark", 1);
        tracker.set(Some(&record));
        bookmarks.delete(record.id);

        assert_eq!(tracker.update_if_needed("Mark", 2), None);
        assert!(bookmarks.all().is_empty());
        assert_eq!(tracker.get(), Some(record));
    }

    #[test]
    fn update_if_needed_never_duplicates_a_location() {
        let (_, bookmarks, tracker) = fixture();
        let first = bookmarks.add("John", 1);
        bookmarks.add("John", 2);
        tracker.set(Some(&first));

        assert_eq!(tracker.update_if_needed("John", 2), None);
        assert_eq!(tracker.update_if_needed("John", 1), None);

        let locations: Vec<u32> = bookmarks.all().iter().map(|r| r.chapter).collect();
        assert_eq!(locations, vec![1, 2]);
        assert_eq!(tracker.get(), Some(first));
    }

    #[test]
    fn corrupt_snapshot_reads_as_absent() {
        let (kv, _, tracker) = fixture();
        kv.set("lectern.current_bookmark", "\"oops\"".to_string())
            .expect("seed");

        assert_eq!(tracker.get(), None);
        assert!(tracker.try_get().is_err());
        assert_eq!(tracker.update_if_needed("Mark", 2), None);
    }
}
