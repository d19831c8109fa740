//! Highlighted verse ranges.

use crate::keys::StoreKeys;
use crate::kv::{KeyValueStore, read_json, write_json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub id: Uuid,
    pub book_name: String,
    pub chapter: u32,
    pub verse_start: u32,
    pub verse_end: u32,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone)]
pub struct HighlightStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl HighlightStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, keys: &StoreKeys) -> Self {
        Self {
            kv,
            key: keys.highlights(),
        }
    }

    /// Stored highlights in insertion order; unreadable storage reads as empty.
    pub fn all(&self) -> Vec<Highlight> {
        read_json(self.kv.as_ref(), &self.key)
            .unwrap_or_else(|err| {
                warn!(key = %self.key, "Ignoring unreadable highlights: {err}");
                None
            })
            .unwrap_or_default()
    }

    pub fn add(
        &self,
        book_name: &str,
        chapter: u32,
        verse_start: u32,
        verse_end: u32,
        text: &str,
    ) -> Highlight {
        let highlight = Highlight {
            id: Uuid::new_v4(),
            book_name: book_name.to_string(),
            chapter,
            verse_start: verse_start.min(verse_end),
            verse_end: verse_start.max(verse_end),
            text: text.to_string(),
            timestamp: Utc::now(),
        };
        let mut highlights = self.all();
        highlights.push(highlight.clone());
        self.save(&highlights);
        debug!(
            book = %book_name,
            chapter,
            verses = %format!("{}-{}", highlight.verse_start, highlight.verse_end),
            "Added highlight"
        );
        highlight
    }

    pub fn remove(&self, id: Uuid) {
        let mut highlights = self.all();
        highlights.retain(|highlight| highlight.id != id);
        self.save(&highlights);
    }

    pub fn for_chapter(&self, book_name: &str, chapter: u32) -> Vec<Highlight> {
        self.all()
            .into_iter()
            .filter(|highlight| highlight.book_name == book_name && highlight.chapter == chapter)
            .collect()
    }

    fn save(&self, highlights: &[Highlight]) {
        if let Err(err) = write_json(self.kv.as_ref(), &self.key, highlights) {
            warn!(key = %self.key, "Failed to persist highlights: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[test]
    fn filters_by_chapter_and_removes_by_id() {
        let store = HighlightStore::new(Arc::new(MemoryStore::new()), &StoreKeys::default());
        let a = store.add("John", 3, 16, 17, "For God so loved the world");
        store.add("John", 4, 1, 1, "Now Jesus learned");
        let c = store.add("John", 3, 5, 3, "Truly, truly");

        let chapter: Vec<Uuid> = store.for_chapter("John", 3).iter().map(|h| h.id).collect();
        assert_eq!(chapter, vec![a.id, c.id]);
        assert_eq!((c.verse_start, c.verse_end), (3, 5));

        store.remove(a.id);
        store.remove(Uuid::new_v4());
        assert_eq!(store.for_chapter("John", 3).len(), 1);
        assert_eq!(store.all().len(), 2);
    }
}
