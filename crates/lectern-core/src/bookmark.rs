//! User bookmarks: an ordered set of colored ribbons, one per (book, chapter).
//!
//! The whole collection is stored as a single JSON array. Every mutation
//! reads it, changes it and writes it back, so callers must serialize writes
//! themselves if more than one thread can mutate bookmarks.

use crate::catalog::ScriptureLookup;
use crate::error::StoreResult;
use crate::keys::StoreKeys;
use crate::kv::{KeyValueStore, read_json, write_json};
use crate::palette::ColorAssigner;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRecord {
    pub id: Uuid,
    pub book_name: String,
    pub chapter: u32,
    pub short_name: String,
    pub color_hex: String,
    pub created_at: DateTime<Utc>,
    pub order_index: i64,
}

impl BookmarkRecord {
    pub fn is_at(&self, book_name: &str, chapter: u32) -> bool {
        self.book_name == book_name && self.chapter == chapter
    }
}

/// Display label such as `"Ezr 3"`.
///
/// Uses the catalog abbreviation when the book is known, else the first three
/// characters of the name. Either way the first character is uppercased and
/// the rest lowercased.
pub fn derive_short_name(catalog: &dyn ScriptureLookup, book_name: &str, chapter: u32) -> String {
    let abbreviation = catalog
        .book_by_name(book_name)
        .map(|book| book.abbreviation.trim())
        .filter(|abbreviation| !abbreviation.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| book_name.chars().take(3).collect());
    format!("{} {chapter}", capitalize(&abbreviation))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[derive(Clone)]
pub struct BookmarkStore {
    kv: Arc<dyn KeyValueStore>,
    catalog: Arc<dyn ScriptureLookup>,
    colors: Arc<ColorAssigner>,
    key: String,
}

impl BookmarkStore {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        catalog: Arc<dyn ScriptureLookup>,
        colors: Arc<ColorAssigner>,
        keys: &StoreKeys,
    ) -> Self {
        Self {
            kv,
            catalog,
            colors,
            key: keys.bookmarks(),
        }
    }

    /// Stored bookmarks ascending by order index, surfacing storage errors.
    pub fn try_all(&self) -> StoreResult<Vec<BookmarkRecord>> {
        let mut records: Vec<BookmarkRecord> =
            read_json(self.kv.as_ref(), &self.key)?.unwrap_or_default();
        records.sort_by_key(|record| record.order_index);
        Ok(records)
    }

    /// Stored bookmarks ascending by order index. Unreadable storage reads as empty.
    pub fn all(&self) -> Vec<BookmarkRecord> {
        self.try_all().unwrap_or_else(|err| {
            warn!(key = %self.key, "Ignoring unreadable bookmarks: {err}");
            Vec::new()
        })
    }

    pub fn exists(&self, book_name: &str, chapter: u32) -> bool {
        self.all()
            .iter()
            .any(|record| record.is_at(book_name, chapter))
    }

    pub fn find(&self, id: Uuid) -> Option<BookmarkRecord> {
        self.all().into_iter().find(|record| record.id == id)
    }

    pub fn short_name_for(&self, book_name: &str, chapter: u32) -> String {
        derive_short_name(self.catalog.as_ref(), book_name, chapter)
    }

    /// Bookmark (book, chapter) with a random brown ribbon.
    ///
    /// Adding a location that is already bookmarked returns the existing
    /// record untouched.
    pub fn add(&self, book_name: &str, chapter: u32) -> BookmarkRecord {
        self.add_with_color(book_name, chapter, None)
    }

    pub fn add_with_color(
        &self,
        book_name: &str,
        chapter: u32,
        color_hex: Option<&str>,
    ) -> BookmarkRecord {
        let mut records = self.all();
        if let Some(existing) = records.iter().find(|record| record.is_at(book_name, chapter)) {
            debug!(book = %book_name, chapter, id = %existing.id, "Bookmark already exists");
            return existing.clone();
        }

        let next = records
            .iter()
            .map(|record| record.order_index)
            .max()
            .map_or(Some(0), |max| max.checked_add(1));
        let order_index = match next {
            Some(index) => index,
            None => {
                warn!(
                    count = records.len(),
                    "Bookmark order indices exhausted; renumbering"
                );
                // `all` returns records sorted, so renumbering keeps the order.
                for (position, record) in records.iter_mut().enumerate() {
                    record.order_index = position as i64;
                }
                records.len() as i64
            }
        };
        let record = BookmarkRecord {
            id: Uuid::new_v4(),
            book_name: book_name.to_string(),
            chapter,
            short_name: self.short_name_for(book_name, chapter),
            color_hex: color_hex
                .map(str::to_string)
                .unwrap_or_else(|| self.colors.random_brown_shade()),
            created_at: Utc::now(),
            order_index,
        };
        info!(
            book = %book_name,
            chapter,
            id = %record.id,
            order_index,
            "Added bookmark"
        );
        records.push(record.clone());
        self.save(&records);
        record
    }

    /// Remove the bookmark with `id`; unknown ids are ignored.
    pub fn delete(&self, id: Uuid) {
        let mut records = self.all();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            debug!(%id, "Delete skipped; bookmark not found");
            return;
        }
        info!(%id, "Deleted bookmark");
        self.save(&records);
    }

    /// Recolor the bookmark with `id`; unknown ids are ignored.
    pub fn update_color(&self, id: Uuid, color_hex: &str) {
        let mut records = self.all();
        match records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.color_hex = color_hex.to_string();
                debug!(%id, color = %color_hex, "Updated bookmark color");
                self.save(&records);
            }
            None => debug!(%id, "Color update skipped; bookmark not found"),
        }
    }

    /// Re-derive every order index from the position of its record in `ordered`.
    pub fn reorder(&self, ordered: &[BookmarkRecord]) {
        self.reorder_ids(ordered.iter().map(|record| record.id));
    }

    /// Order indices become 0-based positions in `ids`.
    ///
    /// Matching is by id against the stored set. Ids not stored are skipped;
    /// stored bookmarks missing from `ids` keep their relative order after the
    /// listed ones.
    pub fn reorder_ids(&self, ids: impl IntoIterator<Item = Uuid>) {
        let mut records = self.all();
        let mut positions: HashMap<Uuid, usize> = HashMap::new();
        let mut listed = 0usize;
        for id in ids {
            positions.entry(id).or_insert(listed);
            listed += 1;
        }

        let mut trailing = listed;
        for record in records.iter_mut() {
            let position = match positions.get(&record.id) {
                Some(position) => *position,
                None => {
                    let position = trailing;
                    trailing += 1;
                    position
                }
            };
            record.order_index = position as i64;
        }
        records.sort_by_key(|record| record.order_index);
        debug!(count = records.len(), "Reordered bookmarks");
        self.save(&records);
    }

    /// Swap in `updated` for the stored record with `previous_id`, keeping its slot.
    pub(crate) fn replace(&self, previous_id: Uuid, updated: &BookmarkRecord) -> bool {
        let mut records = self.all();
        let Some(slot) = records.iter_mut().find(|record| record.id == previous_id) else {
            return false;
        };
        *slot = updated.clone();
        self.save(&records);
        true
    }

    fn save(&self, records: &[BookmarkRecord]) {
        if let Err(err) = write_json(self.kv.as_ref(), &self.key, records) {
            warn!(key = %self.key, count = records.len(), "Failed to persist bookmarks: {err}");
        }
    }
}
