//! Reader-state services, built once at startup and handed to callers.

use crate::bookmark::BookmarkStore;
use crate::catalog::{Catalog, ScriptureLookup};
use crate::config::AppConfig;
use crate::current::CurrentBookmarkTracker;
use crate::highlight::HighlightStore;
use crate::keys::StoreKeys;
use crate::kv::{FileStore, KeyValueStore};
use crate::navigation::NavigationPositionStore;
use crate::palette::ColorAssigner;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ReaderStores {
    pub bookmarks: BookmarkStore,
    pub current: CurrentBookmarkTracker,
    pub navigation: NavigationPositionStore,
    pub highlights: HighlightStore,
}

impl ReaderStores {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        catalog: Arc<dyn ScriptureLookup>,
        colors: ColorAssigner,
        keys: &StoreKeys,
    ) -> Self {
        let bookmarks = BookmarkStore::new(kv.clone(), catalog, Arc::new(colors), keys);
        Self {
            current: CurrentBookmarkTracker::new(kv.clone(), bookmarks.clone(), keys),
            navigation: NavigationPositionStore::new(kv.clone(), bookmarks.clone(), keys),
            highlights: HighlightStore::new(kv, keys),
            bookmarks,
        }
    }

    /// File-backed stores as described by `config`.
    ///
    /// An unreadable catalog falls back to the built-in book table.
    pub fn open(config: &AppConfig) -> Self {
        let catalog = match config.catalog_path.as_deref() {
            Some(path) => Catalog::load(Path::new(path)).unwrap_or_else(|err| {
                warn!(%path, "Using built-in book table: {err}");
                Catalog::builtin()
            }),
            None => Catalog::builtin(),
        };
        let colors = match config.color_seed {
            Some(seed) => ColorAssigner::seeded(seed),
            None => ColorAssigner::from_entropy(),
        };
        let kv = FileStore::new(config.data_dir_path());
        let keys = StoreKeys::new(config.namespace.clone());
        info!(
            data_dir = %kv.root().display(),
            namespace = %keys.namespace(),
            "Opened reader stores"
        );
        Self::new(Arc::new(kv), Arc::new(catalog), colors, &keys)
    }

    /// Delete a bookmark, forgetting it as current if it was.
    pub fn delete_bookmark(&self, id: uuid::Uuid) {
        self.bookmarks.delete(id);
        if self.current.get().is_some_and(|current| current.id == id) {
            self.current.clear();
        }
    }

    /// The reader settled on (book, chapter) at `scroll_position`.
    pub fn settle(&self, book_name: &str, chapter: u32, scroll_position: f64) {
        self.current.update_if_needed(book_name, chapter);
        self.navigation
            .save_reading_position(book_name, chapter, scroll_position);
        self.navigation
            .save_last_non_bookmark(book_name, chapter, scroll_position);
    }
}
