//! # lectern-core
//!
//! Persistent reading state for a scripture reader: bookmarks with colored
//! ribbons and a stable display order, the bookmark currently being read,
//! where to resume reading, per-chapter scroll offsets and verse highlights.
//!
//! Everything is stored through a [`kv::KeyValueStore`] as JSON values under
//! a fixed key namespace. Reads never fail the caller: unreadable state is
//! logged and treated as absent.
//!
//! ```text
//! ReaderStores
//!   ├─ BookmarkStore ──────────┐
//!   ├─ CurrentBookmarkTracker ─┤ (reads bookmarks)
//!   ├─ NavigationPositionStore ┘
//!   └─ HighlightStore
//!          ↓
//!     KeyValueStore (MemoryStore | FileStore)
//! ```

pub mod bookmark;
pub mod catalog;
pub mod config;
pub mod current;
pub mod error;
pub mod highlight;
pub mod keys;
pub mod kv;
pub mod navigation;
pub mod palette;
pub mod stores;

pub use bookmark::{BookmarkRecord, BookmarkStore, derive_short_name};
pub use catalog::{Book, Catalog, CatalogError, Chapter, ScriptureLookup, Verse};
pub use current::CurrentBookmarkTracker;
pub use error::{StoreError, StoreResult};
pub use highlight::{Highlight, HighlightStore};
pub use keys::StoreKeys;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use navigation::{NavigationPosition, NavigationPositionStore, ReadingPosition};
pub use palette::{BROWN_SHADES, ColorAssigner, Rgb, THEME_COLORS};
pub use stores::ReaderStores;
