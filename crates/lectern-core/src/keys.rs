//! Persisted state layout.
//!
//! Every record lives under `{namespace}.{name}`; per-chapter scroll offsets
//! carry the book and chapter in the key itself.

pub const DEFAULT_NAMESPACE: &str = "lectern";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    namespace: String,
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl StoreKeys {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn bookmarks(&self) -> String {
        self.key("bookmarks")
    }

    pub fn current_bookmark(&self) -> String {
        self.key("current_bookmark")
    }

    pub fn last_non_bookmark_position(&self) -> String {
        self.key("last_non_bookmark_position")
    }

    pub fn reading_position(&self) -> String {
        self.key("reading_position")
    }

    pub fn highlights(&self) -> String {
        self.key("highlights")
    }

    pub fn chapter_scroll(&self, book_name: &str, chapter: u32) -> String {
        format!("{}.scroll_position.{book_name}.{chapter}", self.namespace)
    }

    fn key(&self, name: &str) -> String {
        format!("{}.{name}", self.namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_scroll_key_embeds_book_and_chapter() {
        let keys = StoreKeys::default();
        assert_eq!(
            keys.chapter_scroll("1 John", 4),
            "lectern.scroll_position.1 John.4"
        );
        assert_eq!(keys.bookmarks(), "lectern.bookmarks");
        assert_ne!(keys.chapter_scroll("John", 1), keys.chapter_scroll("John", 11));
    }

    #[test]
    fn custom_namespace_prefixes_every_key() {
        let keys = StoreKeys::new("kjv-study");
        assert_eq!(keys.namespace(), "kjv-study");
        assert_eq!(keys.current_bookmark(), "kjv-study.current_bookmark");
        assert!(keys.chapter_scroll("Ruth", 1).starts_with("kjv-study."));
    }
}
