//! Read-only scripture lookup.
//!
//! The stores only need a book's abbreviation, but the catalog mirrors the
//! full text layout (books → chapters → verses) so a JSON export of the
//! bundled text can be loaded as-is. Without one, the canonical book table
//! below stands in with empty chapter lists.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    pub number: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub number: u32,
    #[serde(default)]
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub name: String,
    pub abbreviation: String,
    #[serde(default)]
    pub testament: String,
    pub order_index: u32,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptureData {
    pub books: Vec<Book>,
}

/// Lookup seam used by the bookmark store when deriving short names.
pub trait ScriptureLookup: Send + Sync {
    fn book_by_name(&self, name: &str) -> Option<&Book>;

    /// All books, ascending by canonical order index.
    fn books(&self) -> &[Book];

    fn chapter_by_number(&self, book_name: &str, number: u32) -> Option<&Chapter> {
        self.book_by_name(book_name)?
            .chapters
            .iter()
            .find(|chapter| chapter.number == number)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(mut books: Vec<Book>) -> Self {
        books.sort_by_key(|book| book.order_index);
        Self { books }
    }

    /// Canonical 66-book table without text.
    pub fn builtin() -> Self {
        let books = CANONICAL_BOOKS
            .iter()
            .enumerate()
            .map(|(idx, (name, abbreviation))| {
                let testament = if idx < OLD_TESTAMENT_LEN { "OT" } else { "NT" };
                Book {
                    name: name.to_string(),
                    abbreviation: abbreviation.to_string(),
                    testament: testament.to_string(),
                    order_index: idx as u32 + 1,
                    chapters: Vec::new(),
                }
            })
            .collect();
        Self::new(books)
    }

    pub fn from_json_str(data: &str) -> Result<Self, CatalogError> {
        let parsed: ScriptureData = serde_json::from_str(data)?;
        Ok(Self::new(parsed.books))
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&data)?;
        info!(path = %path.display(), books = catalog.books.len(), "Loaded scripture catalog");
        Ok(catalog)
    }

    pub fn book_by_abbreviation(&self, abbreviation: &str) -> Option<&Book> {
        self.books
            .iter()
            .find(|book| book.abbreviation.eq_ignore_ascii_case(abbreviation))
    }
}

impl ScriptureLookup for Catalog {
    fn book_by_name(&self, name: &str) -> Option<&Book> {
        let found = self.books.iter().find(|book| book.name == name);
        if found.is_none() {
            debug!(book = %name, "Book not in catalog");
        }
        found
    }

    fn books(&self) -> &[Book] {
        &self.books
    }
}

const OLD_TESTAMENT_LEN: usize = 39;

const CANONICAL_BOOKS: [(&str, &str); 66] = [
    ("Genesis", "GEN"),
    ("Exodus", "EX"),
    ("Leviticus", "LEV"),
    ("Numbers", "NUM"),
    ("Deuteronomy", "DEUT"),
    ("Joshua", "JOSH"),
    ("Judges", "JUDG"),
    ("Ruth", "RUTH"),
    ("1 Samuel", "1SAM"),
    ("2 Samuel", "2SAM"),
    ("1 Kings", "1KGS"),
    ("2 Kings", "2KGS"),
    ("1 Chronicles", "1CHR"),
    ("2 Chronicles", "2CHR"),
    ("Ezra", "EZRA"),
    ("Nehemiah", "NEH"),
    ("Esther", "ESTH"),
    ("Job", "JOB"),
    ("Psalms", "PS"),
    ("Proverbs", "PROV"),
    ("Ecclesiastes", "ECCL"),
    ("Song of Solomon", "SONG"),
    ("Isaiah", "ISA"),
    ("Jeremiah", "JER"),
    ("Lamentations", "LAM"),
    ("Ezekiel", "EZEK"),
    ("Daniel", "DAN"),
    ("Hosea", "HOS"),
    ("Joel", "JOEL"),
    ("Amos", "AMOS"),
    ("Obadiah", "OBAD"),
    ("Jonah", "JON"),
    ("Micah", "MIC"),
    ("Nahum", "NAH"),
    ("Habakkuk", "HAB"),
    ("Zephaniah", "ZEPH"),
    ("Haggai", "HAG"),
    ("Zechariah", "ZECH"),
    ("Malachi", "MAL"),
    ("Matthew", "MATT"),
    ("Mark", "MARK"),
    ("Luke", "LUKE"),
    ("John", "JOHN"),
    ("Acts", "ACTS"),
    ("Romans", "ROM"),
    ("1 Corinthians", "1COR"),
    ("2 Corinthians", "2COR"),
    ("Galatians", "GAL"),
    ("Ephesians", "EPH"),
    ("Philippians", "PHIL"),
    ("Colossians", "COL"),
    ("1 Thessalonians", "1TH"),
    ("2 Thessalonians", "2TH"),
    ("1 Timothy", "1TIM"),
    ("2 Timothy", "2TIM"),
    ("Titus", "TIT"),
    ("Philemon", "PHLM"),
    ("Hebrews", "HEB"),
    ("James", "JAS"),
    ("1 Peter", "1PET"),
    ("2 Peter", "2PET"),
    ("1 John", "1JN"),
    ("2 John", "2JN"),
    ("3 John", "3JN"),
    ("Jude", "JUDE"),
    ("Revelation", "REV"),
];

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "books": [
            {
                "name": "Ezra",
                "abbreviation": "EZR",
                "testament": "OT",
                "orderIndex": 15,
                "chapters": [
                    { "number": 3, "verses": [ { "number": 1, "text": "When the seventh month came" } ] }
                ]
            },
            { "name": "Genesis", "abbreviation": "GEN", "orderIndex": 1, "chapters": [] }
        ]
    }"#;

    #[test]
    fn json_catalog_orders_books_by_index() {
        let catalog = Catalog::from_json_str(SAMPLE).expect("valid catalog");
        let names: Vec<&str> = catalog.books().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Genesis", "Ezra"]);
        assert_eq!(
            catalog.book_by_name("Ezra").map(|b| b.abbreviation.as_str()),
            Some("EZR")
        );
        assert_eq!(
            catalog.book_by_abbreviation("ezr").map(|b| b.name.as_str()),
            Some("Ezra")
        );
    }

    #[test]
    fn chapter_lookup_finds_verses() {
        let catalog = Catalog::from_json_str(SAMPLE).expect("valid catalog");
        let chapter = catalog.chapter_by_number("Ezra", 3).expect("chapter 3");
        assert_eq!(chapter.verses.len(), 1);
        assert!(catalog.chapter_by_number("Ezra", 4).is_none());
        assert!(catalog.chapter_by_number("Tobit", 1).is_none());
    }

    #[test]
    fn builtin_table_covers_both_testaments() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.books().len(), 66);
        assert_eq!(catalog.books()[0].name, "Genesis");
        assert_eq!(catalog.books()[65].name, "Revelation");
        assert_eq!(catalog.book_by_name("Matthew").map(|b| b.testament.as_str()), Some("NT"));
        assert_eq!(catalog.book_by_name("Malachi").map(|b| b.testament.as_str()), Some("OT"));
        assert!(
            catalog
                .books()
                .iter()
                .all(|b| (2..=4).contains(&b.abbreviation.len()))
        );
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(
            Catalog::from_json_str("{\"books\": 3}"),
            Err(CatalogError::Parse(_))
        ));
    }
}
