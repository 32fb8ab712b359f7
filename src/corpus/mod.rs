//! Corpus loading: JSON and USFM bible documents, lookup, search, and
//! corpus-level statistics.

use crate::core::{Passage, Testament};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in corpus file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported corpus format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

/// Old Testament book names; a reference belongs to the Old Testament when
/// it starts with one of these. "Psalm" also covers "Psalms".
static OLD_TESTAMENT_BOOKS: &[&str] = &[
    "Genesis", "Exodus", "Leviticus", "Numbers", "Deuteronomy", "Joshua", "Judges", "Ruth",
    "1 Samuel", "2 Samuel", "1 Kings", "2 Kings", "1 Chronicles", "2 Chronicles", "Ezra",
    "Nehemiah", "Esther", "Job", "Psalm", "Proverbs", "Ecclesiastes", "Song of Solomon",
    "Isaiah", "Jeremiah", "Lamentations", "Ezekiel", "Daniel", "Hosea", "Joel", "Amos",
    "Obadiah", "Jonah", "Micah", "Nahum", "Habakkuk", "Zephaniah", "Haggai", "Zechariah",
    "Malachi",
];

/// USFM book codes for the Old Testament.
static OLD_TESTAMENT_CODES: &[&str] = &[
    "GEN", "EXO", "LEV", "NUM", "DEU", "JOS", "JDG", "RUT", "1SA", "2SA", "1KI", "2KI", "1CH",
    "2CH", "EZR", "NEH", "EST", "JOB", "PSA", "PRO", "ECC", "SNG", "ISA", "JER", "LAM", "EZK",
    "DAN", "HOS", "JOL", "AMO", "OBA", "JON", "MIC", "NAM", "HAB", "ZEP", "HAG", "ZEC", "MAL",
];

/// Canonical book order used when organizing a loaded corpus.
static CANONICAL_ORDER: &[&str] = &[
    "Genesis", "Exodus", "Leviticus", "Numbers", "Deuteronomy", "Joshua", "Judges", "Ruth",
    "1 Samuel", "2 Samuel", "1 Kings", "2 Kings", "1 Chronicles", "2 Chronicles", "Ezra",
    "Nehemiah", "Esther", "Job", "Psalms", "Proverbs", "Ecclesiastes", "Song of Solomon",
    "Isaiah", "Jeremiah", "Lamentations", "Ezekiel", "Daniel", "Hosea", "Joel", "Amos",
    "Obadiah", "Jonah", "Micah", "Nahum", "Habakkuk", "Zephaniah", "Haggai", "Zechariah",
    "Malachi", "Matthew", "Mark", "Luke", "John", "Acts", "Romans", "1 Corinthians",
    "2 Corinthians", "Galatians", "Ephesians", "Philippians", "Colossians", "1 Thessalonians",
    "2 Thessalonians", "1 Timothy", "2 Timothy", "Titus", "Philemon", "Hebrews", "James",
    "1 Peter", "2 Peter", "1 John", "2 John", "3 John", "Jude", "Revelation",
];

/// Testament of a reference string, judged by its book-name prefix.
pub fn testament_of_reference(reference: &str) -> Testament {
    if OLD_TESTAMENT_BOOKS
        .iter()
        .any(|book| reference.starts_with(book))
    {
        Testament::Old
    } else {
        Testament::New
    }
}

#[derive(Deserialize)]
struct BibleDocument {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    books: Vec<BookDocument>,
}

#[derive(Deserialize)]
struct BookDocument {
    #[serde(default)]
    name: String,
    #[serde(default)]
    abbreviation: String,
    #[serde(default = "default_testament")]
    testament: Testament,
    #[serde(default)]
    chapters: Vec<ChapterDocument>,
}

fn default_testament() -> Testament {
    Testament::New
}

#[derive(Deserialize)]
struct ChapterDocument {
    #[serde(default)]
    number: u32,
    #[serde(default)]
    verses: Vec<VerseDocument>,
}

#[derive(Deserialize)]
struct VerseDocument {
    #[serde(default)]
    number: u32,
    #[serde(default)]
    text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookStatistics {
    pub passages: usize,
    pub chapters: usize,
    pub words: usize,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct TestamentBreakdown {
    pub old_testament: usize,
    pub new_testament: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CorpusStatistics {
    pub total_passages: usize,
    pub total_books: usize,
    pub total_words: usize,
    pub unique_words: usize,
    pub lexical_diversity: f64,
    pub books: BTreeMap<String, BookStatistics>,
    pub testament_breakdown: TestamentBreakdown,
}

/// Loads and organizes a biblical corpus.
#[derive(Debug, Default)]
pub struct BibleLoader {
    passages: Vec<Passage>,
    book_index: BTreeMap<String, Vec<usize>>,
    book_order: Vec<String>,
}

impl BibleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a corpus file, dispatching on extension (.json, else USFM).
    pub fn load_file(&mut self, path: &Path) -> Result<usize, CorpusError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => self.load_json(path),
            Some("usfm") | Some("sfm") | Some("txt") => self.load_usfm(path),
            _ => Err(CorpusError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Load a JSON corpus document (version -> books -> chapters -> verses).
    pub fn load_json(&mut self, path: &Path) -> Result<usize, CorpusError> {
        let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document: BibleDocument =
            serde_json::from_str(&content).map_err(|source| CorpusError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let version = document.version.unwrap_or_else(|| "Unknown".to_string());
        let mut passages = Vec::new();

        for book in document.books {
            for chapter in book.chapters {
                for verse in chapter.verses {
                    let reference = format!("{} {}:{}", book.abbreviation, chapter.number, verse.number);
                    passages.push(
                        Passage::new(reference, verse.text)
                            .with_version(version.clone())
                            .with_testament(book.testament)
                            .with_location(book.name.clone(), chapter.number, verse.number),
                    );
                }
            }
        }

        self.set_passages(passages);
        log::info!("Loaded {} passages from JSON corpus", self.passages.len());
        Ok(self.passages.len())
    }

    /// Load a USFM corpus (\id/\h book markers, \c chapters, \v verses,
    /// bare continuation lines).
    pub fn load_usfm(&mut self, path: &Path) -> Result<usize, CorpusError> {
        let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut passages = Vec::new();
        let mut book = String::new();
        let mut chapter = 0u32;
        let mut verse = 0u32;
        let mut text = String::new();
        let mut testament = Testament::Old;

        let flush = |book: &str, chapter: u32, verse: u32, text: &mut String, testament, passages: &mut Vec<Passage>| {
            let trimmed = text.trim();
            if !trimmed.is_empty() && !book.is_empty() && verse > 0 {
                let reference = format!("{book} {chapter}:{verse}");
                passages.push(
                    Passage::new(reference, trimmed)
                        .with_version("USFM")
                        .with_testament(testament)
                        .with_location(book, chapter, verse),
                );
            }
            text.clear();
        };

        for line in content.lines() {
            let line = line.trim();

            if line.starts_with("\\id ") || line.starts_with("\\h ") {
                flush(&book, chapter, verse, &mut text, testament, &mut passages);
                if let Some(name) = line.split_whitespace().nth(1) {
                    book = name.to_string();
                    testament = if OLD_TESTAMENT_CODES.contains(&book.to_uppercase().as_str()) {
                        Testament::Old
                    } else {
                        Testament::New
                    };
                }
                chapter = 0;
                verse = 0;
            } else if let Some(rest) = line.strip_prefix("\\c ") {
                chapter = rest.split_whitespace().next().and_then(|n| n.parse().ok()).unwrap_or(0);
            } else if let Some(rest) = line.strip_prefix("\\v ") {
                flush(&book, chapter, verse, &mut text, testament, &mut passages);
                let mut parts = rest.splitn(2, ' ');
                verse = parts.next().and_then(|n| n.parse().ok()).unwrap_or(0);
                text = parts.next().unwrap_or("").to_string();
            } else if !line.is_empty() && !line.starts_with('\\') {
                text.push(' ');
                text.push_str(line);
            }
        }
        flush(&book, chapter, verse, &mut text, testament, &mut passages);

        self.set_passages(passages);
        log::info!("Loaded {} passages from USFM corpus", self.passages.len());
        Ok(self.passages.len())
    }

    /// Install a passage list directly (used by loaders and tests).
    pub fn set_passages(&mut self, passages: Vec<Passage>) {
        self.passages = passages;
        self.organize_by_book();
    }

    fn organize_by_book(&mut self) {
        self.book_index.clear();
        for (i, passage) in self.passages.iter().enumerate() {
            self.book_index
                .entry(passage.book.clone())
                .or_default()
                .push(i);
        }

        self.book_order = CANONICAL_ORDER
            .iter()
            .filter(|book| self.book_index.contains_key(**book))
            .map(|book| book.to_string())
            .collect();
        // Books outside the canonical table keep alphabetical order at the end.
        for book in self.book_index.keys() {
            if !self.book_order.contains(book) {
                self.book_order.push(book.clone());
            }
        }
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn book_order(&self) -> &[String] {
        &self.book_order
    }

    pub fn get_passage(&self, reference: &str) -> Option<&Passage> {
        self.passages.iter().find(|p| p.reference == reference)
    }

    pub fn get_book(&self, book: &str) -> Vec<&Passage> {
        self.book_index
            .get(book)
            .map(|indices| indices.iter().map(|&i| &self.passages[i]).collect())
            .unwrap_or_default()
    }

    pub fn get_chapter(&self, book: &str, chapter: u32) -> Vec<&Passage> {
        self.get_book(book)
            .into_iter()
            .filter(|p| p.chapter == chapter)
            .collect()
    }

    /// Escaped-text search across the corpus.
    pub fn search_text(&self, query: &str, case_sensitive: bool) -> Vec<&Passage> {
        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(!case_sensitive)
            .build()
            .expect("escaped pattern is always valid");

        self.passages
            .iter()
            .filter(|p| pattern.is_match(p.text()))
            .collect()
    }

    pub fn statistics(&self) -> CorpusStatistics {
        if self.passages.is_empty() {
            return CorpusStatistics {
                total_passages: 0,
                total_books: 0,
                total_words: 0,
                unique_words: 0,
                lexical_diversity: 0.0,
                books: BTreeMap::new(),
                testament_breakdown: TestamentBreakdown::default(),
            };
        }

        let total_words: usize = self.passages.iter().map(|p| p.word_count()).sum();
        let unique_words = self
            .passages
            .iter()
            .flat_map(|p| p.normalized_words().iter())
            .collect::<HashSet<_>>()
            .len();

        let mut books = BTreeMap::new();
        for (book, indices) in &self.book_index {
            let chapters = indices
                .iter()
                .map(|&i| self.passages[i].chapter)
                .collect::<HashSet<_>>()
                .len();
            books.insert(
                book.clone(),
                BookStatistics {
                    passages: indices.len(),
                    chapters,
                    words: indices.iter().map(|&i| self.passages[i].word_count()).sum(),
                },
            );
        }

        let mut breakdown = TestamentBreakdown::default();
        for passage in &self.passages {
            match passage.testament {
                Testament::Old => breakdown.old_testament += 1,
                Testament::New => breakdown.new_testament += 1,
            }
        }

        CorpusStatistics {
            total_passages: self.passages.len(),
            total_books: self.book_index.len(),
            total_words,
            unique_words,
            lexical_diversity: if total_words > 0 {
                unique_words as f64 / total_words as f64
            } else {
                0.0
            },
            books,
            testament_breakdown: breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_loader() -> BibleLoader {
        let mut loader = BibleLoader::new();
        loader.set_passages(vec![
            Passage::new("Genesis 1:1", "In the beginning God created the heaven and the earth.")
                .with_testament(Testament::Old)
                .with_location("Genesis", 1, 1),
            Passage::new("John 1:1", "In the beginning was the Word.")
                .with_location("John", 1, 1),
            Passage::new("John 1:2", "The same was in the beginning with God.")
                .with_location("John", 1, 2),
        ]);
        loader
    }

    #[test]
    fn testament_is_judged_by_book_prefix() {
        assert_eq!(testament_of_reference("Genesis 1:1"), Testament::Old);
        assert_eq!(testament_of_reference("Psalm 33:6"), Testament::Old);
        assert_eq!(testament_of_reference("Psalms 104"), Testament::Old);
        assert_eq!(testament_of_reference("John 1:1"), Testament::New);
        assert_eq!(testament_of_reference("1 John 1:1"), Testament::New);
        assert_eq!(testament_of_reference("1 Kings 2:1"), Testament::Old);
    }

    #[test]
    fn lookup_by_reference_book_and_chapter() {
        let loader = sample_loader();
        assert!(loader.get_passage("John 1:1").is_some());
        assert!(loader.get_passage("John 9:9").is_none());
        assert_eq!(loader.get_book("John").len(), 2);
        assert_eq!(loader.get_chapter("John", 1).len(), 2);
        assert_eq!(
            loader.book_order(),
            vec!["Genesis".to_string(), "John".to_string()]
        );
    }

    #[test]
    fn search_is_case_insensitive_by_default() {
        let loader = sample_loader();
        assert_eq!(loader.search_text("the word", false).len(), 1);
        assert_eq!(loader.search_text("THE WORD", false).len(), 1);
        assert_eq!(loader.search_text("THE WORD", true).len(), 0);
    }

    #[test]
    fn statistics_cover_books_and_testaments() {
        let loader = sample_loader();
        let stats = loader.statistics();
        assert_eq!(stats.total_passages, 3);
        assert_eq!(stats.total_books, 2);
        assert_eq!(stats.testament_breakdown.old_testament, 1);
        assert_eq!(stats.testament_breakdown.new_testament, 2);
        assert!(stats.lexical_diversity > 0.0);
        assert_eq!(stats.books["John"].passages, 2);
    }

    #[test]
    fn empty_corpus_statistics_are_zero() {
        let loader = BibleLoader::new();
        let stats = loader.statistics();
        assert_eq!(stats.total_passages, 0);
        assert_eq!(stats.lexical_diversity, 0.0);
    }
}
