use indoc::indoc;
use std::io::Write;
use versemap::{BibleLoader, Testament};

fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(content.as_bytes()).expect("write corpus");
    file
}

#[test]
fn json_corpus_loads_with_metadata() {
    let file = write_temp(
        indoc! {r#"
            {
                "version": "KJV",
                "books": [
                    {
                        "name": "Genesis",
                        "abbreviation": "Gen",
                        "testament": "Old",
                        "chapters": [
                            {
                                "number": 1,
                                "verses": [
                                    {"number": 1, "text": "In the beginning God created the heaven and the earth."},
                                    {"number": 2, "text": "And the earth was without form, and void."}
                                ]
                            }
                        ]
                    },
                    {
                        "name": "John",
                        "abbreviation": "John",
                        "testament": "New",
                        "chapters": [
                            {
                                "number": 1,
                                "verses": [
                                    {"number": 1, "text": "In the beginning was the Word."}
                                ]
                            }
                        ]
                    }
                ]
            }
        "#},
        ".json",
    );

    let mut loader = BibleLoader::new();
    let count = loader.load_json(file.path()).expect("load json");
    assert_eq!(count, 3);

    let passage = loader.get_passage("Gen 1:1").expect("Gen 1:1 exists");
    assert_eq!(passage.book, "Genesis");
    assert_eq!(passage.version, "KJV");
    assert_eq!(passage.testament, Testament::Old);
    assert_eq!(passage.chapter, 1);

    assert_eq!(
        loader.book_order(),
        vec!["Genesis".to_string(), "John".to_string()]
    );
}

#[test]
fn missing_json_corpus_is_an_io_error() {
    let mut loader = BibleLoader::new();
    let error = loader
        .load_json(std::path::Path::new("/no/such/corpus.json"))
        .expect_err("must fail");
    assert!(error.to_string().contains("failed to read"));
}

#[test]
fn malformed_json_corpus_is_a_parse_error() {
    let file = write_temp("{not json", ".json");
    let mut loader = BibleLoader::new();
    let error = loader.load_json(file.path()).expect_err("must fail");
    assert!(error.to_string().contains("invalid JSON"));
}

#[test]
fn usfm_corpus_parses_books_chapters_and_verses() {
    let file = write_temp(
        indoc! {r#"
            \id GEN
            \c 1
            \v 1 In the beginning God created
            the heaven and the earth.
            \v 2 And the earth was without form.
            \id MAT
            \c 5
            \v 3 Blessed are the poor in spirit.
        "#},
        ".usfm",
    );

    let mut loader = BibleLoader::new();
    let count = loader.load_usfm(file.path()).expect("load usfm");
    assert_eq!(count, 3);

    let first = loader.get_passage("GEN 1:1").expect("GEN 1:1 exists");
    assert_eq!(first.testament, Testament::Old);
    assert!(first.text().contains("heaven and the earth"));

    let beatitude = loader.get_passage("MAT 5:3").expect("MAT 5:3 exists");
    assert_eq!(beatitude.testament, Testament::New);
    assert_eq!(beatitude.verse, 3);
}

#[test]
fn unsupported_extension_is_rejected() {
    let file = write_temp("whatever", ".pdf");
    let mut loader = BibleLoader::new();
    let error = loader.load_file(file.path()).expect_err("must fail");
    assert!(error.to_string().contains("unsupported corpus format"));
}

#[test]
fn search_and_statistics_work_on_loaded_corpora() {
    let file = write_temp(
        indoc! {r#"
            \id GEN
            \c 1
            \v 1 In the beginning God created the heaven and the earth.
            \v 2 And the Spirit of God moved upon the face of the waters.
        "#},
        ".usfm",
    );

    let mut loader = BibleLoader::new();
    loader.load_usfm(file.path()).expect("load usfm");

    assert_eq!(loader.search_text("god", false).len(), 2);
    assert_eq!(loader.search_text("waters", false).len(), 1);

    let stats = loader.statistics();
    assert_eq!(stats.total_passages, 2);
    assert_eq!(stats.total_books, 1);
    assert!(stats.total_words > 10);
}
