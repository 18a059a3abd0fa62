use glossviz_wasm::gloss::{
    tokenize, GlossIndex, GlossMatch, GlossSession, IndexMode, IndexOptions, PlayerState,
};
use glossviz_wasm::VizError;

const DATASET: &str = r#"[
    {"gloss": "Book", "instances": [
        {"url": "http://x/book1.mp4", "video_id": "1"},
        {"url": "http://x/book2.swf", "video_id": "2"},
        {"url": "http://x/book3.mp4", "video_id": "3"}
    ]},
    {"gloss": "drink", "instances": [{"url": "http://x/drink.mp4"}]},
    {"gloss": "before", "instances": [{"url": "http://x/before.mov"}]},
    {"gloss": "bowl"}
]"#;

fn index() -> GlossIndex {
    GlossIndex::from_json(DATASET, &IndexOptions::default()).unwrap()
}

#[test]
fn builds_lowercased_entries_with_accepted_urls_only() {
    let index = index();
    assert_eq!(index.len(), 2);

    let book = index.get("book").unwrap();
    assert_eq!(book.word, "book");
    assert_eq!(book.clip_urls, vec!["http://x/book1.mp4", "http://x/book3.mp4"]);
    assert!(index.get("Book").is_none());
    assert!(index.get("before").is_none());
    assert!(index.get("bowl").is_none());
}

#[test]
fn vocabulary_keeps_every_gloss_in_dataset_order() {
    assert_eq!(index().vocabulary(), ["book", "drink", "before", "bowl"]);
}

#[test]
fn first_clip_mode_keeps_one_url() {
    let options = IndexOptions {
        mode: IndexMode::FirstClip,
        ..IndexOptions::default()
    };
    let index = GlossIndex::from_json(DATASET, &options).unwrap();
    assert_eq!(index.get("book").unwrap().clip_urls, vec!["http://x/book1.mp4"]);
}

#[test]
fn extra_extensions_are_accepted() {
    let options = IndexOptions {
        extensions: vec![".mp4".into(), ".mov".into()],
        ..IndexOptions::default()
    };
    let index = GlossIndex::from_json(DATASET, &options).unwrap();
    assert_eq!(index.get("before").unwrap().clip_urls, vec!["http://x/before.mov"]);
}

#[test]
fn duplicate_gloss_last_write_wins() {
    let json = r#"[
        {"gloss": "cat", "instances": [{"url": "first.mp4"}]},
        {"gloss": "CAT", "instances": [{"url": "second.mp4"}]}
    ]"#;
    let index = GlossIndex::from_json(json, &IndexOptions::default()).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("cat").unwrap().clip_urls, vec!["second.mp4"]);
}

#[test]
fn malformed_dataset_is_a_dataset_error() {
    let err = GlossIndex::from_json("{not json", &IndexOptions::default()).unwrap_err();
    assert!(matches!(err, VizError::Dataset(_)));
}

#[test]
fn tokenize_drops_stop_words_and_whitespace_runs() {
    assert_eq!(tokenize("  The BOOK   and a\tdrink "), vec!["book", "drink"]);
    assert!(tokenize("").is_empty());
    assert!(tokenize("the a an to and").is_empty());
}

#[test]
fn tokenize_is_idempotent() {
    let once = tokenize("Give the Book to  my friend");
    let twice = tokenize(&once.join(" "));
    assert_eq!(once, twice);
}

#[test]
fn lookup_preserves_order_and_drops_misses() {
    let matches = index().lookup("drink the unknown BOOK");
    assert_eq!(
        matches,
        vec![
            GlossMatch {
                word: "drink".into(),
                urls: vec!["http://x/drink.mp4".into()],
            },
            GlossMatch {
                word: "book".into(),
                urls: vec!["http://x/book1.mp4".into(), "http://x/book3.mp4".into()],
            },
        ]
    );
    assert!(index().lookup("nothing here").is_empty());
}

#[test]
fn session_with_failed_load_misses_everything() {
    let mut session = GlossSession::new(IndexOptions::default());
    session.load("[{ broken");
    assert!(session.index().is_empty());
    assert!(session.request("book").is_empty());
    assert_eq!(session.player_state(), PlayerState::Finished);

    session.load_failed("offline");
    assert!(session.suggest("bo").is_empty());
}

#[test]
fn session_suggests_from_vocabulary() {
    let mut session = GlossSession::new(IndexOptions::default());
    session.load(DATASET);
    assert_eq!(session.suggest("read a Bo"), vec!["book", "bowl"]);
    assert!(session.suggest("book ").is_empty());
}
