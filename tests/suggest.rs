use glossviz_wasm::gloss::{apply_suggestion, suggest, SUGGESTION_LIMIT};

fn vocabulary() -> Vec<String> {
    ["book", "bowl", "box", "boy", "bottle", "bored", "boss", "drink"]
        .iter()
        .map(|w| w.to_string())
        .collect()
}

#[test]
fn prefix_of_last_token_in_vocabulary_order() {
    let vocab = vocabulary();
    assert_eq!(suggest("I want a DR", &vocab, SUGGESTION_LIMIT), vec!["drink"]);
    assert_eq!(suggest("bow", &vocab, SUGGESTION_LIMIT), vec!["bowl"]);
}

#[test]
fn capped_at_limit() {
    let vocab = vocabulary();
    let got = suggest("bo", &vocab, SUGGESTION_LIMIT);
    assert_eq!(got.len(), SUGGESTION_LIMIT);
    assert_eq!(got, vec!["book", "bowl", "box", "boy", "bottle", "bored"]);
}

#[test]
fn empty_or_trailing_space_gives_nothing() {
    let vocab = vocabulary();
    assert!(suggest("", &vocab, SUGGESTION_LIMIT).is_empty());
    assert!(suggest("book ", &vocab, SUGGESTION_LIMIT).is_empty());
    assert!(suggest("zzz", &vocab, SUGGESTION_LIMIT).is_empty());
}

#[test]
fn applying_replaces_only_last_token() {
    assert_eq!(apply_suggestion("I want a  bo", "bottle"), "i want a bottle");
    assert_eq!(apply_suggestion("bo", "book"), "book");
    assert_eq!(apply_suggestion("", "book"), "book");
}

#[test]
fn applying_after_trailing_space_appends() {
    assert_eq!(apply_suggestion("drink ", "book"), "drink book");
}
