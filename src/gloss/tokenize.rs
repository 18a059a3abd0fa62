/// Filler words that never produce a sign.
pub const STOP_WORDS: [&str; 5] = ["the", "a", "an", "to", "and"];

/// Lowercase, split on whitespace runs and drop stop-words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}
