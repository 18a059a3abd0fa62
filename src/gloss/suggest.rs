pub const SUGGESTION_LIMIT: usize = 6;

/// The last, possibly partial, word of the input. Empty when the input is
/// empty or ends in whitespace.
fn last_token(text: &str) -> &str {
    match text.rfind(char::is_whitespace) {
        Some(pos) => {
            let ws_len = text[pos..].chars().next().map_or(1, char::len_utf8);
            &text[pos + ws_len..]
        }
        None => text,
    }
}

/// Vocabulary words starting with the last token of `text`, in vocabulary
/// order, at most `limit` of them.
pub fn suggest<'v>(text: &str, vocabulary: &'v [String], limit: usize) -> Vec<&'v str> {
    let lowered = text.to_lowercase();
    let partial = last_token(&lowered);
    if partial.is_empty() {
        return Vec::new();
    }

    vocabulary
        .iter()
        .filter(|word| word.starts_with(partial))
        .take(limit)
        .map(String::as_str)
        .collect()
}

/// Replace the last token of `text` with `choice`; earlier tokens are kept
/// and the result is joined with single spaces.
pub fn apply_suggestion(text: &str, choice: &str) -> String {
    let lowered = text.to_lowercase();
    let mut words: Vec<&str> = lowered.split_whitespace().collect();
    if last_token(&lowered).is_empty() {
        // Trailing whitespace: the "last token" is the empty word after it.
        words.push(choice);
    } else if let Some(last) = words.last_mut() {
        *last = choice;
    } else {
        words.push(choice);
    }
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::last_token;

    #[test]
    fn last_token_handles_unicode_whitespace() {
        assert_eq!(last_token("big\u{3000}ca"), "ca");
        assert_eq!(last_token("cat"), "cat");
        assert_eq!(last_token("cat "), "");
        assert_eq!(last_token(""), "");
    }
}
