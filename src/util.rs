//! Shared utility functions

/// Truncate a string to at most `max_chars` characters.
///
/// Platform limits (command descriptions, embed fields) count characters,
/// not bytes, so this never splits a multi-byte character.
///
/// # Examples
///
/// ```
/// use slashroute::util::truncate_chars;
///
/// assert_eq!(truncate_chars("hello world", 5), "hello");
/// assert_eq!(truncate_chars("日本語", 2), "日本");
/// ```
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Split `s` into chunks of at most `max_chars` characters.
///
/// Chunks break after the last whitespace that fits; a word longer than
/// `max_chars` is hard-split. Empty input yields no chunks.
pub fn split_by_chars(s: &str, max_chars: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    if max_chars == 0 {
        return chunks;
    }

    let mut rest = s;
    while !rest.is_empty() {
        let head = truncate_chars(rest, max_chars);
        if head.len() == rest.len() {
            chunks.push(rest);
            break;
        }

        // Prefer breaking just after whitespace inside the window
        let cut = head
            .char_indices()
            .filter(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .last()
            .filter(|&i| i > 0)
            .unwrap_or(head.len());

        chunks.push(&rest[..cut]);
        rest = &rest[cut..];
    }
    chunks
}
