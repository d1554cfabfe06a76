//! Text utilities for the TUI.
//!
//! Word boundaries for readline-style editing, word wrapping for the chat
//! panel, and width-aware truncation. Positions are character indices.

/// Find the start position of the word before the cursor.
///
/// Words are delimited by whitespace; punctuation is part of the word.
/// Returns 0 if cursor is at start or only whitespace precedes it.
pub fn find_word_start_backward(text: &str, cursor: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut pos = cursor.min(chars.len());

    while pos > 0 && chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    while pos > 0 && !chars[pos - 1].is_whitespace() {
        pos -= 1;
    }

    pos
}

/// Find the end position of the word after the cursor.
pub fn find_word_end_forward(text: &str, cursor: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut pos = cursor.min(len);

    while pos < len && chars[pos].is_whitespace() {
        pos += 1;
    }
    while pos < len && !chars[pos].is_whitespace() {
        pos += 1;
    }

    pos
}

/// Byte offset of character index `char_index` in `text`.
pub fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Wraps `text` to `width` columns, breaking at spaces where possible.
///
/// Explicit newlines are kept; words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split(' ') {
            let mut word: Vec<char> = word.chars().collect();

            // Hard-split words that can never fit.
            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };
            if needed > width && current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        lines.push(current);
    }

    lines
}

/// Truncates to `max` characters, ending with `…` when shortened.
pub fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn find_word_start_at_end_of_word() {
        assert_eq!(find_word_start_backward("hello world", 11), 6);
    }

    #[test]
    fn find_word_start_with_trailing_spaces() {
        assert_eq!(find_word_start_backward("hello   ", 8), 0);
    }

    #[test]
    fn find_word_start_at_beginning() {
        assert_eq!(find_word_start_backward("hello", 0), 0);
    }

    #[test]
    fn find_word_start_with_punctuation() {
        assert_eq!(find_word_start_backward("hello, world!", 13), 7);
    }

    #[test]
    fn find_word_start_unicode() {
        assert_eq!(find_word_start_backward("hello \u{4e16}\u{754c}", 8), 6);
    }

    #[test]
    fn find_word_end_at_start_of_word() {
        assert_eq!(find_word_end_forward("hello world", 0), 5);
    }

    #[test]
    fn find_word_end_with_multiple_spaces() {
        assert_eq!(find_word_end_forward("one   two", 3), 9);
    }

    #[test]
    fn find_word_end_cursor_past_end() {
        assert_eq!(find_word_end_forward("abc", 10), 3);
    }

    #[test]
    fn byte_offset_multibyte() {
        assert_eq!(byte_offset("héllo", 2), 3);
        assert_eq!(byte_offset("héllo", 5), 6);
        assert_eq!(byte_offset("", 3), 0);
    }

    #[test]
    fn wrap_breaks_at_spaces() {
        assert_eq!(
            wrap("the quick brown fox", 10),
            vec!["the quick".to_string(), "brown fox".to_string()]
        );
    }

    #[test]
    fn wrap_keeps_newlines() {
        assert_eq!(
            wrap("a\n\nb", 10),
            vec!["a".to_string(), String::new(), "b".to_string()]
        );
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(
            wrap("abcdefghij xy", 4),
            vec![
                "abcd".to_string(),
                "efgh".to_string(),
                "ij".to_string(),
                "xy".to_string()
            ]
        );
    }

    #[test]
    fn ellipsize_short_and_long() {
        assert_eq!(ellipsize("short", 10), "short");
        assert_eq!(ellipsize("a long message", 6), "a lon…");
    }
}
