//! Fixed-width caption wrapping
//!
//! Wrapping counts characters, not pixels: the text is never re-measured
//! after it has been broken into lines.

/// Uppercase a caption and wrap it at `width` characters
pub fn normalize_caption(text: &str, width: usize) -> String {
    wrap_text(&text.to_uppercase(), width).join("\n")
}

/// Greedy word wrap on whitespace and hyphens
///
/// Any run of whitespace (newlines included) separates words, and lines
/// are rejoined with single spaces, so runs of spaces inside a caption do
/// not survive. A hyphen between two letters is a break opportunity:
/// `SELF-DRIVING` may end a line at `SELF-`. Words longer than `width` are
/// split into `width`-sized pieces. A `width` of 0 is treated as 1.
///
/// # Returns
/// The wrapped lines; empty when `text` has no words
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        for (p, piece) in split_after_hyphens(word).into_iter().enumerate() {
            for (f, fragment) in split_long_word(piece, width).into_iter().enumerate() {
                let fragment_len = fragment.chars().count();
                // Pieces after a hyphen continue the word without a space
                let gap = if p > 0 && f == 0 { 0 } else { 1 };

                if current_len == 0 {
                    current.push_str(&fragment);
                    current_len = fragment_len;
                } else if current_len + gap + fragment_len <= width {
                    if gap == 1 {
                        current.push(' ');
                    }
                    current.push_str(&fragment);
                    current_len += gap + fragment_len;
                } else {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(&fragment);
                    current_len = fragment_len;
                }
            }
        }
    }

    if current_len > 0 {
        lines.push(current);
    }

    lines
}

/// Split a word after each hyphen that sits between an alphanumeric
/// character and a letter
fn split_after_hyphens(word: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut previous: Option<char> = None;
    let mut chars = word.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let breaks = c == '-'
            && previous.is_some_and(|p| p.is_alphanumeric())
            && chars.peek().is_some_and(|&(_, next)| next.is_alphabetic());
        if breaks {
            let end = i + c.len_utf8();
            pieces.push(&word[start..end]);
            start = end;
        }
        previous = Some(c);
    }

    pieces.push(&word[start..]);
    pieces
}

fn split_long_word(word: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
}
