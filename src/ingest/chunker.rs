//! Overlapping character chunker.
//!
//! Consecutive chunks share `overlap` characters of context. Cuts prefer a
//! paragraph break, then a sentence ending, then a word boundary, and only
//! fall back to a hard cut when the window has no natural break at all.

/// Splits `text` into overlapping chunks of at most `chunk_size` characters.
///
/// Text shorter than `chunk_size` yields exactly one chunk; empty text
/// yields none. `overlap` must be smaller than `chunk_size`.
pub fn split(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    debug_assert!(overlap < chunk_size);

    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();
    if total == 0 {
        return Vec::new();
    }
    if total <= chunk_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;
    loop {
        let hard_end = (start + chunk_size).min(total);
        let end = if hard_end < total {
            natural_break(&chars, start, hard_end, overlap)
        } else {
            hard_end
        };

        chunks.push(chars[start..end].iter().collect());

        if end >= total {
            break;
        }
        start = end - overlap;
    }

    chunks
}

/// Best cut position in `(start, hard_end]`, searching backwards through
/// the last fifth of the chunk. Never cuts earlier than `start + overlap`,
/// which would stall the scan.
fn natural_break(chars: &[char], start: usize, hard_end: usize, overlap: usize) -> usize {
    let window = (hard_end - start) / 5;
    let floor = (start + overlap + 1).max(hard_end.saturating_sub(window));

    let is_paragraph = |i: usize| i >= 2 && chars[i - 1] == '\n' && chars[i - 2] == '\n';
    let is_sentence = |i: usize| {
        i >= 2 && chars[i - 1].is_whitespace() && matches!(chars[i - 2], '.' | '!' | '?')
    };
    let is_word = |i: usize| i >= 1 && chars[i - 1].is_whitespace();

    for check in [
        &is_paragraph as &dyn Fn(usize) -> bool,
        &is_sentence,
        &is_word,
    ] {
        if let Some(end) = (floor..=hard_end).rev().find(|&i| check(i)) {
            return end;
        }
    }

    hard_end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split("", 1000, 100).is_empty());
    }

    #[test]
    fn short_text_yields_one_identical_chunk() {
        let text = "Pittsburgh sits at the confluence of three rivers.";
        assert_eq!(split(text, 1000, 100), vec![text.to_string()]);
    }

    #[test]
    fn text_exactly_chunk_size_is_one_chunk() {
        let text = "x".repeat(1000);
        assert_eq!(split(&text, 1000, 100).len(), 1);
    }

    #[test]
    fn unbreakable_2500_chars_make_three_overlapping_chunks() {
        let text = "a".repeat(2500);
        let chunks = split(&text, 1000, 100);

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= 1000));
        assert_eq!(chunks[0].chars().count(), 1000);
        assert_eq!(chunks[1].chars().count(), 1000);
        assert_eq!(chunks[2].chars().count(), 700);

        // 100-character overlap between consecutive chunks.
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().rev().take(100).collect();
            let head: String = pair[1].chars().take(100).collect();
            let tail: String = tail.chars().rev().collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn overlapping_spans_reconstruct_the_input() {
        let text = "The Monongahela and the Allegheny join to form the Ohio. ".repeat(60);
        let chunks = split(&text, 1000, 100);
        assert!(chunks.len() >= 2);

        let mut rebuilt = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.chars().skip(100));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn prefers_sentence_boundaries_over_hard_cuts() {
        let text = "A sentence about steel mills. ".repeat(100);
        let chunks = split(&text, 1000, 100);
        // Every non-final chunk should end right after a sentence.
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.ends_with(". "), "chunk ended mid-sentence: ...{:?}", &chunk[chunk.len().saturating_sub(20)..]);
        }
    }

    #[test]
    fn prefers_paragraph_breaks_when_present() {
        let paragraph = format!("{}\n\n", "w".repeat(430));
        let text = paragraph.repeat(6);
        let chunks = split(&text, 1000, 100);
        assert!(chunks[0].ends_with("\n\n"));
    }
}
