//! EDU segmentation with character-span tracking
//!
//! Text is split after sentence-terminal punctuation followed by whitespace
//! and at blank lines. Each fragment is then located in the source text to
//! recover its character span.

use crate::error::Result;
use crate::types::{Edu, Span};
use regex::Regex;
use std::sync::OnceLock;

/// Punctuation that closes a fragment when followed by whitespace
pub const TERMINALS: [char; 5] = ['.', '!', '?', '¡', '¿'];

fn splitter() -> &'static Regex {
    static SPLITTER: OnceLock<Regex> = OnceLock::new();
    SPLITTER.get_or_init(|| {
        Regex::new(r"[.!?¡¿]\s+|\n{2,}").expect("segmentation pattern is a valid regex")
    })
}

/// Split `text` into trimmed, non-empty fragments
///
/// Terminal punctuation stays on the fragment it closes. If nothing
/// survives trimming, the whole trimmed text is the only fragment.
pub fn split_fragments(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for found in splitter().find_iter(text) {
        let cut = match found.as_str().chars().next() {
            Some(ch) if TERMINALS.contains(&ch) => found.start() + ch.len_utf8(),
            _ => found.start(),
        };
        pieces.push(&text[last..cut]);
        last = found.end();
    }
    pieces.push(&text[last..]);

    let fragments: Vec<&str> = pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect();

    if fragments.is_empty() {
        vec![text.trim()]
    } else {
        fragments
    }
}

/// Character offset of `fragment` in `window`, the source text from
/// character `cursor` on
///
/// Fragments cut from the same text are always found; a fragment that was
/// normalized after cutting is placed at the cursor.
fn locate(window: &str, cursor: usize, fragment: &str) -> usize {
    match window.find(fragment) {
        Some(offset) => cursor + window[..offset].chars().count(),
        None => {
            log::warn!("fragment not found after offset {cursor}; placing it at the cursor");
            cursor
        }
    }
}

/// Segment trimmed, non-empty `text` into EDUs numbered from 1
///
/// Spans are character offsets. Each fragment is searched for starting at
/// the end of the previous span; when it cannot be found there the span is
/// placed at the cursor with the fragment's length, so span starts never
/// decrease.
pub fn segment(text: &str) -> Result<Vec<Edu>> {
    let char_starts: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
    let byte_at = |chars: usize| char_starts.get(chars).copied().unwrap_or(text.len());

    let fragments = split_fragments(text);
    let mut edus = Vec::with_capacity(fragments.len());
    let mut cursor = 0;

    for (id, fragment) in (1u32..).zip(fragments) {
        let start = locate(&text[byte_at(cursor)..], cursor, fragment);
        let span = Span::new(start, start + fragment.chars().count())?;
        cursor = span.end();
        edus.push(Edu::new(id, fragment, span)?);
    }

    Ok(edus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_terminal_punctuation() {
        let fragments = split_fragments("El perro corre. El gato duerme.");
        assert_eq!(fragments, vec!["El perro corre.", "El gato duerme."]);
    }

    #[test]
    fn test_split_on_blank_lines() {
        let fragments = split_fragments("Title\n\nFirst paragraph\n\n\nSecond one");
        assert_eq!(fragments, vec!["Title", "First paragraph", "Second one"]);
    }

    #[test]
    fn test_single_newline_does_not_split() {
        let fragments = split_fragments("one line\nstill the same");
        assert_eq!(fragments, vec!["one line\nstill the same"]);
    }

    #[test]
    fn test_punctuation_without_whitespace_does_not_split() {
        assert_eq!(split_fragments("v1.2.3 is out"), vec!["v1.2.3 is out"]);
        assert_eq!(split_fragments("Wait?! No."), vec!["Wait?!", "No."]);
    }

    #[test]
    fn test_inverted_marks_split_too() {
        let fragments = split_fragments("Hola ¿ qué tal?");
        assert_eq!(fragments, vec!["Hola ¿", "qué tal?"]);
    }

    #[test]
    fn test_segment_assigns_ids_and_spans() {
        let text = "El perro corre. El gato duerme.";
        let edus = segment(text).unwrap();

        assert_eq!(edus.len(), 2);
        assert_eq!(edus[0].id(), 1);
        assert_eq!(edus[1].id(), 2);
        assert_eq!(edus[0].span(), Span::new(0, 15).unwrap());
        assert_eq!(edus[1].span(), Span::new(16, 31).unwrap());
    }

    #[test]
    fn test_spans_are_character_offsets() {
        let text = "¡Olé, señor! Añada más.";
        let edus = segment(text).unwrap();
        let chars: Vec<char> = text.chars().collect();

        assert_eq!(edus.len(), 2);
        for edu in &edus {
            let span = edu.span();
            let covered: String = chars[span.start()..span.end()].iter().collect();
            assert_eq!(covered, edu.text());
        }
    }

    #[test]
    fn test_repeated_sentences_get_distinct_spans() {
        let edus = segment("Yes. Yes. Yes.").unwrap();
        let starts: Vec<usize> = edus.iter().map(|e| e.span().start()).collect();
        assert_eq!(starts, vec![0, 5, 10]);
    }

    #[test]
    fn test_locate_searches_from_the_cursor() {
        assert_eq!(locate("ya. Olé. Fin.", 4, "Olé."), 8);
        assert_eq!(locate("Fin.", 9, "Fin."), 9);
    }

    #[test]
    fn test_locate_falls_back_to_the_cursor() {
        // Whitespace collapsed after cutting no longer matches the source
        assert_eq!(locate("one  two. three.", 5, "one two."), 5);
        assert_eq!(locate("", 12, "gone"), 12);
    }

    #[test]
    fn test_single_sentence_is_one_edu() {
        let edus = segment("Just one sentence without a period").unwrap();
        assert_eq!(edus.len(), 1);
        assert_eq!(edus[0].span().end(), 34);
    }
}
