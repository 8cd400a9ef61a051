//! Word extraction around the cursor.
//!
//! Completion and classification look at "the word before the cursor" with
//! different ideas of where a word ends; `WordBoundary` names those ideas.

use crate::sql::tokenizer::is_word_char;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordBoundary {
    /// Only whitespace ends a word.
    Whitespace,
    /// Whitespace, parentheses, `:`, `,` and `;` end a word.
    /// Dots stay inside so `schema.partial` is one word.
    ManyPunctuations,
    /// Like `ManyPunctuations`, plus `.`; this is the partial a candidate
    /// replaces.
    MostPunctuations,
}

impl WordBoundary {
    fn breaks(self, c: char) -> bool {
        c.is_whitespace()
            || match self {
                WordBoundary::Whitespace => false,
                WordBoundary::ManyPunctuations => matches!(c, '(' | ')' | ':' | ',' | ';'),
                WordBoundary::MostPunctuations => {
                    matches!(c, '(' | ')' | ':' | ',' | ';' | '.')
                }
            }
    }
}

/// Longest trailing run of `text` that contains no boundary character.
pub fn last_word(text: &str, boundary: WordBoundary) -> &str {
    let start = text
        .char_indices()
        .rev()
        .find(|&(_, c)| boundary.breaks(c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    &text[start..]
}

/// The word straddling byte offset `pos`: trailing word characters on the left
/// plus leading word characters on the right. Returns the byte span.
pub fn word_around(text: &str, pos: usize) -> (usize, usize) {
    let start = text[..pos]
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_word_char(c))
        .last()
        .map_or(pos, |(i, _)| i);
    let end = text[pos..]
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(text.len(), |(i, _)| pos + i);
    (start, end)
}

/// Clamp `pos` into `text` and move it back onto a char boundary.
pub fn clamp_cursor(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}
