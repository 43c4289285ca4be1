//! Character cursor used by the query parser.
//!
//! Works on `char`s rather than bytes so positions never split a UTF-8
//! sequence. Every operation tolerates running off the end: reads past the
//! end yield `None`, moves are clamped, and unterminated quotes or blocks
//! return whatever was collected.

const QUOTE: char = '"';

pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    pub fn end_of_text(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.chars.len().saturating_sub(self.pos)
    }

    pub fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.chars.len());
    }

    /// Substring over the half-open char range `start..end`, clamped to the text.
    pub fn extract(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    pub fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += 1;
        }
    }

    pub fn skip_whitespace(&mut self) {
        self.skip_while(char::is_whitespace);
    }

    /// Skip over a run of characters contained in `set`.
    pub fn skip_chars(&mut self, set: &str) {
        self.skip_while(|c| set.contains(c));
    }

    /// Move to the next character contained in `set`. Returns false and parks
    /// at the end of the text when there is none.
    pub fn skip_to(&mut self, set: &str) -> bool {
        self.skip_while(|c| !set.contains(c));
        !self.end_of_text()
    }

    /// Read a quoted span. The cursor must sit on the opening quote, and
    /// that character is the one that closes the span. Both quotes are
    /// dropped. With `escape_doubled`, a doubled quote yields one literal
    /// quote instead of ending the span.
    pub fn extract_quoted(&mut self, escape_doubled: bool) -> String {
        let Some(quote) = self.peek() else {
            return String::new();
        };
        self.advance(1);

        let mut out = String::new();
        while let Some(c) = self.peek() {
            self.advance(1);
            if c == quote {
                if escape_doubled && self.peek() == Some(quote) {
                    out.push(quote);
                    self.advance(1);
                    continue;
                }
                return out;
            }
            out.push(c);
        }
        out
    }

    /// Read a delimited block. The cursor must sit on `open`. Nested
    /// `open`/`close` pairs are kept in the output, and `"`-quoted spans are
    /// copied verbatim without affecting the depth. The outer delimiters are
    /// dropped and the cursor ends after the matching `close`.
    pub fn extract_block(&mut self, open: char, close: char) -> String {
        if self.peek() != Some(open) {
            return String::new();
        }
        self.advance(1);

        let mut depth = 1usize;
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == QUOTE {
                let start = self.pos;
                self.advance(1);
                self.skip_while(|c| c != QUOTE);
                self.advance(1);
                out.push_str(&self.extract(start, self.pos));
                continue;
            }

            self.advance(1);
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    return out;
                }
            }
            out.push(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_advance() {
        let mut s = Scanner::new("abc");
        assert_eq!(s.peek(), Some('a'));
        assert_eq!(s.peek_at(2), Some('c'));
        assert_eq!(s.peek_at(3), None);
        s.advance(2);
        assert_eq!(s.peek(), Some('c'));
        assert_eq!(s.remaining(), 1);
        s.advance(10);
        assert!(s.end_of_text());
        assert_eq!(s.position(), 3);
        assert_eq!(s.peek(), None);
    }

    #[test]
    fn test_extract_is_clamped() {
        let s = Scanner::new("héllo");
        assert_eq!(s.extract(1, 3), "él");
        assert_eq!(s.extract(3, 100), "lo");
        assert_eq!(s.extract(4, 2), "");
    }

    #[test]
    fn test_skips() {
        let mut s = Scanner::new("   --+abc, def");
        s.skip_whitespace();
        assert_eq!(s.position(), 3);
        s.skip_chars("-+");
        assert_eq!(s.peek(), Some('a'));
        assert!(s.skip_to(",;"));
        assert_eq!(s.peek(), Some(','));
        assert!(!s.skip_to("!"));
        assert!(s.end_of_text());
    }

    #[test]
    fn test_extract_quoted_simple() {
        let mut s = Scanner::new("\"hello world\" rest");
        assert_eq!(s.extract_quoted(false), "hello world");
        assert_eq!(s.peek(), Some(' '));
    }

    #[test]
    fn test_extract_quoted_doubled_escape() {
        let mut s = Scanner::new("'it''s here' x");
        assert_eq!(s.extract_quoted(true), "it's here");
        assert_eq!(s.peek(), Some(' '));

        let mut s = Scanner::new("'it''s here' x");
        assert_eq!(s.extract_quoted(false), "it");
        assert_eq!(s.peek(), Some('\''));
    }

    #[test]
    fn test_extract_quoted_unterminated() {
        let mut s = Scanner::new("\"never closed");
        assert_eq!(s.extract_quoted(false), "never closed");
        assert!(s.end_of_text());
    }

    #[test]
    fn test_extract_block_nested() {
        let mut s = Scanner::new("(a (b c) d) e");
        assert_eq!(s.extract_block('(', ')'), "a (b c) d");
        assert_eq!(s.peek(), Some(' '));
    }

    #[test]
    fn test_extract_block_skips_quoted_delimiters() {
        let mut s = Scanner::new("(a \")\" b) c");
        assert_eq!(s.extract_block('(', ')'), "a \")\" b");
        assert_eq!(s.peek(), Some(' '));

        let mut s = Scanner::new("<a \"<\" b>");
        assert_eq!(s.extract_block('<', '>'), "a \"<\" b");
        assert!(s.end_of_text());
    }

    #[test]
    fn test_extract_block_unbalanced() {
        let mut s = Scanner::new("(a (b");
        assert_eq!(s.extract_block('(', ')'), "a (b");
        assert!(s.end_of_text());

        let mut s = Scanner::new("(a \"b)");
        assert_eq!(s.extract_block('(', ')'), "a \"b)");
        assert!(s.end_of_text());
    }

    #[test]
    fn test_extract_block_wrong_start() {
        let mut s = Scanner::new("abc");
        assert_eq!(s.extract_block('(', ')'), "");
        assert_eq!(s.position(), 0);
    }
}
