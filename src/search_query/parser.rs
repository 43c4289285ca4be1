use super::node::{Conjunction, Node, TermForm};
use crate::scanner::Scanner;
use crate::stop_words::StopWords;

/// Characters that end a bare word.
const PUNCTUATION: &str = "~\"`!@#$%^&*()-+=[]{}\\|;:,.<>?/";

/// Blocks nested deeper than this are read flat: their brackets are
/// skipped like other punctuation and their words join the enclosing level.
const MAX_NESTING: usize = 128;

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !PUNCTUATION.contains(c)
}

/// Prefix state collected before a term. Cleared once the term is emitted.
#[derive(Debug, Clone, Copy)]
struct Modifiers {
    term_form: TermForm,
    exclude: bool,
    conjunction: Conjunction,
}

impl Modifiers {
    fn new(conjunction: Conjunction) -> Self {
        Self {
            term_form: TermForm::Inflectional,
            exclude: false,
            conjunction,
        }
    }
}

struct Parser<'a> {
    scanner: Scanner,
    stop_words: &'a StopWords,
    default_conjunction: Conjunction,
    depth: usize,
    modifiers: Modifiers,
    root: Option<Node>,
}

impl<'a> Parser<'a> {
    fn new(
        segment: &str,
        default_conjunction: Conjunction,
        stop_words: &'a StopWords,
        depth: usize,
    ) -> Self {
        Self {
            scanner: Scanner::new(segment),
            stop_words,
            default_conjunction,
            depth,
            modifiers: Modifiers::new(default_conjunction),
            root: None,
        }
    }

    fn reset(&mut self) {
        self.modifiers = Modifiers::new(self.default_conjunction);
    }

    fn run(mut self) -> Option<Node> {
        let nested_ok = self.depth < MAX_NESTING;

        while let Some(c) = self.scanner.peek() {
            match c {
                '"' => {
                    let text = self.scanner.extract_quoted(false);
                    self.modifiers.term_form = TermForm::Literal;
                    self.add_term(text.trim());
                    self.reset();
                }
                '(' if nested_ok => {
                    let block = self.scanner.extract_block('(', ')');
                    let sub = self.parse_block(&block, self.default_conjunction);
                    self.add_node(sub, true);
                    self.reset();
                }
                '<' if nested_ok => {
                    let block = self.scanner.extract_block('<', '>');
                    let sub = self.parse_block(&block, Conjunction::Near);
                    self.add_node(sub, false);
                    self.reset();
                }
                '-' => {
                    self.modifiers.exclude = true;
                    self.scanner.advance(1);
                }
                '+' => {
                    self.modifiers.term_form = TermForm::Literal;
                    self.scanner.advance(1);
                }
                '~' => {
                    self.modifiers.term_form = TermForm::Thesaurus;
                    self.scanner.advance(1);
                }
                c if is_word_char(c) => self.read_word(),
                _ => self.scanner.advance(1),
            }
        }

        self.root
    }

    fn parse_block(&self, block: &str, default_conjunction: Conjunction) -> Option<Node> {
        Parser::new(block, default_conjunction, self.stop_words, self.depth + 1).run()
    }

    /// Bare word, keyword, or trailing-wildcard prefix term.
    fn read_word(&mut self) {
        let start = self.scanner.position();
        self.scanner.skip_while(is_word_char);
        if self.scanner.peek() == Some('*') {
            self.scanner.advance(1);
            self.modifiers.term_form = TermForm::Literal;
        }
        let word = self.scanner.extract(start, self.scanner.position());

        match word.to_uppercase().as_str() {
            "AND" => self.modifiers.conjunction = Conjunction::And,
            "OR" => self.modifiers.conjunction = Conjunction::Or,
            "NEAR" => self.modifiers.conjunction = Conjunction::Near,
            "NOT" => self.modifiers.exclude = true,
            _ => {
                self.add_term(&word);
                self.reset();
            }
        }
    }

    fn add_term(&mut self, term: &str) {
        if term.is_empty() {
            log::debug!("dropping empty term");
            return;
        }
        if self.stop_words.contains(term) {
            log::debug!("dropping stop word {term:?}");
            return;
        }

        let node = Node::terminal(term, self.modifiers.term_form, self.modifiers.exclude);
        self.add_node(Some(node), false);
    }

    /// Attach a node on the right of the current root.
    fn add_node(&mut self, node: Option<Node>, grouped: bool) {
        let Some(mut node) = node else {
            return;
        };
        if grouped {
            node.grouped = true;
        }

        self.root = Some(match self.root.take() {
            None => node,
            Some(root) => Node::internal(root, node, self.modifiers.conjunction),
        });
    }
}

/// Build an expression tree from a query segment.
///
/// Never fails: malformed input is read as far as it makes sense, and
/// `None` means nothing usable was found.
pub fn parse(
    segment: &str,
    default_conjunction: Conjunction,
    stop_words: &StopWords,
) -> Option<Node> {
    Parser::new(segment, default_conjunction, stop_words, 0).run()
}
