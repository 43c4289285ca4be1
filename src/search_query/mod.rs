mod node;
mod normalize;
mod parser;
mod render;

use crate::stop_words::StopWords;

pub use node::{Conjunction, Node, NodeKind, TermForm};
pub use normalize::normalize;
pub use parser::parse;
pub use render::render;

/// Convert a free-form search expression into a full-text query string.
///
/// Behavior:
/// - Bare words match inflectional forms, `~word` thesaurus forms,
///   `+word`, `word*` and `"a phrase"` literally
/// - `-word` / `not word` negate, `and` / `or` / `near` join terms,
///   adjacent terms are joined with AND
/// - `( … )` groups, `< … >` joins its terms with NEAR
/// - Stop words, unbalanced delimiters and dangling operators are dropped
/// - Anything the engine would reject is rewritten or removed, and an
///   empty string comes back when nothing usable is left
pub fn convert(input: &str, stop_words: &StopWords) -> String {
    let tree = parse(input, Conjunction::default(), stop_words);
    render(normalize(tree, true).as_ref())
}

/// Reusable conversion settings: the stop words and the conjunction used
/// between adjacent terms.
#[derive(Debug, Clone, Default)]
pub struct QueryConverter {
    stop_words: StopWords,
    default_conjunction: Conjunction,
}

impl QueryConverter {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            default_conjunction: Conjunction::And,
        }
    }

    pub fn with_default_conjunction(mut self, conjunction: Conjunction) -> Self {
        self.default_conjunction = conjunction;
        self
    }

    /// Add stop words on top of the ones already configured.
    pub fn with_stop_words<S: AsRef<str>>(mut self, words: impl IntoIterator<Item = S>) -> Self {
        self.stop_words.extend(words);
        self
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn default_conjunction(&self) -> Conjunction {
        self.default_conjunction
    }

    /// Parse without normalizing.
    pub fn parse(&self, input: &str) -> Option<Node> {
        parse(input, self.default_conjunction, &self.stop_words)
    }

    /// Parse and normalize.
    pub fn tree(&self, input: &str) -> Option<Node> {
        normalize(self.parse(input), true)
    }

    pub fn convert(&self, input: &str) -> String {
        let output = render(self.tree(input).as_ref());
        log::trace!("converted {input:?} into {output:?}");
        output
    }
}
