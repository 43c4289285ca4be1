use std::fmt;

use super::node::{Conjunction, Node, NodeKind, TermForm};

/// Serialize a normalized tree. An eliminated tree renders as an empty string.
pub fn render(node: Option<&Node>) -> String {
    node.map(Node::to_string).unwrap_or_default()
}

enum Piece<'a> {
    Node(&'a Node),
    Keyword(Conjunction),
    Text(&'static str),
}

fn write_terminal(f: &mut fmt::Formatter<'_>, node: &Node, term: &str, term_form: TermForm) -> fmt::Result {
    if node.exclude {
        f.write_str("NOT ")?;
    }
    match term_form {
        TermForm::Inflectional => write!(f, "FORMSOF(INFLECTIONAL, {term})"),
        TermForm::Thesaurus => write!(f, "FORMSOF(THESAURUS, {term})"),
        // embedded quotes are doubled
        TermForm::Literal => write!(f, "\"{}\"", term.replace('"', "\"\"")),
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pieces are popped in output order
        let mut pieces = vec![Piece::Node(self)];

        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Keyword(conjunction) => write!(f, " {} ", conjunction.keyword())?,
                Piece::Node(node) => match &node.kind {
                    NodeKind::Terminal { term, term_form } => {
                        write_terminal(f, node, term, *term_form)?
                    }
                    NodeKind::Internal {
                        left,
                        right,
                        conjunction,
                    } => {
                        if node.grouped {
                            pieces.push(Piece::Text(")"));
                        }
                        pieces.push(Piece::Node(right));
                        pieces.push(Piece::Keyword(*conjunction));
                        pieces.push(Piece::Node(left));
                        if node.grouped {
                            pieces.push(Piece::Text("("));
                        }
                    }
                },
            }
        }
        Ok(())
    }
}
