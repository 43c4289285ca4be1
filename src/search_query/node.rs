use std::mem;

use serde::{Deserialize, Serialize};

/// How a single term is matched by the full-text engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermForm {
    /// Word-derived forms (plurals, tenses).
    #[default]
    Inflectional,
    /// Synonym expansion.
    Thesaurus,
    /// Exact phrase or prefix match.
    Literal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    #[default]
    And,
    Or,
    Near,
}

impl Conjunction {
    pub fn keyword(self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
            Conjunction::Near => "NEAR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Terminal {
        term: String,
        term_form: TermForm,
    },
    Internal {
        left: Box<Node>,
        right: Box<Node>,
        conjunction: Conjunction,
    },
}

/// A node of the query expression tree.
///
/// For internal nodes `exclude` is derived from the children: it is true
/// only when both children are excluded, so build them with [`Node::internal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub exclude: bool,
    pub grouped: bool,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    /// Terminal node for a non-empty term. Callers filter empty and
    /// stop-listed terms before getting here.
    pub fn terminal(term: impl Into<String>, term_form: TermForm, exclude: bool) -> Self {
        Self {
            exclude,
            grouped: false,
            kind: NodeKind::Terminal {
                term: term.into(),
                term_form,
            },
        }
    }

    pub fn internal(left: Node, right: Node, conjunction: Conjunction) -> Self {
        Self {
            exclude: left.exclude && right.exclude,
            grouped: false,
            kind: NodeKind::Internal {
                left: Box::new(left),
                right: Box::new(right),
                conjunction,
            },
        }
    }

    pub fn grouped(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }

    /// Move the kind out, leaving an empty terminal behind. `Node` has a
    /// custom `Drop`, so its fields cannot be moved out by destructuring.
    pub fn take_kind(&mut self) -> NodeKind {
        mem::replace(
            &mut self.kind,
            NodeKind::Terminal {
                term: String::new(),
                term_form: TermForm::default(),
            },
        )
    }

    /// Terminal literal terms are the only operands a proximity search accepts.
    pub fn is_literal_terminal(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Terminal {
                term_form: TermForm::Literal,
                ..
            }
        )
    }
}

/// Every term adds a level to the tree, so children are freed from a
/// heap stack instead of recursing once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node>> = Vec::new();
        if let NodeKind::Internal { left, right, .. } = self.take_kind() {
            pending.push(left);
            pending.push(right);
        }
        while let Some(mut node) = pending.pop() {
            if let NodeKind::Internal { left, right, .. } = node.take_kind() {
                pending.push(left);
                pending.push(right);
            }
        }
    }
}
