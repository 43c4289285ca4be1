use super::node::{Conjunction, Node, NodeKind};

/// Pending work for the post-order walk.
enum Step {
    Visit(Node, bool),
    /// Both children of an internal node are normalized and on the result stack.
    Join {
        conjunction: Conjunction,
        grouped: bool,
        is_root: bool,
    },
}

/// Rewrite a tree so the engine's boolean grammar accepts it. Never fails.
///
/// Children are repaired first, then the parent:
/// - NEAR with an operand that is not a plain literal term becomes AND.
/// - Negated (or missing) operands of OR are dropped.
/// - A node left with one child collapses to that child; with none it is dropped.
/// - A negated left operand is swapped to the right when the right one is not negated.
/// - A negated node that is the root or a parenthesized group is dropped,
///   since it cannot match anything on its own.
///
/// The walk keeps its own stack, so tree depth is limited by memory only.
pub fn normalize(node: Option<Node>, is_root: bool) -> Option<Node> {
    let mut steps = vec![Step::Visit(node?, is_root)];
    let mut done: Vec<Option<Node>> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(mut node, is_root) => match node.take_kind() {
                NodeKind::Internal {
                    left,
                    right,
                    conjunction,
                } => {
                    steps.push(Step::Join {
                        conjunction,
                        grouped: node.grouped,
                        is_root,
                    });
                    steps.push(Step::Visit(*right, false));
                    steps.push(Step::Visit(*left, false));
                }
                terminal => {
                    node.kind = terminal;
                    done.push(eliminate_negated(node, is_root));
                }
            },
            Step::Join {
                conjunction,
                grouped,
                is_root,
            } => {
                let right = done.pop().flatten();
                let left = done.pop().flatten();
                let node = join(left, right, conjunction, grouped);
                done.push(node.and_then(|node| eliminate_negated(node, is_root)));
            }
        }
    }

    done.pop().flatten()
}

fn eliminate_negated(node: Node, is_root: bool) -> Option<Node> {
    if node.exclude && (node.grouped || is_root) {
        log::debug!("dropping negated {}", if is_root { "query" } else { "group" });
        return None;
    }
    Some(node)
}

fn join(
    mut left: Option<Node>,
    mut right: Option<Node>,
    mut conjunction: Conjunction,
    grouped: bool,
) -> Option<Node> {
    match conjunction {
        Conjunction::Near => {
            if !is_near_operand(left.as_ref()) || !is_near_operand(right.as_ref()) {
                log::debug!("NEAR operand is not a literal term, using AND");
                conjunction = Conjunction::And;
            }
        }
        Conjunction::Or => {
            drop_negated(&mut left);
            drop_negated(&mut right);
        }
        Conjunction::And => {}
    }

    let (left, right) = match (left, right) {
        (None, None) => return None,
        (Some(child), None) | (None, Some(child)) => return Some(child),
        (Some(left), Some(right)) => (left, right),
    };

    // A negated operand may not come first.
    let (left, right) = if left.exclude && !right.exclude {
        log::debug!("moving negated operand after {}", conjunction.keyword());
        (right, left)
    } else {
        (left, right)
    };

    Some(Node::internal(left, right, conjunction).grouped(grouped))
}

/// Negated literals are rejected too: the grammar has no `NEAR NOT`.
fn is_near_operand(node: Option<&Node>) -> bool {
    node.is_some_and(|n| n.is_literal_terminal() && !n.exclude)
}

fn drop_negated(node: &mut Option<Node>) {
    if node.as_ref().is_some_and(|n| n.exclude) {
        log::debug!("dropping negated OR operand");
        *node = None;
    }
}
