//! Parse tree types produced by the grammar. A [`Node`] is either a number literal,
//! an operator token, or an expression whose first child is the operator and whose
//! remaining children are operands. Number and operator nodes keep the exact text
//! the grammar matched; turning that text into integers and operations is left to the
//! evaluator. The module also provides a parenthesized [`Display`](std::fmt::Display)
//! form (accepted back by [`crate::parser::parse_expression`]), an indented tag
//! listing for debugging, and node/leaf counting.

use std::fmt::{self, Write};

/// Type alias for number values in the evaluator
pub type NumberType = i64;

/// Parse tree node.
///
/// Structural invariant for trees built by the parser: every `Expression` holds an
/// `Operator` first, followed by one or more `Number` or `Expression` children.
/// The root is an `Expression` for the top-level (unparenthesized) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Number literal exactly as written (`-12`, `3.5`, `.5`)
    Number(String),
    /// Operator token exactly as written (`+`, `add`, `min`)
    Operator(String),
    /// Operator followed by its operands
    Expression(Vec<Node>),
}

impl Node {
    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Expression(children) => children,
            Node::Number(_) | Node::Operator(_) => &[],
        }
    }

    /// Total number of nodes in the tree, this one included.
    pub fn count_nodes(&self) -> usize {
        1 + self.children().iter().map(Node::count_nodes).sum::<usize>()
    }

    /// Number of leaf nodes (numbers and operators) in the tree.
    pub fn count_leaves(&self) -> usize {
        match self {
            Node::Expression(children) => children.iter().map(Node::count_leaves).sum(),
            Node::Number(_) | Node::Operator(_) => 1,
        }
    }

    /// Render the tree as an indented listing of tagged nodes, one per line.
    ///
    /// The root is tagged `lispy`, nested expressions `expression`:
    ///
    /// ```text
    /// lispy|>
    ///   operator|'+'
    ///   number|'1'
    ///   expression|>
    ///     operator|'*'
    ///     number|'2'
    ///     number|'3'
    /// ```
    pub fn tree(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_tree(&mut out, 0, true);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize, root: bool) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Node::Number(text) => writeln!(out, "{indent}number|'{text}'"),
            Node::Operator(text) => writeln!(out, "{indent}operator|'{text}'"),
            Node::Expression(children) => {
                let tag = if root { "lispy" } else { "expression" };
                writeln!(out, "{indent}{tag}|>")?;
                for child in children {
                    child.write_tree(out, depth + 1, false)?;
                }
                Ok(())
            }
        }
    }
}

/// Helper for building number leaves in tests
#[cfg_attr(not(test), expect(dead_code))]
pub(crate) fn num<S: AsRef<str>>(text: S) -> Node {
    Node::Number(text.as_ref().to_owned())
}

/// Helper for building operator leaves in tests
#[cfg_attr(not(test), expect(dead_code))]
pub(crate) fn op<S: AsRef<str>>(text: S) -> Node {
    Node::Operator(text.as_ref().to_owned())
}

/// Helper for building expressions in tests - works with arrays and vecs
#[cfg_attr(not(test), expect(dead_code))]
pub(crate) fn expr<I: IntoIterator<Item = Node>>(children: I) -> Node {
    Node::Expression(children.into_iter().collect())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(text) | Node::Operator(text) => write!(f, "{text}"),
            Node::Expression(children) => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
        }
    }
}
