//! Lispy - prefix-notation arithmetic evaluator
//!
//! This crate recognizes a small S-expression arithmetic language and reduces each
//! input line to a single integer or an error. Every line is independent: there are
//! no variables, no definitions and no state carried from one input to the next.
//!
//! ```text
//! + 1 2 3              ; top level: bare operator, no outer parentheses
//! * 2 (- 10 4)         ; nested expressions are parenthesized
//! max 3 (pow 2 3) 5    ; word and symbol operators are aliases
//! - 5                  ; a single operand to `-` negates it
//! ```
//!
//! ## Operators
//!
//! | symbol | word  | meaning                        |
//! |--------|-------|--------------------------------|
//! | `+`    | `add` | addition                       |
//! | `-`    | `sub` | subtraction, unary negation    |
//! | `*`    | `mul` | multiplication                 |
//! | `/`    | `div` | truncating division            |
//! | `%`    | `mod` | remainder                      |
//! | `^`    | `pow` | integer exponentiation         |
//! |        | `min` | smaller operand                |
//! |        | `max` | larger operand                 |
//!
//! Operators with more than two operands fold left: `+ 1 2 3` is `(1 + 2) + 3`.
//!
//! ## Two error classes
//!
//! - Syntax errors ([`ParseError`]) come from the grammar and stop the line before
//!   evaluation starts.
//! - Semantic errors ([`evaluator::EvalError`]) are ordinary values produced by the
//!   evaluator. Once any subexpression yields one, it is the result of the whole line.
//!
//! ## Modules
//!
//! - `ast`: parse tree nodes, display and debug tree rendering
//! - `operators`: operator registry with symbol/word aliases
//! - `parser`: the grammar, built on `nom`
//! - `evaluator`: recursive reduction of a parse tree to a value

use std::fmt;

use thiserror::Error;

/// Maximum nesting of parenthesized expressions accepted by the parser.
/// Evaluation recurses once per nesting level, so this also bounds evaluator stack use.
pub const MAX_PARSE_DEPTH: usize = 128;

/// Categorizes the different kinds of parsing errors.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParseErrorKind {
    /// Invalid or unexpected syntax (missing operator, bad token)
    InvalidSyntax,
    /// Input ended before the expression was complete (empty line, unclosed parens)
    Incomplete,
    /// Expression nesting exceeded the configured maximum depth
    TooDeeplyNested,
    /// Extra input found after a complete, valid expression
    TrailingContent,
}

/// A structured error providing detailed information about a parsing failure.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// Context snippet from the input showing where the error occurred (max 100 chars)
    pub context: Option<String>,
    /// The problematic token or character encountered, if identifiable
    pub found: Option<String>,
}

impl ParseError {
    /// Create a ParseError with all fields
    pub fn new(
        kind: ParseErrorKind,
        message: impl Into<String>,
        context: Option<String>,
        found: Option<String>,
    ) -> Self {
        ParseError {
            kind,
            message: message.into(),
            context,
            found,
        }
    }

    /// Create a simple ParseError with a kind and message but no context
    pub fn from_message(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, message, None, None)
    }

    /// Create a ParseError with context extracted from input at a given byte offset
    pub fn with_context_and_found(
        kind: ParseErrorKind,
        message: impl Into<String>,
        input: &str,
        error_offset: usize,
        found: Option<String>,
    ) -> Self {
        const MAX_CONTEXT: usize = 100;

        // Work in chars so the window never splits a UTF-8 sequence
        let error_char = input
            .get(..error_offset)
            .map_or(0, |prefix| prefix.chars().count());
        let context_start = error_char.saturating_sub(20);
        let total_chars = input.chars().count();

        let context_str: String = input
            .chars()
            .skip(context_start)
            .take(MAX_CONTEXT)
            .collect();

        let mut display_context = String::new();
        if context_start > 0 {
            display_context.push_str("[...]");
        }
        display_context.push_str(&context_str);
        if context_start + context_str.chars().count() < total_chars {
            display_context.push_str("[...]");
        }

        let display_context = display_context.replace('\n', "\\n").replace('\r', "");

        Self::new(kind, message, Some(display_context), found)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ParseError: {}", self.message)?;
        if let Some(found) = &self.found {
            write!(f, "\nFound: {found}")?;
        }
        if let Some(context) = &self.context {
            write!(f, "\nContext: {context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Either class of failure for a single input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] evaluator::EvalError),
}

/// Parse and evaluate one line of input.
///
/// ```
/// assert_eq!(lispy::run("+ 1 (* 2 3)"), Ok(7));
/// assert!(matches!(lispy::run("/ 1 0"), Err(lispy::Error::Eval(_))));
/// assert!(matches!(lispy::run("(+ 1"), Err(lispy::Error::Parse(_))));
/// ```
pub fn run(line: &str) -> Result<ast::NumberType, Error> {
    let tree = parser::parse(line)?;
    let value = evaluator::evaluate(&tree).into_result()?;
    Ok(value)
}

pub mod ast;
pub mod evaluator;
pub mod operators;
pub mod parser;
