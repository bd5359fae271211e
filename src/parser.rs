//! The grammar, built from `nom` combinators. Four rules, tried in this order:
//!
//! ```text
//! number     : /-?(([0-9]*\.[0-9]+)|[0-9]+)/
//! operator   : '+' | '-' | '*' | '/' | '%' | '^'
//!            | "add" | "sub" | "mul" | "div" | "mod" | "pow" | "min" | "max"
//! expression : <number> | '(' <operator> <expression>+ ')'
//! lispy      : start <operator> <expression>+ end
//! ```
//!
//! Whitespace is allowed (not required) between tokens. The top level is an operator
//! and its operands with no enclosing parentheses; nested expressions must be
//! parenthesized.

use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{char, digit0, digit1, multispace0},
    combinator::{cut, eof, opt, recognize},
    error::ErrorKind,
    multi::many1,
    sequence::{pair, preceded},
};

use crate::ast::Node;
use crate::operators::operator_tokens;
use crate::{MAX_PARSE_DEPTH, ParseError, ParseErrorKind};

/// Parser settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum nesting of parenthesized expressions
    pub max_depth: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            max_depth: MAX_PARSE_DEPTH,
        }
    }
}

fn grammar_error(input: &str, code: ErrorKind) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(input, code))
}

/// Convert nom parsing errors to structured, user-friendly errors
fn to_parse_error(
    input: &str,
    error: nom::Err<nom::error::Error<&str>>,
    config: ParseConfig,
) -> ParseError {
    match error {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let offset = input.len().saturating_sub(e.input.len());
            let column = input.get(..offset).map_or(0, |s| s.chars().count()) + 1;
            let at_end = e.input.trim().is_empty();
            let leading_space = input.len() - input.trim_start().len();

            let found = if at_end {
                "end of input".to_owned()
            } else {
                e.input.trim_start().chars().take(10).collect()
            };
            let unexpected = if at_end {
                ParseErrorKind::Incomplete
            } else {
                ParseErrorKind::InvalidSyntax
            };

            let (kind, message) = match e.code {
                ErrorKind::TooLarge => (
                    ParseErrorKind::TooDeeplyNested,
                    format!(
                        "Expression too deeply nested (max depth: {}) at column {column}",
                        config.max_depth
                    ),
                ),
                ErrorKind::Eof => (
                    ParseErrorKind::TrailingContent,
                    format!("Unexpected input after complete expression at column {column}"),
                ),
                ErrorKind::Char => (unexpected, format!("Expected ')' at column {column}")),
                ErrorKind::Tag if offset == leading_space && e.input.starts_with('(') => (
                    unexpected,
                    format!(
                        "Expected operator at column {column} (the top level takes no parentheses, e.g. `+ 1 2`)"
                    ),
                ),
                ErrorKind::Tag => (unexpected, format!("Expected operator at column {column}")),
                _ => (
                    unexpected,
                    format!("Expected number or '(' at column {column}"),
                ),
            };

            ParseError::with_context_and_found(kind, message, input, offset, Some(found))
        }
        nom::Err::Incomplete(_) => {
            ParseError::from_message(ParseErrorKind::Incomplete, "Incomplete input")
        }
    }
}

/// Parse a number literal, keeping its text
fn parse_number(input: &str) -> IResult<&str, Node> {
    let (input, text) = recognize(pair(
        opt(char('-')),
        alt((recognize((digit0, char('.'), digit1)), digit1)),
    ))
    .parse(input)?;

    Ok((input, Node::Number(text.to_owned())))
}

/// Parse an operator token: the symbols first, then the words
fn parse_operator(input: &str) -> IResult<&str, Node> {
    let (input, _) = multispace0.parse(input)?;
    for token in operator_tokens() {
        if let Some(rest) = input.strip_prefix(token) {
            return Ok((rest, Node::Operator((*token).to_owned())));
        }
    }
    Err(grammar_error(input, ErrorKind::Tag))
}

/// Parse an operator followed by one or more operands; returns all of them as children
fn parse_operation(input: &str, config: ParseConfig, depth: usize) -> IResult<&str, Vec<Node>> {
    let (input, operator) = parse_operator(input)?;
    let (input, operands) = many1(|input| parse_operand(input, config, depth)).parse(input)?;

    let mut children = Vec::with_capacity(operands.len() + 1);
    children.push(operator);
    children.extend(operands);
    Ok((input, children))
}

/// Parse the `expression` rule: a number or a parenthesized operation
fn parse_operand(input: &str, config: ParseConfig, depth: usize) -> IResult<&str, Node> {
    let (input, _) = multispace0.parse(input)?;
    match alt((parse_number, |input| {
        parse_parenthesized(input, config, depth)
    }))
    .parse(input)
    {
        // Neither alternative started; report it against the operand position
        Err(nom::Err::Error(_)) => Err(grammar_error(input, ErrorKind::Alt)),
        other => other,
    }
}

/// Parse `( operator expression+ )`. Once the paren is consumed there is no backtracking.
fn parse_parenthesized(input: &str, config: ParseConfig, depth: usize) -> IResult<&str, Node> {
    let (input, _) = char('(').parse(input)?;
    if depth >= config.max_depth {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            ErrorKind::TooLarge,
        )));
    }

    let (input, children) = cut(|input| parse_operation(input, config, depth + 1)).parse(input)?;
    let (input, _) = cut(preceded(multispace0, char(')'))).parse(input)?;

    Ok((input, Node::Expression(children)))
}

/// Parse the top-level `lispy` rule, anchored at both ends
fn parse_lispy(input: &str, config: ParseConfig) -> IResult<&str, Node> {
    let (input, children) = parse_operation(input, config, 0)?;
    let (input, _) = multispace0.parse(input)?;
    let (input, _) = eof.parse(input)?;
    Ok((input, Node::Expression(children)))
}

/// Parse one input line with the default configuration.
///
/// The line must be a bare operator followed by one or more operands:
///
/// ```
/// use lispy::ast::Node;
///
/// let tree = lispy::parser::parse("+ 1 (* 2 3)").unwrap();
/// assert_eq!(tree.children().len(), 3);
/// assert_eq!(tree.children()[0], Node::Operator("+".into()));
/// assert!(lispy::parser::parse("(+ 1").is_err());
/// ```
pub fn parse(input: &str) -> Result<Node, ParseError> {
    parse_with_config(input, ParseConfig::default())
}

/// Parse one input line with explicit settings.
pub fn parse_with_config(input: &str, config: ParseConfig) -> Result<Node, ParseError> {
    match parse_lispy(input, config) {
        Ok((_, tree)) => {
            log::trace!("parsed {tree}");
            Ok(tree)
        }
        Err(e) => {
            let err = to_parse_error(input, e, config);
            log::debug!("syntax error in {input:?}: {}", err.message);
            Err(err)
        }
    }
}

/// Parse a whole input as a single `expression`: a number or a parenthesized operation.
///
/// This is the form nested operands take, and the form [`Node`]'s `Display` produces.
pub fn parse_expression(input: &str) -> Result<Node, ParseError> {
    let config = ParseConfig::default();
    let result = (
        |input| parse_operand(input, config, 0),
        multispace0,
        eof,
    )
        .parse(input);

    match result {
        Ok((_, (tree, _, _))) => Ok(tree),
        Err(e) => Err(to_parse_error(input, e, config)),
    }
}
