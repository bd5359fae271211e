//! Recursive reduction of a parse tree to a [`Value`]: a number, or the first
//! [`EvalError`] produced anywhere in the tree.

use crate::ast::{Node, NumberType};
use crate::operators::find_operator;
use std::fmt;
use thiserror::Error;

/// Semantic errors produced while evaluating a well-formed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Right operand of `/` or `%` was zero
    #[error("Attempted to divide by zero")]
    DivideByZero,
    /// Operator text has no implementation (or the expression has no operator)
    #[error("Invalid Operator")]
    BadOperator,
    /// A literal, or a computed result, does not fit in a number
    #[error("Invalid Number")]
    BadNumber,
}

/// Result of evaluating a tree: a number, or the first error met anywhere in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Number(NumberType),
    Error(EvalError),
}

impl Value {
    /// Convert into a standard `Result` for use with `?`
    pub fn into_result(self) -> Result<NumberType, EvalError> {
        self.into()
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

impl From<Result<NumberType, EvalError>> for Value {
    fn from(result: Result<NumberType, EvalError>) -> Self {
        match result {
            Ok(n) => Value::Number(n),
            Err(e) => Value::Error(e),
        }
    }
}

impl From<Value> for Result<NumberType, EvalError> {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => Ok(n),
            Value::Error(e) => Err(e),
        }
    }
}

impl From<NumberType> for Value {
    fn from(n: NumberType) -> Self {
        Value::Number(n)
    }
}

impl From<EvalError> for Value {
    fn from(e: EvalError) -> Self {
        Value::Error(e)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Error(e) => write!(f, "{e}"),
        }
    }
}

/// Evaluate a parse tree (public API)
///
/// ```
/// use lispy::evaluator::{EvalError, Value, evaluate};
/// use lispy::parser::parse;
///
/// assert_eq!(evaluate(&parse("+ 1 2 3 4").unwrap()), Value::Number(10));
/// assert_eq!(
///     evaluate(&parse("+ 1 (/ 1 0)").unwrap()),
///     Value::Error(EvalError::DivideByZero)
/// );
/// ```
pub fn evaluate(node: &Node) -> Value {
    let value: Value = eval_node(node).into();
    log::trace!("{node} => {value}");
    value
}

/// Reduce one node. Errors short-circuit, so the first one found is the result.
fn eval_node(node: &Node) -> Result<NumberType, EvalError> {
    match node {
        Node::Number(text) => parse_number_literal(text),

        Node::Expression(children) => match children.as_slice() {
            [Node::Operator(op_text), first, rest @ ..] => {
                let Some(op) = find_operator(op_text) else {
                    log::debug!("no implementation for operator '{op_text}'");
                    return Err(EvalError::BadOperator);
                };

                let x = eval_node(first)?;

                // A lone operand to `-` is negated; other operators return it unchanged
                if rest.is_empty() && op.negates_single_operand() {
                    return x.checked_neg().ok_or(EvalError::BadNumber);
                }

                rest.iter().try_fold(x, |acc, child| {
                    let y = eval_node(child)?;
                    (op.apply)(acc, y).inspect_err(|e| {
                        log::debug!("({op_text} {acc} {y}) failed: {e}");
                    })
                })
            }
            _ => Err(EvalError::BadOperator),
        },

        // An operator outside an expression has nothing to apply to
        Node::Operator(_) => Err(EvalError::BadOperator),
    }
}

/// Convert number literal text to an integer.
///
/// Only the integer part counts; anything from the decimal point on is dropped, so
/// `1.9` is 1 and `.5` is 0. An integer part that does not fit is `BadNumber`.
fn parse_number_literal(text: &str) -> Result<NumberType, EvalError> {
    let integer_part = text.split('.').next().unwrap_or_default();
    match integer_part {
        "" | "-" => Ok(0),
        digits => digits.parse::<NumberType>().map_err(|_| {
            log::debug!("number literal '{text}' out of range");
            EvalError::BadNumber
        }),
    }
}
