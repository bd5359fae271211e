//! Operator registry with symbol/word alias support.
//!
//! Every operation is defined once and can be written two ways:
//!
//! ```text
//! (+ 1 2)      (add 1 2)
//! (^ 2 10)     (pow 2 10)
//! (min 3 7)    ; min and max only have a word form
//! ```
//!
//! Both spellings resolve to the same [`Operator`], so the evaluator dispatches on the
//! operation rather than on the text.
//!
//! ## Arithmetic
//!
//! All operations work on [`NumberType`] and are checked: a result that does not fit
//! is reported as [`EvalError::BadNumber`] instead of wrapping. Division and remainder
//! by zero are [`EvalError::DivideByZero`]. Division truncates toward zero and the
//! remainder takes the sign of the dividend.
//!
//! ## Adding New Operators
//!
//! 1. **Implement the function** with the signature
//!    `fn(NumberType, NumberType) -> Result<NumberType, EvalError>`
//! 2. **Add an entry to OPERATORS** with its symbol (if any) and word
//! 3. **Add tests** covering both aliases and the error cases

use crate::ast::NumberType;
use crate::evaluator::EvalError;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Binary implementation of an operation, applied once per folded operand.
pub type ApplyFn = fn(NumberType, NumberType) -> Result<NumberType, EvalError>;

/// The operations the language knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Min,
    Max,
}

/// Definition of a built-in operator
#[derive(Debug, Clone)]
pub struct OperatorDef {
    pub operator: Operator,
    /// Single-character symbol form, absent for `min` and `max`
    pub symbol: Option<&'static str>,
    /// Word form
    pub word: &'static str,
    /// Implementation used when folding operands
    pub apply: ApplyFn,
}

impl PartialEq for OperatorDef {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator
    }
}

impl OperatorDef {
    /// Both spellings of this operator, symbol first.
    pub fn aliases(&self) -> impl Iterator<Item = &'static str> {
        self.symbol.into_iter().chain(std::iter::once(self.word))
    }

    /// Whether a single operand means negation rather than a no-op fold.
    pub fn negates_single_operand(&self) -> bool {
        self.operator == Operator::Sub
    }
}

//
// Operator Implementations
//

fn op_add(x: NumberType, y: NumberType) -> Result<NumberType, EvalError> {
    x.checked_add(y).ok_or(EvalError::BadNumber)
}

fn op_sub(x: NumberType, y: NumberType) -> Result<NumberType, EvalError> {
    x.checked_sub(y).ok_or(EvalError::BadNumber)
}

fn op_mul(x: NumberType, y: NumberType) -> Result<NumberType, EvalError> {
    x.checked_mul(y).ok_or(EvalError::BadNumber)
}

fn op_div(x: NumberType, y: NumberType) -> Result<NumberType, EvalError> {
    if y == 0 {
        return Err(EvalError::DivideByZero);
    }
    // Only MIN / -1 can fail here
    x.checked_div(y).ok_or(EvalError::BadNumber)
}

fn op_mod(x: NumberType, y: NumberType) -> Result<NumberType, EvalError> {
    if y == 0 {
        return Err(EvalError::DivideByZero);
    }
    // MIN % -1 is 0; wrapping_rem returns it where checked_rem reports overflow
    Ok(x.wrapping_rem(y))
}

/// `x` multiplied by itself `y` times, starting from 1.
///
/// A negative exponent multiplies zero times and so yields 1. Computed by squaring,
/// which gives the same value as repeated multiplication in logarithmic steps.
fn op_pow(x: NumberType, y: NumberType) -> Result<NumberType, EvalError> {
    let mut remaining = y.max(0).unsigned_abs();
    let mut base = x;
    let mut acc: NumberType = 1;

    while remaining > 0 {
        if remaining & 1 == 1 {
            acc = acc.checked_mul(base).ok_or(EvalError::BadNumber)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            base = base.checked_mul(base).ok_or(EvalError::BadNumber)?;
        }
    }

    Ok(acc)
}

fn op_min(x: NumberType, y: NumberType) -> Result<NumberType, EvalError> {
    Ok(x.min(y))
}

fn op_max(x: NumberType, y: NumberType) -> Result<NumberType, EvalError> {
    Ok(x.max(y))
}

/// Global registry of all operators, in grammar alternation order.
static OPERATORS: LazyLock<Vec<OperatorDef>> = LazyLock::new(|| {
    vec![
        OperatorDef {
            operator: Operator::Add,
            symbol: Some("+"),
            word: "add",
            apply: op_add,
        },
        OperatorDef {
            operator: Operator::Sub,
            symbol: Some("-"),
            word: "sub",
            apply: op_sub,
        },
        OperatorDef {
            operator: Operator::Mul,
            symbol: Some("*"),
            word: "mul",
            apply: op_mul,
        },
        OperatorDef {
            operator: Operator::Div,
            symbol: Some("/"),
            word: "div",
            apply: op_div,
        },
        OperatorDef {
            operator: Operator::Mod,
            symbol: Some("%"),
            word: "mod",
            apply: op_mod,
        },
        OperatorDef {
            operator: Operator::Pow,
            symbol: Some("^"),
            word: "pow",
            apply: op_pow,
        },
        OperatorDef {
            operator: Operator::Min,
            symbol: None,
            word: "min",
            apply: op_min,
        },
        OperatorDef {
            operator: Operator::Max,
            symbol: None,
            word: "max",
            apply: op_max,
        },
    ]
});

/// Lazy static map from either alias to its definition
static BY_ALIAS: LazyLock<HashMap<&'static str, &'static OperatorDef>> = LazyLock::new(|| {
    let ops: &'static [OperatorDef] = OPERATORS.as_slice();
    ops.iter()
        .flat_map(|def| def.aliases().map(move |alias| (alias, def)))
        .collect()
});

/// Operator tokens in the order the grammar tries them: all symbols, then all words.
static TOKENS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let symbols = OPERATORS.iter().filter_map(|def| def.symbol);
    let words = OPERATORS.iter().map(|def| def.word);
    symbols.chain(words).collect()
});

/// Get all operator definitions
pub fn operators() -> &'static [OperatorDef] {
    OPERATORS.as_slice()
}

/// Find an operator by either its symbol or its word
pub fn find_operator(alias: &str) -> Option<&'static OperatorDef> {
    BY_ALIAS.get(alias).copied()
}

/// Every operator spelling the grammar accepts, in alternation order
pub(crate) fn operator_tokens() -> &'static [&'static str] {
    TOKENS.as_slice()
}
