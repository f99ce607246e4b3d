//! The evaluation engine: walks a parsed AST against a structured datum.
//!
//! Comparison dispatch is keyed off the left value's runtime kind, so an
//! integer compared against a float uses integer semantics; arithmetic is
//! keyed off the right value's kind. Both asymmetries are part of the
//! language's observable behavior.

use regex::Regex;
use serde_json::Value;

use crate::ast::{
    BinaryOperator, Expression, ExpressionValue, MatchExpression, MatchOperator, MatchValue,
    MathOperator, UnaryOperator, ValueType,
};
use crate::coerce;
use crate::error::BexprError;
use crate::options::Options;
use crate::pointer::{Pointer, PointerError};

/// A dynamic value produced while evaluating one side of a match.
#[derive(Debug, Clone, PartialEq)]
pub enum BexprValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// A structured value resolved from the datum (array, object, or null).
    Json(Value),
}

impl BexprValue {
    fn from_json(value: Value) -> Self {
        match value {
            Value::Bool(b) => BexprValue::Bool(b),
            Value::Number(n) => {
                // numbers normalize to i64 when representable, else f64
                if let Some(i) = n.as_i64() {
                    BexprValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    BexprValue::Float(f)
                } else {
                    BexprValue::Json(Value::Number(n))
                }
            }
            Value::String(s) => BexprValue::String(s),
            other => BexprValue::Json(other),
        }
    }

    /// The textual form a comparison sees when it coerces across kinds.
    fn display(&self) -> String {
        match self {
            BexprValue::Bool(b) => b.to_string(),
            BexprValue::Int(i) => i.to_string(),
            BexprValue::Float(f) => f.to_string(),
            BexprValue::String(s) => s.clone(),
            BexprValue::Json(value) => coerce::display(value),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BexprValue::Bool(_) => "bool",
            BexprValue::Int(_) => "int",
            BexprValue::Float(_) => "float",
            BexprValue::String(_) => "string",
            BexprValue::Json(Value::Array(_)) => "array",
            BexprValue::Json(Value::Object(_)) => "object",
            BexprValue::Json(Value::Null) => "null",
            BexprValue::Json(_) => "value",
        }
    }
}

/// Result of resolving one side of a match: a concrete value, or the signal
/// that the selector's path is absent from the datum.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Present(BexprValue),
    Absent,
}

struct EvalContext<'a> {
    datum: &'a Value,
    options: &'a Options,
}

/// Evaluates a parsed predicate against a datum.
pub fn evaluate(
    expression: &Expression,
    datum: &Value,
    options: &Options,
) -> Result<bool, BexprError> {
    let ctx = EvalContext { datum, options };
    evaluate_bool(expression, &ctx)
}

fn evaluate_bool(expression: &Expression, ctx: &EvalContext<'_>) -> Result<bool, BexprError> {
    match expression {
        Expression::Unary {
            operator: UnaryOperator::Not,
            operand,
        } => Ok(!evaluate_bool(operand, ctx)?),
        Expression::Binary {
            left,
            operator,
            right,
        } => match operator {
            BinaryOperator::And => {
                // errors and `false` both stop here; the right side stays untouched
                if !evaluate_bool(left, ctx)? {
                    return Ok(false);
                }
                evaluate_bool(right, ctx)
            }
            BinaryOperator::Or => {
                if evaluate_bool(left, ctx)? {
                    return Ok(true);
                }
                evaluate_bool(right, ctx)
            }
        },
        Expression::Match(matcher) => evaluate_match(matcher, ctx),
        Expression::Value(value) => match evaluate_expression_value(value, ctx)? {
            Resolved::Present(BexprValue::Bool(b)) => Ok(b),
            Resolved::Present(other) => Err(BexprError::Type(format!(
                "expression evaluated to {} instead of a boolean",
                other.kind()
            ))),
            Resolved::Absent => Err(BexprError::Type(
                "expression evaluated to an absent value instead of a boolean".to_string(),
            )),
        },
    }
}

fn evaluate_match(
    expression: &MatchExpression,
    ctx: &EvalContext<'_>,
) -> Result<bool, BexprError> {
    let left = match evaluate_expression_value(&expression.left, ctx)? {
        Resolved::Present(value) => value,
        // the right side is never evaluated when the left is absent
        Resolved::Absent => return Ok(expression.operator.not_present_disposition()),
    };

    use MatchOperator::*;
    match expression.operator {
        IsEmpty => do_match_is_empty(&left),
        IsNotEmpty => Ok(!do_match_is_empty(&left)?),
        operator => {
            let right = match &expression.right {
                Some(right) => evaluate_expression_value(right, ctx)?,
                None => {
                    return Err(BexprError::InvalidAst(format!(
                        "match operator {operator} requires a right-hand value"
                    )));
                }
            };
            let right = match right {
                Resolved::Present(value) => value,
                // an undefined right side equals nothing
                Resolved::Absent => {
                    return match operator {
                        Equal => Ok(false),
                        NotEqual => Ok(true),
                        _ => Err(BexprError::Type(format!(
                            "cannot apply {operator} to an undefined right-hand value"
                        ))),
                    };
                }
            };
            match operator {
                Equal => do_match_equal(&left, &right),
                NotEqual => Ok(!do_match_equal(&left, &right)?),
                Lower => do_match_lower(&left, &right),
                LowerOrEqual => {
                    if do_match_equal(&left, &right)? {
                        return Ok(true);
                    }
                    do_match_lower(&left, &right)
                }
                Higher => {
                    if do_match_lower(&left, &right)? {
                        return Ok(false);
                    }
                    Ok(!do_match_equal(&left, &right)?)
                }
                HigherOrEqual => Ok(!do_match_lower(&left, &right)?),
                In => do_match_in(&left, &right),
                NotIn => Ok(!do_match_in(&left, &right)?),
                Matches => do_match_matches(&left, &right),
                NotMatches => Ok(!do_match_matches(&left, &right)?),
                IsEmpty | IsNotEmpty => {
                    Err(BexprError::InvalidAst("Invalid match operation".to_string()))
                }
            }
        }
    }
}

// --- Primitive Comparison Functions ---

type PrimitiveFn = fn(&BexprValue, &BexprValue) -> bool;

/// Picks the equality function for the left value's runtime kind.
fn primitive_equality_fn(value: &BexprValue) -> Option<PrimitiveFn> {
    match value {
        BexprValue::Bool(_) => Some(do_equal_bool),
        BexprValue::Int(_) => Some(do_equal_int64),
        BexprValue::Float(_) => Some(do_equal_float64),
        BexprValue::String(_) => Some(do_equal_string),
        BexprValue::Json(_) => None,
    }
}

fn do_equal_bool(first: &BexprValue, second: &BexprValue) -> bool {
    coerce::parse_bool_str(&first.display()) == coerce::parse_bool_str(&second.display())
}

fn do_equal_int64(first: &BexprValue, second: &BexprValue) -> bool {
    coerce::parse_int_str(&first.display()).unwrap_or_default()
        == coerce::parse_int_str(&second.display()).unwrap_or_default()
}

fn do_equal_float64(first: &BexprValue, second: &BexprValue) -> bool {
    first.display().parse::<f64>().unwrap_or_default()
        == second.display().parse::<f64>().unwrap_or_default()
}

fn do_equal_string(first: &BexprValue, second: &BexprValue) -> bool {
    first.display() == second.display()
}

/// Picks the less-than function for the left value's runtime kind.
fn primitive_lower_fn(value: &BexprValue) -> Option<PrimitiveFn> {
    match value {
        BexprValue::Bool(_) => Some(do_lower_bool),
        BexprValue::Int(_) => Some(do_lower_int64),
        BexprValue::Float(_) => Some(do_lower_float64),
        BexprValue::String(_) => Some(do_lower_string),
        BexprValue::Json(_) => None,
    }
}

fn do_lower_bool(first: &BexprValue, second: &BexprValue) -> bool {
    coerce::parse_bool_str(&first.display()) && !coerce::parse_bool_str(&second.display())
}

fn do_lower_int64(first: &BexprValue, second: &BexprValue) -> bool {
    coerce::parse_int_str(&first.display()).unwrap_or_default()
        < coerce::parse_int_str(&second.display()).unwrap_or_default()
}

fn do_lower_float64(first: &BexprValue, second: &BexprValue) -> bool {
    first.display().parse::<f64>().unwrap_or_default()
        < second.display().parse::<f64>().unwrap_or_default()
}

/// For strings, `less(a, b)` holds when `b` starts with `a`.
fn do_lower_string(first: &BexprValue, second: &BexprValue) -> bool {
    second.display().starts_with(&first.display())
}

// --- Match Dispatch ---

fn do_match_equal(left: &BexprValue, right: &BexprValue) -> Result<bool, BexprError> {
    let Some(equal) = primitive_equality_fn(left) else {
        return Err(BexprError::Type(format!(
            "unable to find suitable primitive comparison function for matching {} and {}",
            left.kind(),
            right.kind()
        )));
    };
    Ok(equal(left, right))
}

fn do_match_lower(left: &BexprValue, right: &BexprValue) -> Result<bool, BexprError> {
    let Some(lower) = primitive_lower_fn(left) else {
        return Err(BexprError::Type(format!(
            "unable to find suitable primitive comparison function for matching {} and {}",
            left.kind(),
            right.kind()
        )));
    };
    Ok(lower(left, right))
}

fn do_match_in(left: &BexprValue, right: &BexprValue) -> Result<bool, BexprError> {
    match left {
        BexprValue::Json(Value::Object(map)) => Ok(match right {
            BexprValue::String(key) => map.contains_key(key),
            _ => false,
        }),
        BexprValue::Json(Value::Array(items)) => {
            // membership compares every element with the function derived
            // from the sought value's kind
            let Some(equal) = primitive_equality_fn(right) else {
                return Err(BexprError::Type(
                    "unable to find suitable primitive comparison function for \"in\" comparison"
                        .to_string(),
                ));
            };
            Ok(items
                .iter()
                .any(|item| equal(&BexprValue::from_json(item.clone()), right)))
        }
        BexprValue::String(s) => Ok(s.contains(&right.display())),
        other => Err(BexprError::Type(format!(
            "Cannot perform in/contains operations on type {}",
            other.kind()
        ))),
    }
}

fn do_match_is_empty(left: &BexprValue) -> Result<bool, BexprError> {
    match left {
        BexprValue::String(s) => Ok(s.is_empty()),
        BexprValue::Json(Value::Array(items)) => Ok(items.is_empty()),
        BexprValue::Json(Value::Object(map)) => Ok(map.is_empty()),
        other => Err(BexprError::Type(format!(
            "cannot test emptiness of {}",
            other.kind()
        ))),
    }
}

fn do_match_matches(left: &BexprValue, right: &BexprValue) -> Result<bool, BexprError> {
    let BexprValue::String(subject) = left else {
        return Err(BexprError::Regex(format!(
            "value of type {} is not convertible to a byte sequence",
            left.kind()
        )));
    };
    let BexprValue::String(pattern) = right else {
        return Err(BexprError::Regex(format!(
            "regular expression must be a string, not {}",
            right.kind()
        )));
    };
    let re = Regex::new(pattern).map_err(|e| {
        BexprError::Regex(format!(
            "failed to compile regular expression {pattern:?}: {e}"
        ))
    })?;
    Ok(re.is_match(subject))
}

// --- Value Computation ---

fn evaluate_expression_value(
    expression: &ExpressionValue,
    ctx: &EvalContext<'_>,
) -> Result<Resolved, BexprError> {
    let left = evaluate_match_value(&expression.left, ctx)?;
    if expression.operator == MathOperator::Value {
        return Ok(left);
    }

    let Some(right) = &expression.right else {
        return Err(BexprError::InvalidAst(format!(
            "math operator {} requires a right-hand value",
            expression.operator
        )));
    };
    let right = evaluate_match_value(right, ctx)?;

    let (Resolved::Present(left), Resolved::Present(right)) = (left, right) else {
        // absence propagates through arithmetic to the match dispatch
        return Ok(Resolved::Absent);
    };
    apply_math(expression.operator, left, right).map(Resolved::Present)
}

/// Dispatches arithmetic by the right value's runtime kind.
fn apply_math(
    operator: MathOperator,
    left: BexprValue,
    right: BexprValue,
) -> Result<BexprValue, BexprError> {
    use BexprValue::*;
    match operator {
        MathOperator::Value => Ok(left),
        MathOperator::Plus => match (&left, &right) {
            (Bool(l), Bool(r)) => Ok(Bool(*l && *r)),
            (Int(l), Int(r)) => Ok(Int(l.wrapping_add(*r))),
            (Float(l), Float(r)) => Ok(Float(l + r)),
            (String(l), String(r)) => Ok(String(format!("{l}{r}"))),
            _ => Err(math_type_error(&right)),
        },
        MathOperator::Minus => match (&left, &right) {
            (Int(l), Int(r)) => Ok(Int(l.wrapping_sub(*r))),
            (Float(l), Float(r)) => Ok(Float(l - r)),
            _ => Err(math_type_error(&right)),
        },
        MathOperator::Mul => match (&left, &right) {
            (Int(l), Int(r)) => Ok(Int(l.wrapping_mul(*r))),
            (Float(l), Float(r)) => Ok(Float(l * r)),
            _ => Err(math_type_error(&right)),
        },
        MathOperator::Div => match (&left, &right) {
            (Int(_), Int(0)) => Err(BexprError::Type("division by zero".to_string())),
            (Int(l), Int(r)) => Ok(Int(l.wrapping_div(*r))),
            (Float(l), Float(r)) => Ok(Float(l / r)),
            _ => Err(math_type_error(&right)),
        },
    }
}

fn math_type_error(right: &BexprValue) -> BexprError {
    BexprError::Type(format!("unknown types {} for math op", right.kind()))
}

fn evaluate_match_value(
    value: &MatchValue,
    ctx: &EvalContext<'_>,
) -> Result<Resolved, BexprError> {
    match value.value_type {
        ValueType::Undefined => Ok(Resolved::Absent),
        ValueType::Bool => Ok(Resolved::Present(BexprValue::Bool(
            coerce::parse_bool_str(&value.raw),
        ))),
        ValueType::Int => match coerce::parse_int_str(&value.raw) {
            Some(i) => Ok(Resolved::Present(BexprValue::Int(i))),
            None => Err(BexprError::Coerce(format!(
                "cannot parse {:?} as an integer",
                value.raw
            ))),
        },
        ValueType::Float64 => match value.raw.parse() {
            Ok(f) => Ok(Resolved::Present(BexprValue::Float(f))),
            Err(_) => Err(BexprError::Coerce(format!(
                "cannot parse {:?} as a float",
                value.raw
            ))),
        },
        ValueType::String => Ok(Resolved::Present(BexprValue::String(value.raw.clone()))),
        ValueType::Reflect => resolve_selector(value, ctx),
        ValueType::Uint | ValueType::Float32 => Err(BexprError::InvalidAst(format!(
            "value type {:?} is reserved",
            value.value_type
        ))),
    }
}

fn resolve_selector(value: &MatchValue, ctx: &EvalContext<'_>) -> Result<Resolved, BexprError> {
    let pointer = Pointer {
        parts: &value.selector.path,
        transform: ctx.options.hook.as_ref(),
    };
    match pointer.get(ctx.datum) {
        Ok(resolved) => Ok(Resolved::Present(BexprValue::from_json(resolved))),
        Err(PointerError::NotFound(path)) => {
            // the configured placeholder preempts the absence disposition
            if let Some(unknown) = &ctx.options.unknown {
                log::debug!("substituting unknown value for missing path {}", value.selector);
                return Ok(Resolved::Present(BexprValue::from_json(unknown.clone())));
            }
            if not_present(&value.selector.path, ctx.datum) {
                return Ok(Resolved::Absent);
            }
            Err(PointerError::NotFound(path).into())
        }
        Err(err) => Err(err.into()),
    }
}

/// True when the missing leaf sits directly under a map and the path is long
/// enough for the operator's absence disposition to apply.
fn not_present(path: &[String], datum: &Value) -> bool {
    if path.len() < 2 {
        return false;
    }
    let parent = Pointer {
        parts: &path[..path.len() - 1],
        transform: None,
    };
    matches!(parent.get(datum), Ok(value) if value.is_object())
}
