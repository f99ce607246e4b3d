//! A `nom`-based parser for the boolean expression language.
//!
//! The grammar is a PEG: ordered choice everywhere, with `or` binding loosest,
//! then `and`, then `not`, then grouping and matchers. Committed syntax
//! errors (an unterminated string, a dangling parenthesis, a malformed
//! literal) abort the parse with a human-readable message instead of
//! backtracking into a worse interpretation.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, multispace1, satisfy},
    combinator::{map, opt, recognize, verify},
    sequence::{delimited, pair, preceded, terminated},
};

use crate::ast::{
    BinaryOperator, Expression, ExpressionValue, MatchExpression, MatchOperator, MatchValue,
    MathOperator, Selector, SelectorKind, UnaryOperator, ValueType,
};
use crate::error::BexprError;
use crate::pointer;

/// A syntax error raised during parsing. Committed failures carry the
/// message surfaced to the caller.
#[derive(Debug)]
enum SyntaxError<'a> {
    Message(String),
    Nom(&'a str, nom::error::ErrorKind),
}

impl<'a> nom::error::ParseError<&'a str> for SyntaxError<'a> {
    fn from_error_kind(input: &'a str, kind: nom::error::ErrorKind) -> Self {
        SyntaxError::Nom(input, kind)
    }

    fn append(_input: &'a str, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

type PResult<'a, T> = IResult<&'a str, T, SyntaxError<'a>>;

/// Aborts the parse with a committed, human-readable error.
fn fail<'a, T>(message: impl Into<String>) -> PResult<'a, T> {
    Err(nom::Err::Failure(SyntaxError::Message(message.into())))
}

fn recoverable<'a, T>(input: &'a str) -> PResult<'a, T> {
    Err(nom::Err::Error(SyntaxError::Nom(
        input,
        nom::error::ErrorKind::Verify,
    )))
}

// --- Main Public Parser ---

/// Parses a predicate into its AST.
pub fn parse(input: &str) -> Result<Expression, BexprError> {
    match delimited(multispace0, or_expr, multispace0).parse(input) {
        Ok(("", expr)) => Ok(expr),
        Ok((remainder, _)) => Err(BexprError::Parse(format!(
            "Parser did not consume all input. Remainder: '{remainder}'"
        ))),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(BexprError::Parse(match e {
            SyntaxError::Message(message) => message,
            SyntaxError::Nom(..) => format!("Failed to parse expression: '{input}'"),
        })),
        Err(nom::Err::Incomplete(_)) => Err(BexprError::Parse(format!(
            "Failed to parse expression: '{input}'"
        ))),
    }
}

// --- Boolean Composition (in order of precedence) ---

fn or_expr(input: &str) -> PResult<'_, Expression> {
    let (rest, left) = and_expr(input)?;
    let (rest, right) = opt(preceded(keyword("or"), or_expr)).parse(rest)?;
    Ok(match right {
        Some(right) => (
            rest,
            Expression::Binary {
                left: Box::new(left),
                operator: BinaryOperator::Or,
                right: Box::new(right),
            },
        ),
        None => (rest, left),
    })
}

fn and_expr(input: &str) -> PResult<'_, Expression> {
    let (rest, left) = not_expr(input)?;
    let (rest, right) = opt(preceded(keyword("and"), and_expr)).parse(rest)?;
    Ok(match right {
        Some(right) => (
            rest,
            Expression::Binary {
                left: Box::new(left),
                operator: BinaryOperator::And,
                right: Box::new(right),
            },
        ),
        None => (rest, left),
    })
}

fn not_expr(input: &str) -> PResult<'_, Expression> {
    let prefix: PResult<'_, &str> = terminated(tag("not"), multispace1).parse(input);
    match prefix {
        Ok((rest, _)) => {
            let (rest, operand) = not_expr(rest)?;
            // `not not x` collapses to `x`
            let expr = match operand {
                Expression::Unary {
                    operator: UnaryOperator::Not,
                    operand,
                } => *operand,
                other => Expression::Unary {
                    operator: UnaryOperator::Not,
                    operand: Box::new(other),
                },
            };
            Ok((rest, expr))
        }
        Err(nom::Err::Failure(e)) => Err(nom::Err::Failure(e)),
        Err(_) => grouped_expr(input),
    }
}

/// A boolean keyword bounded by the mandatory whitespace that separates it
/// from identifiers.
fn keyword<'a>(
    word: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = SyntaxError<'a>> {
    delimited(multispace1, tag(word), multispace1)
}

// --- Grouping and Matchers ---

fn grouped_expr(input: &str) -> PResult<'_, Expression> {
    let open: PResult<'_, char> = terminated(char('('), multispace0).parse(input);
    let Ok((rest, _)) = open else {
        return match_or_value(input);
    };

    // A parenthesized bare value takes precedence over a parenthesized
    // boolean expression.
    match terminated(expression_value, pair(multispace0, char(')'))).parse(rest) {
        Ok((rest, value)) => return Ok((rest, Expression::Value(value))),
        Err(nom::Err::Failure(e)) => return Err(nom::Err::Failure(e)),
        Err(_) => {}
    }

    let (rest, expr) = or_expr(rest)?;
    let close: PResult<'_, char> = preceded(multispace0, char(')')).parse(rest);
    match close {
        Ok((rest, _)) => Ok((rest, expr)),
        Err(_) => fail("Unmatched parentheses"),
    }
}

fn match_or_value(input: &str) -> PResult<'_, Expression> {
    match match_expression(input) {
        Ok(ok) => Ok(ok),
        Err(nom::Err::Failure(e)) => Err(nom::Err::Failure(e)),
        Err(_) => map(expression_value, Expression::Value).parse(input),
    }
}

fn match_expression(input: &str) -> PResult<'_, Expression> {
    alt((selector_op_value, selector_unary_match, value_op_selector)).parse(input)
}

/// `selector op value`, e.g. `foo.bar == "baz"` or `count + 1 >= limit`.
fn selector_op_value(input: &str) -> PResult<'_, Expression> {
    let (rest, left) = selector_led_value(input)?;
    let (rest, operator) = match_binary_op(rest)?;
    let (rest, right) = preceded(multispace0, expression_value).parse(rest)?;
    Ok((
        rest,
        Expression::Match(MatchExpression {
            operator,
            left,
            right: Some(right),
        }),
    ))
}

/// `selector is empty` / `selector is not empty`.
fn selector_unary_match(input: &str) -> PResult<'_, Expression> {
    let (rest, left) = selector_led_value(input)?;
    let (rest, _) = (multispace1, tag("is"), multispace1).parse(rest)?;
    let (rest, negated) = opt(terminated(tag("not"), multispace1)).parse(rest)?;
    let (rest, _) = tag("empty").parse(rest)?;
    let (rest, _) = peek_terminator(rest)?;
    let operator = if negated.is_some() {
        MatchOperator::IsNotEmpty
    } else {
        MatchOperator::IsEmpty
    };
    Ok((
        rest,
        Expression::Match(MatchExpression {
            operator,
            left,
            right: None,
        }),
    ))
}

/// `value in selector` and friends. The AST still places the selector on the
/// left side.
fn value_op_selector(input: &str) -> PResult<'_, Expression> {
    let (rest, value) = match_value(input)?;
    let (rest, operator) = word_in_op(rest)?;
    let (rest, sel) = selector(rest)?;
    Ok((
        rest,
        Expression::Match(MatchExpression {
            operator,
            left: ExpressionValue::value(MatchValue::from_selector(sel)),
            right: Some(ExpressionValue::value(value)),
        }),
    ))
}

/// An [`ExpressionValue`] whose leading value is a selector, as required on
/// the left side of a match.
fn selector_led_value(input: &str) -> PResult<'_, ExpressionValue> {
    verify(expression_value, |ev: &ExpressionValue| {
        ev.left.value_type == ValueType::Reflect
    })
    .parse(input)
}

fn match_binary_op(input: &str) -> PResult<'_, MatchOperator> {
    alt((symbol_match_op, word_match_op)).parse(input)
}

fn symbol_match_op(input: &str) -> PResult<'_, MatchOperator> {
    delimited(
        multispace0,
        alt((
            map(tag("=="), |_| MatchOperator::Equal),
            map(tag("!="), |_| MatchOperator::NotEqual),
            map(tag("<="), |_| MatchOperator::LowerOrEqual),
            map(tag("<"), |_| MatchOperator::Lower),
            map(tag(">="), |_| MatchOperator::HigherOrEqual),
            map(tag(">"), |_| MatchOperator::Higher),
        )),
        multispace0,
    )
    .parse(input)
}

fn word_match_op(input: &str) -> PResult<'_, MatchOperator> {
    delimited(
        multispace1,
        alt((
            preceded(
                pair(tag("not"), multispace1),
                alt((
                    map(alt((tag("in"), tag("contains"))), |_| MatchOperator::NotIn),
                    map(tag("matches"), |_| MatchOperator::NotMatches),
                )),
            ),
            map(alt((tag("in"), tag("contains"))), |_| MatchOperator::In),
            map(tag("matches"), |_| MatchOperator::Matches),
        )),
        multispace1,
    )
    .parse(input)
}

/// The containment operators permitted in `value op selector` position.
fn word_in_op(input: &str) -> PResult<'_, MatchOperator> {
    delimited(
        multispace1,
        alt((
            map(
                preceded(
                    pair(tag("not"), multispace1),
                    alt((tag("in"), tag("contains"))),
                ),
                |_| MatchOperator::NotIn,
            ),
            map(alt((tag("in"), tag("contains"))), |_| MatchOperator::In),
        )),
        multispace1,
    )
    .parse(input)
}

// --- Values ---

/// `Value MathOp Value | Value`.
fn expression_value(input: &str) -> PResult<'_, ExpressionValue> {
    let (rest, left) = match_value(input)?;
    let (rest, op_right) = opt(pair(
        delimited(multispace0, math_op, multispace0),
        match_value,
    ))
    .parse(rest)?;
    Ok(match op_right {
        Some((operator, right)) => (
            rest,
            ExpressionValue {
                left,
                operator,
                right: Some(right),
            },
        ),
        None => (rest, ExpressionValue::value(left)),
    })
}

fn math_op(input: &str) -> PResult<'_, MathOperator> {
    alt((
        map(char('+'), |_| MathOperator::Plus),
        map(char('-'), |_| MathOperator::Minus),
        map(char('*'), |_| MathOperator::Mul),
        map(char('/'), |_| MathOperator::Div),
    ))
    .parse(input)
}

fn match_value(input: &str) -> PResult<'_, MatchValue> {
    alt((
        bool_value,
        undefined_value,
        selector_value,
        float_value,
        integer_value,
        string_value,
    ))
    .parse(input)
}

fn bool_value(input: &str) -> PResult<'_, MatchValue> {
    let (rest, raw) = alt((tag("true"), tag("false"))).parse(input)?;
    if peek_terminator(rest).is_err() {
        return fail("Invalid bool literal");
    }
    Ok((rest, MatchValue::literal(ValueType::Bool, raw)))
}

fn undefined_value(input: &str) -> PResult<'_, MatchValue> {
    let (rest, raw) = tag("undefined").parse(input)?;
    if peek_terminator(rest).is_err() {
        return fail("Invalid undefined literal");
    }
    Ok((rest, MatchValue::literal(ValueType::Undefined, raw)))
}

fn selector_value(input: &str) -> PResult<'_, MatchValue> {
    map(selector, MatchValue::from_selector).parse(input)
}

fn float_value(input: &str) -> PResult<'_, MatchValue> {
    let (rest, raw) = recognize((
        opt(char('-')),
        int_digits,
        char('.'),
        digits,
    ))
    .parse(input)?;
    if peek_terminator(rest).is_err() {
        return fail("Invalid number literal");
    }
    Ok((rest, MatchValue::literal(ValueType::Float64, raw)))
}

fn integer_value(input: &str) -> PResult<'_, MatchValue> {
    let (rest, raw) = recognize(pair(opt(char('-')), int_digits)).parse(input)?;
    if peek_terminator(rest).is_err() {
        return fail("Invalid number literal");
    }
    Ok((rest, MatchValue::literal(ValueType::Int, raw)))
}

/// `0`, or a nonzero digit followed by any digits. Leading zeroes are not
/// numbers.
fn int_digits(input: &str) -> PResult<'_, &str> {
    alt((
        recognize(pair(
            satisfy(|c| c.is_ascii_digit() && c != '0'),
            opt(digits),
        )),
        recognize(char('0')),
    ))
    .parse(input)
}

fn digits(input: &str) -> PResult<'_, &str> {
    nom::bytes::complete::take_while1(|c: char| c.is_ascii_digit()).parse(input)
}

fn string_value(input: &str) -> PResult<'_, MatchValue> {
    map(alt((quoted_string, backtick_string)), |raw| {
        MatchValue::literal(ValueType::String, raw)
    })
    .parse(input)
}

/// A double-quoted string literal with standard escapes.
fn quoted_string(input: &str) -> PResult<'_, String> {
    let Some(rest) = input.strip_prefix('"') else {
        return recoverable(input);
    };
    let mut out = String::new();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((&rest[i + 1..], out)),
            '\\' => match chars.next() {
                Some((_, escape)) => out.push(match escape {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    other => other,
                }),
                None => break,
            },
            other => out.push(other),
        }
    }
    fail("Unterminated string literal")
}

/// A backtick-quoted raw string; no escapes apply.
fn backtick_string(input: &str) -> PResult<'_, String> {
    let Some(rest) = input.strip_prefix('`') else {
        return recoverable(input);
    };
    match rest.find('`') {
        Some(end) => Ok((&rest[end + 1..], rest[..end].to_string())),
        None => fail("Unterminated string literal"),
    }
}

// --- Selectors ---

fn selector(input: &str) -> PResult<'_, Selector> {
    alt((pointer_selector, bexpr_selector)).parse(input)
}

/// A dot-path selector: an identifier followed by `.segment` or
/// `["quoted index"]` parts.
fn bexpr_selector(input: &str) -> PResult<'_, Selector> {
    let (mut rest, first) = identifier(input)?;
    let mut path = vec![first.to_string()];
    loop {
        match dot_segment(rest) {
            Ok((next, segment)) => {
                path.push(segment);
                rest = next;
                continue;
            }
            Err(nom::Err::Failure(e)) => return Err(nom::Err::Failure(e)),
            Err(_) => {}
        }
        match index_segment(rest) {
            Ok((next, segment)) => {
                path.push(segment);
                rest = next;
                continue;
            }
            Err(nom::Err::Failure(e)) => return Err(nom::Err::Failure(e)),
            Err(_) => {}
        }
        break;
    }
    Ok((
        rest,
        Selector {
            kind: SelectorKind::Bexpr,
            path,
        },
    ))
}

fn identifier(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        nom::bytes::complete::take_while(|c: char| {
            c.is_ascii_alphanumeric() || c == '_' || c == '/'
        }),
    ))
    .parse(input)
}

/// `.identifier` or `.123`; once the dot is consumed, a segment must follow.
fn dot_segment(input: &str) -> PResult<'_, String> {
    let (rest, _) = char('.').parse(input)?;
    match alt((identifier, digits)).parse(rest) {
        Ok((rest, segment)) => Ok((rest, segment.to_string())),
        Err(_) => fail("Invalid selector"),
    }
}

/// `["quoted index"]`; the index must be a string literal.
fn index_segment(input: &str) -> PResult<'_, String> {
    let (rest, _) = char('[').parse(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, segment) = match quoted_string(rest) {
        Ok(ok) => ok,
        Err(nom::Err::Failure(e)) => return Err(nom::Err::Failure(e)),
        Err(_) => return fail("Invalid index"),
    };
    let (rest, _) = multispace0(rest)?;
    let close: PResult<'_, char> = char(']').parse(rest);
    match close {
        Ok((rest, _)) => Ok((rest, segment)),
        Err(_) => fail("Unclosed index expression"),
    }
}

/// A quoted JSON-Pointer selector, e.g. `"/foo/bar"`. Normalized through the
/// pointer parser before it is stored.
fn pointer_selector(input: &str) -> PResult<'_, Selector> {
    let Some(rest) = input.strip_prefix('"') else {
        return recoverable(input);
    };
    let Some(end) = rest.find('"') else {
        // leave unterminated input to the string literal parser
        return recoverable(input);
    };
    let content = &rest[..end];
    if !content.is_empty() && !content.starts_with('/') {
        // an ordinary string literal
        return recoverable(input);
    }
    for segment in content.split('/').skip(1) {
        if segment.is_empty()
            || !segment
                .chars()
                .all(|c| c.is_alphanumeric() || "-_.~:|".contains(c))
        {
            return fail("Invalid selector");
        }
    }
    let Ok(path) = pointer::parse(content) else {
        return fail("Invalid selector");
    };
    Ok((
        &rest[end + 1..],
        Selector {
            kind: SelectorKind::JsonPointer,
            path,
        },
    ))
}

/// Succeeds without consuming input when the next character may legally end
/// a literal: whitespace, `)`, or end of input. This is what stops `123abc`
/// from being read as `123` then `abc`.
fn peek_terminator(input: &str) -> PResult<'_, ()> {
    match input.chars().next() {
        None => Ok((input, ())),
        Some(c) if c.is_whitespace() || c == ')' => Ok((input, ())),
        Some(_) => recoverable(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector_side(path: &[&str]) -> ExpressionValue {
        ExpressionValue::value(MatchValue::from_selector(Selector {
            kind: SelectorKind::Bexpr,
            path: path.iter().map(|s| s.to_string()).collect(),
        }))
    }

    fn literal_side(value_type: ValueType, raw: &str) -> ExpressionValue {
        ExpressionValue::value(MatchValue::literal(value_type, raw))
    }

    #[test]
    fn test_parse_simple_match() {
        let expr = parse("foo.bar == \"baz\"").unwrap();
        assert_eq!(
            expr,
            Expression::Match(MatchExpression {
                operator: MatchOperator::Equal,
                left: selector_side(&["foo", "bar"]),
                right: Some(literal_side(ValueType::String, "baz")),
            })
        );
    }

    #[test]
    fn test_parse_literal_kinds() {
        let cases = [
            ("x == true", ValueType::Bool, "true"),
            ("x == -42", ValueType::Int, "-42"),
            ("x == 3.25", ValueType::Float64, "3.25"),
            ("x == `raw text`", ValueType::String, "raw text"),
            ("x == undefined", ValueType::Undefined, "undefined"),
        ];
        for (input, value_type, raw) in cases {
            let expr = parse(input).unwrap();
            let Expression::Match(m) = expr else {
                panic!("expected a match for {input:?}");
            };
            let right = m.right.unwrap();
            assert_eq!(right.left.value_type, value_type, "{input}");
            assert_eq!(right.left.raw, raw, "{input}");
        }
    }

    #[test]
    fn test_parse_operator_precedence() {
        // `or` binds loosest, `and` tighter, both right-nested
        let expr = parse("a == 1 or b == 2 and c == 3").unwrap();
        let Expression::Binary {
            operator: BinaryOperator::Or,
            right,
            ..
        } = expr
        else {
            panic!("expected or at the root");
        };
        assert!(matches!(
            *right,
            Expression::Binary {
                operator: BinaryOperator::And,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_grouping() {
        let expr = parse("not (a == 1 or b == 2)").unwrap();
        let Expression::Unary {
            operator: UnaryOperator::Not,
            operand,
        } = expr
        else {
            panic!("expected not at the root");
        };
        assert!(matches!(
            *operand,
            Expression::Binary {
                operator: BinaryOperator::Or,
                ..
            }
        ));
    }

    #[test]
    fn test_not_not_collapses() {
        let plain = parse("a == 1").unwrap();
        let double = parse("not not a == 1").unwrap();
        assert_eq!(plain, double);

        let triple = parse("not not not a == 1").unwrap();
        assert_eq!(triple, parse("not a == 1").unwrap());
    }

    #[test]
    fn test_identical_inputs_parse_to_equal_asts() {
        let a = parse("foo.bar == \"baz\" and not x in y").unwrap();
        let b = parse("foo.bar == \"baz\" and not x in y").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_contains_is_an_alias_for_in() {
        assert_eq!(parse("a contains b").unwrap(), parse("a in b").unwrap());
        assert_eq!(
            parse("a not contains b").unwrap(),
            parse("a not in b").unwrap()
        );
    }

    #[test]
    fn test_value_in_selector_places_selector_left() {
        let expr = parse("\"a\" in tags").unwrap();
        assert_eq!(
            expr,
            Expression::Match(MatchExpression {
                operator: MatchOperator::In,
                left: selector_side(&["tags"]),
                right: Some(literal_side(ValueType::String, "a")),
            })
        );
    }

    #[test]
    fn test_parse_comparison_operators() {
        let cases = [
            ("x < 1", MatchOperator::Lower),
            ("x <= 1", MatchOperator::LowerOrEqual),
            ("x > 1", MatchOperator::Higher),
            ("x >= 1", MatchOperator::HigherOrEqual),
            ("x != 1", MatchOperator::NotEqual),
            ("x matches `^a`", MatchOperator::Matches),
            ("x not matches `^a`", MatchOperator::NotMatches),
        ];
        for (input, operator) in cases {
            let Expression::Match(m) = parse(input).unwrap() else {
                panic!("expected a match for {input:?}");
            };
            assert_eq!(m.operator, operator, "{input}");
        }
    }

    #[test]
    fn test_parse_unary_matchers() {
        let Expression::Match(m) = parse("foo is empty").unwrap() else {
            panic!("expected a match");
        };
        assert_eq!(m.operator, MatchOperator::IsEmpty);
        assert!(m.right.is_none());

        let Expression::Match(m) = parse("foo is not empty").unwrap() else {
            panic!("expected a match");
        };
        assert_eq!(m.operator, MatchOperator::IsNotEmpty);
    }

    #[test]
    fn test_parse_selector_forms() {
        let Expression::Match(m) = parse("foo[\"bar baz\"].qux == 1").unwrap() else {
            panic!("expected a match");
        };
        assert_eq!(
            m.left.left.selector.path,
            vec!["foo".to_string(), "bar baz".to_string(), "qux".to_string()]
        );

        let Expression::Match(m) = parse("items.0 == 1").unwrap() else {
            panic!("expected a match");
        };
        assert_eq!(
            m.left.left.selector.path,
            vec!["items".to_string(), "0".to_string()]
        );

        let Expression::Match(m) = parse("\"/foo/bar~1baz\" == 1").unwrap() else {
            panic!("expected a match");
        };
        assert_eq!(m.left.left.selector.kind, SelectorKind::JsonPointer);
        assert_eq!(
            m.left.left.selector.path,
            vec!["foo".to_string(), "bar/baz".to_string()]
        );
    }

    #[test]
    fn test_parse_math_in_match_operands() {
        let Expression::Match(m) = parse("count + 1 >= limit").unwrap() else {
            panic!("expected a match");
        };
        assert_eq!(m.operator, MatchOperator::HigherOrEqual);
        assert_eq!(m.left.operator, MathOperator::Plus);
        assert_eq!(
            m.left.right.as_ref().unwrap().raw,
            "1".to_string()
        );
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            ("foo == 123abc", "Invalid number literal"),
            ("foo == 007", "Invalid number literal"),
            ("foo == trueish", "Invalid bool literal"),
            ("foo == undefinedx", "Invalid undefined literal"),
            ("(foo == 1", "Unmatched parentheses"),
            ("foo[\"unterminated", "Unterminated string literal"),
            ("foo == \"unterminated", "Unterminated string literal"),
            ("foo[bar] == 1", "Invalid index"),
            ("foo[\"bar\" == 1", "Unclosed index expression"),
            ("foo.. == 1", "Invalid selector"),
            ("\"/a b/c\" == 1", "Invalid selector"),
        ];
        for (input, expected) in cases {
            let err = parse(input).unwrap_err();
            let BexprError::Parse(message) = err else {
                panic!("expected a parse error for {input:?}");
            };
            assert!(
                message.contains(expected),
                "{input:?}: got {message:?}, wanted {expected:?}"
            );
        }

        // dangling operators surface as generic parse errors
        assert!(matches!(parse("foo =="), Err(BexprError::Parse(_))));
        assert!(matches!(parse(""), Err(BexprError::Parse(_))));
    }

    #[test]
    fn test_whitespace_is_insignificant_around_symbols() {
        assert_eq!(parse("a==1").unwrap(), parse("a == 1").unwrap());
        assert_eq!(parse("( a == 1 )").unwrap(), parse("(a == 1)").unwrap());
    }
}
