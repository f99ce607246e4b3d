//! Defines the Abstract Syntax Tree (AST) for the boolean expression language.

use std::fmt;

/// A unary operator used in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Not => write!(f, "Not"),
        }
    }
}

/// A boolean connective joining two sub-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    And,
    Or,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOperator::And => write!(f, "And"),
            BinaryOperator::Or => write!(f, "Or"),
        }
    }
}

/// An arithmetic operator combining the two sides of an [`ExpressionValue`].
///
/// `Value` is the identity operation: the node has no right side and yields
/// its left value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOperator {
    Value,
    Plus,
    Minus,
    Mul,
    Div,
}

impl fmt::Display for MathOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            MathOperator::Value => "=",
            MathOperator::Plus => "+",
            MathOperator::Minus => "-",
            MathOperator::Mul => "*",
            MathOperator::Div => "/",
        };
        write!(f, "{symbol}")
    }
}

/// A comparison, containment, regex, or emptiness matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOperator {
    Equal,
    NotEqual,
    In,
    NotIn,
    IsEmpty,
    IsNotEmpty,
    Matches,
    NotMatches,
    Lower,
    LowerOrEqual,
    Higher,
    HigherOrEqual,
}

impl MatchOperator {
    /// The boolean an evaluation returns when the left selector's path is
    /// absent from a surrounding map.
    ///
    /// For a selector `M["x"]` against a map `M` that lacks an `"x"` key,
    /// nothing equals a missing key, missing keys contain no values, and a
    /// missing key is never higher than anything.
    pub fn not_present_disposition(&self) -> bool {
        match self {
            MatchOperator::Equal => false,
            MatchOperator::NotEqual => true,
            MatchOperator::In => false,
            MatchOperator::NotIn => true,
            MatchOperator::IsEmpty => true,
            MatchOperator::IsNotEmpty => false,
            MatchOperator::Matches => false,
            MatchOperator::NotMatches => true,
            MatchOperator::Lower | MatchOperator::LowerOrEqual => true,
            MatchOperator::Higher | MatchOperator::HigherOrEqual => false,
        }
    }

    /// True for the matchers that take no right-hand side.
    pub fn is_unary(&self) -> bool {
        matches!(self, MatchOperator::IsEmpty | MatchOperator::IsNotEmpty)
    }
}

impl fmt::Display for MatchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchOperator::Equal => "Equal",
            MatchOperator::NotEqual => "Not Equal",
            MatchOperator::In => "In",
            MatchOperator::NotIn => "Not In",
            MatchOperator::IsEmpty => "Is Empty",
            MatchOperator::IsNotEmpty => "Is Not Empty",
            MatchOperator::Matches => "Matches",
            MatchOperator::NotMatches => "Not Matches",
            MatchOperator::Lower => "Lower",
            MatchOperator::LowerOrEqual => "Lower or Equal",
            MatchOperator::Higher => "Higher",
            MatchOperator::HigherOrEqual => "Higher or Equal",
        };
        write!(f, "{name}")
    }
}

/// How a selector was written; controls its textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorKind {
    /// Dot-separated identifiers, e.g. `foo.bar`.
    #[default]
    Bexpr,
    /// A quoted, slash-separated JSON Pointer, e.g. `"/foo/bar"`.
    JsonPointer,
}

/// A path into the datum.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub kind: SelectorKind,
    pub path: Vec<String>,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return Ok(());
        }
        let separator = match self.kind {
            SelectorKind::Bexpr => ".",
            SelectorKind::JsonPointer => "/",
        };
        write!(f, "{}", self.path.join(separator))
    }
}

/// The declared type of a [`MatchValue`]'s raw literal, or `Reflect` for a
/// value resolved from the datum at evaluation time.
///
/// `Uint` and `Float32` are reserved; the parser never produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Undefined,
    Bool,
    Int,
    Uint,
    Float32,
    Float64,
    String,
    Reflect,
}

/// Leaf of the AST: a literal carrying its raw text and declared type, or a
/// selector to resolve against the datum.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchValue {
    pub selector: Selector,
    pub value_type: ValueType,
    pub raw: String,
}

impl MatchValue {
    /// A literal value with an empty selector.
    pub fn literal(value_type: ValueType, raw: impl Into<String>) -> Self {
        Self {
            selector: Selector::default(),
            value_type,
            raw: raw.into(),
        }
    }

    /// A value resolved from the datum through `selector`.
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            value_type: ValueType::Reflect,
            raw: String::new(),
        }
    }
}

impl fmt::Display for MatchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value_type {
            ValueType::Reflect => write!(f, "{}", self.selector),
            _ => write!(f, "{}", self.raw),
        }
    }
}

/// One or two [`MatchValue`]s combined by an arithmetic operator; the unit of
/// value computation inside a match.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionValue {
    pub left: MatchValue,
    pub operator: MathOperator,
    pub right: Option<MatchValue>,
}

impl ExpressionValue {
    /// Wraps a single value with the identity operator.
    pub fn value(left: MatchValue) -> Self {
        Self {
            left,
            operator: MathOperator::Value,
            right: None,
        }
    }
}

/// A matcher: a selector-bearing left side, an operator, and an optional
/// right side. The selector always sits on the left, even for the
/// `value in selector` surface syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchExpression {
    pub operator: MatchOperator,
    pub left: ExpressionValue,
    pub right: Option<ExpressionValue>,
}

/// A parsed predicate. Trees are immutable once the parser returns them and
/// may be shared freely across concurrent evaluations.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    Match(MatchExpression),
    Value(ExpressionValue),
}

impl Expression {
    /// Renders the tree as indented text, one operator per block. The exact
    /// format is part of the observable contract and exercised by tests.
    pub fn dump(&self, indent: &str, level: usize) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, indent, level);
        out
    }

    fn dump_into(&self, out: &mut String, indent: &str, level: usize) {
        let local = indent.repeat(level);
        match self {
            Expression::Unary { operator, operand } => {
                out.push_str(&format!("{local}{operator} {{\n"));
                operand.dump_into(out, indent, level + 1);
                out.push_str(&format!("{local}}}\n"));
            }
            Expression::Binary {
                left,
                operator,
                right,
            } => {
                out.push_str(&format!("{local}{operator} {{\n"));
                left.dump_into(out, indent, level + 1);
                right.dump_into(out, indent, level + 1);
                out.push_str(&format!("{local}}}\n"));
            }
            Expression::Match(matcher) => matcher.dump_into(out, indent, level),
            Expression::Value(value) => value.dump_into(out, indent, level),
        }
    }
}

impl MatchExpression {
    fn dump_into(&self, out: &mut String, indent: &str, level: usize) {
        let local = indent.repeat(level);
        let inner = indent.repeat(level + 1);
        let selector = &self.left.left.selector;
        if self.operator.is_unary() {
            out.push_str(&format!(
                "{local}{} {{\n{inner}Selector: {selector}\n{local}}}\n",
                self.operator
            ));
        } else {
            let raw = self
                .right
                .as_ref()
                .map(|right| right.left.raw.as_str())
                .unwrap_or_default();
            out.push_str(&format!(
                "{local}{} {{\n{inner}Selector: {selector}\n{inner}Value: {raw:?}\n{local}}}\n",
                self.operator
            ));
        }
    }
}

impl ExpressionValue {
    fn dump_into(&self, out: &mut String, indent: &str, level: usize) {
        let local = indent.repeat(level);
        match &self.right {
            Some(right) => out.push_str(&format!(
                "{local}{} {} {}\n",
                self.left, self.operator, right
            )),
            None => out.push_str(&format!("{local}{}\n", self.left)),
        }
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

    fn literal_side(raw: &str) -> ExpressionValue {
        ExpressionValue::value(MatchValue::literal(ValueType::String, raw))
    }

    fn matcher(operator: MatchOperator, right: Option<ExpressionValue>) -> Expression {
        Expression::Match(MatchExpression {
            operator,
            left: selector_side(&["foo", "bar"]),
            right,
        })
    }

    #[test]
    fn test_dump_binary_matchers() {
        let cases = [
            (
                MatchOperator::Equal,
                "Equal {\n   Selector: foo.bar\n   Value: \"baz\"\n}\n",
            ),
            (
                MatchOperator::NotEqual,
                "Not Equal {\n   Selector: foo.bar\n   Value: \"baz\"\n}\n",
            ),
            (
                MatchOperator::In,
                "In {\n   Selector: foo.bar\n   Value: \"baz\"\n}\n",
            ),
            (
                MatchOperator::NotIn,
                "Not In {\n   Selector: foo.bar\n   Value: \"baz\"\n}\n",
            ),
        ];
        for (operator, expected) in cases {
            let expr = matcher(operator, Some(literal_side("baz")));
            assert_eq!(expr.dump("   ", 0), expected);
        }
    }

    #[test]
    fn test_dump_unary_matchers() {
        let expr = matcher(MatchOperator::IsEmpty, None);
        assert_eq!(expr.dump("   ", 0), "Is Empty {\n   Selector: foo.bar\n}\n");

        let expr = matcher(MatchOperator::IsNotEmpty, None);
        assert_eq!(
            expr.dump("   ", 0),
            "Is Not Empty {\n   Selector: foo.bar\n}\n"
        );
    }

    #[test]
    fn test_dump_not() {
        let expr = Expression::Unary {
            operator: UnaryOperator::Not,
            operand: Box::new(matcher(MatchOperator::IsEmpty, None)),
        };
        assert_eq!(
            expr.dump("   ", 0),
            "Not {\n   Is Empty {\n      Selector: foo.bar\n   }\n}\n"
        );
    }

    #[test]
    fn test_dump_binary_connectives() {
        let leaf = || Box::new(matcher(MatchOperator::IsEmpty, None));
        let and = Expression::Binary {
            left: leaf(),
            operator: BinaryOperator::And,
            right: leaf(),
        };
        assert_eq!(
            and.dump("   ", 0),
            "And {\n   Is Empty {\n      Selector: foo.bar\n   }\n   Is Empty {\n      Selector: foo.bar\n   }\n}\n"
        );

        let or = Expression::Binary {
            left: leaf(),
            operator: BinaryOperator::Or,
            right: leaf(),
        };
        assert_eq!(
            or.dump("   ", 0),
            "Or {\n   Is Empty {\n      Selector: foo.bar\n   }\n   Is Empty {\n      Selector: foo.bar\n   }\n}\n"
        );
    }

    #[test]
    fn test_selector_display() {
        let dotted = Selector {
            kind: SelectorKind::Bexpr,
            path: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        };
        assert_eq!(dotted.to_string(), "a.b.c");

        let pointer = Selector {
            kind: SelectorKind::JsonPointer,
            path: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(pointer.to_string(), "a/b");

        assert_eq!(Selector::default().to_string(), "");
    }

    #[test]
    fn test_not_present_dispositions() {
        use MatchOperator::*;
        let expected = [
            (Equal, false),
            (NotEqual, true),
            (In, false),
            (NotIn, true),
            (IsEmpty, true),
            (IsNotEmpty, false),
            (Matches, false),
            (NotMatches, true),
            (Lower, true),
            (LowerOrEqual, true),
            (Higher, false),
            (HigherOrEqual, false),
        ];
        for (operator, disposition) in expected {
            assert_eq!(
                operator.not_present_disposition(),
                disposition,
                "disposition of {operator}"
            );
        }
    }
}
