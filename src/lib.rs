//! A small boolean expression language for filtering structured data.
//!
//! Predicates like `foo.bar == "baz" and not (ver < 3)` are parsed once into
//! an immutable AST and evaluated against any serializable datum. Selectors
//! navigate maps and sequences (`foo.bar`, `items.0`, `foo["key with spaces"]`,
//! or a quoted JSON Pointer `"/foo/bar"`), and matchers cover equality,
//! ordering, containment, regex matching, and emptiness.
//!
//! ```
//! use bexpr::Evaluator;
//! use serde_json::json;
//!
//! let evaluator = Evaluator::new("foo.bar == \"baz\" and ver >= 3").unwrap();
//! let datum = json!({ "foo": { "bar": "baz" }, "ver": 5 });
//! assert!(evaluator.evaluate(&datum).unwrap());
//! ```
//!
//! When a selector's path is missing from a surrounding map, each matcher
//! falls back to a fixed absence disposition instead of erroring: `==`
//! against a missing key is `false`, `!=` is `true`, `is empty` is `true`,
//! and so on.

pub mod ast;
pub mod coerce;
pub mod engine;
pub mod error;
pub mod options;
mod parser;
pub mod pointer;

pub use ast::{
    BinaryOperator, Expression, ExpressionValue, MatchExpression, MatchOperator, MatchValue,
    MathOperator, Selector, SelectorKind, UnaryOperator, ValueType,
};
pub use engine::{BexprValue, Resolved, evaluate};
pub use error::BexprError;
pub use options::Options;
pub use parser::parse;
pub use pointer::{Pointer, PointerError};

use serde::Serialize;

/// A compiled predicate, ready to be evaluated against many datums.
pub struct Evaluator {
    ast: Expression,
    options: Options,
}

impl Evaluator {
    /// Parses `expression` with default options.
    pub fn new(expression: &str) -> Result<Self, BexprError> {
        Self::with_options(expression, Options::default())
    }

    /// Parses `expression`, configuring evaluation with `options`.
    pub fn with_options(expression: &str, options: Options) -> Result<Self, BexprError> {
        let ast = parser::parse(expression)?;
        Ok(Self { ast, options })
    }

    /// Evaluates the compiled predicate against `datum`.
    ///
    /// The datum is serialized into a structured value first, so any
    /// `Serialize` type works; field naming follows the datum's serde
    /// attributes.
    pub fn evaluate<T: Serialize>(&self, datum: &T) -> Result<bool, BexprError> {
        let value = serde_json::to_value(datum).map_err(|e| BexprError::Datum(e.to_string()))?;
        engine::evaluate(&self.ast, &value, &self.options)
    }

    /// The parsed expression tree.
    pub fn expression(&self) -> &Expression {
        &self.ast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_and_evaluate_simple_match() {
        let evaluator = Evaluator::new("customer.name == \"ACME\"").unwrap();
        let datum = json!({ "customer": { "name": "ACME" } });
        assert!(evaluator.evaluate(&datum).unwrap());
    }

    #[test]
    fn test_evaluate_serializable_struct() {
        #[derive(serde::Serialize)]
        struct Service {
            name: String,
            #[serde(rename = "Meta")]
            meta: std::collections::BTreeMap<String, String>,
        }

        let service = Service {
            name: "web".to_string(),
            meta: [("env".to_string(), "prod".to_string())].into(),
        };
        let evaluator = Evaluator::new("name == \"web\" and Meta.env == \"prod\"").unwrap();
        assert!(evaluator.evaluate(&service).unwrap());
    }

    #[test]
    fn test_compiled_expression_is_reusable() {
        let evaluator = Evaluator::new("ver >= 3").unwrap();
        assert!(evaluator.evaluate(&json!({ "ver": 5 })).unwrap());
        assert!(!evaluator.evaluate(&json!({ "ver": 2 })).unwrap());
    }

    #[test]
    fn test_expression_accessor_dumps() {
        let evaluator = Evaluator::new("foo.bar == \"baz\"").unwrap();
        assert_eq!(
            evaluator.expression().dump("   ", 0),
            "Equal {\n   Selector: foo.bar\n   Value: \"baz\"\n}\n"
        );
    }
}
