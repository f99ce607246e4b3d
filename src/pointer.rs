//! Navigates structured data by a path, in the spirit of a JSON Pointer.
//!
//! The resolver reports a missing map key through the dedicated
//! [`PointerError::NotFound`] variant so callers can tell absence apart from
//! malformed access (bad indices, descending into scalars).

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// A per-value transformation applied to every value the walk visits.
pub type TransformFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

#[derive(Error, Debug, Clone)]
pub enum PointerError {
    /// A map along the path has no entry for the requested key.
    #[error("value not found at \"{0}\"")]
    NotFound(String),

    /// A sequence index parsed but points past the end.
    #[error("index \"{segment}\" is out of range at \"{path}\"")]
    OutOfRange { path: String, segment: String },

    /// A path segment is not a valid sequence index.
    #[error("\"{segment}\" is not a valid sequence index at \"{path}\"")]
    InvalidIndex { path: String, segment: String },

    /// The path descends into a value that has no children.
    #[error("cannot descend into {kind} at \"{path}\"")]
    NotTraversable { path: String, kind: &'static str },

    /// A textual pointer could not be parsed.
    #[error("invalid pointer syntax: {0}")]
    Syntax(String),
}

/// A path into a structured value, with an optional per-value hook.
#[derive(Clone, Copy)]
pub struct Pointer<'a> {
    pub parts: &'a [String],
    pub transform: Option<&'a TransformFn>,
}

impl<'a> Pointer<'a> {
    /// Resolves the pointer against `datum` and returns the referenced
    /// sub-value. An empty path returns the datum itself.
    pub fn get(&self, datum: &Value) -> Result<Value, PointerError> {
        if let Some(hook) = self.transform {
            let mut current = hook(datum.clone());
            for (depth, part) in self.parts.iter().enumerate() {
                current = hook(self.step(&current, part, depth)?.clone());
            }
            Ok(current)
        } else {
            let mut current = datum;
            for (depth, part) in self.parts.iter().enumerate() {
                current = self.step(current, part, depth)?;
            }
            Ok(current.clone())
        }
    }

    fn step<'v>(
        &self,
        value: &'v Value,
        part: &str,
        depth: usize,
    ) -> Result<&'v Value, PointerError> {
        match value {
            Value::Object(map) => map
                .get(part)
                .ok_or_else(|| PointerError::NotFound(self.path_to(depth + 1))),
            Value::Array(items) => {
                let index: usize = part.parse().map_err(|_| PointerError::InvalidIndex {
                    path: self.path_to(depth),
                    segment: part.to_string(),
                })?;
                items.get(index).ok_or_else(|| PointerError::OutOfRange {
                    path: self.path_to(depth),
                    segment: part.to_string(),
                })
            }
            other => Err(PointerError::NotTraversable {
                path: self.path_to(depth),
                kind: kind_name(other),
            }),
        }
    }

    fn path_to(&self, depth: usize) -> String {
        format!("/{}", self.parts[..depth].join("/"))
    }
}

/// Parses a textual JSON Pointer into path segments, unescaping `~1` to `/`
/// and `~0` to `~`. The empty pointer refers to the whole document.
pub fn parse(pointer: &str) -> Result<Vec<String>, PointerError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(PointerError::Syntax(format!(
            "pointer {pointer:?} does not start with '/'"
        )));
    };
    rest.split('/').map(unescape_segment).collect()
}

fn unescape_segment(segment: &str) -> Result<String, PointerError> {
    if !segment.contains('~') {
        return Ok(segment.to_string());
    }
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            Some(other) => {
                return Err(PointerError::Syntax(format!(
                    "invalid escape \"~{other}\" in segment {segment:?}"
                )));
            }
            None => {
                return Err(PointerError::Syntax(format!(
                    "dangling '~' in segment {segment:?}"
                )));
            }
        }
    }
    Ok(out)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
