//! Option plumbing for evaluation.

use std::sync::Arc;

use serde_json::Value;

use crate::pointer::TransformFn;

/// Tunables recognized by the evaluator.
///
/// `with_unknown` substitutes a placeholder for any selector path missing
/// from the datum, preempting the per-operator absence disposition.
/// `with_hook` installs a transformation applied to every value the selector
/// resolver visits.
#[derive(Clone, Default)]
pub struct Options {
    pub(crate) unknown: Option<Value>,
    pub(crate) hook: Option<TransformFn>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unknown(mut self, value: Value) -> Self {
        self.unknown = Some(value);
        self
    }

    pub fn with_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }
}
