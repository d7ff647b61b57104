use std::fmt;
use std::sync::Arc;

use crate::types::{DataType, Value};

/// Named transform with a declared signature `input -> output`.
#[derive(Clone)]
pub struct DynFunction {
    name: String,
    input: DataType,
    output: DataType,
    f: Arc<dyn Fn(&Value) -> Value + Send + Sync>,
}

impl DynFunction {
    /// Create a transform named `name`, declared to map `input` values to `output` values.
    pub fn new<F>(name: impl Into<String>, input: DataType, output: DataType, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            input,
            output,
            f: Arc::new(f),
        }
    }

    /// Name used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared element type the transform accepts.
    pub fn input(&self) -> &DataType {
        &self.input
    }

    /// Declared result type; checked against every returned value at run time.
    pub fn output(&self) -> &DataType {
        &self.output
    }

    /// Apply the transform to one value.
    pub fn call(&self, value: &Value) -> Value {
        (self.f)(value)
    }
}

impl fmt::Debug for DynFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.name, self.input, self.output)
    }
}

/// Named predicate over elements of one declared type.
#[derive(Clone)]
pub struct DynPredicate {
    name: String,
    input: DataType,
    f: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl DynPredicate {
    /// Create a predicate named `name` over values of type `input`.
    pub fn new<F>(name: impl Into<String>, input: DataType, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            input,
            f: Arc::new(f),
        }
    }

    /// Name used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared element type the predicate accepts.
    pub fn input(&self) -> &DataType {
        &self.input
    }

    /// Evaluate the predicate for one value.
    pub fn test(&self, value: &Value) -> bool {
        (self.f)(value)
    }
}

impl fmt::Debug for DynPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> Bool", self.name, self.input)
    }
}

/// Argument descriptor of a dynamic `selecting` stage.
#[derive(Debug, Clone)]
pub enum DynArg {
    /// The current element.
    Current,
    /// A transform applied to the current element.
    Transform(DynFunction),
    /// The same value for every element.
    Literal(Value),
}

impl DynArg {
    /// Resolve this argument against the current element.
    pub fn resolve(&self, element: &Value) -> Value {
        match self {
            Self::Current => element.clone(),
            Self::Transform(f) => f.call(element),
            Self::Literal(v) => v.clone(),
        }
    }
}
