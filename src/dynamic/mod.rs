//! Dynamically typed pipelines over [`Value`]s.
//!
//! The statically typed stages in [`crate::processing`] reject mismatches at compile time. Here
//! element types are only known at runtime, so the same checks run once, explicitly, in
//! [`DynPipeline::compile`]:
//!
//! - a predicate or transform whose declared input differs from the element type it would
//!   receive yields [`ViewError::CallableMismatch`];
//! - a `selecting` stage whose resolved argument types match no constructor of its
//!   [`RecordType`] yields [`ViewError::ConstructionMismatch`].
//!
//! Nothing is evaluated while compiling. [`CompiledPipeline::run`] checks every input element
//! against the compiled input type before evaluating any stage, so a rejected run never produces
//! partial output.
//!
//! ```rust
//! use seq_view::dynamic::{DynArg, DynFunction, DynPipeline, DynPredicate, RecordType};
//! use seq_view::types::{DataType, Value};
//!
//! let point = RecordType::new("point")
//!     .fieldwise(vec![DataType::Int64, DataType::Int64, DataType::Int64]);
//! let even = DynPredicate::new("even", DataType::Int64, |v| v.as_i64().is_some_and(|x| x % 2 == 0));
//! let square = DynFunction::new("square", DataType::Int64, DataType::Int64, |v| {
//!     Value::Int64(v.as_i64().unwrap_or(0).pow(2))
//! });
//!
//! let pipeline = DynPipeline::new()
//!     .filter(even)
//!     .select(point, vec![DynArg::Current, DynArg::Transform(square), DynArg::Literal(Value::Int64(256))])
//!     .compile(DataType::Int64)?;
//!
//! let input: Vec<Value> = (1..=4).map(Value::Int64).collect();
//! let out = pipeline.run(&input)?;
//! assert_eq!(out.len(), 2);
//! assert_eq!(out[1].as_record().unwrap().fields, vec![Value::Int64(4), Value::Int64(16), Value::Int64(256)]);
//!
//! // A text literal fits no constructor: rejected before anything runs.
//! let err = DynPipeline::new()
//!     .select(RecordType::new("p").fieldwise(vec![DataType::Int64]), vec![DynArg::Literal("x".into())])
//!     .compile(DataType::Int64)
//!     .unwrap_err();
//! assert!(err.to_string().contains("no matching constructor"));
//! # Ok::<(), seq_view::ViewError>(())
//! ```

mod function;
mod record;

pub use function::{DynArg, DynFunction, DynPredicate};
pub use record::{Constructor, RecordType};

use crate::error::{ViewError, ViewResult};
use crate::processing::{Descriptor, Stage};
use crate::types::{DataType, Record, Sequence, Value};

/// One stage of a [`DynPipeline`].
#[derive(Debug, Clone)]
pub enum DynStage {
    /// Keep elements matching the predicate.
    Where(DynPredicate),
    /// Construct one record per element.
    Select { target: RecordType, args: Vec<DynArg> },
}

impl DynStage {
    fn label(&self, index: usize) -> String {
        match self {
            Self::Where(p) => format!("stage {index} (where '{}')", p.name()),
            Self::Select { target, .. } => format!("stage {index} (selecting {})", target.name()),
        }
    }
}

/// Unchecked list of dynamic stages.
///
/// Composition only concatenates stages, so it is associative; all type checking happens in
/// [`DynPipeline::compile`].
#[derive(Debug, Clone, Default)]
pub struct DynPipeline {
    stages: Vec<DynStage>,
}

impl DynPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    pub fn push(mut self, stage: DynStage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Append a `where` stage.
    pub fn filter(self, predicate: DynPredicate) -> Self {
        self.push(DynStage::Where(predicate))
    }

    /// Append a `selecting` stage building `target` records from `args`.
    pub fn select(self, target: RecordType, args: Vec<DynArg>) -> Self {
        self.push(DynStage::Select { target, args })
    }

    /// Append the stages of `next` after the stages of `self`.
    pub fn then(mut self, next: DynPipeline) -> Self {
        self.stages.extend(next.stages);
        self
    }

    /// Stages in evaluation order.
    pub fn stages(&self) -> &[DynStage] {
        &self.stages
    }

    /// Check every stage against the element type flowing into it, starting from `input`.
    pub fn compile(&self, input: DataType) -> ViewResult<CompiledPipeline> {
        let mut current = input.clone();
        let mut compiled = Vec::with_capacity(self.stages.len());

        for (i, stage) in self.stages.iter().enumerate() {
            let index = i + 1;
            match stage {
                DynStage::Where(predicate) => {
                    if predicate.input() != &current {
                        return Err(ViewError::CallableMismatch {
                            stage: stage.label(index),
                            callable: predicate.name().to_string(),
                            expected: predicate.input().clone(),
                            found: current,
                        });
                    }
                    compiled.push(CompiledStage::Where(predicate.clone()));
                }
                DynStage::Select { target, args } => {
                    let mut arg_types = Vec::with_capacity(args.len());
                    for arg in args {
                        let arg_type = match arg {
                            DynArg::Current => Some(current.clone()),
                            DynArg::Transform(f) => {
                                if f.input() != &current {
                                    return Err(ViewError::CallableMismatch {
                                        stage: stage.label(index),
                                        callable: f.name().to_string(),
                                        expected: f.input().clone(),
                                        found: current,
                                    });
                                }
                                Some(f.output().clone())
                            }
                            DynArg::Literal(v) => v.data_type(),
                        };
                        arg_types.push(arg_type);
                    }

                    let constructor = target.find_constructor(&arg_types).ok_or_else(|| {
                        ViewError::ConstructionMismatch {
                            stage: stage.label(index),
                            target: target.name().to_string(),
                            args: describe_args(&arg_types),
                        }
                    })?;

                    compiled.push(CompiledStage::Select {
                        label: stage.label(index),
                        target: target.name().to_string(),
                        constructor: target.constructors()[constructor].clone(),
                        args: args.clone(),
                    });
                    current = target.data_type();
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(stages = compiled.len(), input = %input, output = %current, "compiled dynamic pipeline");

        Ok(CompiledPipeline {
            input,
            output: current,
            stages: compiled,
        })
    }
}

fn describe_args(types: &[Option<DataType>]) -> String {
    types
        .iter()
        .map(|t| t.as_ref().map_or_else(|| "Null".to_string(), ToString::to_string))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone)]
enum CompiledStage {
    Where(DynPredicate),
    Select {
        label: String,
        target: String,
        constructor: Constructor,
        args: Vec<DynArg>,
    },
}

/// A type-checked dynamic pipeline, ready to run.
#[derive(Debug, Clone)]
pub struct CompiledPipeline {
    input: DataType,
    output: DataType,
    stages: Vec<CompiledStage>,
}

impl CompiledPipeline {
    /// Element type the pipeline was compiled for.
    pub fn input_type(&self) -> &DataType {
        &self.input
    }

    /// Element type produced by the last stage.
    pub fn output_type(&self) -> &DataType {
        &self.output
    }

    /// Run every stage over `input`, returning a new vector.
    ///
    /// Fails with [`ViewError::ElementTypeMismatch`] before evaluating anything if an element's
    /// type differs from the compiled input type. [`Value::Null`] elements are accepted.
    ///
    /// A transform returning a value outside its declared output type fails the run with
    /// [`ViewError::TransformOutputMismatch`] before that value reaches a constructor.
    pub fn run(&self, input: &[Value]) -> ViewResult<Vec<Value>> {
        for (index, value) in input.iter().enumerate() {
            if let Some(found) = value.data_type() {
                if found != self.input {
                    return Err(ViewError::ElementTypeMismatch {
                        index,
                        expected: self.input.clone(),
                        found,
                    });
                }
            }
        }

        let mut items = input.to_vec();
        for stage in &self.stages {
            items = match stage {
                CompiledStage::Where(predicate) => {
                    items.into_iter().filter(|v| predicate.test(v)).collect()
                }
                CompiledStage::Select {
                    label,
                    target,
                    constructor,
                    args,
                } => {
                    let mut out = Vec::with_capacity(items.len());
                    for element in &items {
                        let resolved = args
                            .iter()
                            .map(|a| resolve_checked(a, element, label))
                            .collect::<ViewResult<Vec<Value>>>()?;
                        let fields = constructor.build(&resolved);
                        out.push(Value::Record(Record::new(target.clone(), fields)));
                    }
                    out
                }
            };
        }
        Ok(items)
    }
}

fn resolve_checked(arg: &DynArg, element: &Value, stage: &str) -> ViewResult<Value> {
    let value = arg.resolve(element);
    if let DynArg::Transform(f) = arg {
        if let Some(found) = value.data_type() {
            if &found != f.output() {
                return Err(ViewError::TransformOutputMismatch {
                    stage: stage.to_string(),
                    callable: f.name().to_string(),
                    expected: f.output().clone(),
                    found,
                });
            }
        }
    }
    Ok(value)
}

impl Descriptor for CompiledPipeline {}

impl<'a> Stage<&'a Sequence<Value>> for CompiledPipeline {
    type Output = ViewResult<Sequence<Value>>;

    fn apply(&self, input: &'a Sequence<Value>) -> Self::Output {
        self.run(input.as_slice()).map(Sequence::new)
    }
}
