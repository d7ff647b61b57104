use thiserror::Error;

use crate::types::DataType;

/// Convenience result type for pipeline definition and execution.
pub type ViewResult<T> = Result<T, ViewError>;

/// Error type returned when a pipeline is rejected.
///
/// Statically typed pipelines ([`crate::processing`]) report construction and callable
/// mismatches as compile errors, so at runtime these variants only come out of the dynamic
/// pipeline ([`crate::dynamic::DynPipeline::compile`], [`crate::dynamic::CompiledPipeline::run`])
/// and the execution engine configuration.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The resolved `selecting` arguments match no constructor of the target type.
    #[error("no matching constructor in {stage}: `{target}` cannot be constructed from ({args})")]
    ConstructionMismatch {
        stage: String,
        target: String,
        args: String,
    },

    /// A predicate or transform cannot accept the element type offered to it.
    #[error("unable to call '{callable}' in {stage}: expects {expected}, element is {found}")]
    CallableMismatch {
        stage: String,
        callable: String,
        expected: DataType,
        found: DataType,
    },

    /// An input element does not have the type the pipeline was compiled for.
    #[error("element {index} has type {found}, pipeline input is {expected}")]
    ElementTypeMismatch {
        index: usize,
        expected: DataType,
        found: DataType,
    },

    /// A dynamic transform returned a value outside its declared output type.
    #[error("'{callable}' in {stage} returned {found}, declared output is {expected}")]
    TransformOutputMismatch {
        stage: String,
        callable: String,
        expected: DataType,
        found: DataType,
    },

    /// [`crate::execution::ExecutionOptions`] failed validation.
    #[error("invalid execution options: {message}")]
    InvalidOptions { message: String },

    /// Execution options could not be parsed from JSON.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// The worker thread pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
