//! Execution engine for running stages with configurable parallelism.
//!
//! This module sits "above" [`crate::processing`] and provides:
//!
//! - Parallel (chunked) evaluation of `filter` and `selecting` stages
//! - Resource limits / throttling (in-flight chunks)
//! - Real-time metrics + observer hooks for monitoring
//!
//! Chunks are evaluated concurrently but their outputs are concatenated in input order, and every
//! element is evaluated exactly once, so results always equal sequential evaluation.

mod observer;
mod semaphore;

use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};
use crate::processing::{Filter, ResolveArgs, Select};
use crate::types::Sequence;
use crate::viable::FromArgs;

#[cfg(feature = "tracing")]
pub use observer::TracingExecutionObserver;
pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver, StdErrExecutionObserver,
};

use semaphore::Semaphore;

/// Configuration for the [`ExecutionEngine`].
///
/// Missing fields take their [`Default`] values when loaded from JSON:
///
/// ```rust
/// use seq_view::execution::ExecutionOptions;
///
/// let opts = ExecutionOptions::from_json_str(r#"{ "chunk_size": 128 }"#).unwrap();
/// assert_eq!(opts.chunk_size, 128);
/// assert!(ExecutionOptions::from_json_str(r#"{ "chunk_size": 0 }"#).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Number of elements per chunk.
    pub chunk_size: usize,
    /// Upper bound on concurrently executing chunks.
    ///
    /// This is an additional throttle on top of `num_threads`.
    pub max_in_flight_chunks: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let n = available_threads();
        Self {
            num_threads: Some(n),
            chunk_size: 4_096,
            max_in_flight_chunks: n,
        }
    }
}

impl ExecutionOptions {
    /// Parse and validate options from JSON.
    pub fn from_json_str(json: &str) -> ViewResult<Self> {
        let opts: Self = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reject zero chunk size, zero in-flight chunks and zero threads.
    pub fn validate(&self) -> ViewResult<()> {
        if self.chunk_size == 0 {
            return Err(invalid("chunk_size must be > 0"));
        }
        if self.max_in_flight_chunks == 0 {
            return Err(invalid("max_in_flight_chunks must be > 0"));
        }
        if self.num_threads == Some(0) {
            return Err(invalid("num_threads must be > 0 when set"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ViewError {
    ViewError::InvalidOptions {
        message: message.to_string(),
    }
}

fn available_threads() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// A configurable execution engine for [`Sequence`] stages.
pub struct ExecutionEngine {
    pool: ThreadPool,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    pub fn new(opts: ExecutionOptions) -> ViewResult<Self> {
        opts.validate()?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(opts.num_threads.unwrap_or_else(available_threads))
            .build()?;

        Ok(Self {
            pool,
            opts,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Options the engine was built with.
    pub fn options(&self) -> &ExecutionOptions {
        &self.opts
    }

    /// Evaluate a filter stage over chunks in parallel.
    pub fn filter_parallel<T, P>(&self, input: &Sequence<T>, stage: &Filter<T, P>) -> Sequence<T>
    where
        T: Clone + Send + Sync,
        P: Fn(&T) -> bool + Sync,
    {
        let keep = |element: &T, out: &mut Vec<T>| {
            if stage.matches(element) {
                out.push(element.clone());
            }
        };
        self.pool
            .install(|| self.run_chunked::<T, T>("filter", input.as_slice(), &keep))
            .into()
    }

    /// Evaluate a `selecting` stage over chunks in parallel.
    pub fn select_parallel<T, S, Args>(&self, input: &Sequence<T>, stage: &Select<S, Args>) -> Sequence<S>
    where
        T: Sync,
        S: Send + FromArgs<Args::Output>,
        Args: ResolveArgs<T> + Sync,
    {
        let project = |element: &T, out: &mut Vec<S>| out.push(stage.project(element));
        self.pool
            .install(|| self.run_chunked::<T, S>("selecting", input.as_slice(), &project))
            .into()
    }

    fn run_chunked<T, U>(
        &self,
        stage: &'static str,
        input: &[T],
        eval: &(dyn Fn(&T, &mut Vec<U>) + Sync),
    ) -> Vec<U>
    where
        T: Sync,
        U: Send,
    {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted {
            stage,
            input_len: input.len(),
        });

        let sem = Semaphore::new(self.opts.max_in_flight_chunks);
        let per_chunk: Vec<Vec<U>> = chunk_ranges(input.len(), self.opts.chunk_size)
            .into_par_iter()
            .map(|range| {
                let permit = sem.acquire();
                let waited = permit.waited();
                if waited > Duration::ZERO {
                    self.metrics.on_throttle_wait(waited);
                    self.emit(ExecutionEvent::ThrottleWaited { duration: waited });
                }

                self.metrics.on_chunk_start();
                self.emit(ExecutionEvent::ChunkStarted {
                    start: range.start,
                    len: range.len(),
                });

                let mut out = Vec::with_capacity(range.len());
                for element in &input[range] {
                    self.metrics.on_element_processed();
                    eval(element, &mut out);
                }

                self.emit(ExecutionEvent::ChunkFinished { output_len: out.len() });
                self.metrics.on_chunk_end(out.len());
                drop(permit);
                out
            })
            .collect();

        let out = per_chunk.into_iter().flatten().collect::<Vec<_>>();

        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            metrics: self.metrics.snapshot(),
        });

        out
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

fn chunk_ranges(len: usize, chunk_size: usize) -> Vec<Range<usize>> {
    let mut out = Vec::with_capacity(len.div_ceil(chunk_size));
    let mut start = 0usize;
    while start < len {
        let end = (start + chunk_size).min(len);
        out.push(start..end);
        start = end;
    }
    out
}
