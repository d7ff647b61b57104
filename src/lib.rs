//! `seq-view` is a small library for building query-like pipelines over in-memory sequences:
//! filter elements with `where`-style predicates, then project every survivor into a newly
//! constructed object whose constructor arguments are described by placeholders.
//!
//! Stages are immutable values composed with `|`. Composition is associative and lazy: nothing is
//! evaluated until a composed stage is applied to a [`types::Sequence`] (or a borrowed
//! [`types::View`]).
//!
//! ## Layers
//!
//! - [`processing`]: statically typed stages. A `selecting` stage whose arguments fit no
//!   constructor, or a transform that cannot accept the element type, is a compile error.
//! - [`viable`]: the construction and callability checks behind those errors, plus
//!   [`is_viable!`] / [`is_callable!`] for asking the same questions as a `bool`.
//! - [`dynamic`]: the same pipeline over runtime-typed [`types::Value`]s, where mismatches are
//!   reported as [`ViewError`]s by an explicit compile step before any element is touched.
//! - [`execution`]: order-preserving parallel evaluation of stages with metrics and throttling.
//!
//! ## Quick example
//!
//! ```rust
//! use seq_view::processing::{current, filter, lit, selecting, selector, with};
//! use seq_view::seq;
//! use seq_view::viable::FromArgs;
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     z: i32,
//! }
//!
//! impl FromArgs<()> for Point {
//!     fn from_args(_: ()) -> Self {
//!         Point { x: 640, y: 480, z: 32 }
//!     }
//! }
//!
//! impl FromArgs<(i32, i32)> for Point {
//!     fn from_args((x, y): (i32, i32)) -> Self {
//!         Point { x, y, z: 32 }
//!     }
//! }
//!
//! impl FromArgs<(i32, i32, i32)> for Point {
//!     fn from_args((x, y, z): (i32, i32, i32)) -> Self {
//!         Point { x, y, z }
//!     }
//! }
//!
//! let source = seq![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
//! let points = &source
//!     | filter(|x: &i32| x % 2 == 0)
//!     | selecting(selector::<Point>(), (current(), with(|x: &i32| x * x), lit(256)));
//!
//! assert_eq!(points.len(), 5);
//! assert_eq!(points.items[0], Point { x: 2, y: 4, z: 256 });
//! assert_eq!(points.items[4], Point { x: 10, y: 100, z: 256 });
//!
//! // The two-argument constructor is picked by argument count.
//! let flat = &source | selecting(selector::<Point>(), (current(), lit(0)));
//! assert_eq!(flat.items[0], Point { x: 1, y: 0, z: 32 });
//! ```
//!
//! ## Checking viability
//!
//! ```rust
//! use seq_view::{is_callable, is_viable};
//! use seq_view::viable::FromArgs;
//!
//! struct Pair(i64, i64);
//!
//! impl FromArgs<(i64, i64)> for Pair {
//!     fn from_args((a, b): (i64, i64)) -> Self {
//!         Pair(a, b)
//!     }
//! }
//!
//! assert!(is_viable!(Pair: (i64, i64)));
//! assert!(!is_viable!(Pair: (String,)));
//!
//! let square = |x: i64| x * x;
//! assert!(is_callable!(square => (i64)));
//! assert!(!is_callable!(square => (i64, i64)));
//! ```
//!
//! ## Parallel evaluation
//!
//! ```rust
//! use seq_view::execution::{ExecutionEngine, ExecutionOptions};
//! use seq_view::processing::filter;
//! use seq_view::types::Sequence;
//!
//! # fn main() -> Result<(), seq_view::ViewError> {
//! let source: Sequence<i64> = (0..10_000).collect();
//! let engine = ExecutionEngine::new(ExecutionOptions {
//!     chunk_size: 256,
//!     ..Default::default()
//! })?;
//!
//! let even = filter(|x: &i64| x % 2 == 0);
//! let out = engine.filter_parallel(&source, &even);
//! assert_eq!(out, &source | &even);
//! println!("{}", engine.metrics().snapshot());
//! # Ok(())
//! # }
//! ```
//!
//! ## Cargo features
//!
//! - `tracing`: emits `tracing` events from [`dynamic::DynPipeline::compile`] and enables
//!   [`execution::TracingExecutionObserver`].

pub mod dynamic;
pub mod error;
pub mod execution;
pub mod processing;
pub mod types;
pub mod viable;

pub use error::{ViewError, ViewResult};
