//! In-memory sequence transformations.
//!
//! Stages are immutable descriptors applied with the `|` operator (or [`Stage::apply`]):
//!
//! - [`filter()`]: keep elements matching a predicate (the `where` clause)
//! - [`selecting()`]: construct one output object per element from a tuple of placeholders
//! - [`Then`]: two stages composed with `stage | stage`, evaluated only when applied
//!
//! Placeholders ([`current`], [`current_into`], [`with`], [`lit`]) describe how each constructor
//! argument is derived from the current element.
//!
//! ## Example: filter → filter → selecting
//!
//! ```rust
//! use seq_view::processing::{current, filter, lit, selecting, selector, with};
//! use seq_view::types::Sequence;
//! use seq_view::viable::FromArgs;
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     z: i32,
//! }
//!
//! impl FromArgs<(i32, i32, i32)> for Point {
//!     fn from_args((x, y, z): (i32, i32, i32)) -> Self {
//!         Point { x, y, z }
//!     }
//! }
//!
//! let source: Sequence<i32> = (1..=20).collect();
//! let even = filter(|x: &i32| x % 2 == 0);
//! let by_three = filter(|x: &i32| x % 3 == 0);
//! let to_point = selecting(selector::<Point>(), (current(), with(|x: &i32| x * x), lit(256)));
//!
//! let points = &source | (even | by_three | to_point);
//! assert_eq!(
//!     points.items,
//!     vec![
//!         Point { x: 6, y: 36, z: 256 },
//!         Point { x: 12, y: 144, z: 256 },
//!         Point { x: 18, y: 324, z: 256 },
//!     ]
//! );
//! ```

pub mod compose;
pub mod filter;
pub mod placeholder;
pub mod select;

pub use compose::{Descriptor, Stage, Then};
pub use filter::{Filter, filter, filter_sequence};
pub use placeholder::{
    Placeholder, PlaceholderArgs, PlaceholderKind, ResolveArgs, current, current_into, lit, with,
};
pub use select::{Select, Selector, select_sequence, selecting, selector};
