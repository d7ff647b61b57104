//! Projection into constructed objects (`selecting`).

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::types::{Sequence, View};
use crate::viable::FromArgs;

use super::compose::Stage;
use super::placeholder::{PlaceholderArgs, ResolveArgs};

/// Names the output type of a `selecting` stage.
pub struct Selector<S>(PhantomData<fn() -> S>);

/// Tag for the output type `S` of [`selecting`].
pub fn selector<S>() -> Selector<S> {
    Selector(PhantomData)
}

/// Stage constructing one `S` per input element from a tuple of placeholders.
pub struct Select<S, Args> {
    args: Args,
    _target: PhantomData<fn() -> S>,
}

/// Create a `selecting` stage.
///
/// `args` is a tuple of [`super::Placeholder`]s, resolved left to right for every element and
/// passed to the `S` constructor whose argument list matches ([`FromArgs`]). A tuple that matches
/// no constructor is a compile error here, where the stage is defined.
///
/// ```rust
/// use seq_view::processing::{current, filter, lit, selecting, selector, with};
/// use seq_view::types::Sequence;
/// use seq_view::viable::FromArgs;
///
/// #[derive(Debug, PartialEq)]
/// struct Point(i32, i32, i32);
///
/// impl FromArgs<(i32, i32, i32)> for Point {
///     fn from_args((x, y, z): (i32, i32, i32)) -> Self {
///         Point(x, y, z)
///     }
/// }
///
/// let source: Sequence<i32> = (1..=4).collect();
/// let points = &source
///     | filter(|x: &i32| x % 2 == 0)
///     | selecting(selector::<Point>(), (current(), with(|x: &i32| x * x), lit(256)));
/// assert_eq!(points.items, vec![Point(2, 4, 256), Point(4, 16, 256)]);
/// ```
///
/// An argument list no constructor accepts does not compile:
///
/// ```compile_fail
/// use seq_view::processing::{current, selecting, selector};
/// use seq_view::viable::FromArgs;
///
/// struct Point(i32, i32, i32);
///
/// impl FromArgs<(i32, i32, i32)> for Point {
///     fn from_args((x, y, z): (i32, i32, i32)) -> Self {
///         Point(x, y, z)
///     }
/// }
///
/// // `Point` has no two-argument constructor.
/// let stage = selecting(selector::<Point>(), (current::<i32>(), current::<i32>()));
/// ```
///
/// Neither does applying a stage whose transform cannot take the element type:
///
/// ```compile_fail
/// use seq_view::processing::{current, lit, selecting, selector, with};
/// use seq_view::types::Sequence;
/// use seq_view::viable::FromArgs;
///
/// struct Point(i32, i32, i32);
///
/// impl FromArgs<(i32, i32, i32)> for Point {
///     fn from_args((x, y, z): (i32, i32, i32)) -> Self {
///         Point(x, y, z)
///     }
/// }
///
/// let source: Sequence<i32> = (1..=3).collect();
/// let stage = selecting(selector::<Point>(), (current(), with(|s: &String| s.len() as i32), lit(0)));
/// let points = &source | stage;
/// ```
pub fn selecting<S, Args>(_target: Selector<S>, args: Args) -> Select<S, Args>
where
    Args: PlaceholderArgs,
    S: FromArgs<Args::Output>,
{
    Select {
        args,
        _target: PhantomData,
    }
}

/// Returns a new [`Sequence`] of `S` built from every element of `sequence`.
///
/// This is a convenience wrapper around applying [`selecting`] to a borrowed sequence.
pub fn select_sequence<T, S, Args>(sequence: &Sequence<T>, target: Selector<S>, args: Args) -> Sequence<S>
where
    Args: ResolveArgs<T>,
    S: FromArgs<Args::Output>,
{
    selecting(target, args).apply(sequence)
}

impl<S, Args> Select<S, Args>
where
    Args: PlaceholderArgs,
    S: FromArgs<Args::Output>,
{
    /// Build the output object for one element.
    pub fn project<T>(&self, element: &T) -> S
    where
        Args: ResolveArgs<T>,
    {
        S::from_args(self.args.resolve_all(element))
    }
}

impl<S, Args: Clone> Clone for Select<S, Args> {
    fn clone(&self) -> Self {
        Self {
            args: self.args.clone(),
            _target: PhantomData,
        }
    }
}

impl<S, Args: fmt::Debug> fmt::Debug for Select<S, Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("target", &type_name::<S>())
            .field("args", &self.args)
            .finish()
    }
}

impl<T, S, Args> Stage<Sequence<T>> for Select<S, Args>
where
    Args: ResolveArgs<T>,
    S: FromArgs<Args::Output>,
{
    type Output = Sequence<S>;

    fn apply(&self, input: Sequence<T>) -> Self::Output {
        input.map_items(|e| self.project(e))
    }
}

impl<'a, T, S, Args> Stage<&'a Sequence<T>> for Select<S, Args>
where
    Args: ResolveArgs<T>,
    S: FromArgs<Args::Output>,
{
    type Output = Sequence<S>;

    fn apply(&self, input: &'a Sequence<T>) -> Self::Output {
        input.map_items(|e| self.project(e))
    }
}

impl<'a, T, S, Args> Stage<View<'a, T>> for Select<S, Args>
where
    Args: ResolveArgs<T>,
    S: FromArgs<Args::Output>,
{
    type Output = Sequence<S>;

    fn apply(&self, input: View<'a, T>) -> Self::Output {
        input.iter().map(|e| self.project(e)).collect()
    }
}
