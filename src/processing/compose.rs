//! Stage trait and the `|` pipe operator.
//!
//! - `sequence | stage` applies the stage immediately and yields its output.
//! - `stage | stage` composes the two descriptors into a [`Then`], which runs nothing until it is
//!   applied to a sequence.
//!
//! Composition is associative: `(a | b) | c` and `a | (b | c)` produce the same output for any
//! input.

use std::ops::BitOr;

use crate::types::{Sequence, View};

use super::filter::Filter;
use super::select::Select;

/// A pure transformation from one sequence to another.
///
/// Stages are immutable descriptors; applying one never consumes or changes it, so the same
/// stage can be applied to any number of inputs.
#[diagnostic::on_unimplemented(
    message = "stage `{Self}` cannot be applied to `{In}`",
    label = "the element type of `{In}` does not match what this stage reads"
)]
pub trait Stage<In> {
    type Output;

    fn apply(&self, input: In) -> Self::Output;
}

impl<In, St> Stage<In> for &St
where
    St: Stage<In> + ?Sized,
{
    type Output = St::Output;

    fn apply(&self, input: In) -> Self::Output {
        (**self).apply(input)
    }
}

/// Marker for stage descriptors that may appear on either side of `|`.
pub trait Descriptor {}

impl<D: Descriptor + ?Sized> Descriptor for &D {}

/// Two stages run back to back: the first stage's output is the second stage's input.
#[derive(Debug, Clone)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<A, B> Then<A, B> {
    /// Compose `first` then `second`.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<In, A, B> Stage<In> for Then<A, B>
where
    A: Stage<In>,
    B: Stage<A::Output>,
{
    type Output = B::Output;

    fn apply(&self, input: In) -> Self::Output {
        self.second.apply(self.first.apply(input))
    }
}

macro_rules! impl_descriptor {
    ($ty:ident<$($g:ident),+>) => {
        impl<$($g),+> Descriptor for $ty<$($g),+> {}

        impl<$($g),+> $ty<$($g),+> {
            /// Method form of `self | next`.
            pub fn then<Next>(self, next: Next) -> Then<Self, Next> {
                Then::new(self, next)
            }
        }

        impl<$($g,)+ Rhs: Descriptor> BitOr<Rhs> for $ty<$($g),+> {
            type Output = Then<Self, Rhs>;

            fn bitor(self, rhs: Rhs) -> Self::Output {
                Then::new(self, rhs)
            }
        }

        impl<'a, $($g,)+ Rhs: Descriptor> BitOr<Rhs> for &'a $ty<$($g),+> {
            type Output = Then<Self, Rhs>;

            fn bitor(self, rhs: Rhs) -> Self::Output {
                Then::new(self, rhs)
            }
        }
    };
}

impl_descriptor!(Filter<T, P>);
impl_descriptor!(Select<S, Args>);
impl_descriptor!(Then<A, B>);

impl<T, St> BitOr<St> for Sequence<T>
where
    St: Descriptor + Stage<Sequence<T>>,
{
    type Output = St::Output;

    fn bitor(self, stage: St) -> Self::Output {
        stage.apply(self)
    }
}

impl<'a, T, St> BitOr<St> for &'a Sequence<T>
where
    St: Descriptor + Stage<&'a Sequence<T>>,
{
    type Output = St::Output;

    fn bitor(self, stage: St) -> Self::Output {
        stage.apply(self)
    }
}

impl<'a, T, St> BitOr<St> for View<'a, T>
where
    St: Descriptor + Stage<View<'a, T>>,
{
    type Output = St::Output;

    fn bitor(self, stage: St) -> Self::Output {
        stage.apply(self)
    }
}
