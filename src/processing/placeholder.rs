//! Placeholders: how each constructor argument of a `selecting` stage is derived from the
//! current element.
//!
//! A [`Placeholder<'f, T, A>`] turns an element `&T` into an argument `A`. It is one of:
//!
//! - passthrough ([`current`], [`current_into`]): the element itself;
//! - transform ([`with`]): a function applied to the element;
//! - literal ([`lit`]): the same stored value for every element.
//!
//! Transforms may borrow local state for `'f`. Resolution never caches. Resolving a transform
//! twice calls the function twice.

use std::fmt;
use std::sync::Arc;

/// Which kind of argument a [`Placeholder`] yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Passthrough,
    Transform,
    Literal,
}

enum Slot<'f, T, A> {
    Passthrough(fn(&T) -> A),
    Transform(Arc<dyn Fn(&T) -> A + Send + Sync + 'f>),
    Literal { value: A, copy: fn(&A) -> A },
}

/// Argument descriptor resolved once per element.
pub struct Placeholder<'f, T, A> {
    slot: Slot<'f, T, A>,
}

impl<T, A> Placeholder<'_, T, A> {
    /// Resolve this placeholder against the current element.
    pub fn resolve(&self, element: &T) -> A {
        match &self.slot {
            Slot::Passthrough(pass) => pass(element),
            Slot::Transform(f) => f(element),
            Slot::Literal { value, copy } => copy(value),
        }
    }

    /// Which kind of argument this placeholder yields.
    pub fn kind(&self) -> PlaceholderKind {
        match self.slot {
            Slot::Passthrough(_) => PlaceholderKind::Passthrough,
            Slot::Transform(_) => PlaceholderKind::Transform,
            Slot::Literal { .. } => PlaceholderKind::Literal,
        }
    }
}

/// Passthrough: the current element, cloned.
pub fn current<'f, T: Clone>() -> Placeholder<'f, T, T> {
    Placeholder {
        slot: Slot::Passthrough(T::clone),
    }
}

/// Passthrough converted with [`Into`], e.g. an `i32` element into an `i64` argument.
pub fn current_into<'f, T, A>() -> Placeholder<'f, T, A>
where
    T: Clone + Into<A>,
{
    Placeholder {
        slot: Slot::Passthrough(|element: &T| element.clone().into()),
    }
}

/// Transform: `f` applied to the current element.
///
/// The element type is part of `f`'s signature, so a function that cannot accept the elements
/// of the sequence is rejected when the stage is applied, at compile time. `f` may borrow local
/// state:
///
/// ```rust
/// use seq_view::processing::with;
///
/// let names = vec!["zero", "one", "two"];
/// let name = with(|i: &usize| names[*i]);
/// assert_eq!(name.resolve(&2), "two");
/// ```
pub fn with<'f, T, A, F>(f: F) -> Placeholder<'f, T, A>
where
    F: Fn(&T) -> A + Send + Sync + 'f,
{
    Placeholder {
        slot: Slot::Transform(Arc::new(f)),
    }
}

/// Literal: a clone of `value` for every element.
pub fn lit<'f, T, A: Clone>(value: A) -> Placeholder<'f, T, A> {
    Placeholder {
        slot: Slot::Literal {
            value,
            copy: A::clone,
        },
    }
}

impl<T, A> Clone for Placeholder<'_, T, A> {
    fn clone(&self) -> Self {
        let slot = match &self.slot {
            Slot::Passthrough(pass) => Slot::Passthrough(*pass),
            Slot::Transform(f) => Slot::Transform(Arc::clone(f)),
            Slot::Literal { value, copy } => Slot::Literal {
                value: copy(value),
                copy: *copy,
            },
        };
        Self { slot }
    }
}

impl<T, A> fmt::Debug for Placeholder<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placeholder")
            .field("kind", &self.kind())
            .field("yields", &std::any::type_name::<A>())
            .finish()
    }
}

/// A tuple of one to eight [`Placeholder`]s. `Output` is the tuple of argument types they yield,
/// whatever element type they read.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a tuple of placeholders",
    label = "`selecting` takes a tuple of one to eight placeholders, e.g. `(current(), lit(0))`"
)]
pub trait PlaceholderArgs {
    /// Tuple of resolved argument values.
    type Output;
}

/// A tuple of placeholders that can all read elements of type `T`, resolved left to right.
#[diagnostic::on_unimplemented(
    message = "unable to call the placeholders of this `selecting` stage with elements of type `{T}`",
    label = "every `with` transform in the stage must accept `&{T}`",
    note = "the stage's placeholders are `{Self}`"
)]
pub trait ResolveArgs<T>: PlaceholderArgs {
    fn resolve_all(&self, element: &T) -> Self::Output;
}

macro_rules! impl_resolve_args {
    ($($elem:ident $arg:ident $idx:tt),+) => {
        impl<'f, $($elem, $arg),+> PlaceholderArgs for ($(Placeholder<'f, $elem, $arg>,)+) {
            type Output = ($($arg,)+);
        }

        impl<'f, T, $($arg),+> ResolveArgs<T> for ($(Placeholder<'f, T, $arg>,)+) {
            fn resolve_all(&self, element: &T) -> Self::Output {
                ($(self.$idx.resolve(element),)+)
            }
        }
    };
}

impl_resolve_args!(E1 A1 0);
impl_resolve_args!(E1 A1 0, E2 A2 1);
impl_resolve_args!(E1 A1 0, E2 A2 1, E3 A3 2);
impl_resolve_args!(E1 A1 0, E2 A2 1, E3 A3 2, E4 A4 3);
impl_resolve_args!(E1 A1 0, E2 A2 1, E3 A3 2, E4 A4 3, E5 A5 4);
impl_resolve_args!(E1 A1 0, E2 A2 1, E3 A3 2, E4 A4 3, E5 A5 4, E6 A6 5);
impl_resolve_args!(E1 A1 0, E2 A2 1, E3 A3 2, E4 A4 3, E5 A5 4, E6 A6 5, E7 A7 6);
impl_resolve_args!(E1 A1 0, E2 A2 1, E3 A3 2, E4 A4 3, E5 A5 4, E6 A6 5, E7 A7 6, E8 A8 7);
