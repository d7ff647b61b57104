//! Viability checks: can a type be constructed from, or a callable be invoked with, a given
//! argument list?
//!
//! Viability is expressed with two traits:
//!
//! - [`FromArgs<Args>`]: the type has a constructor taking the tuple `Args`. A type may have
//!   several constructors, one impl per argument list.
//! - [`Callable<Args>`]: blanket-implemented for every `Fn` of arity 0 to 8, which covers
//!   function pointers, method paths (`Foo::bar` takes `&Foo` first) and closures.
//!
//! Used as bounds, they reject mis-typed `selecting` stages at compile time. Used through
//! [`is_viable!`](crate::is_viable) and [`is_callable!`](crate::is_callable), they answer the
//! question as a `bool` instead of a compile error.
//!
//! ```rust
//! use seq_view::viable::FromArgs;
//! use seq_view::{is_callable, is_viable};
//!
//! struct Foo(i32, i32);
//!
//! impl FromArgs<(i32, i32)> for Foo {
//!     fn from_args((a, b): (i32, i32)) -> Self {
//!         Foo(a, b)
//!     }
//! }
//!
//! impl Foo {
//!     fn bar(&self, x: i32) -> i32 {
//!         self.0 * x + self.1
//!     }
//! }
//!
//! assert!(is_viable!(Foo: (i32, i32)));
//! assert!(!is_viable!(Foo: (i32,)));
//! assert!(is_callable!(Foo::bar => (&Foo, i32)));
//! assert!(!is_callable!(Foo::bar => (i32,)));
//! ```

use std::any::type_name;

/// A type constructible from the argument tuple `Args`.
#[diagnostic::on_unimplemented(
    message = "no matching constructor: `{Self}` cannot be constructed from `{Args}`",
    label = "the `selecting` stage resolves its placeholders to `{Args}`",
    note = "implement `FromArgs<{Args}>` for `{Self}` to accept this argument list"
)]
pub trait FromArgs<Args>: Sized {
    fn from_args(args: Args) -> Self;
}

/// Construct `T` from `args` through its [`FromArgs`] impl.
pub fn construct<T, Args>(args: Args) -> T
where
    T: FromArgs<Args>,
{
    T::from_args(args)
}

/// A callable accepting the argument tuple `Args`.
#[diagnostic::on_unimplemented(
    message = "unable to call `{Self}` with arguments `{Args}`",
    label = "this callable does not accept `{Args}`"
)]
pub trait Callable<Args> {
    /// Result of a call.
    type Output;
    /// Number of arguments.
    const ARITY: usize;

    fn invoke(&self, args: Args) -> Self::Output;
}

macro_rules! impl_callable {
    ($n:expr; $($arg:ident),*) => {
        impl<F, R, $($arg),*> Callable<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> R,
        {
            type Output = R;
            const ARITY: usize = $n;

            #[allow(non_snake_case)]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) -> R {
                self($($arg),*)
            }
        }
    };
}

impl_callable!(0;);
impl_callable!(1; A1);
impl_callable!(2; A1, A2);
impl_callable!(3; A1, A2, A3);
impl_callable!(4; A1, A2, A3, A4);
impl_callable!(5; A1, A2, A3, A4, A5);
impl_callable!(6; A1, A2, A3, A4, A5, A6);
impl_callable!(7; A1, A2, A3, A4, A5, A6, A7);
impl_callable!(8; A1, A2, A3, A4, A5, A6, A7, A8);

/// Signature introspection for a callable, typically a closure whose type cannot be named.
pub struct CallableInfo<'f, F> {
    callable: &'f F,
}

/// Wrap `f` for introspection.
pub fn callable_info<F>(f: &F) -> CallableInfo<'_, F> {
    CallableInfo { callable: f }
}

impl<F> CallableInfo<'_, F> {
    /// Number of arguments the callable takes when called with `Args`.
    pub fn arity<Args>(&self) -> usize
    where
        F: Callable<Args>,
    {
        F::ARITY
    }

    /// Name of the result type for a call with `Args`.
    pub fn result_type_name<Args>(&self) -> &'static str
    where
        F: Callable<Args>,
    {
        type_name::<F::Output>()
    }

    /// Name of the callable's type.
    pub fn type_name(&self) -> &'static str {
        type_name::<F>()
    }

    /// Call the wrapped callable with `args`.
    pub fn invoke<Args>(&self, args: Args) -> F::Output
    where
        F: Callable<Args>,
    {
        self.callable.invoke(args)
    }
}

/// Probe types behind [`is_viable!`](crate::is_viable) and [`is_callable!`](crate::is_callable).
///
/// Method lookup picks [`Viable::viable`] when the probe's bound holds and falls back to the
/// auto-referenced [`NotViable::viable`] otherwise.
#[doc(hidden)]
pub mod probe {
    use std::marker::PhantomData;

    use super::{Callable, FromArgs};

    pub struct ConstructProbe<T, Args>(PhantomData<fn() -> (T, Args)>);

    impl<T, Args> ConstructProbe<T, Args> {
        pub const fn new() -> Self {
            Self(PhantomData)
        }
    }

    pub struct CallProbe<F, Args>(PhantomData<fn(&F, Args)>);

    impl<F, Args> CallProbe<F, Args> {
        pub fn of(_: &F) -> Self {
            Self(PhantomData)
        }
    }

    pub trait Viable {
        fn viable(&self) -> bool {
            true
        }
    }

    impl<T: FromArgs<Args>, Args> Viable for ConstructProbe<T, Args> {}

    impl<F: Callable<Args>, Args> Viable for CallProbe<F, Args> {}

    pub trait NotViable {
        fn viable(&self) -> bool {
            false
        }
    }

    impl<P> NotViable for &P {}
}

/// `true` if `Type` implements [`FromArgs`] for the listed argument types.
///
/// ```rust
/// use seq_view::is_viable;
/// use seq_view::viable::FromArgs;
///
/// struct Meters(f64);
/// impl FromArgs<(f64,)> for Meters {
///     fn from_args((v,): (f64,)) -> Self {
///         Meters(v)
///     }
/// }
///
/// assert!(is_viable!(Meters: (f64)));
/// assert!(!is_viable!(Meters: (&str)));
/// ```
#[macro_export]
macro_rules! is_viable {
    ($t:ty : ($($arg:ty),* $(,)?)) => {{
        #[allow(unused_imports)]
        use $crate::viable::probe::{NotViable as _, Viable as _};
        (&$crate::viable::probe::ConstructProbe::<$t, ($($arg,)*)>::new()).viable()
    }};
}

/// `true` if the callable expression can be invoked with the listed argument types.
///
/// ```rust
/// use seq_view::is_callable;
///
/// let square = |x: &i32| x * x;
/// assert!(is_callable!(square => (&i32)));
/// assert!(!is_callable!(square => (&str)));
/// ```
#[macro_export]
macro_rules! is_callable {
    ($f:expr => ($($arg:ty),* $(,)?)) => {{
        #[allow(unused_imports)]
        use $crate::viable::probe::{NotViable as _, Viable as _};
        (&$crate::viable::probe::CallProbe::<_, ($($arg,)*)>::of(&$f)).viable()
    }};
}
