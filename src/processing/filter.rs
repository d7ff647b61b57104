//! Element filtering (the `where` clause).

use std::fmt;
use std::marker::PhantomData;

use crate::types::{Sequence, View};

use super::compose::Stage;

/// Stage keeping the elements for which a predicate returns `true`.
///
/// The filter is stable and calls the predicate exactly once per input element, in order.
pub struct Filter<T, P> {
    predicate: P,
    _element: PhantomData<fn(&T)>,
}

/// Create a filter stage from `predicate`.
pub fn filter<T, P>(predicate: P) -> Filter<T, P>
where
    P: Fn(&T) -> bool,
{
    Filter {
        predicate,
        _element: PhantomData,
    }
}

/// Returns a new [`Sequence`] containing only elements for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`Sequence::filter_items`].
pub fn filter_sequence<T, F>(sequence: &Sequence<T>, predicate: F) -> Sequence<T>
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    sequence.filter_items(predicate)
}

impl<T, P> Filter<T, P>
where
    P: Fn(&T) -> bool,
{
    /// Evaluate the predicate for one element.
    pub fn matches(&self, element: &T) -> bool {
        (self.predicate)(element)
    }
}

impl<T, P: Clone> Clone for Filter<T, P> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            _element: PhantomData,
        }
    }
}

impl<T, P> fmt::Debug for Filter<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("element", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T, P> Stage<Sequence<T>> for Filter<T, P>
where
    P: Fn(&T) -> bool,
{
    type Output = Sequence<T>;

    fn apply(&self, input: Sequence<T>) -> Self::Output {
        input.into_iter().filter(|x| self.matches(x)).collect()
    }
}

impl<'a, T, P> Stage<&'a Sequence<T>> for Filter<T, P>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    type Output = Sequence<T>;

    fn apply(&self, input: &'a Sequence<T>) -> Self::Output {
        input.filter_items(&self.predicate)
    }
}

impl<'a, T, P> Stage<View<'a, T>> for Filter<T, P>
where
    P: Fn(&T) -> bool,
{
    type Output = View<'a, T>;

    fn apply(&self, input: View<'a, T>) -> Self::Output {
        input.filter_items(&self.predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::{filter, filter_sequence};
    use crate::processing::Stage;
    use crate::types::Sequence;

    fn sample() -> Sequence<i32> {
        (1..=10).collect()
    }

    #[test]
    fn keeps_matching_elements_in_order() {
        let s = sample();
        let out = &s | filter(|x: &i32| x % 2 == 0);
        assert_eq!(out.items, vec![2, 4, 6, 8, 10]);
        // Source unchanged
        assert_eq!(s.len(), 10);
    }

    #[test]
    fn every_kept_element_matches_and_every_dropped_does_not() {
        let s: Sequence<i32> = vec![7, -3, 12, 0, 5, -8, 9].into();
        let positive = |x: &i32| *x > 0;
        let out = filter(positive).apply(&s);

        assert!(out.len() <= s.len());
        assert!(out.iter().all(positive));
        let dropped: Vec<i32> = s.iter().copied().filter(|x| !out.items.contains(x)).collect();
        assert!(dropped.iter().all(|x| !positive(x)));
        assert_eq!(out.items, vec![7, 12, 5, 9]);
    }

    #[test]
    fn predicate_called_once_per_element_in_order() {
        let seen = std::sync::Mutex::new(Vec::new());
        let out = sample()
            | filter(|x: &i32| {
                seen.lock().unwrap().push(*x);
                *x > 5
            });
        assert_eq!(out.items, vec![6, 7, 8, 9, 10]);
        assert_eq!(seen.into_inner().unwrap(), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn nested_filters_equal_conjunction() {
        let s: Sequence<i32> = (1..=50).collect();
        let p1 = |x: &i32| x % 2 == 0;
        let p2 = |x: &i32| x % 5 == 0;
        let nested = &s | filter(p1) | filter(p2);
        let conjunction = filter_sequence(&s, |x| p1(x) && p2(x));
        assert_eq!(nested, conjunction);
    }

    #[test]
    fn view_filter_yields_view_over_the_same_elements() {
        let s = sample();
        let v = s.view() | filter(|x: &i32| *x > 8);
        assert_eq!(v.len(), 2);
        assert!(std::ptr::eq(v.iter().next().unwrap(), &s.items[8]));
        assert_eq!(v.to_sequence().items, vec![9, 10]);
    }

    #[test]
    fn can_return_empty_sequence() {
        let out = sample() | filter(|_: &i32| false);
        assert!(out.is_empty());
    }
}
