use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use seq_view::processing::{Stage, current, filter, filter_sequence, lit, select_sequence, selecting, selector, with};
use seq_view::seq;
use seq_view::types::Sequence;
use seq_view::viable::FromArgs;

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    y: i32,
    z: i32,
}

impl FromArgs<()> for Point {
    fn from_args(_: ()) -> Self {
        Point { x: 640, y: 480, z: 32 }
    }
}

impl FromArgs<(i32, i32)> for Point {
    fn from_args((x, y): (i32, i32)) -> Self {
        Point { x, y, z: 32 }
    }
}

impl FromArgs<(i32, i32, i32)> for Point {
    fn from_args((x, y, z): (i32, i32, i32)) -> Self {
        Point { x, y, z }
    }
}

fn p(x: i32, y: i32, z: i32) -> Point {
    Point { x, y, z }
}

fn pwr2(x: &i32) -> i32 {
    x * x
}

#[test]
fn even_squares_with_literal_depth() {
    let source: Sequence<i32> = (1..=10).collect();
    let points = &source
        | filter(|x: &i32| x % 2 == 0)
        | selecting(selector::<Point>(), (current(), with(pwr2), lit(256)));

    assert_eq!(
        points.items,
        vec![p(2, 4, 256), p(4, 16, 256), p(6, 36, 256), p(8, 64, 256), p(10, 100, 256)]
    );
}

#[test]
fn two_filters_then_selecting() {
    let source: Sequence<i32> = (1..=20).collect();
    let points = &source
        | filter(|x: &i32| x % 2 == 0)
        | filter(|x: &i32| x % 3 == 0)
        | selecting(selector::<Point>(), (current(), with(pwr2), lit(256)));

    assert_eq!(points.items, vec![p(6, 36, 256), p(12, 144, 256), p(18, 324, 256)]);
}

#[test]
fn selecting_picks_constructor_by_argument_count() {
    let source = seq![3, 5];
    let two = &source | selecting(selector::<Point>(), (current(), with(pwr2)));
    assert_eq!(two.items, vec![p(3, 9, 32), p(5, 25, 32)]);
}

#[test]
fn filter_keeps_order_and_is_a_subsequence() {
    let source = seq![9, 2, 7, 4, 4, 1, 8];
    let kept = &source | filter(|x: &i32| x % 2 == 0);

    assert_eq!(kept.items, vec![2, 4, 4, 8]);
    let mut rest = source.iter();
    assert!(kept.iter().all(|k| rest.any(|s| s == k)));
}

#[test]
fn filter_with_constant_predicates() {
    let source = seq![1, 2, 3];
    assert_eq!(&source | filter(|_: &i32| true), source);
    assert!((&source | filter(|_: &i32| false)).is_empty());
}

#[test]
fn empty_input_yields_empty_output() {
    let source: Sequence<i32> = seq![];
    let points = &source | selecting(selector::<Point>(), (current(), lit(1), lit(2)));
    assert!(points.is_empty());
}

#[test]
fn selecting_preserves_length_and_order() {
    let source = seq![5, -1, 3];
    let points = select_sequence(&source, selector::<Point>(), (current(), lit(0), lit(0)));
    assert_eq!(points.len(), source.len());
    assert_eq!(points.items.iter().map(|pt| pt.x).collect::<Vec<_>>(), vec![5, -1, 3]);
}

#[test]
fn passthrough_filter_is_idempotent() {
    let source: Sequence<i32> = (1..=30).collect();
    let even = filter(|x: &i32| x % 2 == 0);
    let once = &source | &even;
    let twice = &once | &even;
    assert_eq!(once, twice);
    assert_eq!(once, filter_sequence(&source, |x| x % 2 == 0));
}

#[test]
fn composition_is_associative() {
    let source: Sequence<i32> = (1..=50).collect();
    let even = filter(|x: &i32| x % 2 == 0);
    let by_five = filter(|x: &i32| x % 5 == 0);
    let to_point = selecting(selector::<Point>(), (current(), with(pwr2), lit(1)));

    let left = &source | ((&even | &by_five) | &to_point);
    let right = &source | (&even | (&by_five | &to_point));
    let stepwise = (&source | &even) | &by_five | &to_point;

    assert_eq!(left, right);
    assert_eq!(left, stepwise);
    assert_eq!(left.items, vec![p(10, 100, 1), p(20, 400, 1), p(30, 900, 1), p(40, 1600, 1), p(50, 2500, 1)]);
}

#[test]
fn composed_stage_is_reusable_across_inputs() {
    let pipeline = filter(|x: &i32| *x > 2).then(selecting(selector::<Point>(), (current(), lit(7))));
    let a = pipeline.apply(&seq![1, 2, 3]);
    let b = pipeline.apply(&seq![4]);
    assert_eq!(a.items, vec![p(3, 7, 32)]);
    assert_eq!(b.items, vec![p(4, 7, 32)]);
}

#[test]
fn transform_runs_once_per_surviving_element() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);
    let source: Sequence<i32> = (1..=10).collect();

    let pipeline = filter(|x: &i32| x % 2 == 0)
        | selecting(
            selector::<Point>(),
            (
                current(),
                with(move |x: &i32| {
                    let _ = counted.fetch_add(1, Ordering::SeqCst);
                    x * x
                }),
                lit(256),
            ),
        );
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let out = &source | &pipeline;
    assert_eq!(out.len(), 5);
    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

#[test]
fn view_pipeline_matches_owned_pipeline() {
    let source: Sequence<i32> = (1..=20).collect();
    let pipeline = filter(|x: &i32| x % 2 == 0)
        | filter(|x: &i32| x % 3 == 0)
        | selecting(selector::<Point>(), (current(), with(pwr2), lit(256)));

    let from_view = source.view() | &pipeline;
    let from_owned = source.clone() | &pipeline;
    assert_eq!(from_view, from_owned);

    let view = source.view() | filter(|x: &i32| *x > 18);
    assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec![19, 20]);
    assert!(std::ptr::eq(view.iter().next().unwrap(), &source.items[18]));
}

#[test]
fn transforms_and_predicates_can_borrow_local_state() {
    let depth_by_parity = vec![100, 200];
    let allowed = vec![2, 3, 5, 7];
    let source: Sequence<i32> = (1..=8).collect();

    let points = &source
        | filter(|x: &i32| allowed.contains(x))
        | selecting(
            selector::<Point>(),
            (current(), lit(0), with(|x: &i32| depth_by_parity[(*x % 2) as usize])),
        );

    assert_eq!(points.items, vec![p(2, 0, 100), p(3, 0, 200), p(5, 0, 200), p(7, 0, 200)]);
}
