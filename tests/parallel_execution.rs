use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Duration;

use seq_view::ViewError;
use seq_view::execution::{ExecutionEngine, ExecutionEvent, ExecutionObserver, ExecutionOptions};
use seq_view::processing::{current, filter, lit, selecting, selector, with};
use seq_view::types::Sequence;
use seq_view::viable::FromArgs;

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i64,
    y: i64,
    z: i64,
}

impl FromArgs<(i64, i64, i64)> for Point {
    fn from_args((x, y, z): (i64, i64, i64)) -> Self {
        Point { x, y, z }
    }
}

#[derive(Default)]
struct CountingObserver {
    runs: AtomicUsize,
    chunks: AtomicUsize,
}

impl ExecutionObserver for CountingObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::RunFinished { .. } => {
                let _ = self.runs.fetch_add(1, Ordering::SeqCst);
            }
            ExecutionEvent::ChunkFinished { .. } => {
                let _ = self.chunks.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }
    }
}

#[test]
fn parallel_pipeline_matches_sequential_pipeline() {
    let source: Sequence<i64> = (1..=10_000).collect();
    let even = filter(|x: &i64| x % 2 == 0);
    let by_three = filter(|x: &i64| x % 3 == 0);
    let to_point = selecting(selector::<Point>(), (current(), with(|x: &i64| x * x), lit(256)));

    let engine = ExecutionEngine::new(ExecutionOptions {
        num_threads: Some(4),
        chunk_size: 97,
        max_in_flight_chunks: 3,
    })
    .unwrap();

    let kept = engine.filter_parallel(&engine.filter_parallel(&source, &even), &by_three);
    let parallel = engine.select_parallel(&kept, &to_point);
    let sequential = &source | (&even | &by_three | &to_point);

    assert_eq!(parallel, sequential);
    assert_eq!(parallel.items[0], Point { x: 6, y: 36, z: 256 });
}

#[test]
fn observer_sees_every_chunk_once() {
    let observer = Arc::new(CountingObserver::default());
    let obs: Arc<dyn ExecutionObserver> = observer.clone();
    let engine = ExecutionEngine::new(ExecutionOptions {
        num_threads: Some(2),
        chunk_size: 10,
        max_in_flight_chunks: 2,
    })
    .unwrap()
    .with_observer(obs);

    let source: Sequence<i64> = (0..95).collect();
    let out = engine.filter_parallel(&source, &filter(|x: &i64| *x >= 90));

    assert_eq!(out.items, vec![90, 91, 92, 93, 94]);
    assert_eq!(observer.runs.load(Ordering::SeqCst), 1);
    assert_eq!(observer.chunks.load(Ordering::SeqCst), 10);

    let snap = engine.metrics().snapshot();
    assert_eq!(snap.elements_processed, 95);
    assert_eq!(snap.elements_emitted, 5);
}

#[test]
fn empty_input_runs_no_chunks() {
    let engine = ExecutionEngine::new(ExecutionOptions::default()).unwrap();
    let source: Sequence<i64> = Sequence::default();
    let out = engine.select_parallel(&source, &selecting(selector::<Point>(), (current(), lit(0), lit(0))));

    assert!(out.is_empty());
    assert_eq!(engine.metrics().snapshot().chunks_started, 0);
}

#[test]
fn options_load_from_json() {
    let opts = ExecutionOptions::from_json_str(
        r#"{ "num_threads": 2, "chunk_size": 64, "max_in_flight_chunks": 1 }"#,
    )
    .unwrap();
    assert_eq!(opts.num_threads, Some(2));
    assert_eq!(opts.chunk_size, 64);
    assert_eq!(opts.max_in_flight_chunks, 1);

    let engine = ExecutionEngine::new(opts.clone()).unwrap();
    assert_eq!(engine.options(), &opts);

    let err = ExecutionOptions::from_json_str(r#"{ "max_in_flight_chunks": 0 }"#).unwrap_err();
    assert!(matches!(err, ViewError::InvalidOptions { .. }));
}

fn throttled_engine() -> ExecutionEngine {
    ExecutionEngine::new(ExecutionOptions {
        num_threads: Some(4),
        chunk_size: 1,
        max_in_flight_chunks: 1,
    })
    .unwrap()
}

#[test]
fn panicking_predicate_reaches_the_caller_under_throttling() {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let engine = throttled_engine();
        let source: Sequence<i64> = (0..64).collect();
        let failing = filter(|x: &i64| {
            if *x == 3 {
                panic!("predicate failed on {x}");
            }
            true
        });
        let result = catch_unwind(AssertUnwindSafe(|| engine.filter_parallel(&source, &failing)));
        let _ = tx.send(result.is_err());
    });

    let panicked = rx
        .recv_timeout(Duration::from_secs(10))
        .expect("filter_parallel did not return after the predicate panicked");
    assert!(panicked);
}

#[test]
fn panicking_transform_reaches_the_caller_under_throttling() {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let engine = throttled_engine();
        let source: Sequence<i64> = (0..64).collect();
        let failing = selecting(
            selector::<Point>(),
            (
                current(),
                with(|x: &i64| {
                    if *x == 10 {
                        panic!("transform failed on {x}");
                    }
                    *x
                }),
                lit(0),
            ),
        );
        let result = catch_unwind(AssertUnwindSafe(|| engine.select_parallel(&source, &failing)));
        let _ = tx.send(result.is_err());
    });

    let panicked = rx
        .recv_timeout(Duration::from_secs(10))
        .expect("select_parallel did not return after the transform panicked");
    assert!(panicked);
}
