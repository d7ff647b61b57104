use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use seq_view::dynamic::{DynArg, DynFunction, DynPipeline, DynPredicate, RecordType};
use seq_view::execution::{ExecutionEngine, ExecutionOptions};
use seq_view::processing::{current, filter, lit, selecting, selector, with};
use seq_view::types::{DataType, Sequence, Value};
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

fn make_sequence(n: i64) -> Sequence<i64> {
    (0..n).collect()
}

fn bench_static_pipeline(c: &mut Criterion) {
    let source = make_sequence(100_000);
    let pipeline = filter(|x: &i64| x % 2 == 0)
        | filter(|x: &i64| x % 3 == 0)
        | selecting(selector::<Point>(), (current(), with(|x: &i64| x * x), lit(256)));

    c.bench_function("static_filter_filter_select", |b| {
        b.iter(|| black_box(&source | &pipeline))
    });

    c.bench_function("view_filter_filter_select", |b| {
        b.iter(|| black_box(source.view() | &pipeline))
    });
}

fn bench_dynamic_pipeline(c: &mut Criterion) {
    let input: Vec<Value> = (0..100_000).map(Value::Int64).collect();
    let point = RecordType::new("point").fieldwise(vec![DataType::Int64, DataType::Int64, DataType::Int64]);
    let even = DynPredicate::new("even", DataType::Int64, |v| v.as_i64().is_some_and(|x| x % 2 == 0));
    let square = DynFunction::new("square", DataType::Int64, DataType::Int64, |v| {
        Value::Int64(v.as_i64().unwrap_or(0).pow(2))
    });
    let compiled = DynPipeline::new()
        .filter(even)
        .select(
            point,
            vec![DynArg::Current, DynArg::Transform(square), DynArg::Literal(Value::Int64(256))],
        )
        .compile(DataType::Int64)
        .unwrap();

    c.bench_function("dynamic_filter_select", |b| {
        b.iter(|| black_box(compiled.run(&input).unwrap()))
    });
}

fn bench_parallel(c: &mut Criterion) {
    let source = make_sequence(1_000_000);
    let even = filter(|x: &i64| x % 2 == 0);
    let to_point = selecting(selector::<Point>(), (current(), with(|x: &i64| x * x), lit(256)));

    let mut group = c.benchmark_group("parallel_select");
    for chunk_size in [1_024usize, 16_384, 131_072] {
        let engine = ExecutionEngine::new(ExecutionOptions {
            chunk_size,
            ..Default::default()
        })
        .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(chunk_size), &chunk_size, |b, _| {
            b.iter(|| {
                let kept = engine.filter_parallel(&source, &even);
                black_box(engine.select_parallel(&kept, &to_point))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_static_pipeline, bench_dynamic_pipeline, bench_parallel);
criterion_main!(benches);
