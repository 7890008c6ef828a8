//! Flattening benchmarks.
//!
//! Measures how the engine scales with label count and loop nesting.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use stateflat::flatten::{FlattenOptions, flatten_body};
use stateflat::ir::{Block, Expression, Statement};

fn call(name: &str) -> Statement {
    Statement::expr(Expression::call(Expression::id(name), vec![]))
}

/// `n` labeled statements in a row, each followed by plain code.
fn straight_line(n: usize) -> Block {
    (0..n)
        .flat_map(|i| [Statement::labeled(format!("L{i}"), call("a")), call("b")])
        .collect()
}

/// `depth` nested `while` loops with a label in the innermost body.
fn nested_loops(depth: usize) -> Block {
    let mut body = vec![Statement::labeled("inner", call("a")), call("b")];
    for level in 0..depth {
        body = vec![
            Statement::while_loop(Expression::id(format!("c{level}")), body),
            call("after"),
        ];
    }
    Block::new(body)
}

/// A generator-style body: a counted loop with a yield point and an early exit.
fn counted_loop() -> Block {
    let i = || Expression::id("i");
    Block::new(vec![
        Statement::for_loop(
            Statement::expr(Expression::assign(i(), Expression::number("0"))),
            Some(Expression::binary(i(), "<", Expression::id("n"))),
            Some(Expression::assign(
                i(),
                Expression::binary(i(), "+", Expression::number("1")),
            )),
            vec![
                Statement::if_then(
                    Expression::call(Expression::id("done"), vec![i()]),
                    vec![Statement::break_loop()],
                ),
                call("before"),
                Statement::labeled("resume", call("after")),
            ],
        ),
        Statement::ret(None),
    ])
}

fn bench_straight_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("straight_line");
    let options = FlattenOptions::default();
    for n in [10, 100, 1000] {
        let body = straight_line(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &body, |b, body| {
            b.iter(|| black_box(flatten_body(body, &options)))
        });
    }
    group.finish();
}

fn bench_nested_loops(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_loops");
    let options = FlattenOptions::default();
    for depth in [1, 4, 16] {
        let body = nested_loops(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &body, |b, body| {
            b.iter(|| black_box(flatten_body(body, &options)))
        });
    }
    group.finish();
}

fn bench_counted_loop(c: &mut Criterion) {
    let options = FlattenOptions::default();
    let body = counted_loop();
    c.bench_function("counted_loop", |b| {
        b.iter(|| black_box(flatten_body(&body, &options)))
    });
}

criterion_group!(
    flatten_benches,
    bench_straight_line,
    bench_nested_loops,
    bench_counted_loop
);
criterion_main!(flatten_benches);
