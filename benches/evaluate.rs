//! Parse and evaluation micro-benchmarks.

use bexpr::Evaluator;
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_simple_match", |b| {
        b.iter(|| bexpr::parse("foo.bar == \"baz\"").unwrap())
    });
    c.bench_function("parse_compound", |b| {
        b.iter(|| {
            bexpr::parse("not (a.b == 1 or \"x\" in tags) and name matches \"^h.*o$\"").unwrap()
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let evaluator = Evaluator::new("foo.bar == \"baz\" and ver >= 3").unwrap();
    let datum = json!({ "foo": { "bar": "baz" }, "ver": 5 });
    c.bench_function("evaluate_compiled_match", |b| {
        b.iter(|| evaluator.evaluate(&datum).unwrap())
    });

    let matcher = Evaluator::new("name matches \"^[a-z]+-[0-9]+$\"").unwrap();
    let datum = json!({ "name": "node-42" });
    c.bench_function("evaluate_regex_match", |b| {
        b.iter(|| matcher.evaluate(&datum).unwrap())
    });
}

criterion_group!(benches, bench_parse, bench_evaluate);
criterion_main!(benches);
