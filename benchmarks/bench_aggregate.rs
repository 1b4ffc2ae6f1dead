use std::hint::black_box;
use std::io::Cursor;
use std::path::Path;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use reqstat::aggregator::aggregate_reader;
use reqstat::counts::{AggregateCount, HandlerCount};
use reqstat::parsers::{LineClassifier, RequestLineParser};
use reqstat::report::render_report;

const INFO_LINE: &str =
    "2025-01-01 00:00:00,000 INFO django.request: GET /api/v1/users/ 200 OK [10.0.0.1]";
const ERROR_LINE: &str = "2025-01-01 00:00:00,000 ERROR django.request: Internal Server Error: /api/v1/orders/ [10.0.0.2] - DatabaseError: Deadlock detected";
const OTHER_LINE: &str = "2025-01-01 00:00:00,000 DEBUG django.db.backends: (0.001) SELECT 1";

fn synthetic_log(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        let line = match i % 4 {
            0 | 1 => INFO_LINE,
            2 => ERROR_LINE,
            _ => OTHER_LINE,
        };
        text.push_str(line);
        text.push('\n');
    }
    text
}

fn bench_classify_info(c: &mut Criterion) {
    let parser = RequestLineParser::new();
    c.bench_function("classify_info", |b| {
        b.iter(|| {
            black_box(parser.classify(black_box(INFO_LINE)));
        });
    });
}

fn bench_classify_error(c: &mut Criterion) {
    let parser = RequestLineParser::new();
    c.bench_function("classify_error", |b| {
        b.iter(|| {
            black_box(parser.classify(black_box(ERROR_LINE)));
        });
    });
}

fn bench_classify_other_channel(c: &mut Criterion) {
    let parser = RequestLineParser::new();
    c.bench_function("classify_other_channel", |b| {
        b.iter(|| {
            black_box(parser.classify(black_box(OTHER_LINE)));
        });
    });
}

fn bench_aggregate_reader(c: &mut Criterion) {
    let parser = RequestLineParser::new();
    let log = synthetic_log(10_000);
    let mut group = c.benchmark_group("aggregate_reader");
    group.throughput(Throughput::Bytes(log.len() as u64));
    group.bench_function("10k_lines", |b| {
        b.iter(|| {
            let reader = Cursor::new(log.as_bytes());
            black_box(aggregate_reader(reader, &parser, Path::new("bench.log")).unwrap());
        });
    });
    group.finish();
}

fn wide_aggregate(handlers: usize, offset: u64) -> AggregateCount {
    (0..handlers)
        .map(|i| {
            let n = i as u64 + offset;
            (format!("/api/v1/resource_{}/", i), HandlerCount::from_slots([n, n * 2, 0, n, 1]))
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let left = wide_aggregate(500, 0);
    let right = wide_aggregate(500, 7);
    c.bench_function("merge_500_handlers", |b| {
        b.iter(|| {
            black_box(black_box(&left).merge(black_box(&right)));
        });
    });
}

fn bench_render_report(c: &mut Criterion) {
    let aggregate = wide_aggregate(200, 3);
    c.bench_function("render_report_200_handlers", |b| {
        b.iter(|| {
            black_box(render_report(black_box(&aggregate)));
        });
    });
}

criterion_group!(
    benches,
    bench_classify_info,
    bench_classify_error,
    bench_classify_other_channel,
    bench_aggregate_reader,
    bench_merge,
    bench_render_report
);
criterion_main!(benches);
