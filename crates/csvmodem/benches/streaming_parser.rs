//! Benchmark – `csvmodem::StreamingParser`
#![allow(missing_docs)]

use std::{hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use csvmodem::{ParserOptions, StreamingParser, produce_chunks};

/// Produce a *deterministic* CSV document of `rows` data rows under a
/// five-column header. Every fourth row carries a quoted field with an
/// escaped quote and an embedded newline, so the quoted path is exercised
/// alongside the plain one.
fn make_csv_payload(rows: usize) -> String {
    let mut s = String::from("id,name,score,active,comment\r\n");
    for i in 0..rows {
        let comment = if i % 4 == 0 {
            format!("\"row {i} says \"\"hi\"\"\nand more\"")
        } else {
            format!("plain comment {i}")
        };
        s.push_str(&format!(
            "{i},name-{i},{}.{},{},{comment}\r\n",
            i * 7,
            i % 100,
            i % 2 == 0
        ));
    }
    s
}

/// Run the parser by feeding it `parts` chunks that together form the full
/// `payload`, returning the number of events so that Criterion cannot
/// optimise the work away.
fn run_streaming_parser(payload: &str, parts: usize, options: ParserOptions) -> usize {
    let mut parser = StreamingParser::new(options).unwrap();
    let mut produced = 0usize;
    for chunk in produce_chunks(payload, parts) {
        produced += parser.feed(chunk).count();
    }
    produced + parser.finish().count()
}

fn bench_streaming_parser(c: &mut Criterion) {
    let payload = make_csv_payload(2_000);

    let modes = [
        ("raw", ParserOptions::default()),
        (
            "typed",
            ParserOptions {
                header_line: Some(1),
                trim: true,
                parse_numbers: true,
                parse_booleans: true,
                ..Default::default()
            },
        ),
        (
            "object",
            ParserOptions {
                as_object: true,
                parse_numbers: true,
                parse_booleans: true,
                ..Default::default()
            },
        ),
    ];

    let mut group = c.benchmark_group("streaming_parser_split");

    for &parts in &[1usize, 100, 10_000] {
        for (name, options) in modes {
            group.bench_with_input(
                BenchmarkId::new(parts.to_string(), name),
                &options,
                |b, &options| {
                    b.iter(|| {
                        let count = run_streaming_parser(black_box(&payload), parts, options);
                        black_box(count);
                    });
                },
            );
        }
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(5))
            .measurement_time(Duration::from_secs(10));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_streaming_parser }
criterion_main!(benches);
