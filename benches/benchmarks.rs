use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use whatwg_mime::{BlobRegistry, MediaType};

// Benchmark media type parsing
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let test_cases = vec![
        ("simple", "text/html"),
        ("with_charset", "text/html; charset=utf-8"),
        ("complex", "multipart/form-data; boundary=----WebKitFormBoundary7MA4YWxkTrZu0gW"),
        ("quoted", "text/plain; a=\"quoted \\\"value\\\" here\"; b=bare"),
        ("invalid", "not a media type at all"),
    ];

    for (name, input) in test_cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, &input| {
            b.iter(|| MediaType::parse(black_box(input)));
        });
    }

    group.finish();
}

// Benchmark canonical serialization
fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    let mime = MediaType::parse("TEXT/HTML; Charset=UTF-8; a=\"b c\"");

    group.bench_function("with_params", |b| {
        b.iter(|| black_box(&mime).to_string());
    });

    group.finish();
}

// Benchmark registry churn
fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    let registry = BlobRegistry::new();
    let mime = MediaType::parse("application/octet-stream");
    let body = bytes::Bytes::from_static(&[0u8; 1024]);

    group.bench_function("register_resolve_revoke", |b| {
        b.iter(|| {
            let locator = registry.register(mime.clone(), body.clone());
            let _ = registry.resolve(black_box(&locator));
            registry.revoke(&locator);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_serialize, bench_registry);
criterion_main!(benches);
