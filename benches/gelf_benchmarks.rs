//! Criterion benchmarks for rust_gelf_target

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_gelf_target::prelude::*;
use rust_gelf_target::structured;
use rust_gelf_target::transports::udp::{chunk_datagrams, CHUNK_SIZE_WAN};

struct NullTransport;

impl Transport for NullTransport {
    fn send(&mut self, payload: &[u8]) -> Result<()> {
        black_box(payload);
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn sample_message(version: GelfVersion) -> Message {
    let mut message = Message::new();
    message.set_version(version);
    message.set_host("bench-host");
    message.set_short_message("request completed");
    message.set_full_message("GET /api/orders returned 200 in 12ms");
    message.set_facility("http");
    message.set_file("src/server.rs");
    message.set_line(120);
    for i in 0..8 {
        message
            .set_additional(format!("field_{}", i), format!("value {}", i))
            .unwrap();
    }
    message
}

// ============================================================================
// Payload Benchmarks
// ============================================================================

fn bench_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload");
    group.throughput(Throughput::Elements(1));

    for version in [GelfVersion::V1_0, GelfVersion::V1_1] {
        let message = sample_message(version);
        group.bench_with_input(
            BenchmarkId::new("to_payload", version),
            &message,
            |b, message| b.iter(|| black_box(message.to_payload())),
        );
        group.bench_with_input(BenchmarkId::new("to_json", version), &message, |b, message| {
            b.iter(|| black_box(message.to_json().unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// Record Conversion Benchmarks
// ============================================================================

fn bench_create_message(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_message");
    group.throughput(Throughput::Elements(1));

    let factory = MessageFactory::new(Some("svc1".to_string()), "app", GelfVersion::V1_1);

    let text = LogRecord::new("user logged in", LogLevel::Info, "auth");
    group.bench_function("text", |b| {
        b.iter(|| black_box(factory.create_message(black_box(&text)).unwrap()))
    });

    let keyed = LogRecord::new(
        structured! {
            "short" => "login failed",
            "full" => "bad password",
            "user" => "alice",
            "attempt" => 3,
        },
        LogLevel::Warning,
        "auth",
    );
    group.bench_function("structured", |b| {
        b.iter(|| black_box(factory.create_message(black_box(&keyed)).unwrap()))
    });

    let fault = LogRecord::new(
        Fault::new(FaultKind::Exception, "DivideByZero", "division by zero")
            .with_trace("#0 src/math.rs(12): divide()")
            .at("src/math.rs", 12),
        LogLevel::Error,
        "math",
    );
    group.bench_function("fault", |b| {
        b.iter(|| black_box(factory.create_message(black_box(&fault)).unwrap()))
    });

    group.finish();
}

// ============================================================================
// Export Benchmarks
// ============================================================================

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");

    let target = GelfTarget::builder()
        .app_name("svc1")
        .transport(NullTransport)
        .build()
        .unwrap();

    for batch in [1usize, 100] {
        let records: Vec<LogRecord> = (0..batch)
            .map(|i| LogRecord::new(format!("event {}", i), LogLevel::Info, "bench"))
            .collect();
        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::new("batch", batch), &records, |b, records| {
            b.iter(|| black_box(target.export(records).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// Transport Encoding Benchmarks
// ============================================================================

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    let json = sample_message(GelfVersion::V1_1).to_json().unwrap().repeat(40);
    group.throughput(Throughput::Bytes(json.len() as u64));

    for compression in [Compression::None, Compression::Gzip, Compression::Zlib] {
        group.bench_with_input(
            BenchmarkId::new("compress", format!("{:?}", compression)),
            json.as_bytes(),
            |b, data| b.iter(|| black_box(compression.compress(data).unwrap())),
        );
    }

    group.bench_function("chunk_wan", |b| {
        b.iter(|| black_box(chunk_datagrams(json.as_bytes(), CHUNK_SIZE_WAN, [7; 8]).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_payload,
    bench_create_message,
    bench_export,
    bench_encoding
);
criterion_main!(benches);
