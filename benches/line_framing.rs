//! Benchmarks for engine output line framing
//!
//! Measures demuxing throughput over a realistic stream of CR-terminated
//! status lines and LF-terminated property lines, fed in pipe-sized chunks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ps_engine::LineFramer;

/// Build a stream resembling engine output: a property burst followed by a
/// long run of rolling status lines.
fn sample_stream() -> Vec<u8> {
    let mut stream = Vec::new();
    for i in 0..64 {
        stream.extend_from_slice(format!("ID_PROP_{i}=value_{i}\n").as_bytes());
    }
    for i in 0..20_000 {
        let secs = i as f64 / 10.0;
        stream.extend_from_slice(
            format!("A: {secs:>7.1} V: {secs:>7.1} A-V:  0.000 ct:  0.042\r").as_bytes(),
        );
    }
    stream
}

fn bench_framing(c: &mut Criterion) {
    let stream = sample_stream();

    let mut group = c.benchmark_group("line_framing");
    group.throughput(Throughput::Bytes(stream.len() as u64));

    for chunk_size in [512usize, 4096, 65536] {
        group.bench_with_input(
            BenchmarkId::new("feed", chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut framer = LineFramer::new();
                    let mut lines = 0usize;
                    for chunk in stream.chunks(chunk_size) {
                        lines += framer.feed(black_box(chunk)).len();
                    }
                    framer.flush();
                    black_box(lines)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_framing);
criterion_main!(benches);
