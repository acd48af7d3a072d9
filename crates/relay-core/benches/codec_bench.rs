//! Criterion benchmarks for the Gesture-Relay frame codec and line encoder.
//!
//! Run with:
//! ```bash
//! cargo bench --package relay-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use relay_core::{encode_command, Action, EventFrame, KeyMapping, KeyState};

fn make_frame() -> EventFrame {
    EventFrame {
        session_id: "player-42".to_string(),
        state: KeyState::Pressed,
        action: Action::Left,
    }
}

/// Benchmarks encoding a single press frame.
fn bench_frame_encode(c: &mut Criterion) {
    let frame = make_frame();
    c.bench_function("frame_encode", |b| {
        b.iter(|| black_box(&frame).encode().expect("encode must succeed"))
    });
}

/// Benchmarks decoding a single pre-encoded frame.
fn bench_frame_decode(c: &mut Criterion) {
    let bytes = make_frame().encode().expect("encode must succeed");
    c.bench_function("frame_decode", |b| {
        b.iter(|| EventFrame::decode(black_box(&bytes)).expect("decode must succeed"))
    });
}

/// Benchmarks whole-line command encoding at a few realistic line lengths.
fn bench_encode_command(c: &mut Criterion) {
    let mapping = KeyMapping::default();
    let mut group = c.benchmark_group("encode_command");
    for len in [1usize, 8, 64] {
        let line: String = "hjkl ".chars().cycle().take(len).collect();
        group.bench_with_input(BenchmarkId::new("chars", len), &line, |b, line| {
            b.iter(|| {
                encode_command(black_box("42"), black_box(line), black_box(&mapping))
                    .expect("encode must succeed")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frame_encode, bench_frame_decode, bench_encode_command);
criterion_main!(benches);
