// Criterion benchmarks for the AT&T reader.
//
// The inputs are generated in memory so no fixture files are needed.
//
// Run:
//   cargo bench -p tinyfst

use criterion::{Criterion, criterion_group, criterion_main};

use tinyfst::{ParseConfig, parse_att_str, parse_att_with};

// ---------------------------------------------------------------------------
// Input generation
// ---------------------------------------------------------------------------

/// A chain of `states` states with `fanout` arcs each, drawing labels from an
/// alphabet of `alphabet` symbols. Every tenth state is final.
fn generate_att(states: u32, fanout: u32, alphabet: u32) -> String {
    let mut text = String::new();
    for s in 0..states {
        for k in 0..fanout {
            let target = (s + 1 + k) % states;
            let input = (s * 7 + k) % alphabet;
            let output = (s * 13 + k) % alphabet;
            text.push_str(&format!("{s}\t{target}\tl{input}\tl{output}\t0.{k}\n"));
        }
        if s % 10 == 0 {
            text.push_str(&format!("{s}\t1.5\n"));
        }
    }
    text
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// 10k states, 4 arcs each, small alphabet: dominated by line handling.
fn bench_parse_small_alphabet(c: &mut Criterion) {
    let text = generate_att(10_000, 4, 64);
    c.bench_function("parse_40k_arcs_64_symbols", |b| {
        b.iter(|| std::hint::black_box(parse_att_str(&text).unwrap()));
    });
}

/// Large alphabet: stresses symbol interning.
fn bench_parse_large_alphabet(c: &mut Criterion) {
    let text = generate_att(10_000, 4, 20_000);
    c.bench_function("parse_40k_arcs_20k_symbols", |b| {
        b.iter(|| std::hint::black_box(parse_att_str(&text).unwrap()));
    });
}

/// Same input with tiny reserves, so the arrays grow from one element.
fn bench_parse_from_minimal_reserve(c: &mut Criterion) {
    let text = generate_att(10_000, 4, 64);
    let config = ParseConfig::new().reserve(1);
    c.bench_function("parse_40k_arcs_reserve_1", |b| {
        b.iter(|| std::hint::black_box(parse_att_with(text.as_bytes(), &config).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_parse_small_alphabet,
    bench_parse_large_alphabet,
    bench_parse_from_minimal_reserve,
);
criterion_main!(benches);
