use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use gridcipher::bits::bytes_to_bits;
use gridcipher::grid::render_grid;
use gridcipher::infer::infer_tile_size;
use gridcipher::layout::GridLayout;
use gridcipher::{Codec, CodecConfig};

fn bench_codec(c: &mut Criterion) {
    let payload: Vec<u8> = (0..=255u8).cycle().take(512).collect();
    let bits = bytes_to_bits(&payload);
    let layout = GridLayout::plan(bits.len(), 400).unwrap();
    let image = render_grid(&layout, &bits);

    c.bench_function("render_grid_4096_bits", |b| {
        b.iter(|| render_grid(black_box(&layout), black_box(&bits)))
    });

    c.bench_function("infer_tile_size_full_scan", |b| {
        b.iter(|| infer_tile_size(black_box(&image), None))
    });

    c.bench_function("infer_tile_size_5_rows", |b| {
        b.iter(|| infer_tile_size(black_box(&image), Some(5)))
    });

    let codec = Codec::with_passphrase("bench", CodecConfig::default());
    let message = "The quick brown fox jumps over the lazy dog.";
    let encoded = codec.encode(message).unwrap();

    c.bench_function("encode_message", |b| {
        b.iter(|| codec.encode(black_box(message)).unwrap())
    });

    c.bench_function("decode_message", |b| {
        b.iter(|| codec.decode(black_box(&encoded.image)).unwrap())
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
