use criterion::{criterion_group, criterion_main, Criterion};

use duskmere::config::{VIEW_HALF_COLS, VIEW_HALF_ROWS};
use duskmere::world::ShadeMatrix;

fn shade_matrix_build(c: &mut Criterion) {
    c.bench_function("shade_matrix_build", |b| {
        b.iter(|| ShadeMatrix::new(VIEW_HALF_COLS, VIEW_HALF_ROWS).unwrap());
    });
}

criterion_group!(benches, shade_matrix_build);
criterion_main!(benches);
