#[macro_use]
extern crate criterion;

use criterion::Criterion;
use mandelbrot::{escape_count, generate_image, generate_image_threaded, Grid, Region};
use num::Complex;

fn region() -> Region {
    Region::new(-2.0, 1.0, -1.5, 1.5)
}

fn kernel(c: &mut Criterion) {
    c.bench_function("escape_count inside the set", |b| {
        b.iter(|| escape_count(Complex::new(-0.1, 0.1)))
    });
}

fn single(c: &mut Criterion) {
    c.bench_function("generate 200x200 grayscale", |b| {
        b.iter(|| generate_image(region(), Grid::new(200, 200, 1)))
    });
    c.bench_function("generate 200x200 color", |b| {
        b.iter(|| generate_image(region(), Grid::new(200, 200, 3)))
    });
}

fn threaded(c: &mut Criterion) {
    let threads = num_cpus::get();
    c.bench_function("generate 200x200 color, all cores", move |b| {
        b.iter(|| generate_image_threaded(region(), Grid::new(200, 200, 3), threads))
    });
}

criterion_group!(benches, kernel, single, threaded);
criterion_main!(benches);
