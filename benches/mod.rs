use criterion::{criterion_group, criterion_main};


use order_book::register_benchmarks as register_order_book_benchmarks;
use pipeline::register_benchmarks as register_pipeline_benchmarks;
use ring::register_benchmarks as register_ring_benchmarks;

// Define the benchmark groups
criterion_group!(
    benches,
    register_ring_benchmarks,
    register_order_book_benchmarks,
    register_pipeline_benchmarks,
);

criterion_main!(benches);
