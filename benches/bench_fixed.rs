use criterion::{Criterion, criterion_group, criterion_main};
use fixed::types::I24F8;
use std::hint::black_box;

fn bench_addition(c: &mut Criterion) {
    c.bench_function("fixed_i24f8_addition", |b| {
        let x = I24F8::from_num(123.456);
        let y = I24F8::from_num(987.654);
        b.iter(|| black_box(black_box(x) + black_box(y)));
    });
}

fn bench_subtraction(c: &mut Criterion) {
    c.bench_function("fixed_i24f8_subtraction", |b| {
        let x = I24F8::from_num(987.654);
        let y = I24F8::from_num(123.456);
        b.iter(|| black_box(black_box(x) - black_box(y)));
    });
}

fn bench_multiplication(c: &mut Criterion) {
    c.bench_function("fixed_i24f8_multiplication", |b| {
        let x = I24F8::from_num(123.456);
        let y = I24F8::from_num(9.876);
        b.iter(|| black_box(black_box(x) * black_box(y)));
    });
}

fn bench_checked_multiplication(c: &mut Criterion) {
    c.bench_function("fixed_i24f8_checked_multiplication", |b| {
        let x = I24F8::from_num(123.456);
        let y = I24F8::from_num(9.876);
        b.iter(|| black_box(black_box(x).checked_mul(black_box(y)).unwrap()));
    });
}

fn bench_division(c: &mut Criterion) {
    c.bench_function("fixed_i24f8_division", |b| {
        let x = I24F8::from_num(123.456);
        let y = I24F8::from_num(9.876);
        b.iter(|| black_box(black_box(x).checked_div(black_box(y)).unwrap()));
    });
}

fn bench_float_round_trip(c: &mut Criterion) {
    c.bench_function("fixed_i24f8_float_round_trip", |b| {
        let f = 123.456_f32;
        b.iter(|| black_box(I24F8::from_num(black_box(f)).to_num::<f32>()));
    });
}

fn bench_floor_ceil(c: &mut Criterion) {
    c.bench_function("fixed_i24f8_floor_ceil", |b| {
        let d = I24F8::from_num(-123.456);
        b.iter(|| black_box((black_box(d).floor(), black_box(d).ceil())));
    });
}

criterion_group!(
    benches,
    bench_addition,
    bench_subtraction,
    bench_multiplication,
    bench_checked_multiplication,
    bench_division,
    bench_float_round_trip,
    bench_floor_ceil,
);

criterion_main!(benches);
