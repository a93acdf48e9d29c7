use criterion::{Criterion, criterion_group, criterion_main};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use soa_fixed::{SoaArray, WithRef};
use std::hint::black_box;

const ROWS: usize = 1 << 12;

struct Rng(StdRng);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    fn next_f32(&mut self) -> f32 {
        (self.0.next_u32() >> 8) as f32 / (1 << 24) as f32
    }
}

#[derive(SoaArray, Debug, Clone, Copy, PartialEq)]
struct Vec4 {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
    #[soa(scalar)]
    scale: f32,
}

impl Vec4 {
    fn new_rng(rng: &mut Rng) -> Self {
        Self {
            x: rng.next_f32(),
            y: rng.next_f32(),
            z: rng.next_f32(),
            w: rng.next_f32(),
            scale: 1.0,
        }
    }

    fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
}

impl<const N: usize, const A: usize> Vec4Ref<'_, N, A>
where
    soa_fixed::Align<A>: soa_fixed::Alignment,
{
    fn dot<const M: usize, const B: usize>(&self, other: &Vec4Ref<'_, M, B>) -> f32
    where
        soa_fixed::Align<B>: soa_fixed::Alignment,
    {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z() + self.w() * other.w()
    }
}

fn column_dot<const A: usize>(a: &Vec4Array<ROWS, A>, b: &Vec4Array<ROWS, A>) -> f32
where
    soa_fixed::Align<A>: soa_fixed::Alignment,
{
    let mut acc = [0.0; ROWS];
    for (lhs, rhs) in [
        (a.x(), b.x()),
        (a.y(), b.y()),
        (a.z(), b.z()),
        (a.w(), b.w()),
    ] {
        for ((out, l), r) in acc.iter_mut().zip(lhs).zip(rhs) {
            *out += l * r;
        }
    }
    acc.into_iter().sum()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = Rng::new(42);

    let soa1 = Box::new(Vec4Array::<ROWS, 64>::from_fn(|_| Vec4::new_rng(&mut rng)));
    let soa2 = Box::new(Vec4Array::<ROWS, 64>::from_fn(|_| Vec4::new_rng(&mut rng)));

    c.bench_function("soa-rows", |b| {
        b.iter(|| {
            black_box(&soa1)
                .iter()
                .zip(black_box(&soa2).iter())
                .map(|(a, b)| a.dot(&b))
                .sum::<f32>()
        })
    });

    c.bench_function("soa-with-ref", |b| {
        b.iter(|| {
            black_box(&soa1)
                .iter()
                .zip(black_box(&soa2).iter())
                .map(|(a, b)| a.with_ref(|a| b.with_ref(|b| a.dot(b))))
                .sum::<f32>()
        })
    });

    c.bench_function("soa-columns", |b| {
        b.iter(|| column_dot(black_box(&soa1), black_box(&soa2)))
    });

    let vec1: Vec<_> = (0..ROWS).map(|_| Vec4::new_rng(&mut rng)).collect();
    let vec2: Vec<_> = (0..ROWS).map(|_| Vec4::new_rng(&mut rng)).collect();
    c.bench_function("vec", |b| {
        b.iter(|| {
            black_box(&vec1)
                .iter()
                .zip(black_box(&vec2).iter())
                .map(|(a, b)| a.dot(b))
                .sum::<f32>()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
