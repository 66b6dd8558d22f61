//! Benchmarks for bit vector rank/select directories.
//!
//! These benchmarks measure the cost of building `BitRank`/`BitSelect`
//! directories over bit vectors of various sizes, and of querying them once
//! built.
//!
//! ## Sizes
//!
//! Benchmarks run at multiple sizes to show scaling characteristics:
//! - 4Ki, 64Ki, 1Mi, 16Mi bits

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use succinctly_pred::bits::rank::BitRank;
use succinctly_pred::bits::select::BitSelect;
use succinctly_pred::bits::BitVec;

/// A bit vector with a fixed 1-bit density, deterministic across runs.
fn generate_bitvec(bits: usize, density_num: u64, density_den: u64) -> BitVec {
    let mut bv = BitVec::new(bits);
    let mut acc: u64 = 0;
    for i in 0..bits {
        acc = acc.wrapping_add(density_num);
        if acc >= density_den {
            acc -= density_den;
            bv.set(i, true);
        }
    }
    bv
}

fn bench_rank_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_rank_construction");
    for &bits in &[4 * 1024usize, 64 * 1024, 1024 * 1024, 16 * 1024 * 1024] {
        let bv = generate_bitvec(bits, 3, 7);
        group.throughput(Throughput::Elements(bits as u64));
        group.bench_with_input(BenchmarkId::from_parameter(bits), &bv, |b, bv| {
            b.iter(|| BitRank::new(black_box(bv)));
        });
    }
    group.finish();
}

fn bench_rank_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_rank_query");
    for &bits in &[4 * 1024usize, 64 * 1024, 1024 * 1024, 16 * 1024 * 1024] {
        let bv = generate_bitvec(bits, 3, 7);
        let rank = BitRank::new(&bv);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(bits), &rank, |b, rank| {
            let mut x = 0usize;
            b.iter(|| {
                x = (x + 104729) % bits.max(1);
                black_box(rank.rank1(black_box(x)))
            });
        });
    }
    group.finish();
}

fn bench_select_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_select1_query");
    for &bits in &[4 * 1024usize, 64 * 1024, 1024 * 1024, 16 * 1024 * 1024] {
        let bv = generate_bitvec(bits, 3, 7);
        let select = BitSelect::<true>::new(&bv);
        let count = select.count().max(1);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(bits), &select, |b, select| {
            let mut k = 0usize;
            b.iter(|| {
                k = (k % count) + 1;
                black_box(select.select(black_box(k)))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rank_construction, bench_rank_query, bench_select_query);
criterion_main!(benches);
