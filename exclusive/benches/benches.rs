use criterion::{criterion_group, criterion_main, Criterion};
use exclusive::Exclusive;
use std::sync::RwLock;

fn borrow_uncontended(b: &mut Criterion) {
    b.bench_function("borrow_uncontended", |b| {
        let cell = Exclusive::new(0u64);

        b.iter(|| {
            let mut total = 0u64;

            for n in 0..1000u64 {
                *cell.borrow_mut() += n;
                total += *cell.borrow();
            }

            total
        });
    });
}

fn rwlock_uncontended(b: &mut Criterion) {
    b.bench_function("rwlock_uncontended", |b| {
        let lock = RwLock::new(0u64);

        b.iter(|| {
            let mut total = 0u64;

            for n in 0..1000u64 {
                *lock.write().unwrap() += n;
                total += *lock.read().unwrap();
            }

            total
        });
    });
}

fn acquire_pair(b: &mut Criterion) {
    b.bench_function("acquire_pair", |b| {
        let a = Exclusive::new(1000u64);
        let c = Exclusive::new(1000u64);

        b.iter(|| {
            for _ in 0..1000 {
                let (mut from, mut to) = exclusive::acquire_pair_mut(&a, &c).unwrap();
                *from = from.wrapping_sub(1);
                *to = to.wrapping_add(1);
            }
        });
    });
}

fn acquire_group_of_8(b: &mut Criterion) {
    b.bench_function("acquire_group_of_8", |b| {
        let cells = (0..8u64).map(Exclusive::new).collect::<Vec<_>>();
        let refs = cells.iter().rev().collect::<Vec<_>>();

        b.iter(|| {
            for _ in 0..1000 {
                let mut group = exclusive::acquire_all_mut(&refs).unwrap();

                for value in group.iter_mut() {
                    *value += 1;
                }
            }
        });
    });
}

criterion_group!(
    benches,
    borrow_uncontended,
    rwlock_uncontended,
    acquire_pair,
    acquire_group_of_8
);
criterion_main!(benches);
