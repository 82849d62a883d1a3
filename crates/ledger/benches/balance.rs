use chrono::Utc;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use stockbook_core::{LocationId, MovementId, ProductId};
use stockbook_ledger::{BalanceTable, Movement};

fn ledger_fixture(n: usize) -> (Vec<ProductId>, Vec<LocationId>, Vec<Movement>) {
    let products: Vec<ProductId> = (0..8).map(|i| ProductId::new(format!("P-{i}"))).collect();
    let locations: Vec<LocationId> = (0..5).map(|i| LocationId::new(format!("L-{i}"))).collect();

    let movements = (0..n)
        .map(|i| {
            let product = products[i % products.len()].clone();
            let from = (i % 3 != 0).then(|| locations[i % locations.len()].clone());
            let to = (i % 3 != 1).then(|| locations[(i + 2) % locations.len()].clone());
            Movement::from_parts(
                MovementId::new(format!("M-{i}")),
                Utc::now(),
                product,
                from,
                to,
                (i as i64 % 10) + 1,
            )
            .unwrap()
        })
        .collect();

    (products, locations, movements)
}

fn bench_balance_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("balance_fold");

    for n in [200usize, 2_000, 20_000] {
        let (products, locations, movements) = ledger_fixture(n);
        group.bench_function(format!("compute_{n}_movements"), |b| {
            b.iter_batched(
                || (),
                |_| BalanceTable::compute(&products, &locations, &movements),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_balance_fold);
criterion_main!(benches);
