use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stockroom_infra::inventory_store::{InMemoryInventoryStore, InventoryStore};
use stockroom_inventory::{InventoryFilter, NewInventory};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to build tokio runtime")
}

fn seeded_store(rt: &tokio::runtime::Runtime, rows: usize) -> InMemoryInventoryStore {
    let store = InMemoryInventoryStore::new();
    let items = (0..rows)
        .map(|i| NewInventory {
            product_name: Some(format!("Product {} {}", i, if i % 3 == 0 { "Widget" } else { "Gadget" })),
            available_qty: Some(i as f64),
            ..NewInventory::with_sku(format!("SKU-{}", i % 50))
        })
        .collect();
    rt.block_on(store.insert_many(items)).unwrap();
    store
}

fn bench_filtered_list(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("inventory_list");

    for rows in [100usize, 1_000, 10_000] {
        let store = seeded_store(&rt, rows);
        group.throughput(Throughput::Elements(rows as u64));

        let all = InventoryFilter::All;
        group.bench_with_input(BenchmarkId::new("all", rows), &rows, |b, _| {
            b.iter(|| rt.block_on(store.list(black_box(&all))).unwrap());
        });

        let by_sku = InventoryFilter::Sku("SKU-7".to_string());
        group.bench_with_input(BenchmarkId::new("sku", rows), &rows, |b, _| {
            b.iter(|| rt.block_on(store.list(black_box(&by_sku))).unwrap());
        });

        let by_name = InventoryFilter::ProductNameContains("widget".to_string());
        group.bench_with_input(BenchmarkId::new("product_name", rows), &rows, |b, _| {
            b.iter(|| rt.block_on(store.list(black_box(&by_name))).unwrap());
        });
    }

    group.finish();
}

fn bench_batch_insert(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("inventory_batch_insert");

    for size in [10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let store = InMemoryInventoryStore::new();
            b.iter(|| {
                let items = (0..size)
                    .map(|i| NewInventory::with_sku(format!("SKU-{i}")))
                    .collect();
                rt.block_on(store.insert_many(black_box(items))).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filtered_list, bench_batch_insert);
criterion_main!(benches);
