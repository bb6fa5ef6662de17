//! Benchmarks for tax-id validation and the import pipeline.

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use contaflow_core::TenantId;
use contaflow_import::{ImportConfig, ImportRecord, Reconciler};
use contaflow_infra::InMemoryClientStore;
use contaflow_taxid::{format, is_valid};

fn bench_rut_validation(c: &mut Criterion) {
    c.bench_function("rut_is_valid_formatted", |b| {
        b.iter(|| is_valid(black_box("12.345.678-5")))
    });

    c.bench_function("rut_is_valid_plain", |b| {
        b.iter(|| is_valid(black_box("123456785")))
    });

    c.bench_function("rut_format", |b| b.iter(|| format(black_box("123456785"))));
}

fn bench_reconcile_batch(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime");

    // 1000 distinct valid rows; check digits derived by trying each candidate.
    let rows: Vec<ImportRecord> = (0..1000u32)
        .map(|i| {
            let body = 10_000_000 + i;
            let rut = ('0'..='9')
                .chain(['k'])
                .map(|ch| std::format!("{body}{ch}"))
                .find(|candidate| is_valid(candidate))
                .expect("one candidate check char is always valid");
            ImportRecord {
                row_number: (i as usize) + 2,
                tax_id: Some(rut),
                legal_name: Some(std::format!("Empresa {i}")),
                ..ImportRecord::default()
            }
        })
        .collect();

    c.bench_function("reconcile_1000_rows", |b| {
        b.iter(|| {
            let store = Arc::new(InMemoryClientStore::new());
            let reconciler = Reconciler::new(store);
            let report = rt.block_on(reconciler.reconcile(
                TenantId::new(),
                black_box(&rows),
                &ImportConfig::default(),
            ));
            black_box(report.success_count())
        })
    });
}

criterion_group!(benches, bench_rut_validation, bench_reconcile_batch);
criterion_main!(benches);
