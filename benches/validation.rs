use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use allowlist_builder::ValidationConfig;
use allowlist_builder::emit::render_document;
use allowlist_builder::pipeline::Pipeline;
use allowlist_builder::processing::{ValidationEngine, classify, normalize_rows, promote};
use allowlist_builder::types::{RawRow, RawTable};

fn synthetic_table(rows: usize) -> RawTable {
    let rows = (0..rows)
        .map(|i| {
            if i % 2 == 0 {
                RawRow::new(i + 2, "creditorAccount", format!("12-3456-{i:07}-00"), "5000", "")
            } else {
                let nzbn = format!("{:013}", 9_429_000_000_000u64 + i as u64);
                RawRow::new(i + 2, "fourthParty", nzbn, "250.5", "bench")
            }
        })
        .collect();
    RawTable::new(rows)
}

fn bench_validation(c: &mut Criterion) {
    let table = synthetic_table(10_000);
    let config = ValidationConfig::default()
        .with_require_numeric_limit(true)
        .with_max_creditor_limit(Some(10_000.0))
        .with_max_fourth_party_limit(Some(1_000.0));

    c.bench_function("validate_10k_rows", |b| {
        let rows = normalize_rows(&table);
        let engine = ValidationEngine::new(config);
        b.iter(|| {
            let classified = classify(&rows);
            black_box(engine.validate(&rows, &classified))
        })
    });

    c.bench_function("render_10k_rows", |b| {
        let rows = normalize_rows(&table);
        b.iter_batched(
            || promote(&classify(&rows)),
            |records| black_box(render_document(&records)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("pipeline_10k_rows", |b| {
        let pipeline = Pipeline::new(config);
        b.iter(|| black_box(pipeline.run(&table)))
    });
}

criterion_group!(benches, bench_validation);
criterion_main!(benches);
