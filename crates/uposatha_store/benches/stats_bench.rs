use chrono::{DateTime, Days, NaiveDate};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use uposatha_search::ALL_MOON_PHASES;
use uposatha_store::{ObservanceRecord, SkipReason, compute_stats};

fn history(len: u64) -> Vec<ObservanceRecord> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
    let ts = DateTime::from_timestamp(0, 0).expect("valid timestamp");
    (0..len)
        .map(|i| {
            let date = start + Days::new(i * 5);
            let phase = ALL_MOON_PHASES[(i % 4) as usize];
            if i % 7 == 0 {
                ObservanceRecord::skipped(date, phase, SkipReason::Work, ts)
            } else {
                ObservanceRecord::observed(date, phase, ts)
            }
        })
        .collect()
}

fn stats_bench(c: &mut Criterion) {
    let records = history(500);

    let mut group = c.benchmark_group("observance_stats");
    group.bench_function("compute_stats_500", |b| {
        b.iter(|| compute_stats(black_box(&records)))
    });
    group.finish();
}

criterion_group!(benches, stats_bench);
criterion_main!(benches);
