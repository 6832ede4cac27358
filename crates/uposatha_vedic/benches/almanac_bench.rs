use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use uposatha_vedic::{AlmanacOracle, GeoLocation, TithiOracle, elongation_deg, tithi_from_elongation};

fn primitives_bench(c: &mut Criterion) {
    let jd = 2_460_334.55;

    let mut group = c.benchmark_group("almanac_primitives");
    group.bench_function("elongation_deg", |b| b.iter(|| elongation_deg(black_box(jd))));
    group.bench_function("tithi_from_elongation", |b| {
        b.iter(|| tithi_from_elongation(black_box(211.75)))
    });
    group.finish();
}

fn oracle_bench(c: &mut Criterion) {
    let oracle = AlmanacOracle::default();
    let loc = GeoLocation::new(24.7914, 85.0002, 111.0);
    let date = NaiveDate::from_ymd_opt(2024, 1, 25).expect("valid date");

    let mut group = c.benchmark_group("almanac_oracle");
    group.bench_function("panchangam", |b| {
        b.iter(|| {
            oracle
                .panchangam(black_box(date), black_box(&loc))
                .expect("oracle should resolve")
        })
    });
    group.finish();
}

criterion_group!(benches, primitives_bench, oracle_bench);
criterion_main!(benches);
