use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hemovita::{Hemovita, ReportRequest};
use indexmap::IndexMap;

fn panel(rows: &[(&str, f64)]) -> ReportRequest {
    let labs: IndexMap<String, f64> = rows.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    ReportRequest {
        labs,
        ..Default::default()
    }
}

fn bench_report_generation(c: &mut Criterion) {
    let engine = Hemovita::new();

    let small = panel(&[("Hemoglobin", 11.4), ("ferritin", 12.0)]);
    c.bench_function("report_small_panel", |b| {
        b.iter(|| engine.report(black_box(&small)))
    });

    let full = panel(&[
        ("Hemoglobin", 11.4),
        ("MCV", 75.0),
        ("ferritin", 12.0),
        ("vitamin_B12", 150.0),
        ("folate_plasma", 6.0),
        ("vitamin_D", 18.0),
        ("vitamin_A", 0.4),
        ("vitamin_E", 8.0),
        ("vitamin_C", 10.0),
        ("vitamin_B6", 12.0),
        ("magnesium", 0.5),
        ("calcium", 1.8),
        ("zinc", 40.0),
        ("homocysteine", 22.0),
    ]);
    c.bench_function("report_full_deficient_panel", |b| {
        b.iter(|| engine.report(black_box(&full)))
    });
}

fn bench_classification(c: &mut Criterion) {
    use hemovita::{MarkerClassifier, ReferenceRangeTable};

    let classifier = MarkerClassifier::new();
    let reference = ReferenceRangeTable::builtin();
    let labs: IndexMap<String, f64> = [("Hemoglobin", 11.4), ("ferritin", 12.0), ("zinc", 40.0)]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();

    c.bench_function("classify_panel", |b| {
        b.iter(|| classifier.classify_panel(black_box(&reference), black_box(&labs)))
    });
}

criterion_group!(benches, bench_report_generation, bench_classification);
criterion_main!(benches);
