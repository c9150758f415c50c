use criterion::{black_box, criterion_group, criterion_main, Criterion};
use safe_bite::{aggregate, classify, SearchCandidate};

const SNIPPETS: &[&str] = &[
    "Yes, bananas are a good source of potassium and perfectly safe during pregnancy.",
    "Avoid raw fish such as sushi during pregnancy due to listeria risk.",
    "Limit caffeine to 200mg a day and ask your doctor if unsure.",
    "Foods to avoid when pregnant - a complete list from the NHS.",
    "Dates are said to shorten labor for some women.",
    "Kimchi is a traditional fermented side dish made from salted vegetables.",
    "Pasteurized soft cheese is fine, but avoid unpasteurized brie.",
];

fn candidates() -> Vec<SearchCandidate> {
    SNIPPETS
        .iter()
        .enumerate()
        .map(|(i, snippet)| SearchCandidate::new(format!("Result {}", i), *snippet, format!("https://example.com/{}", i)))
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_snippets", |b| {
        b.iter(|| {
            for snippet in SNIPPETS {
                black_box(classify(black_box(snippet), black_box("sushi")));
            }
        })
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let hits = candidates();
    c.bench_function("aggregate_page", |b| {
        b.iter(|| black_box(aggregate(black_box(&hits), black_box("sushi"))))
    });
}

criterion_group!(benches, bench_classify, bench_aggregate);
criterion_main!(benches);
