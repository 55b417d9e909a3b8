//! Latency benchmarks for the lexicon classifier
//!
//! Run with: cargo bench -p tonecheck-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

use tonecheck_classifiers::{Classifier, LexiconClassifier};

fn benchmark_lexicon_classifier(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let classifier = LexiconClassifier::new().expect("Failed to create lexicon classifier");

    let test_cases = vec![
        ("short_neutral", "I'm okay."),
        ("short_positive", "This is an exciting opportunity."),
        ("short_negative", "The company reported a quarterly loss."),
        (
            "medium_mixed",
            "Revenue growth was strong this quarter, although margins saw a slight decline \
             and management warned of a possible downturn next year.",
        ),
    ];

    let mut group = c.benchmark_group("Lexicon_Classifier");
    group.sample_size(100);

    for (name, text) in test_cases {
        group.bench_with_input(BenchmarkId::new("classify", name), &text, |b, text| {
            b.iter(|| rt.block_on(async { classifier.classify(black_box(text)).await.unwrap() }));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_lexicon_classifier);
criterion_main!(benches);
