//! Throughput benchmarks for incremental classifiers
//!
//! Run with: cargo bench -p labelgate-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use labelgate_classifiers::{Classifier, ComplementNB};
use labelgate_core::{bag_of_words, Features};

fn corpus(vocabulary: usize, docs: usize) -> Vec<(Features, String)> {
    (0..docs)
        .map(|i| {
            let text: Vec<String> = (0..12)
                .map(|j| format!("w{}", (i * 7 + j * 13) % vocabulary))
                .collect();
            let label = if i % 3 == 0 { "spam" } else { "ham" };
            (bag_of_words(&text.join(" ")), label.to_string())
        })
        .collect()
}

/// Benchmark single-example updates
fn benchmark_learn_one(c: &mut Criterion) {
    let docs = corpus(500, 1_000);

    let mut group = c.benchmark_group("ComplementNB_learn_one");
    group.sample_size(50);

    group.bench_function("stream_1000_docs", |b| {
        b.iter(|| {
            let mut model = ComplementNB::new();
            for (x, y) in &docs {
                model.learn_one(black_box(x), y).unwrap();
            }
            model
        });
    });

    group.finish();
}

/// Benchmark posterior computation against a growing vocabulary
fn benchmark_predict_proba_one(c: &mut Criterion) {
    let mut group = c.benchmark_group("ComplementNB_predict_proba_one");
    group.sample_size(100);

    for vocabulary in [100usize, 1_000, 10_000] {
        let mut model = ComplementNB::new();
        for (x, y) in corpus(vocabulary, 2_000) {
            model.learn_one(&x, &y).unwrap();
        }
        let query = bag_of_words("w1 w2 w3 w5 w8 w13 unseen");

        group.bench_with_input(
            BenchmarkId::new("vocabulary", vocabulary),
            &query,
            |b, query| {
                b.iter(|| model.predict_proba_one(black_box(query)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_learn_one, benchmark_predict_proba_one);
criterion_main!(benches);
