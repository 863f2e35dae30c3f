use criterion::{black_box, criterion_group, criterion_main, Criterion};
use triage::engine::corpus;
use triage::{Classifier, EngineConfig, IntelEngine, TrainingConfig, VectorizerConfig};

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("Training");
    group.sample_size(20);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("category_classifier", |b| {
        b.iter(|| {
            Classifier::builder()
                .with_vectorizer_config(VectorizerConfig::report())
                .with_training_config(TrainingConfig::report())
                .add_examples(black_box(corpus::category_examples()))
                .unwrap()
                .build()
                .unwrap()
        })
    });

    group.bench_function("full_engine", |b| {
        b.iter(|| IntelEngine::new(EngineConfig::default()).unwrap())
    });

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let engine = IntelEngine::new(EngineConfig {
        reply_seed: Some(42),
        ..EngineConfig::default()
    })
    .unwrap();

    let mut group = c.benchmark_group("Prediction");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    // Short text (< 10 words)
    group.bench_function("report_short", |b| {
        b.iter(|| engine.classify_report(black_box("broken street light")))
    });

    // Long text, mostly out of vocabulary
    group.bench_function("report_long", |b| {
        b.iter(|| {
            engine.classify_report(black_box(
                "There has been a huge garbage heap near the market for over ten days, \
                 and now sewage is overflowing onto the sidewalk next to the water main. \
                 Residents are worried about contamination and nobody has responded.",
            ))
        })
    });

    group.bench_function("chat", |b| {
        b.iter(|| engine.respond_to_chat(black_box("i am extremely worried about my kids health")))
    });

    group.finish();
}

criterion_group!(benches, bench_training, bench_prediction);
criterion_main!(benches);
