use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wordwise_rs::quiz::{
    DistractorSource, RelationFilter, generate_meaning_quiz, generate_syn_ant_up_to,
    relation_candidates, sample_distractors,
};
use wordwise_rs::{VocabularyEntry, Window, WordRepository, sample_vocabulary, select_window};

/// Synthetic list large enough to make sampling costs visible.
fn synthetic_vocabulary(size: usize) -> Vec<VocabularyEntry> {
    (0..size)
        .map(|i| {
            VocabularyEntry::new(format!("word{i}"), format!("meaning number {i}"))
                .with_synonyms([format!("syn{i}a"), format!("syn{i}b"), format!("syn{i}c")])
                .with_antonyms([format!("ant{i}a")])
        })
        .collect()
}

fn bench_distractors(c: &mut Criterion) {
    for &size in &[100usize, 1_000, 5_000] {
        let pool = synthetic_vocabulary(size);
        let correct = vec!["syn0a".to_string()];
        c.bench_with_input(BenchmarkId::new("sample_distractors", size), &pool, |b, pool| {
            let mut rng = SmallRng::seed_from_u64(1);
            b.iter(|| {
                let picked = sample_distractors(
                    pool,
                    DistractorSource::Relations,
                    &["word0"],
                    &correct,
                    3,
                    &mut rng,
                );
                black_box(picked.len());
            });
        });
    }
}

fn bench_quizzes(c: &mut Criterion) {
    let pool = synthetic_vocabulary(1_000);
    c.bench_function("meaning_quiz::1000_words", |b| {
        let mut rng = SmallRng::seed_from_u64(2);
        b.iter(|| black_box(generate_meaning_quiz(&pool, 10, &mut rng).len()));
    });

    let candidates = relation_candidates(&pool, RelationFilter::Both);
    c.bench_function("syn_ant_quiz::1000_words", |b| {
        let mut rng = SmallRng::seed_from_u64(3);
        b.iter(|| {
            let questions =
                generate_syn_ant_up_to(&candidates, &pool, RelationFilter::Both, 10, &mut rng);
            black_box(questions.len());
        });
    });
}

fn bench_lookup(c: &mut Criterion) {
    let repository = WordRepository::new(synthetic_vocabulary(5_000));
    c.bench_function("select_window::range", |b| {
        b.iter(|| black_box(select_window(repository.entries(), Window::range(11, 20)).len()));
    });
    c.bench_function("search_contains::5000_words", |b| {
        b.iter(|| black_box(repository.search_contains("number 42").len()));
    });

    let sample = WordRepository::new(sample_vocabulary());
    c.bench_function("search_fuzzy::sample", |b| {
        let config = Default::default();
        b.iter(|| black_box(sample.search_fuzzy("hapy", &config, 5).len()));
    });
}

criterion_group!(benches, bench_distractors, bench_quizzes, bench_lookup);
criterion_main!(benches);
