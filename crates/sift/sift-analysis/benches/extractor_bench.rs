//! Shape extraction and ranking benchmarks.
//!
//! Run with: cargo bench -p sift-analysis --bench extractor_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sift_analysis::recommend::{IndexSnapshot, Recommender};
use sift_analysis::shape::extract;
use sift_core::types::QueryLogEntry;

const STATEMENTS: &[(&str, &str)] = &[
    ("point", "SELECT * FROM users WHERE email = 'a@example.com'"),
    (
        "join",
        "SELECT o.id, u.name FROM orders o JOIN users u ON o.user_id = u.id
         WHERE o.status = 'open' AND u.country IN ('DE', 'FR') ORDER BY o.created_at DESC",
    ),
    (
        "subquery",
        "SELECT * FROM products p WHERE p.category = 'Books'
         AND p.id IN (SELECT product_id FROM order_items WHERE quantity > 3 GROUP BY product_id)",
    ),
    (
        "compound",
        "SELECT id FROM a WHERE x BETWEEN 1 AND 5 UNION ALL SELECT id FROM b WHERE y LIKE 'q%'",
    ),
];

fn shape_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    for (label, sql) in STATEMENTS {
        group.bench_with_input(BenchmarkId::new("shape", label), sql, |b, sql| {
            b.iter(|| black_box(extract(black_box(sql))));
        });
    }
    group.finish();
}

fn ranking_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    group.sample_size(20);

    let window: Vec<QueryLogEntry> = (0..1000)
        .map(|i| QueryLogEntry {
            id: i,
            query_text: STATEMENTS[i as usize % STATEMENTS.len()].1.to_string(),
            execution_time_secs: 0.001 * (i % 17) as f64,
            execution_plan: "2|0|0|SCAN t".to_string(),
            timestamp: 1_700_000_000 + i,
        })
        .collect();
    let recommender = Recommender::with_defaults();
    let snapshot = IndexSnapshot::from_pairs([("users", &["email"][..])]);

    group.bench_function("window_1000", |b| {
        b.iter(|| black_box(recommender.recommend(&window, &snapshot, 10)));
    });
    group.finish();
}

criterion_group!(benches, shape_extraction, ranking_window);
criterion_main!(benches);
