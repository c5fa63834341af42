use criterion::{black_box, criterion_group, criterion_main, Criterion};
use whoop_journal::services::SignatureVerifier;

fn benchmark_verify(c: &mut Criterion) {
    let verifier = SignatureVerifier::new("bench-client-secret".to_string());

    let timestamp = "1709360000000";
    let body = br#"{"user_id":10129,"id":93845,"type":"recovery.updated","trace_id":"d27b121c"}"#;

    // A correctly sized but wrong signature (the common hostile case)
    let bad_signature = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

    let mut group = c.benchmark_group("webhook_signature");

    group.bench_function("verify_mismatch", |b| {
        b.iter(|| {
            verifier.verify(
                black_box(bad_signature),
                black_box(timestamp),
                black_box(body),
            )
        })
    });

    // Larger payloads dominate the HMAC cost
    let large_body = vec![b'x'; 64 * 1024];
    group.bench_function("verify_mismatch_64k", |b| {
        b.iter(|| {
            verifier.verify(
                black_box(bad_signature),
                black_box(timestamp),
                black_box(&large_body),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_verify);
criterion_main!(benches);
