//! Lexer throughput benchmark.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pixc_lex::Lexer;

const SAMPLE: &str = r#"
fun race_to(limit: int) -> int {
    let step: int = 0;
    while (step < limit) {
        step = step + 1;
        __write step, step, #00ff00;
        __delay 10;
    }
    return step;
}

let edge: int = __width - 1;
__print race_to(edge);
"#;

fn bench_tokenize(c: &mut Criterion) {
    let mut source = String::new();
    for _ in 0..64 {
        source.push_str(SAMPLE);
    }

    c.bench_function("tokenize", |b| {
        b.iter(|| Lexer::new(black_box(&source)).tokenize().unwrap())
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
