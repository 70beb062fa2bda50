use criterion::{black_box, criterion_group, criterion_main, Criterion};
use monkey_interp::{
    interpreter::{eval, Environment},
    new_interpreter, parse,
};

const INPUT: &str = r#"
let fibonacci = fn(x) {
  if (x == 0) {
    0
  } else {
    if (x == 1) {
      return 1;
    } else {
      fibonacci(x - 1) + fibonacci(x - 2);
    }
  }
};

fibonacci(20);
"#;

fn fib_benchmark(c: &mut Criterion) {
    c.bench_function("interpreter", |b| {
        b.iter(|| {
            let mut engine = new_interpreter();
            engine.run(black_box(INPUT)).unwrap();
        })
    });

    let program = parse(INPUT).unwrap();
    c.bench_function("eval_only", |b| {
        b.iter(|| eval(black_box(&program), &Environment::new()))
    });
}

criterion_group!(benches, fib_benchmark);
criterion_main!(benches);
