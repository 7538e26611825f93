use std::io::{stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Minimal wall-clock benchmark: a named closure run a fixed number of
/// times. Used by the `benches/` targets (harness = false).
#[derive(Clone)]
pub struct Benchmark {
    f: Rc<dyn Fn()>,
    name: String,
    iterations: usize,
}

impl Benchmark {
    pub fn iter<F: Fn() + 'static>(name: &str, n: usize, f: F) -> Self {
        Self {
            f: Rc::new(f),
            name: name.to_string(),
            iterations: n,
        }
    }

    fn run(&self) -> Duration {
        let start = Instant::now();
        for _ in 0..self.iterations {
            (self.f)();
        }
        start.elapsed()
    }
}

pub struct BenchmarkReport {
    benches: Vec<Benchmark>,
    results: Vec<(String, usize, Duration)>,
}

impl BenchmarkReport {
    pub fn with_benches(benches: &[Benchmark]) -> Self {
        Self {
            benches: benches.to_vec(),
            results: vec![],
        }
    }

    pub fn run(&mut self) {
        for bench in &self.benches {
            let t = bench.run();
            self.results
                .push((bench.name.to_string(), bench.iterations, t));
            print!(".");
            stdout().flush().unwrap();
        }
        println!();
    }

    pub fn show(&self) {
        println!("  {: <30} {: >10}   {: >10}", "benchmark", "total", "per_call");
        for (name, iterations, t) in &self.results {
            let per_call = t.div_f64(*iterations as f64);
            println!(
                "  {: <30} {: >8}ms   {: >8}ms",
                name,
                t.as_millis(),
                per_call.as_millis(),
            );
        }
    }

    pub fn report(&mut self, name: &str) {
        print!("Benchmark: {}", name);
        self.run();
        self.show();
    }
}
