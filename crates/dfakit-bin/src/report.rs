use std::time::{Duration, Instant};

use dfakit::{Dfa, DfaError, Operation};

/// Total time spent deciding every input, before and after minimization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptanceTiming {
    pub before: Duration,
    pub after: Duration,
}

impl AcceptanceTiming {
    // None when the runs were too fast for the clock to measure
    pub fn percent_change(&self) -> Option<f64> {
        let before = self.before.as_secs_f64();
        if before == 0.0 {
            return None;
        }
        Some((self.after.as_secs_f64() - before) / before * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinimizationReport {
    pub operation: Operation,
    pub states_before: usize,
    pub states_after: usize,
    pub timing: Option<AcceptanceTiming>,
}

impl MinimizationReport {
    // negative when minimization removed states
    pub fn percent_change(&self) -> f64 {
        (self.states_after as f64 - self.states_before as f64) / self.states_before as f64 * 100.0
    }
}

/// Wall-clock time for `rounds` passes of `dfa.accepts` over `inputs`.
pub fn time_acceptance(dfa: &Dfa, inputs: &[String], rounds: usize) -> Duration {
    let start = Instant::now();
    for _ in 0..rounds {
        for input in inputs {
            std::hint::black_box(dfa.accepts(std::hint::black_box(input)));
        }
    }
    start.elapsed()
}

/// Builds the union and intersection of `a` and `b` and measures how much
/// minimization shrinks each. When `inputs` is non-empty, acceptance over
/// them is also timed on both automata, `rounds` times over.
pub fn compare_minimization(
    a: &Dfa,
    b: &Dfa,
    inputs: &[String],
    rounds: usize,
) -> Result<Vec<MinimizationReport>, DfaError> {
    [Operation::Union, Operation::Intersection]
        .into_iter()
        .map(|operation| {
            let product = Dfa::product(a, b, operation)?;
            let minimized = Dfa::minimize(&product);
            let timing = (!inputs.is_empty()).then(|| AcceptanceTiming {
                before: time_acceptance(&product, inputs, rounds),
                after: time_acceptance(&minimized, inputs, rounds),
            });
            Ok(MinimizationReport {
                operation,
                states_before: product.num_states(),
                states_after: minimized.num_states(),
                timing,
            })
        })
        .collect()
}
