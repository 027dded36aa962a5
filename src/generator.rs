//! Random 3-SAT generator, used by the CLI when no input file is given.
//!
//! Draws `num_vars` variables and `round(ratio * num_vars)` clauses, each a
//! uniformly random choice of 3 distinct variables with uniformly random
//! polarities, rejecting duplicate-variable and tautological clauses so every
//! generated clause is well-formed. Seeded with `rand::SeedableRng` so the
//! same seed reproduces the same instance.

use dimacs::{Clause, Instance, Lit};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::formula::CnfFormula;

/// The ratio commonly cited as the hardest region for random 3-SAT.
pub const HARD_CLAUSE_TO_VARIABLE_RATIO: f64 = 4.26;

pub fn generate(num_vars: usize, ratio: f64, seed: u64) -> CnfFormula {
    let instance = generate_instance(num_vars, ratio, seed);
    CnfFormula::from_instance(instance).expect("generated instance is always well-formed")
}

fn generate_instance(num_vars: usize, ratio: f64, seed: u64) -> Instance {
    let mut rng = SmallRng::seed_from_u64(seed);
    let num_clauses = (ratio * num_vars as f64).round() as usize;

    let clauses = (0..num_clauses)
        .map(|_| random_clause(num_vars, &mut rng))
        .collect();

    Instance::Cnf {
        num_vars: num_vars as u64,
        clauses,
    }
}

fn random_clause(num_vars: usize, rng: &mut SmallRng) -> Clause {
    assert!(num_vars >= 3, "need at least 3 variables for 3-SAT");

    let mut variables = Vec::with_capacity(3);
    while variables.len() < 3 {
        let candidate = rng.gen_range(1..=num_vars as i64);
        if !variables.contains(&candidate) {
            variables.push(candidate);
        }
    }

    let literals = variables
        .into_iter()
        .map(|var| {
            let polarity = if rng.gen_bool(0.5) { 1 } else { -1 };
            Lit::from_i64(var * polarity)
        })
        .collect();

    Clause::from_vec(literals)
}
