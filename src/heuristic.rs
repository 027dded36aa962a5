//! MOM (Maximum Occurrence in clauses of Minimum size) branching heuristic.
//!
//! Given the resident clause database and the current assignment, find the
//! shortest not-yet-satisfied clauses (counting only their unassigned
//! literals, since satisfied clauses are conceptually dropped and falsified
//! literals conceptually struck by the simplifier), score each candidate
//! variable occurring in one of them, and return the variable with the
//! highest score. Ties break on lowest variable index.

use std::collections::BTreeMap;

use dimacs::{Lit, Sign};

use crate::solver::Solver;

impl Solver {
    /// Returns the positive literal of the chosen branching variable, or
    /// `None` if every remaining clause is already satisfied (or, degenerate,
    /// there are no clauses at all) — the formula is satisfied as-is.
    ///
    /// The driver always tries the positive polarity first; the negative
    /// polarity is explored, if the positive choice conflicts, via the
    /// conflict-driven backjump forcing `-v` on the next propagation round
    /// rather than an explicit second branch.
    pub(crate) fn pick_branching_variable(&self) -> Option<Lit> {
        let mut min_len: Option<usize> = None;
        let mut lengths: Vec<Option<usize>> = Vec::with_capacity(self.formula.len());

        for clause in &self.formula {
            if self.is_satisfied(clause) {
                lengths.push(None);
                continue;
            }

            let len = clause
                .lits()
                .iter()
                .filter(|&&lit| !self.assignment.is_variable_assigned(lit))
                .count();

            if len == 0 {
                // A falsified clause: propagation should already have turned
                // this into a reported conflict before the heuristic runs.
                lengths.push(None);
                continue;
            }

            lengths.push(Some(len));
            min_len = Some(min_len.map_or(len, |m| m.min(len)));
        }

        let m = min_len?;

        let mut positive_counts: BTreeMap<usize, u128> = BTreeMap::new();
        let mut negative_counts: BTreeMap<usize, u128> = BTreeMap::new();

        for (clause, len) in self.formula.iter().zip(lengths.iter()) {
            if *len != Some(m) {
                continue;
            }

            for &lit in clause.lits() {
                if self.assignment.is_variable_assigned(lit) {
                    continue;
                }

                let var = self.literal_to_variable_index(lit);
                let counts = if lit.sign() == Sign::Pos {
                    &mut positive_counts
                } else {
                    &mut negative_counts
                };
                *counts.entry(var).or_insert(0) += 1;
            }
        }

        let mut candidates: Vec<usize> = positive_counts.keys().copied().collect();
        for var in negative_counts.keys() {
            if !positive_counts.contains_key(var) {
                candidates.push(*var);
            }
        }
        candidates.sort_unstable();

        let weight = 1u128 << m.min(120);

        let mut best: Option<(u128, usize)> = None;
        for var in candidates {
            let p = *positive_counts.get(&var).unwrap_or(&0);
            let n = *negative_counts.get(&var).unwrap_or(&0);
            let score = (p + n) * weight + p * n;

            match best {
                Some((best_score, _)) if score <= best_score => {}
                _ => best = Some((score, var)),
            }
        }

        best.map(|(_, var)| Lit::from_i64((var + 1) as i64))
    }
}
