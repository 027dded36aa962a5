//! Unit propagation over the resident clause database.
//!
//! Repeatedly scans the resident clause database for clauses that have
//! exactly one literal neither satisfied nor falsified under the current
//! assignment, and forces it. Reaches a fixed point (no more unit clauses)
//! before reporting success, or reports the index of a clause that became
//! empty (every literal falsified) as a conflict.
//!
//! Plays the same role as the pure `simplify` step in `simplifier.rs`, but
//! against the resident database: it consults `self.assignment` rather than
//! rewriting `self.formula` on every step, so a falsified or satisfied
//! literal is recognized in place instead of its clause being rebuilt.

use crate::solver::Solver;

impl Solver {
    /// Run boolean constraint propagation on the formula.
    ///
    /// If propagation causes a clause to be conflicting, this method returns
    /// `Some(clause_idx)` where `clause_idx` is the index of the conflicting
    /// clause in the resident database.
    ///
    /// If propagation finishes without identifying a conflict, `None` is
    /// returned.
    pub(crate) fn unit_propagate(&mut self, decision_level: usize) -> Option<usize> {
        let mut unit_clause_found = true;
        while unit_clause_found {
            unit_clause_found = false;

            // Iterate over all clauses in insertion order, so branching stays
            // reproducible for a given seed, looking for ones reduced to a
            // single unassigned literal.
            'clause: for clause_idx in 0..self.formula.len() {
                let clause = &self.formula[clause_idx];

                let mut unassigned_literal = None;

                for &literal in clause.lits() {
                    if self.assignment.is_true(literal) {
                        // The clause is already satisfied.
                        continue 'clause;
                    }

                    if self.assignment.is_unassigned(literal) {
                        if unassigned_literal.is_none() {
                            unassigned_literal = Some(literal);
                        } else {
                            // More than one unassigned literal: cannot propagate.
                            continue 'clause;
                        }
                    }
                }

                if let Some(literal) = unassigned_literal {
                    unit_clause_found = true;
                    self.assign_literal(literal, decision_level);
                }
            }
        }

        self.formula.iter().position(|clause| {
            clause
                .lits()
                .iter()
                .all(|&literal| self.assignment.is_false(literal))
        })
    }
}
