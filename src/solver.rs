use std::collections::{HashSet, VecDeque};

use dimacs::{Clause, Lit};
use log::{debug, trace};

use crate::{assignment::Assignment, formula::CnfFormula};

/// The outcome of a solve. `Unknown` is distinct from both `Sat` and `Unsat`
/// and is only returned when a conflict budget was configured and exhausted
/// before the search concluded.
pub enum SolveOutcome {
    Sat(Assignment),
    Unsat,
    Unknown,
}

/// The search driver (DPLL/CDCL). Holds the resident clause database (original
/// clauses plus everything learned so far), a trail of every forced literal
/// tagged by decision level, and the decision stack proper (just the literals
/// chosen by the branching heuristic).
///
/// This is a trail-based realization rather than copy-on-branch: backjumping
/// rewinds the trail instead of discarding and rebuilding clause-set values.
pub struct Solver {
    pub(crate) assignment: Assignment,

    /// Every forced literal in chronological order, tagged with the decision
    /// level at which it was forced. Used to undo assignments on backjump.
    pub(crate) trail: VecDeque<(Lit, usize)>,

    /// The resident clause database: original clauses first, learned clauses
    /// appended as the search proceeds. Write-once clauses from `CnfFormula`
    /// are never mutated in place; learned clauses are only ever appended.
    pub(crate) formula: Vec<Clause>,
    pub(crate) variable_count: usize,

    /// Decision level at which each variable was first forced, or `None` if
    /// currently unassigned. Used by backjump-level computation.
    pub(crate) variable_decision_level: Vec<Option<usize>>,

    /// The decision literals only, bottom to top. Its length always equals the
    /// current decision level.
    pub(crate) decision_stack: Vec<Lit>,

    /// Canonical (sorted) keys of every clause learned so far, used to detect
    /// when conflict analysis would re-derive the same fact.
    pub(crate) learned_keys: HashSet<Vec<i64>>,

    /// Optional cap on the number of conflicts processed before giving up.
    pub(crate) max_conflicts: Option<usize>,
    pub(crate) conflicts_seen: usize,
}

impl Solver {
    pub fn create(formula: CnfFormula) -> Solver {
        Solver::with_conflict_budget(formula, None)
    }

    pub fn with_conflict_budget(formula: CnfFormula, max_conflicts: Option<usize>) -> Solver {
        let num_vars = formula.num_variables();
        let clauses = formula.clauses();

        Solver {
            assignment: Assignment::new(num_vars),
            trail: VecDeque::new(),
            variable_decision_level: vec![None; num_vars],
            decision_stack: Vec::new(),
            learned_keys: HashSet::new(),
            formula: Vec::from(clauses),
            variable_count: num_vars,
            max_conflicts,
            conflicts_seen: 0,
        }
    }

    /// Run the solver to find a satisfying assignment or prove unsat (or
    /// `Unknown`, if a conflict budget was configured and is exhausted).
    pub fn solve(mut self) -> SolveOutcome {
        let mut decision_level = 0;

        // Find top-level conflicts. If they exist, the formula is unsatisfiable.
        if self.unit_propagate(decision_level).is_some() {
            return SolveOutcome::Unsat;
        }

        while !self.all_variables_assigned() {
            let Some(picked_variable) = self.pick_branching_variable() else {
                break;
            };

            decision_level += 1;
            self.push_decision(picked_variable, decision_level);
            trace!(
                "decision: literal {:?} at level {}",
                picked_variable,
                decision_level
            );

            // Continuously propagate and learn, until propagation no longer
            // derives a conflict.
            loop {
                match self.unit_propagate(decision_level) {
                    None => break,
                    Some(conflicting_clause) => {
                        trace!("conflict in clause {}", conflicting_clause);

                        // A conflict with no decision to undo is a top-level
                        // contradiction: the formula is unsatisfiable.
                        if decision_level == 0 {
                            return SolveOutcome::Unsat;
                        }

                        self.conflicts_seen += 1;
                        if let Some(budget) = self.max_conflicts {
                            if self.conflicts_seen > budget {
                                return SolveOutcome::Unknown;
                            }
                        }

                        match self.analyze_and_backjump(conflicting_clause, decision_level) {
                            None => return SolveOutcome::Unsat,
                            Some(new_level) => {
                                debug!("backjumped to level {}", new_level);
                                decision_level = new_level;
                            }
                        }
                    }
                }
            }
        }

        // If we reached here, all variables were successfully assigned (or no
        // branching variable remains to pick), and the formula is satisfiable.
        SolveOutcome::Sat(self.assignment)
    }

    pub(crate) fn all_variables_assigned(&self) -> bool {
        self.variable_count == self.assignment.size()
    }

    /// Take a dimacs literal and return the index for the variable this literal
    /// is for. Note: the variable is 0-indexed, whereas in DIMACS the variable
    /// 0 does not exist.
    pub(crate) fn literal_to_variable_index(&self, literal: Lit) -> usize {
        literal.var().to_u64() as usize - 1
    }

    /// Assign a literal the value `true` at `decision_level`, recording it on
    /// the trail. Does not touch the decision stack; callers that are making a
    /// decision (rather than propagating) must also call `push_decision` or
    /// push directly onto `decision_stack`.
    pub(crate) fn assign_literal(&mut self, literal: Lit, decision_level: usize) {
        let variable = self.literal_to_variable_index(literal);

        self.assignment.set_true(literal);
        self.trail.push_back((literal, decision_level));
        self.variable_decision_level[variable] = Some(decision_level);
    }

    /// Record `literal` as a branching decision at `decision_level`.
    pub(crate) fn push_decision(&mut self, literal: Lit, decision_level: usize) {
        self.assign_literal(literal, decision_level);
        self.decision_stack.push(literal);
    }

    /// Unassign the given literal, undoing its bookkeeping.
    pub(crate) fn unassign_literal(&mut self, literal: Lit) {
        let variable = self.literal_to_variable_index(literal);
        self.assignment.unassign(literal);
        self.variable_decision_level[variable] = None;
    }

    /// Undo variable assignments and decisions above the given decision level.
    pub(crate) fn backtrack_to_level(&mut self, target_decision_level: usize) {
        loop {
            let (literal, decision_level) = match self.trail.back() {
                Some(&entry) => entry,
                None => break,
            };

            if decision_level <= target_decision_level {
                break;
            }

            self.trail.pop_back();
            self.unassign_literal(literal);
        }

        self.decision_stack.truncate(target_decision_level);
    }

    /// Get the decision level at which the given literal was assigned, or
    /// `None` if the literal is unassigned.
    pub(crate) fn decision_level_of(&self, literal: Lit) -> Option<usize> {
        let idx = self.literal_to_variable_index(literal);
        self.variable_decision_level[idx]
    }

    /// Indicate whether a clause is satisfied under the current assignment.
    pub(crate) fn is_satisfied(&self, clause: &Clause) -> bool {
        clause
            .lits()
            .iter()
            .any(|&lit| self.assignment.is_true(lit))
    }
}

/// Turn a `dimacs::Lit` into a signed integer, used for sorting canonical keys.
pub(crate) fn lit_to_int(lit: Lit) -> i64 {
    crate::formula::lit_to_int(lit)
}
