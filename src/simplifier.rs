//! Pure simplification step over a clause set.
//!
//! Given a clause set and a literal fixed true, drop every clause containing
//! that literal (it is now satisfied) and strike the negated literal from the
//! clauses that survive. The resident-database search driver in
//! `solver.rs`/`propagate.rs` achieves the same observable effect against its
//! own assignment rather than by calling this function on the hot path, but
//! the contract below is what both must satisfy.

use dimacs::{Clause, Lit};

/// Signaled when simplifying by `literal` reduces some clause to the empty
/// clause, i.e. that clause's only remaining literal was `-literal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict;

/// Simplify `clauses` by fixing `literal` true. Preserves the input order of
/// surviving clauses. Linear in the total number of literal occurrences.
pub fn simplify(clauses: &[Clause], literal: Lit) -> Result<Vec<Clause>, Conflict> {
    let negated = -literal;
    let mut result = Vec::with_capacity(clauses.len());

    for clause in clauses {
        if clause.lits().contains(&literal) {
            continue;
        }

        let remaining: Vec<Lit> = clause
            .lits()
            .iter()
            .copied()
            .filter(|&lit| lit != negated)
            .collect();

        if remaining.is_empty() {
            return Err(Conflict);
        }

        result.push(Clause::from_vec(remaining));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(lits: &[i64]) -> Clause {
        Clause::from_vec(lits.iter().map(|&l| Lit::from_i64(l)).collect())
    }

    fn lits_of(clause: &Clause) -> Vec<i64> {
        clause
            .lits()
            .iter()
            .map(|&l| {
                let v = l.var().to_u64() as i64;
                if l.sign() == dimacs::Sign::Pos {
                    v
                } else {
                    -v
                }
            })
            .collect()
    }

    #[test]
    fn drops_satisfied_clauses_and_strikes_negation() {
        let clauses = vec![clause(&[1, 2]), clause(&[-1, 3]), clause(&[2, 3])];
        let result = simplify(&clauses, Lit::from_i64(1)).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(lits_of(&result[0]), vec![3]);
        assert_eq!(lits_of(&result[1]), vec![2, 3]);
    }

    #[test]
    fn empty_residual_clause_is_a_conflict() {
        let clauses = vec![clause(&[-1])];
        assert_eq!(simplify(&clauses, Lit::from_i64(1)), Err(Conflict));
    }

    #[test]
    fn idempotent_under_repeated_simplification_by_the_same_literal() {
        let clauses = vec![clause(&[1, 2]), clause(&[-1, 3, 4])];
        let once = simplify(&clauses, Lit::from_i64(1)).unwrap();
        let twice = simplify(&once, Lit::from_i64(1)).unwrap();

        assert_eq!(lits_of_all(&once), lits_of_all(&twice));
    }

    fn lits_of_all(clauses: &[Clause]) -> Vec<Vec<i64>> {
        clauses.iter().map(lits_of).collect()
    }

    #[test]
    fn empty_input_stays_empty() {
        let result = simplify(&[], Lit::from_i64(1)).unwrap();
        assert!(result.is_empty());
    }
}
