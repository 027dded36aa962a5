use std::collections::HashSet;

use dimacs::{Clause, Instance, Lit, Sign};

use crate::error::LoadError;

/// Turn a `dimacs::Lit` into a signed integer literal, variable magnitude with sign.
pub fn lit_to_int(lit: Lit) -> i64 {
    let num = lit.var().to_u64() as i64;
    if lit.sign() == Sign::Pos {
        num
    } else {
        -num
    }
}

/// The original, validated clause set. Write-once: clauses learned during search
/// live in the solver's own resident database, never here.
pub struct CnfFormula {
    num_vars: usize,
    clauses: Box<[Clause]>,
}

impl CnfFormula {
    pub fn num_variables(&self) -> usize {
        self.num_vars
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Validate a parsed DIMACS instance against the well-formedness rules of
    /// the data model: no literal outside 1..=num_vars, no clause containing a
    /// variable both positively and negatively, no clause containing the same
    /// variable twice.
    pub fn from_instance(instance: Instance) -> Result<CnfFormula, LoadError> {
        let (num_vars, clauses) = match instance {
            Instance::Cnf { num_vars, clauses } => (num_vars as usize, clauses),
            Instance::Sat { .. } => return Err(LoadError::NotCnf),
        };

        for (clause_index, clause) in clauses.iter().enumerate() {
            let mut seen: HashSet<i64> = HashSet::new();

            for &literal in clause.lits() {
                let var = literal.var().to_u64() as usize;
                let signed = lit_to_int(literal);

                if var == 0 || var > num_vars {
                    return Err(LoadError::LiteralOutOfRange {
                        clause_index,
                        literal: signed,
                        num_vars,
                    });
                }

                if seen.contains(&(-signed)) {
                    return Err(LoadError::ContradictoryClause {
                        clause_index,
                        variable: var as i64,
                    });
                }

                if !seen.insert(signed) {
                    return Err(LoadError::DuplicateLiteral {
                        clause_index,
                        variable: var as i64,
                    });
                }
            }
        }

        Ok(CnfFormula {
            num_vars,
            clauses: clauses.into_boxed_slice(),
        })
    }
}

impl TryFrom<Instance> for CnfFormula {
    type Error = LoadError;

    fn try_from(instance: Instance) -> Result<Self, Self::Error> {
        CnfFormula::from_instance(instance)
    }
}
