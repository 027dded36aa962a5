use dimacs::{Lit, Sign};
use fixedbitset::FixedBitSet;

/// The set of literals currently forced true, indexed by variable.
///
/// A literal and its negation never coexist in the assignment, enforced by
/// construction since each variable holds at most one `Option<bool>`.
pub struct Assignment {
    buffer: Vec<Option<bool>>,
    assigned: FixedBitSet,
}

impl Assignment {
    pub fn new(num_variables: usize) -> Assignment {
        Assignment {
            buffer: vec![None; num_variables],
            assigned: FixedBitSet::with_capacity(num_variables),
        }
    }

    /// Indicates whether a literal is true under the current assignment. If
    /// the literal is unassigned, this will return false. Using this therefore
    /// cannot distinguish between the cases when the literal is false or
    /// unassigned.
    pub fn is_true(&self, literal: Lit) -> bool {
        self.buffer[self.index(literal)]
            .map(|value| value == (literal.sign() == Sign::Pos))
            .unwrap_or(false)
    }

    /// Indicates whether a literal is false under the current assignment. If
    /// the literal is unassigned, this will return false. Using this therefore
    /// cannot distinguish between the cases when the literal is true or
    /// unassigned.
    pub fn is_false(&self, literal: Lit) -> bool {
        self.buffer[self.index(literal)]
            .map(|value| value != (literal.sign() == Sign::Pos))
            .unwrap_or(false)
    }

    /// Indicates whether a literal is unassigned under the current assignment.
    pub fn is_unassigned(&self, literal: Lit) -> bool {
        self.buffer[self.index(literal)].is_none()
    }

    /// Indicates whether the variable underlying `literal` has any value yet.
    /// Backed by the `FixedBitSet` mask so the MOM heuristic can skip assigned
    /// variables without touching `buffer`.
    pub fn is_variable_assigned(&self, literal: Lit) -> bool {
        self.assigned.contains(self.index(literal))
    }

    /// Set the value of the given literal to true under the current assignment.
    pub fn set_true(&mut self, literal: Lit) {
        let idx = self.index(literal);
        self.buffer[idx] = Some(literal.sign() == Sign::Pos);
        self.assigned.insert(idx);
    }

    pub fn unassign(&mut self, literal: Lit) {
        let idx = self.index(literal);
        self.buffer[idx] = None;
        self.assigned.set(idx, false);
    }

    /// Returns an iterator of the literals that are 'true' in the current
    /// assignment.
    pub fn iter(&self) -> impl Iterator<Item = Lit> + '_ {
        self.buffer
            .iter()
            .enumerate()
            .filter_map(|(variable_idx, &value)| {
                let var = (variable_idx + 1) as i64;

                value.map(|v| {
                    if v {
                        Lit::from_i64(var)
                    } else {
                        Lit::from_i64(-var)
                    }
                })
            })
    }

    /// Number of distinct variables currently assigned (either polarity).
    pub fn size(&self) -> usize {
        self.assigned.count_ones(..)
    }

    fn index(&self, literal: Lit) -> usize {
        literal.var().to_u64() as usize - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_assignment_has_everything_unassigned() {
        let a = Assignment::new(3);
        for v in 1..=3 {
            let lit = Lit::from_i64(v);
            assert!(a.is_unassigned(lit));
            assert!(!a.is_true(lit));
            assert!(!a.is_false(lit));
        }
        assert_eq!(a.size(), 0);
    }

    #[test]
    fn set_true_is_visible_under_both_polarities() {
        let mut a = Assignment::new(1);
        a.set_true(Lit::from_i64(1));

        assert!(a.is_true(Lit::from_i64(1)));
        assert!(a.is_false(Lit::from_i64(-1)));
        assert!(!a.is_unassigned(Lit::from_i64(1)));
        assert_eq!(a.size(), 1);
    }

    #[test]
    fn unassign_restores_unassigned_state() {
        let mut a = Assignment::new(1);
        a.set_true(Lit::from_i64(-1));
        a.unassign(Lit::from_i64(-1));

        assert!(a.is_unassigned(Lit::from_i64(1)));
        assert_eq!(a.size(), 0);
    }
}
