//! Mutation result types.

/// Outcome of a mutation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Rows were appended.
    Added { rows: usize },
    /// Rows were removed. `unmatched` counts distinct data-table keys that
    /// matched nothing and were ignored.
    Deleted { rows: usize, unmatched: usize },
}

impl MutationOutcome {
    /// Number of input-table rows added or removed.
    pub fn rows_affected(&self) -> usize {
        match self {
            MutationOutcome::Added { rows } | MutationOutcome::Deleted { rows, .. } => *rows,
        }
    }

    /// Returns true if the input table was left unchanged.
    pub fn is_noop(&self) -> bool {
        self.rows_affected() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_affected() {
        assert_eq!(MutationOutcome::Added { rows: 2 }.rows_affected(), 2);
        assert!(MutationOutcome::Deleted {
            rows: 0,
            unmatched: 3
        }
        .is_noop());
    }
}
