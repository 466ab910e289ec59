use serde::{Deserialize, Serialize};

/// One stage of the maze lifecycle. Phases advance cyclically; Completed
/// wraps back to Idle, which discards the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Generation,
    CellSelection,
    Solving,
    Completed,
}

impl Phase {
    /// The cyclic successor
    pub fn next(self) -> Phase {
        match self {
            Phase::Idle => Phase::Generation,
            Phase::Generation => Phase::CellSelection,
            Phase::CellSelection => Phase::Solving,
            Phase::Solving => Phase::Completed,
            Phase::Completed => Phase::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_through_all_phases() {
        let mut phase = Phase::Idle;
        let expected = [
            Phase::Generation,
            Phase::CellSelection,
            Phase::Solving,
            Phase::Completed,
            Phase::Idle,
        ];
        for want in expected {
            phase = phase.next();
            assert_eq!(phase, want);
        }
    }
}
