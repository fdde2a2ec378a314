use super::Cell;

/// Trait for cellular automaton rules.
/// The engine is generic over the birth/survival table, so callers can
/// supply Life-like variants; Conway's rule is the one shipped here.
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Apply rule to compute next cell state
    fn evolve(&self, current: Cell, neighbors: u8) -> Cell;
}

/// Conway's Game of Life (B3/S23)
///
/// A live cell survives with exactly 2 or 3 live neighbors; a dead cell
/// is born with exactly 3. Everything else dies or stays dead.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConwayRule;

impl Rule for ConwayRule {
    fn name(&self) -> &'static str {
        "Conway"
    }

    fn evolve(&self, current: Cell, neighbors: u8) -> Cell {
        match (current, neighbors) {
            (Cell::Alive, 2 | 3) => Cell::Alive,
            (Cell::Dead, 3) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

/// Get default rule (Conway's Life)
pub fn default_rule() -> Box<dyn Rule> {
    Box::new(ConwayRule)
}
