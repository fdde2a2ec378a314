use super::{Cell, Error, rules::Rule};
use rayon::prelude::*;

/// Grid manages the 2D cellular automaton universe.
/// Dimensions are fixed at construction; evolution is functional and
/// immutable, producing a fresh grid per generation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead.
    /// Fails with `InvalidDimension` if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        })
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[self.get_index(x, y)])
    }

    /// Set cell at position; out-of-range positions are ignored
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.get_index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Count live neighbors in the Moore neighborhood.
    /// The grid does not wrap: positions outside the bounds count as dead.
    fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        (-1isize..=1)
            .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(|(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                self.get(nx, ny)
            })
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    /// Next state of the cell at (x, y) under `rule`, read entirely from
    /// this grid. Never fails: boundary neighbors are simply dead, and an
    /// out-of-range (x, y) itself evaluates as a dead cell.
    pub fn next_state(&self, x: usize, y: usize, rule: &dyn Rule) -> Cell {
        let current = self.get(x, y).unwrap_or(Cell::Dead);
        let neighbors = self.count_live_neighbors(x, y);
        rule.evolve(current, neighbors)
    }

    /// Pure functional evolution - returns the next generation (serial).
    /// Every cell is computed from the prior grid, so evaluation order
    /// cannot leak a cell's update into a neighbor's computation.
    pub fn evolve(&self, rule: &dyn Rule) -> Self {
        let cells = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| self.next_state(x, y, rule))
            .collect();

        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Parallel evolution using rayon for large grids.
    /// Safe because per-cell computations are mutually independent;
    /// the result is identical to `evolve`.
    pub fn evolve_parallel(&self, rule: &dyn Rule) -> Self {
        let cells: Vec<Cell> = (0..self.height)
            .into_par_iter()
            .flat_map(|y| (0..self.width).into_par_iter().map(move |x| (x, y)))
            .map(|(x, y)| self.next_state(x, y, rule))
            .collect();

        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Clear all cells to dead state
    pub fn clear(mut self) -> Self {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::Dead);
        self
    }

    /// Randomize grid (30% chance of alive)
    pub fn randomize(mut self) -> Self {
        self.cells.iter_mut().for_each(|cell| {
            *cell = if rand::random_bool(0.3) {
                Cell::Alive
            } else {
                Cell::Dead
            };
        });
        self
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| (x, y, self.cells[self.get_index(x, y)]))
    }

    /// Snapshot of the grid as nested rows of 0/1, outer index is the row
    pub fn as_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.cells[self.get_index(x, y)].as_bit()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConwayRule;

    #[test]
    fn test_new_grid_is_all_dead() {
        let grid = Grid::new(4, 4).unwrap();
        assert_eq!(grid.dimensions(), (4, 4));
        assert_eq!(grid.as_rows(), vec![vec![0; 4]; 4]);
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(Error::InvalidDimension { width: 0, height: 5 })
        );
        assert_eq!(
            Grid::new(5, 0),
            Err(Error::InvalidDimension { width: 5, height: 0 })
        );
        assert_eq!(
            Grid::new(0, 0),
            Err(Error::InvalidDimension { width: 0, height: 0 })
        );
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.get(2, 1), Some(Cell::Dead));
    }

    #[test]
    fn test_empty_grid_is_static() {
        let grid = Grid::new(6, 6).unwrap();
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(grid.next_state(x, y, &ConwayRule), Cell::Dead);
            }
        }
        assert_eq!(grid.evolve(&ConwayRule), grid);
    }

    #[test]
    fn test_neighbor_count_ignores_out_of_bounds() {
        // Corner block: each live cell sees exactly its 3 in-bounds
        // neighbors, nothing wraps around from the far edges.
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(0, 0, Cell::Alive);
        grid.set(1, 0, Cell::Alive);
        grid.set(0, 1, Cell::Alive);
        grid.set(1, 1, Cell::Alive);

        assert_eq!(grid.count_live_neighbors(0, 0), 3);
        assert_eq!(grid.count_live_neighbors(3, 3), 0);
        // A block is a still life only with dead edges; with wrapping on a
        // 4x4 grid the neighbor counts would differ.
        assert_eq!(grid.evolve(&ConwayRule), grid);
    }

    #[test]
    fn test_next_state_depends_only_on_neighborhood() {
        // Interior cell (2, 2): flipping cells outside its 3x3
        // neighborhood must not change its next state.
        let mut grid = Grid::new(6, 6).unwrap();
        grid.set(1, 1, Cell::Alive);
        grid.set(2, 1, Cell::Alive);
        grid.set(3, 1, Cell::Alive);
        let before = grid.next_state(2, 2, &ConwayRule);

        let mut distant = grid.clone();
        distant.set(5, 5, Cell::Alive);
        distant.set(0, 5, Cell::Alive);
        distant.set(4, 0, Cell::Alive);
        assert_eq!(distant.next_state(2, 2, &ConwayRule), before);

        // A flip inside the neighborhood does change it.
        let mut adjacent = grid.clone();
        adjacent.set(2, 3, Cell::Alive);
        assert_ne!(adjacent.next_state(2, 2, &ConwayRule), before);
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set(1, 2, Cell::Alive);
        grid.set(2, 2, Cell::Alive);
        grid.set(3, 2, Cell::Alive);

        let next = grid.evolve(&ConwayRule);
        assert_eq!(
            next.as_rows(),
            vec![
                vec![0, 0, 0, 0, 0],
                vec![0, 0, 1, 0, 0],
                vec![0, 0, 1, 0, 0],
                vec![0, 0, 1, 0, 0],
                vec![0, 0, 0, 0, 0],
            ]
        );
        assert_eq!(next.evolve(&ConwayRule), grid);
    }

    #[test]
    fn test_evolution_is_deterministic() {
        let grid = Grid::new(8, 8).unwrap().randomize();
        assert_eq!(grid.evolve(&ConwayRule), grid.evolve(&ConwayRule));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let grid = Grid::new(16, 16).unwrap().randomize();
        assert_eq!(grid.evolve(&ConwayRule), grid.evolve_parallel(&ConwayRule));
    }

    #[test]
    fn test_clear_kills_everything() {
        let grid = Grid::new(8, 8).unwrap().randomize().clear();
        assert_eq!(grid.as_rows(), vec![vec![0; 8]; 8]);
    }

    #[test]
    fn test_evolve_preserves_dimensions() {
        let grid = Grid::new(7, 3).unwrap().randomize();
        assert_eq!(grid.evolve(&ConwayRule).dimensions(), (7, 3));
    }
}
