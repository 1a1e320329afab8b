use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    #[error("grid dimensions must be positive")]
    EmptyDimension,
    #[error("{width}x{height} grid is too large to allocate")]
    TooLarge { width: usize, height: usize },
    #[error("pattern row {row} has {len} cells, expected {width}")]
    RaggedPattern { row: usize, len: usize, width: usize },
}

/// Live/dead field with fixed dimensions, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid. Both dimensions must be positive.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimension);
        }
        let len = width
            .checked_mul(height)
            .filter(|n| *n <= isize::MAX as usize)
            .ok_or(GridError::TooLarge { width, height })?;
        Ok(Grid {
            width,
            height,
            cells: vec![false; len],
        })
    }

    /// Builds a grid from text, one line per row. `.`, `0` and space are
    /// dead, anything else is live. Blank lines are skipped.
    pub fn from_pattern(s: &str) -> Result<Self, GridError> {
        let rows: Vec<Vec<bool>> = s
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().map(|c| !matches!(c, '.' | '0' | ' ')).collect())
            .collect();

        let width = rows.first().map_or(0, Vec::len);
        let mut grid = Grid::new(width, rows.len())?;

        for (row, r) in rows.iter().enumerate() {
            if r.len() != width {
                return Err(GridError::RaggedPattern { row, len: r.len(), width });
            }
            let start = row * width;
            grid.cells[start..start + width].copy_from_slice(r);
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.height || col >= self.width {
            Err(GridError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            })
        } else {
            Ok(row * self.width + col)
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool, GridError> {
        self.index(row, col).map(|i| self.cells[i])
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        let i = self.index(row, col)?;
        self.cells[i] = alive;
        Ok(())
    }

    /// Flips a cell and returns its new state.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool, GridError> {
        let i = self.index(row, col)?;
        self.cells[i] = !self.cells[i];
        Ok(self.cells[i])
    }

    /// Rows top to bottom, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Signed lookup for neighbor scans; anything off the board is dead.
    #[inline]
    fn alive_at(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 || row >= self.height as isize || col >= self.width as isize {
            false
        } else {
            self.cells[row as usize * self.width + col as usize]
        }
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in self.rows() {
            for c in r {
                f.write_str(if *c { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Live-neighbor count for every cell of a grid of the same shape.
#[derive(Clone, Debug)]
pub struct NeighborCounts {
    width: usize,
    height: usize,
    counts: Vec<u8>,
}

impl NeighborCounts {
    pub fn new(grid: &Grid) -> Self {
        NeighborCounts {
            width: grid.width(),
            height: grid.height(),
            counts: vec![0; grid.width() * grid.height()],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.height || col >= self.width {
            None
        } else {
            Some(self.counts[row * self.width + col])
        }
    }

    /// Rewrites every count from the grid's current state. A buffer of
    /// another shape is reshaped to the grid first.
    pub fn recompute(&mut self, grid: &Grid) {
        if (self.width, self.height) != (grid.width(), grid.height()) {
            *self = NeighborCounts::new(grid);
        }

        for row in 0..self.height {
            for col in 0..self.width {
                self.counts[row * self.width + col] = count_neighbors(grid, row, col);
            }
        }
    }
}

/// Live cells among the 8 surrounding positions. Edges do not wrap.
pub fn count_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let (r, c) = (row as isize, col as isize);
    let mut n = 0;
    for i in -1..=1 {
        for j in -1..=1 {
            if i == 0 && j == 0 {
                continue;
            }
            if grid.alive_at(r + i, c + j) {
                n += 1;
            }
        }
    }
    n
}

/// B3/S23.
#[inline]
pub fn will_be_alive(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true,
        (false, 3) => true,
        _ => false,
    }
}

/// Advances `grid` one generation. Counts are taken in full before any
/// cell is written, so every cell sees the same previous generation.
pub fn update_game(grid: &mut Grid, counts: &mut NeighborCounts) {
    counts.recompute(grid);

    for (cell, n) in grid.cells.iter_mut().zip(counts.counts.iter()) {
        *cell = will_be_alive(*cell, *n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(grid: &mut Grid) {
        let mut counts = NeighborCounts::new(grid);
        update_game(grid, &mut counts);
    }

    fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
        let mut out = vec![];
        for (row, r) in grid.rows().enumerate() {
            for (col, c) in r.iter().enumerate() {
                if *c {
                    out.push((row, col));
                }
            }
        }
        out
    }

    #[test]
    fn new_grid_is_dead() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert_eq!(g.population(), 0);
        assert_eq!(g.rows().count(), 3);
        assert!(g.rows().all(|r| r.len() == 4));
    }

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(Grid::new(0, 3), Err(GridError::EmptyDimension));
        assert_eq!(Grid::new(3, 0), Err(GridError::EmptyDimension));
    }

    #[test]
    fn oversized_grid_rejected() {
        let side = 1usize << (usize::BITS / 2 + 1);
        assert_eq!(
            Grid::new(side, side),
            Err(GridError::TooLarge { width: side, height: side })
        );
        assert!(matches!(Grid::new(usize::MAX, 2), Err(GridError::TooLarge { .. })));
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut g = Grid::new(3, 2).unwrap();
        let err = GridError::OutOfBounds { row: 2, col: 0, width: 3, height: 2 };
        assert_eq!(g.get(2, 0), Err(err.clone()));
        assert_eq!(g.set(2, 0, true), Err(err.clone()));
        assert!(g.get(0, 3).is_err());
        assert!(g.toggle(5, 5).is_err());
        assert_eq!(g.population(), 0);
    }

    #[test]
    fn toggle_flips() {
        let mut g = Grid::new(2, 2).unwrap();
        assert_eq!(g.toggle(1, 0), Ok(true));
        assert_eq!(g.get(1, 0), Ok(true));
        assert_eq!(g.toggle(1, 0), Ok(false));
        assert_eq!(g.get(1, 0), Ok(false));
    }

    #[test]
    fn pattern_parsing() {
        let g = Grid::from_pattern(".#.\n0 x\n\n").unwrap();
        assert_eq!((g.width(), g.height()), (3, 2));
        assert_eq!(live_cells(&g), vec![(0, 1), (1, 2)]);
        assert_eq!(g.to_string(), ".#.\n..#\n");

        assert_eq!(
            Grid::from_pattern("##\n###\n"),
            Err(GridError::RaggedPattern { row: 1, len: 3, width: 2 })
        );
        assert_eq!(Grid::from_pattern("\n\n"), Err(GridError::EmptyDimension));
    }

    #[test]
    fn transition_rule() {
        for n in 0..=8 {
            assert_eq!(will_be_alive(true, n), n == 2 || n == 3, "live with {n}");
            assert_eq!(will_be_alive(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn dead_stays_dead() {
        for (w, h) in [(1, 1), (3, 7), (10, 4)] {
            let mut g = Grid::new(w, h).unwrap();
            step(&mut g);
            assert_eq!(g, Grid::new(w, h).unwrap());
        }
    }

    #[test]
    fn isolated_cell_dies() {
        let mut g = Grid::new(1, 1).unwrap();
        g.set(0, 0, true).unwrap();
        step(&mut g);
        assert_eq!(g.population(), 0);

        let mut g = Grid::new(6, 6).unwrap();
        g.set(3, 2, true).unwrap();
        step(&mut g);
        assert_eq!(g.population(), 0);
    }

    #[test]
    fn birth_and_overpopulation() {
        let mut g = Grid::from_pattern(
            "#.#\n\
             ...\n\
             .#.\n",
        )
        .unwrap();
        step(&mut g);
        assert_eq!(g.get(1, 1), Ok(true));

        let mut g = Grid::from_pattern(
            "#.#\n\
             .#.\n\
             #.#\n",
        )
        .unwrap();
        step(&mut g);
        assert_eq!(g.get(1, 1), Ok(false));
    }

    #[test]
    fn block_is_still_life() {
        let mut g = Grid::from_pattern("##\n##\n").unwrap();
        let before = g.clone();
        step(&mut g);
        assert_eq!(g, before);

        let mut g = Grid::from_pattern(
            "....\n\
             .##.\n\
             .##.\n\
             ....\n",
        )
        .unwrap();
        let before = g.clone();
        step(&mut g);
        step(&mut g);
        assert_eq!(g, before);
    }

    #[test]
    fn blinker_oscillates() {
        let mut g = Grid::new(5, 5).unwrap();
        for col in 1..=3 {
            g.set(2, col, true).unwrap();
        }
        let horizontal = g.clone();
        let mut counts = NeighborCounts::new(&g);

        update_game(&mut g, &mut counts);
        assert_eq!(live_cells(&g), vec![(1, 2), (2, 2), (3, 2)]);

        update_game(&mut g, &mut counts);
        assert_eq!(g, horizontal);
    }

    #[test]
    fn corner_does_not_wrap() {
        let mut g = Grid::from_pattern(
            ".##.#\n\
             ##..#\n\
             ....#\n\
             #####\n",
        )
        .unwrap();
        assert_eq!(count_neighbors(&g, 0, 0), 3);

        g.set(0, 1, false).unwrap();
        assert_eq!(count_neighbors(&g, 0, 0), 2);
        assert_eq!(count_neighbors(&g, 3, 4), 2);
    }

    #[test]
    fn wide_grid_counts_right_edge() {
        // 6 wide, 2 tall: columns past the row count must still be seen.
        let g = Grid::from_pattern(
            "....##\n\
             .....#\n",
        )
        .unwrap();
        assert_eq!(count_neighbors(&g, 0, 5), 2);
        assert_eq!(count_neighbors(&g, 1, 4), 3);

        let mut g = g;
        step(&mut g);
        assert_eq!(g.to_string(), "....##\n....##\n");
    }

    #[test]
    fn tall_grid_counts_bottom_edge() {
        let g = Grid::from_pattern("..\n..\n..\n.#\n##\n").unwrap();
        assert_eq!(count_neighbors(&g, 3, 0), 3);
        assert_eq!(count_neighbors(&g, 4, 1), 2);
    }

    #[test]
    fn counts_are_recomputed_each_step() {
        let mut g = Grid::from_pattern("###\n...\n...\n").unwrap();
        let mut counts = NeighborCounts::new(&g);
        counts.recompute(&g);
        assert_eq!(counts.get(1, 1), Some(3));
        assert_eq!(counts.get(3, 0), None);

        update_game(&mut g, &mut counts);
        assert_eq!(g.to_string(), ".#.\n.#.\n...\n");
        // Still holds the counts of the generation that was just replaced.
        assert_eq!(counts.get(0, 1), Some(2));

        counts.recompute(&g);
        assert_eq!(counts.get(0, 1), Some(1));
        assert_eq!(counts.get(1, 1), Some(1));
    }

    #[test]
    fn counts_of_another_shape_are_reshaped() {
        let mut g = Grid::from_pattern(
            ".....\n\
             .....\n\
             .###.\n\
             .....\n\
             .....\n",
        )
        .unwrap();
        let mut counts = NeighborCounts::new(&Grid::new(2, 2).unwrap());
        assert_eq!(counts.get(4, 4), None);

        update_game(&mut g, &mut counts);
        assert_eq!(g.to_string(), ".....\n..#..\n..#..\n..#..\n.....\n");
        assert_eq!(counts.get(4, 4), Some(0));
        assert_eq!(counts.get(2, 2), Some(2));
    }

    #[test]
    fn update_is_simultaneous() {
        let mut g = Grid::from_pattern(
            ".....\n\
             .###.\n\
             .....\n",
        )
        .unwrap();

        // Rewriting in place row by row lets (1,1) see the freshly born
        // (0,2) and survive, which is wrong.
        let mut naive = g.clone();
        for row in 0..naive.height() {
            for col in 0..naive.width() {
                let n = count_neighbors(&naive, row, col);
                let alive = naive.get(row, col).unwrap();
                naive.set(row, col, will_be_alive(alive, n)).unwrap();
            }
        }

        step(&mut g);
        assert_eq!(g.to_string(), "..#..\n..#..\n..#..\n");
        assert_ne!(g, naive);
    }
}
