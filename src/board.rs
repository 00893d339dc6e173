use std::fmt;

use crate::{coord, Coord, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    alive: bool,
}

impl Cell {
    pub fn dead() -> Self {
        Self { alive: false }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        Self { alive }
    }
}

/// A fixed-size grid of cells with bounded edges.
///
/// Dimensions never change after construction. Every accessor taking a
/// [`Coord`] fails with [`Error::OutOfBounds`] when the coordinate falls
/// outside `[0, rows) x [0, cols)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Allocates an all-dead board.
    ///
    /// Fails with [`Error::InvalidDimensions`] when either dimension is not
    /// positive or the board would not fit in memory.
    pub fn new(rows: isize, cols: isize) -> Result<Self, Error> {
        if rows <= 0 || cols <= 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let invalid = Error::InvalidDimensions { rows, cols };
        let (rows, cols) = (rows as usize, cols as usize);
        let len = rows.checked_mul(cols).ok_or_else(|| invalid.clone())?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid)?;
        cells.resize(len, Cell::dead());
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, Coord { row, col }: Coord) -> bool {
        (0..self.rows as isize).contains(&row) && (0..self.cols as isize).contains(&col)
    }

    fn index(&self, coord: Coord) -> Result<usize, Error> {
        if self.contains(coord) {
            Ok(coord.row as usize * self.cols + coord.col as usize)
        } else {
            Err(Error::OutOfBounds(coord))
        }
    }

    /// Marks every given coordinate alive.
    ///
    /// All coordinates are validated first: if any of them is outside the
    /// board, nothing is changed and [`Error::InvalidSeed`] names the first
    /// offender.
    pub fn seed(&mut self, coords: &[Coord]) -> Result<(), Error> {
        if let Some(&bad) = coords.iter().find(|&&c| !self.contains(c)) {
            return Err(Error::InvalidSeed(bad));
        }
        for &coord in coords {
            self.set_alive(coord, true)?;
        }
        Ok(())
    }

    pub fn get(&self, coord: Coord) -> Result<Cell, Error> {
        let index = self.index(coord)?;
        Ok(self.cells[index])
    }

    pub fn is_alive(&self, coord: Coord) -> Result<bool, Error> {
        Ok(self.get(coord)?.is_alive())
    }

    pub fn set_alive(&mut self, coord: Coord, alive: bool) -> Result<(), Error> {
        let index = self.index(coord)?;
        self.cells[index] = Cell::from(alive);
        Ok(())
    }

    /// Counts alive cells among the in-bounds neighbors of `coord`.
    ///
    /// There is no wraparound: edge cells have five neighbors, corners three.
    pub fn alive_neighbor_count(&self, coord: Coord) -> Result<usize, Error> {
        self.index(coord)?;
        let count = coord
            .neighbors()
            .filter_map(|neighbor| self.index(neighbor).ok())
            .filter(|&index| self.cells[index].is_alive())
            .count();
        Ok(count)
    }

    /// Every coordinate of the board in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| coord!(row, col)))
    }

    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords()
            .zip(self.cells.iter())
            .filter_map(|(coord, cell)| cell.is_alive().then_some(coord))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::dead());
    }
}

/// One line per row, `#` for alive and `.` for dead cells.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row
                .iter()
                .map(|cell| if cell.is_alive() { '#' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: isize, cols: isize, alive: &[Coord]) -> Board {
        let mut board = Board::new(rows, cols).unwrap();
        board.seed(alive).unwrap();
        board
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert_eq!(
            Board::new(0, 5),
            Err(Error::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert_eq!(
            Board::new(5, -1),
            Err(Error::InvalidDimensions { rows: 5, cols: -1 })
        );
    }

    #[test]
    fn rejects_dimensions_too_large_to_allocate() {
        assert_eq!(
            Board::new(isize::MAX, 2),
            Err(Error::InvalidDimensions {
                rows: isize::MAX,
                cols: 2
            })
        );
    }

    #[test]
    fn new_board_is_dead() {
        let board = Board::new(4, 7).unwrap();
        assert_eq!(board.rows(), 4);
        assert_eq!(board.cols(), 7);
        assert_eq!(board.population(), 0);
        assert!(board.coords().all(|c| !board.is_alive(c).unwrap()));
    }

    #[test]
    fn one_past_the_end_is_out_of_bounds() {
        let mut board = Board::new(3, 4).unwrap();
        for c in [coord!(3, 0), coord!(0, 4), coord!(-1, 0), coord!(0, -1)] {
            assert_eq!(board.is_alive(c), Err(Error::OutOfBounds(c)));
            assert_eq!(board.set_alive(c, true), Err(Error::OutOfBounds(c)));
            assert_eq!(board.alive_neighbor_count(c), Err(Error::OutOfBounds(c)));
        }
        assert_eq!(board.population(), 0);
    }

    #[test]
    fn set_alive_is_idempotent() {
        let mut board = Board::new(2, 2).unwrap();
        board.set_alive(coord!(1, 1), true).unwrap();
        let once = board.clone();
        board.set_alive(coord!(1, 1), true).unwrap();
        assert_eq!(board, once);
        board.set_alive(coord!(1, 1), false).unwrap();
        assert!(!board.is_alive(coord!(1, 1)).unwrap());
    }

    #[test]
    fn invalid_seed_changes_nothing() {
        let mut board = board(3, 3, &[coord!(1, 1)]);
        let before = board.clone();
        let result = board.seed(&[coord!(0, 0), coord!(3, 1), coord!(2, 2)]);
        assert_eq!(result, Err(Error::InvalidSeed(coord!(3, 1))));
        assert_eq!(board, before);
    }

    #[test]
    fn neighbor_count_skips_self_and_edges() {
        let full: Vec<_> = Board::new(3, 3).unwrap().coords().collect();
        let board = board(3, 3, &full);
        assert_eq!(board.alive_neighbor_count(coord!(1, 1)), Ok(8));
        assert_eq!(board.alive_neighbor_count(coord!(0, 0)), Ok(3));
        assert_eq!(board.alive_neighbor_count(coord!(0, 1)), Ok(5));
    }

    #[test]
    fn neighbor_count_never_exceeds_eight() {
        let full: Vec<_> = Board::new(5, 5).unwrap().coords().collect();
        let board = board(5, 5, &full);
        assert!(board
            .coords()
            .all(|c| board.alive_neighbor_count(c).unwrap() <= 8));
    }

    #[test]
    fn display_and_alive_cells() {
        let board = board(2, 3, &[coord!(0, 1), coord!(1, 2)]);
        assert_eq!(board.to_string(), ".#.\n..#\n");
        let alive: Vec<_> = board.alive_cells().collect();
        assert_eq!(alive, vec![coord!(0, 1), coord!(1, 2)]);
    }

    #[test]
    fn clear_kills_everything() {
        let mut board = board(2, 2, &[coord!(0, 0), coord!(1, 1)]);
        board.clear();
        assert_eq!(board.population(), 0);
    }
}
