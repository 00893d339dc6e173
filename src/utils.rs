use std::ops::Add;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `(row, col)` position on a [`Board`](crate::Board).
///
/// Components are signed so that positions just outside the grid can be
/// expressed and rejected instead of wrapping around.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub row: isize,
    pub col: isize,
}

#[macro_export]
macro_rules! coord {
    ($row:expr, $col:expr) => {
        $crate::Coord {
            row: $row,
            col: $col,
        }
    };
}

impl Add for Coord {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        coord!(self.row + rhs.row, self.col + rhs.col)
    }
}

/// Offsets of the eight cells surrounding a position.
pub const NEIGHBOR_OFFSETS: [Coord; 8] = [
    coord!(-1, -1),
    coord!(-1, 0),
    coord!(-1, 1),
    coord!(0, -1),
    coord!(0, 1),
    coord!(1, -1),
    coord!(1, 0),
    coord!(1, 1),
];

impl Coord {
    /// The up-to-eight positions around this one, without bounds checks.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        NEIGHBOR_OFFSETS.into_iter().map(move |offset| self + offset)
    }
}

#[test]
fn test_neighbors_exclude_center() {
    let center = coord!(3, 3);
    let neighbors: Vec<_> = center.neighbors().collect();
    assert_eq!(neighbors.len(), 8);
    assert!(!neighbors.contains(&center));
    assert!(neighbors.contains(&coord!(2, 2)));
    assert!(neighbors.contains(&coord!(4, 4)));
}
