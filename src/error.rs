//! All kinds of errors in this crate.

use crate::Coord;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Coordinate {0:?} lies outside the board.
    OutOfBounds(Coord),
    /// Board dimensions must be positive, got {rows} x {cols}.
    InvalidDimensions { rows: isize, cols: isize },
    /// Seed coordinate {0:?} lies outside the board; nothing was seeded.
    InvalidSeed(Coord),
    /// Unexpected character {found:?} in pattern at line {line}, column {column}.
    InvalidPattern {
        line: usize,
        column: usize,
        found: char,
    },
    /// The simulator has already been run; use a fresh one.
    AlreadyRun,
    /// The simulation thread is no longer running.
    SimulatorGone,
}
