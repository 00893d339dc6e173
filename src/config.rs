//! Board and pacing configuration.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{coord, Board, Coord, Error, Sim};

/// Everything needed to start a simulation.
///
/// The default is a 19 x 19 board seeded with a glider in the top-left
/// corner, advancing every 500 ms.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Number of rows.
    pub rows: isize,

    /// Number of columns.
    pub cols: isize,

    /// Pause between two generations.
    pub tick_interval: Duration,

    /// Cells alive at generation zero.
    pub seed: Vec<Coord>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: 19,
            cols: 19,
            tick_interval: Duration::from_millis(500),
            seed: vec![
                coord!(0, 1),
                coord!(1, 2),
                coord!(2, 0),
                coord!(2, 1),
                coord!(2, 2),
            ],
        }
    }
}

impl Config {
    /// Sets up a new configuration with given size and the default seed.
    pub fn new(rows: isize, cols: isize) -> Self {
        Config {
            rows,
            cols,
            ..Config::default()
        }
    }

    /// Sets the pause between two generations.
    pub fn set_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Replaces the seed.
    pub fn set_seed<I: IntoIterator<Item = Coord>>(mut self, seed: I) -> Self {
        self.seed = seed.into_iter().collect();
        self
    }

    /// Creates a board of the configured size and seeds it.
    pub fn board(&self) -> Result<Board, Error> {
        let mut board = Board::new(self.rows, self.cols)?;
        board.seed(&self.seed)?;
        Ok(board)
    }

    /// Creates the board and starts simulating it on a new thread.
    pub fn spawn(&self) -> Result<Sim, Error> {
        Ok(Sim::spawn(self.board()?, self.tick_interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reference_glider() {
        let board = Config::default().board().unwrap();
        assert_eq!((board.rows(), board.cols()), (19, 19));
        assert_eq!(board.population(), 5);
        assert_eq!(board.is_alive(coord!(0, 1)), Ok(true));
        assert_eq!(board.is_alive(coord!(0, 0)), Ok(false));
    }

    #[test]
    fn seed_outside_board() {
        let config = Config::new(2, 2);
        assert_eq!(config.board(), Err(Error::InvalidSeed(coord!(1, 2))));
    }

    #[test]
    fn bad_dimensions() {
        let config = Config::new(-3, 4).set_seed(std::iter::empty());
        assert_eq!(
            config.board(),
            Err(Error::InvalidDimensions { rows: -3, cols: 4 })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"rows": 8, "cols": 10}"#).unwrap();
        assert_eq!(config, Config::new(8, 10));
    }
}
