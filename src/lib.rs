//! Conway's Game of Life on a fixed-size bounded board.
//!
//! A [`Board`] stores the cells, a [`Simulator`] advances it one generation
//! at a time, and a [`Sim`] paces a simulator on its own thread until it is
//! told to stop.

pub use utils::Coord;
mod utils;

pub use error::Error;
pub mod error;

pub use board::{Board, Cell};
mod board;

pub use sim::{Sim, SimHandle, SimState, Simulator, StepReport, Transition};
mod sim;

pub use config::Config;
mod config;

pub mod pattern;
