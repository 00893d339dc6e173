use std::{
    collections::HashSet,
    sync::mpsc::{self, RecvTimeoutError},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use log::{debug, error, info};
use metrohash::MetroBuildHasher;

use crate::{Board, Coord, Error};

type CoordSet = HashSet<Coord, MetroBuildHasher>;

/// The changes one generation makes to a board.
///
/// Both sets are derived from a single read-only pass over the board, so no
/// cell's fate depends on another cell's next state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transition {
    to_deactivate: CoordSet,
    to_activate: CoordSet,
}

impl Transition {
    pub fn compute(board: &Board) -> Result<Self, Error> {
        let mut transition = Self::default();
        for coord in board.coords() {
            match board.alive_neighbor_count(coord)? {
                count if count < 2 || count > 3 => transition.to_deactivate.insert(coord),
                3 => transition.to_activate.insert(coord),
                _ => false, // two neighbors: unchanged
            };
        }
        Ok(transition)
    }

    pub fn to_deactivate(&self) -> &CoordSet {
        &self.to_deactivate
    }

    pub fn to_activate(&self) -> &CoordSet {
        &self.to_activate
    }

    /// Writes the transition to `board`, returning `(births, deaths)`.
    ///
    /// Nothing is written unless every coordinate is on the board.
    pub fn apply(self, board: &mut Board) -> Result<(usize, usize), Error> {
        if let Some(&bad) = self
            .to_deactivate
            .iter()
            .chain(self.to_activate.iter())
            .find(|&&c| !board.contains(c))
        {
            return Err(Error::OutOfBounds(bad));
        }

        let (mut births, mut deaths) = (0, 0);
        for coord in self.to_deactivate {
            if board.is_alive(coord)? {
                deaths += 1;
                board.set_alive(coord, false)?;
            }
        }
        for coord in self.to_activate {
            if !board.is_alive(coord)? {
                births += 1;
                board.set_alive(coord, true)?;
            }
        }
        Ok((births, deaths))
    }
}

/// Summary of one completed generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub generation: u64,
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
}

impl StepReport {
    /// Whether the step left the board unchanged.
    pub fn is_still(&self) -> bool {
        self.births == 0 && self.deaths == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Idle,
    Running,
    Stopped,
}

/// What a wait between two steps ended with.
enum Wake {
    Tick,
    Cancel,
}

/// Applies the Life rule to a board, one generation at a time.
#[derive(Debug)]
pub struct Simulator {
    state: SimState,
    generation: u64,
    observers: Vec<mpsc::Sender<StepReport>>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self {
            state: SimState::Idle,
            generation: 0,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Number of generations completed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns a receiver notified after every completed step.
    pub fn subscribe(&mut self) -> mpsc::Receiver<StepReport> {
        let (sender, receiver) = mpsc::channel();
        self.observers.push(sender);
        receiver
    }

    fn add_observer(&mut self, sender: mpsc::Sender<StepReport>) {
        self.observers.push(sender);
    }

    /// Advances `board` by one generation.
    ///
    /// Classification reads only the pre-step board; the result is then
    /// applied as a whole.
    pub fn step(&mut self, board: &mut Board) -> Result<StepReport, Error> {
        if self.state == SimState::Stopped {
            return Err(Error::AlreadyRun);
        }
        let (births, deaths) = Transition::compute(board)?.apply(board)?;
        self.generation += 1;

        let report = StepReport {
            generation: self.generation,
            births,
            deaths,
            population: board.population(),
        };
        debug!(
            "generation {}: +{} -{} ({} alive)",
            report.generation, report.births, report.deaths, report.population
        );
        self.observers
            .retain(|observer| observer.send(report).is_ok());
        Ok(report)
    }

    /// Steps `board` exactly `generations` times without pacing.
    pub fn run_for(&mut self, board: &mut Board, generations: u64) -> Result<(), Error> {
        for _ in 0..generations {
            self.step(board)?;
        }
        Ok(())
    }

    /// Steps `board` every `tick_interval` until `cancel` receives a message
    /// or its sender is dropped.
    ///
    /// Cancellation returns `Ok`. A failing step stops the simulator and
    /// returns the error. Either way the simulator ends up stopped.
    pub fn run(
        &mut self,
        board: &mut Board,
        tick_interval: Duration,
        cancel: &mpsc::Receiver<()>,
    ) -> Result<(), Error> {
        self.drive(board, tick_interval, |_, _, deadline| {
            let timeout = deadline.saturating_duration_since(Instant::now());
            match cancel.recv_timeout(timeout) {
                Err(RecvTimeoutError::Timeout) => Wake::Tick,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => Wake::Cancel,
            }
        })
    }

    fn drive<F>(&mut self, board: &mut Board, tick_interval: Duration, mut wait: F) -> Result<(), Error>
    where
        F: FnMut(&mut Self, &Board, Instant) -> Wake,
    {
        if self.state != SimState::Idle {
            return Err(Error::AlreadyRun);
        }
        self.state = SimState::Running;
        info!(
            "running {}x{} board every {:?}",
            board.rows(),
            board.cols(),
            tick_interval
        );

        let mut was_still = false;
        loop {
            match self.step(board) {
                Ok(report) => {
                    if report.is_still() && !was_still {
                        info!("board is still at generation {}", report.generation);
                    }
                    was_still = report.is_still();
                }
                Err(err) => {
                    error!("generation {} failed: {err}", self.generation + 1);
                    self.state = SimState::Stopped;
                    return Err(err);
                }
            }

            let deadline = Instant::now() + tick_interval;
            if let Wake::Cancel = wait(self, board, deadline) {
                break;
            }
        }

        info!("cancelled after {} generations", self.generation);
        self.state = SimState::Stopped;
        Ok(())
    }
}

enum SimCmd {
    Snapshot(mpsc::Sender<Board>),
    Subscribe(mpsc::Sender<StepReport>),
    Stop,
}

/// A cloneable handle to a running [`Sim`].
#[derive(Clone)]
pub struct SimHandle {
    sender: mpsc::Sender<SimCmd>,
}

impl SimHandle {
    /// A copy of the board as of the last completed generation.
    pub fn snapshot(&self) -> Result<Board, Error> {
        let (sender, receiver) = mpsc::channel();
        self.sender
            .send(SimCmd::Snapshot(sender))
            .map_err(|_| Error::SimulatorGone)?;
        receiver.recv().map_err(|_| Error::SimulatorGone)
    }

    /// Receives a report after every completed generation.
    pub fn subscribe(&self) -> Result<mpsc::Receiver<StepReport>, Error> {
        let (sender, receiver) = mpsc::channel();
        self.sender
            .send(SimCmd::Subscribe(sender))
            .map_err(|_| Error::SimulatorGone)?;
        Ok(receiver)
    }

    /// Asks the simulation to stop. Stopping a finished simulation does nothing.
    pub fn stop(&self) {
        let _ = self.sender.send(SimCmd::Stop);
    }
}

/// A [`Simulator`] running on its own thread and owning its board.
///
/// The board is only ever touched by that thread; observers get copies
/// taken between two generations.
pub struct Sim {
    thread: JoinHandle<Result<Board, Error>>,
    sender: mpsc::Sender<SimCmd>,
}

impl Sim {
    pub fn spawn(board: Board, tick_interval: Duration) -> Self {
        Self::spawn_with(Simulator::new(), board, tick_interval)
    }

    /// Runs an existing simulator, keeping the observers it already has.
    pub fn spawn_with(simulator: Simulator, board: Board, tick_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let thread = thread::spawn(move || sim_loop(receiver, simulator, board, tick_interval));
        Self { thread, sender }
    }

    pub fn handle(&self) -> SimHandle {
        let sender = self.sender.clone();
        SimHandle { sender }
    }

    pub fn stop(&self) {
        self.handle().stop()
    }

    /// See [`SimHandle::subscribe`]. Generations completed before the call
    /// are not reported.
    pub fn subscribe(&self) -> Result<mpsc::Receiver<StepReport>, Error> {
        self.handle().subscribe()
    }

    /// Waits for the simulation to end and returns the final board.
    ///
    /// Joining gives up this `Sim`'s own sender, so when no [`SimHandle`] is
    /// left the simulation stops at its next wait. Otherwise it runs until a
    /// handle calls [`SimHandle::stop`] or every handle is dropped.
    pub fn join(self) -> Result<Board, Error> {
        let Self { thread, sender } = self;
        drop(sender);
        match thread.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

fn sim_loop(
    receiver: mpsc::Receiver<SimCmd>,
    simulator: Simulator,
    board: Board,
    tick_interval: Duration,
) -> Result<Board, Error> {
    let mut board = board;
    let mut simulator = simulator;

    simulator.drive(&mut board, tick_interval, |simulator, board, deadline| loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        match receiver.recv_timeout(timeout) {
            Ok(SimCmd::Snapshot(sender)) => {
                let _ = sender.send(board.clone());
            }
            Ok(SimCmd::Subscribe(sender)) => simulator.add_observer(sender),
            Ok(SimCmd::Stop) | Err(RecvTimeoutError::Disconnected) => return Wake::Cancel,
            Err(RecvTimeoutError::Timeout) => return Wake::Tick,
        }
    })?;
    Ok(board)
}
