use std::{error::Error, io::stdin, thread};

use golrs::{Sim, Simulator};
use log::info;

mod cli;

pub fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse()?;
    let board = args.config.board()?;
    if args.print {
        println!("{board}");
    }

    let mut simulator = Simulator::new();
    let reports = simulator.subscribe();
    let simulation = Sim::spawn_with(simulator, board, args.config.tick_interval);
    let handle = simulation.handle();

    if args.generations.is_none() {
        let handle = simulation.handle();
        info!("press enter to stop");
        thread::spawn(move || {
            let mut line = String::new();
            match stdin().read_line(&mut line) {
                Ok(0) | Err(_) => info!("stdin closed, running until killed"),
                Ok(_) => handle.stop(),
            }
        });
    }

    // Ends once the simulation thread exits and drops its observers.
    for report in reports {
        if args.print {
            if let Ok(board) = handle.snapshot() {
                println!("generation {}:\n{board}", report.generation);
            }
        }
        if args.generations.is_some_and(|limit| report.generation >= limit) {
            handle.stop();
        }
    }

    let board = simulation.join()?;
    println!("{board}");
    Ok(())
}
