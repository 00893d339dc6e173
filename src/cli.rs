//! Parsing command-line arguments.

use std::{error::Error, fs, path::PathBuf, time::Duration};

use clap::{command, value_parser, Arg, ArgAction, ArgMatches};
use golrs::{pattern, Config};

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) config: Config,
    pub(crate) generations: Option<u64>,
    pub(crate) print: bool,
}

fn matches() -> ArgMatches {
    command!()
        .long_about(
            "Runs Conway's Game of Life on a bounded board.\n\
             \n\
             Seed files are plaintext drawings: one line per row, \
             `#` or `O` for living cells, `.` for dead ones, \
             lines starting with `!` are comments.\n\
             \n\
             Without --generations the simulation runs until a line \
             is read from stdin. If stdin is closed it runs until killed.",
        )
        .arg(
            Arg::new("ROWS")
                .help("Number of rows")
                .index(1)
                .default_value("19")
                .value_parser(value_parser!(i64).range(1..)),
        )
        .arg(
            Arg::new("COLS")
                .help("Number of columns")
                .index(2)
                .default_value("19")
                .value_parser(value_parser!(i64).range(1..)),
        )
        .arg(
            Arg::new("INTERVAL")
                .help("Milliseconds between two generations")
                .short('i')
                .long("interval")
                .default_value("500")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("PATTERN")
                .help("Plaintext file with the initial cells (default: a glider)")
                .short('p')
                .long("pattern")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("GENERATIONS")
                .help("Stop after this many generations")
                .short('g')
                .long("generations")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("PRINT")
                .help("Print the board after every generation")
                .long("print")
                .action(ArgAction::SetTrue),
        )
        .get_matches()
}

impl Args {
    /// Parses the command-line arguments and reads the seed file, if any.
    pub(crate) fn parse() -> Result<Self, Box<dyn Error>> {
        let matches = matches();

        // Defaults come from `default_value` above.
        let rows = matches.get_one::<i64>("ROWS").copied().unwrap_or_default() as isize;
        let cols = matches.get_one::<i64>("COLS").copied().unwrap_or_default() as isize;
        let interval = matches.get_one::<u64>("INTERVAL").copied().unwrap_or_default();

        let mut config =
            Config::new(rows, cols).set_tick_interval(Duration::from_millis(interval));
        if let Some(path) = matches.get_one::<PathBuf>("PATTERN") {
            let text = fs::read_to_string(path)?;
            config = config.set_seed(pattern::parse(&text)?);
        }

        Ok(Args {
            config,
            generations: matches.get_one::<u64>("GENERATIONS").copied(),
            print: matches.get_flag("PRINT"),
        })
    }
}
