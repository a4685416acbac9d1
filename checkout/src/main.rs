//! Checkout queue simulation application.
#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use checkout::{
    CustomerId, Departure, Minutes, RunSummary, Simulation, SimulationConfig, Timestamp,
};
use clap::Parser;
use eyre::WrapErr;
use serde::{Deserialize, Serialize};

/// Runs the checkout queue simulation.
#[derive(Parser)]
#[clap(version, author)]
struct Opt {
    /// Path to a JSON file with the simulation configuration.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Maximum gap between two consecutive arrivals, in minutes.
    #[clap(long)]
    max_arrival_gap: Option<Minutes>,

    /// Minimum service time, in minutes.
    #[clap(long)]
    min_service: Option<Minutes>,

    /// Maximum service time, in minutes.
    #[clap(long)]
    max_service: Option<Minutes>,

    /// How long a customer can wait in the queue before a new till is opened for them.
    #[clap(long)]
    wait_threshold: Option<Minutes>,

    /// Seed to use for random number generator.
    #[clap(short, long)]
    seed: Option<u64>,

    /// Number of customers to simulate without the interactive menu.
    #[clap(short, long)]
    customers: Option<usize>,

    /// Arrival time of the first customer in the non-interactive mode.
    #[clap(long, default_value = "08:00")]
    first_arrival: Timestamp,

    /// Write the served customers to this CSV file.
    #[clap(long)]
    customers_output: Option<PathBuf>,

    /// Verbosity.
    #[clap(short, long, parse(from_occurrences))]
    verbose: i32,

    /// Store the logs this file.
    #[clap(long)]
    log_output: Option<PathBuf>,

    /// Do not log to the stderr.
    #[clap(long)]
    no_stderr: bool,
}

impl Opt {
    /// Loads the configuration file, if any, and applies the command line overrides.
    fn simulation_config(&self) -> eyre::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(gap) = self.max_arrival_gap {
            config.max_arrival_gap = gap;
        }
        if let Some(min) = self.min_service {
            config.min_service = min;
        }
        if let Some(max) = self.max_service {
            config.max_service = max;
        }
        if let Some(threshold) = self.wait_threshold {
            config.wait_threshold = Some(threshold);
        }
        config.validate().wrap_err("invalid simulation config")?;
        Ok(config)
    }
}

fn read_config(path: &Path) -> eyre::Result<SimulationConfig> {
    let file = File::open(path)
        .wrap_err_with(|| format!("unable to open config file: {}", path.display()))?;
    serde_json::from_reader(file)
        .wrap_err_with(|| format!("unable to parse config file: {}", path.display()))
}

/// Menu commands. Each can be selected by its number or its name.
#[derive(Debug, Clone, Copy, strum::EnumString)]
enum Command {
    #[strum(serialize = "1", serialize = "add")]
    AddCustomers,
    #[strum(serialize = "2", serialize = "run", serialize = "serve")]
    ServeCustomers,
    #[strum(serialize = "3", serialize = "stats")]
    PrintStatistics,
    #[strum(serialize = "4", serialize = "quit", serialize = "exit")]
    Quit,
}

/// One row of the served customers CSV file.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
struct DepartureRow {
    id: CustomerId,
    arrival: Timestamp,
    service_start: Timestamp,
    departure: Timestamp,
    service_time: Minutes,
    wait: Minutes,
}

impl From<&Departure> for DepartureRow {
    fn from(departure: &Departure) -> Self {
        Self {
            id: departure.id,
            arrival: departure.arrival,
            service_start: departure.service_start,
            departure: departure.departure,
            service_time: departure.service_time,
            wait: departure.wait(),
        }
    }
}

/// Writes served customers to a CSV file as they depart.
struct CustomerWriter(csv::Writer<File>);

impl CustomerWriter {
    fn create(path: &Path) -> eyre::Result<Self> {
        csv::Writer::from_path(path)
            .map(Self)
            .wrap_err_with(|| format!("unable to create {}", path.display()))
    }

    fn write(&mut self, summary: &RunSummary) -> eyre::Result<()> {
        for departure in summary.departures() {
            self.0.serialize(DepartureRow::from(departure))?;
        }
        self.0.flush()?;
        Ok(())
    }
}

/// Interactive front end: reads commands and forwards them to the simulation.
struct Menu<I, O> {
    simulation: Simulation,
    writer: Option<CustomerWriter>,
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Menu<I, O> {
    /// Prints `message` and reads one line. Returns `None` at the end of input.
    fn prompt(&mut self, message: &str) -> eyre::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Keeps asking until the answer parses. Returns `None` at the end of input.
    fn prompt_parse<T>(&mut self, message: &str) -> eyre::Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        while let Some(answer) = self.prompt(message)? {
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(self.output, "Invalid input: {}", err)?,
            }
        }
        Ok(None)
    }

    fn add_customers(&mut self) -> eyre::Result<bool> {
        let count = match self.prompt_parse::<usize>("Number of customers to add: ")? {
            Some(count) => count,
            None => return Ok(false),
        };
        let first_arrival =
            match self.prompt_parse::<Timestamp>("Arrival time of the first customer (HH:MM): ")? {
                Some(time) => time,
                None => return Ok(false),
            };
        for customer in self.simulation.enqueue_arrivals(count, first_arrival) {
            writeln!(
                self.output,
                "Added customer {} arriving at {}",
                customer.id(),
                customer.arrival()
            )?;
        }
        Ok(true)
    }

    fn serve_customers(&mut self) -> eyre::Result<()> {
        let summary = self.simulation.run();
        print_summary(&mut self.output, &summary)?;
        if let Some(writer) = &mut self.writer {
            writer.write(&summary)?;
        }
        Ok(())
    }

    fn print_statistics(&mut self) -> eyre::Result<()> {
        writeln!(self.output, "\nStatistics:\n{}", self.simulation.report())?;
        Ok(())
    }

    fn run(&mut self) -> eyre::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "1. Add customers")?;
            writeln!(self.output, "2. Serve customers")?;
            writeln!(self.output, "3. Print statistics")?;
            writeln!(self.output, "4. Quit")?;
            let answer = match self.prompt("Choose an option: ")? {
                Some(answer) => answer,
                None => return Ok(()),
            };
            match answer.parse::<Command>() {
                Ok(Command::AddCustomers) => {
                    if !self.add_customers()? {
                        return Ok(());
                    }
                }
                Ok(Command::ServeCustomers) => self.serve_customers()?,
                Ok(Command::PrintStatistics) => self.print_statistics()?,
                Ok(Command::Quit) => return Ok(()),
                Err(_) => {
                    log::debug!("Unknown command: {:?}", answer);
                    writeln!(self.output, "Invalid option. Try again.")?;
                }
            }
        }
    }
}

fn print_summary<W: Write>(output: &mut W, summary: &RunSummary) -> io::Result<()> {
    for entry in &summary.log {
        writeln!(output, "{}", entry)?;
    }
    writeln!(
        output,
        "All customers have been served ({} to {}).",
        summary.started, summary.finished
    )
}

/// Set up a logger based on the given user options.
fn set_up_logger(opt: &Opt) -> Result<(), fern::InitError> {
    let log_level = match opt.verbose {
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        3 => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    };
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(log_level);
    let dispatch = if let Some(path) = &opt.log_output {
        let _ = std::fs::remove_file(path);
        dispatch.chain(
            std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .append(false)
                .open(path)?,
        )
    } else {
        dispatch
    };
    let dispatch = if opt.no_stderr {
        dispatch
    } else {
        dispatch.chain(std::io::stderr())
    };
    dispatch.apply()?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt = Opt::parse();
    set_up_logger(&opt)?;
    let config = opt.simulation_config()?;
    let mut simulation = match opt.seed {
        Some(seed) => Simulation::from_seed(config, seed)?,
        None => Simulation::from_entropy(config)?,
    };
    let mut writer = match &opt.customers_output {
        Some(path) => Some(CustomerWriter::create(path)?),
        None => None,
    };
    let stdout = io::stdout();
    if let Some(count) = opt.customers {
        let mut output = stdout.lock();
        simulation.enqueue_arrivals(count, opt.first_arrival);
        let summary = simulation.run();
        print_summary(&mut output, &summary)?;
        writeln!(output, "\nStatistics:\n{}", summary.statistics)?;
        if let Some(writer) = &mut writer {
            writer.write(&summary)?;
        }
        return Ok(());
    }
    let stdin = io::stdin();
    Menu {
        simulation,
        writer,
        input: stdin.lock(),
        output: stdout.lock(),
    }
    .run()
}
