mod os_signal_interrupt;
mod result;

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use log::error;
use log::info;
use log::warn;
use result::SolverError;
use result::SolverResult;
use timeslot_solver::ScheduleRequest;
use timeslot_solver::Scheduler;
use timeslot_solver::SchedulerOptions;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    version,
    about
)]
struct Args {
    /// The scheduling request, a JSON file with the keys
    ///  - 'events': the candidate tasks,
    ///  - 'reservedIntervals': time windows no task may overlap,
    ///  - 'reservedTags': time windows only tasks sharing one of their tags may overlap,
    ///  - 'start': the earliest start time of every task.
    ///
    /// When absent or '-', the request is read from standard input.
    #[clap(verbatim_doc_comment)]
    request_path: Option<PathBuf>,

    /// The time budget of each of the two optimisation phases, given in milliseconds.
    ///
    /// When the budget runs out the best schedule found so far is reported.
    ///
    /// Possible values: u64 (Optional)
    #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// Enables logging of the request summary, the model size and the result of each
    /// optimisation phase. Log messages are written to standard error.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// If `--verbose` is enabled then this option removes the timestamp information from the log
    /// messages.
    ///
    /// Possible values: bool
    #[arg(long = "omit-timestamp", verbatim_doc_comment)]
    omit_timestamp: bool,

    /// Pretty-print the resulting schedule.
    ///
    /// Possible values: bool
    #[arg(long = "pretty", verbatim_doc_comment)]
    pretty: bool,
}

fn configure_logging(verbose: bool, omit_timestamp: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            if !omit_timestamp {
                write!(buf, "{} ", buf.timestamp())?;
            }

            writeln!(buf, "{:<5} {}", record.level(), record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> SolverResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.omit_timestamp);

    let request_path = args
        .request_path
        .as_deref()
        .filter(|path| *path != Path::new("-"));
    let request = read_request(request_path)?;

    let options = SchedulerOptions {
        time_limit: args.time_limit.map(Duration::from_millis),
        interrupt: Some(os_signal_interrupt::install()?),
    };

    let schedule = Scheduler::new(options).schedule(&request)?;
    if !schedule.found {
        warn!("No schedule found for the {} tasks", request.tasks.len());
    }

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    if args.pretty {
        serde_json::to_writer_pretty(&mut stdout, &schedule).map_err(SolverError::Output)?;
    } else {
        serde_json::to_writer(&mut stdout, &schedule).map_err(SolverError::Output)?;
    }
    writeln!(stdout)?;

    Ok(())
}

fn read_request(path: Option<&Path>) -> SolverResult<ScheduleRequest> {
    let reader: Box<dyn Read> = match path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(std::io::stdin().lock()),
    };

    let request = serde_json::from_reader(reader)
        .map_err(|error| SolverError::invalid_request(path, error))?;
    Ok(request)
}
