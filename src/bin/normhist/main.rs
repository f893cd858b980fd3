#![cfg(feature = "build-binary")]

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use float_pretty_print::PrettyPrintFloat;
use normhist::parse::parse_bin_count;
use normhist::{stats, Bar, Histogram, Session, DEFAULT_BINS, DEFAULT_SAMPLES};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead};
use tracing_subscriber::EnvFilter;

const DATA_ERROR_CODE: i32 = 65;
const IO_ERROR_CODE: i32 = 74;

/// Histogram of normally distributed data
#[derive(Parser, Debug)]
struct Args {
    /// The number of samples to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLES, value_name = "NUMBER")]
    samples: usize,

    /// The number of bins (between 1 and 1000)
    #[arg(short = 'b', long, default_value_t = DEFAULT_BINS, value_name = "NUMBER", value_parser = parse_bin_count)]
    number_of_bins: usize,

    /// Seed of the random number generator, the samples are different on every run if not given
    #[arg(long, value_name = "NUMBER")]
    seed: Option<u64>,

    /// Print JSON of the histogram
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Print the statistics of the samples
    #[arg(short, long, default_value_t = false)]
    statistics: bool,

    /// Don't print the histogram bars
    #[arg(long, default_value_t = false)]
    no_summary: bool,

    /// Maximal width of the histogram bars when displayed
    #[arg(short, long, default_value_t = 40, value_name = "NUMBER")]
    width: u32,

    /// Save the last shown histogram to a file at the given path (MessagePack unless the file extension is .json)
    #[arg(short, long, value_name = "PATH")]
    output_file: Option<String>,

    /// Keep reading the number of bins from stdin, one per line, and redraw the histogram;
    /// invalid numbers are ignored
    #[arg(short, long, default_value_t = false)]
    interactive: bool,
}

/// Write the histogram to a file:
/// * when the file extension is .json (case-insensitive) as a JSON,
/// * otherwise as a MessagePack.
fn write(hist: &Histogram, path: &str) -> Result<(), Box<dyn Error>> {
    let file = &mut File::create(path).map_err(Box::new)?;
    if is_json(path) {
        hist.write_json(file)
    } else {
        hist.write_msgpack(file)
    }
}

fn is_json(path: &str) -> bool {
    path.to_lowercase().ends_with(".json")
}

/// Print JSON for the histogram.
fn print_json(hist: &Histogram) -> Result<(), Box<dyn Error>> {
    let stdout = &mut io::stdout().lock();
    hist.write_json(stdout)?;
    println!();
    Ok(())
}

/// Format the bar label, count, and the bar itself as a string.
fn bar_to_string(bar: &Bar, max_count: u64, label_width: usize, width: u32) -> String {
    debug_assert!(bar.count <= max_count);

    // the maximal width of the bar is given by a command line option
    // it is scaled relatively to the maximum count of the bins
    let relative_count = if max_count == 0 {
        0.0
    } else {
        bar.count as f32 / max_count as f32
    };
    let bar_width = (relative_count * width as f32).round() as usize;
    debug_assert!(bar_width <= width as usize);
    let line = &"■".repeat(bar_width);

    format!("{:>label_width$} {:>8}\t{}", bar.label, bar.count, line)
}

/// Print the histogram as text plot.
fn print_histogram(hist: &Histogram, width: u32) {
    let bars = hist.bars();
    let max_count = hist.max_count();
    let label_width = bars
        .iter()
        .map(|bar| bar.label.chars().count())
        .max()
        .unwrap_or(0);

    println!("{:>label_width$} {:>8}", "range", "count");
    for bar in bars.iter() {
        println!("{}", bar_to_string(bar, max_count, label_width, width));
    }
}

/// Print the summary statistics of the samples.
fn print_statistics(samples: &[f64]) {
    for (name, value) in [
        ("Mean", stats::mean(samples)),
        ("StDev", stats::stdev(samples)),
        ("Min", stats::min(samples)),
        ("Max", stats::max(samples)),
    ] {
        println!("{:14} {:<8.3}", name, PrettyPrintFloat(value));
    }
    println!("{:14} {:<8}", "Sample size", samples.len());
}

/// Show the histogram as requested by the arguments.
fn show(hist: &Histogram, args: &Args) {
    if args.json {
        if let Err(err) = print_json(hist) {
            eprintln!("failed to print JSON: {}", err);
            std::process::exit(IO_ERROR_CODE);
        }
    }
    if !args.no_summary {
        print_histogram(hist, args.width);
    }
}

/// Parse and validate the CLI arguments
fn parse_args() -> Args {
    let args = Args::parse();
    if args.samples < 1 {
        let mut cmd = Args::command();
        cmd.error(ErrorKind::InvalidValue, "at least one sample is needed")
            .exit();
    }
    args
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let args = parse_args();

    let session = Session::generate(args.samples, args.seed);
    tracing::info!(
        samples = args.samples,
        seed = args.seed,
        "generated the samples"
    );

    let mut hist = match session.histogram(args.number_of_bins) {
        Ok(hist) => hist,
        Err(err) => {
            eprintln!("failed to bin the samples: {}", err);
            std::process::exit(DATA_ERROR_CODE);
        }
    };

    if args.statistics {
        print_statistics(session.samples());
    }
    show(&hist, &args);

    if args.interactive {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    eprintln!("failed to read the input: {}", err);
                    std::process::exit(IO_ERROR_CODE);
                }
            };
            // invalid input leaves the current histogram as is
            if let Some(rebinned) = session.rebin(&line) {
                hist = rebinned;
                show(&hist, &args);
            }
        }
    }

    if let Some(path) = args.output_file.as_deref() {
        if let Err(err) = write(&hist, path) {
            eprintln!("failed to write the output: {}", err);
            std::process::exit(IO_ERROR_CODE);
        }
    }
}
