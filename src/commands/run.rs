//! Run command implementation
//!
//! Feeds raw samples from a file or stdin through the monitor.

use crate::alerts::{NotificationManager, TerminalNotifier};
use crate::cli::args::{OutputFormat, RunArgs};
use crate::cli::output::print_output;
use crate::clock::{Clock, ManualClock, SystemClock};
use crate::config::Config;
use crate::error::Result;
use crate::sensor::{ReplaySource, SampleSource};
use crate::services::{Engine, NoiseMonitor};

use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// Execute the run command
pub fn run_monitor(args: &RunArgs, config: Config, format: OutputFormat) -> Result<()> {
    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(&args.input)?))
    };

    let mut source = ReplaySource::new(reader, args.input.as_str());
    if args.lenient {
        source = source.lenient();
    }

    log::debug!(
        "Sampling every {}ms ({} clock)",
        config.timing.sample_interval_ms,
        if args.realtime { "wall" } else { "simulated" }
    );

    let engine = Engine::new(config);
    if args.realtime {
        drive(engine, source, SystemClock::new(), args, format)
    } else {
        drive(engine, source, ManualClock::new(0), args, format)
    }
}

fn drive<S: SampleSource, C: Clock>(
    engine: Engine,
    source: S,
    clock: C,
    args: &RunArgs,
    format: OutputFormat,
) -> Result<()> {
    let mut notifier = NotificationManager::new();
    notifier.add_notifier(Box::new(if args.quiet {
        TerminalNotifier::quiet()
    } else {
        TerminalNotifier::new()
    }));

    let mut monitor = NoiseMonitor::new(engine, source, clock)
        .with_notifier(notifier)
        .with_top_monitors(args.top);
    let summary = monitor.run(args.max_samples)?;

    print_output(&summary, format)?;
    Ok(())
}
