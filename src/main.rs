//! Convert epoch time to multiple timezone timestamps.
//!
//! This tool converts between epoch (Unix) timestamps and human-readable timestamps across
//! timezones, and lists available timezone identifiers filtered by substring. Epoch values
//! render in an optional selected timezone plus three fixed reference zones (UTC,
//! America/New_York, US/Pacific); date time strings are detected against a fixed table of
//! formats, localized, and normalized back to epoch seconds.
//!
//! # Command Line Arguments
//!
//! General form: `convtz [options...]`
//!
//! | Short form | Long form         | Argument         | Default      | Description                          |
//! | ---------- | ----------------- | ---------------- | ------------ | ------------------------------------ |
//! | `-e`       | `--epoch`         | Epoch seconds    | Current time | Convert an epoch value               |
//! | `-t`       | `--timestamp`     | Date time string | None         | Parse a date time string and convert |
//! | `-l`       | `--list_timezone` | None             | Off          | List timezones matching `-z`         |
//! | `-z`       | `--zone`          | Substring        | None         | Timezone filter for `-e`, `-t`, `-l` |
//! | `-D`       | `--DEBUG`         | None             | Off          | Print parsed arguments               |
//! | `-v`       | `--version`       | None             |              | Print the version and exit           |
//!
//! The `-z` filter is a plain substring over timezone identifiers, not a regex; the first
//! matching identifier wins, and a filter matching nothing silently falls back to UTC. Without
//! `-z`, `-l` lists US timezones.
//!
//! With no arguments at all, the current epoch time is printed along with its renderings in the
//! three fixed zones. Date time strings that match none of the known formats are reported as the
//! epoch origin rather than rejected.
//!
//! # Examples
//!
//! Show the current time:
//! ```sh
//! convtz
//! ```
//!
//! Convert an epoch value, additionally rendered in the first zone matching "Tokyo":
//! ```sh
//! convtz -e 1514821432 -z Tokyo
//! ```
//!
//! Parse an Apache access log timestamp as US Eastern wall-clock time:
//! ```sh
//! convtz -t "02/May/2016:14:59:39" -z New_York
//! ```
//!
//! List European timezones:
//! ```sh
//! convtz -l -z Europe
//! ```

use std::process::ExitCode;

use args::{Arguments, ArgumentsError};
use zones::catalog::Catalog;
use zones::convert::{convert_epoch, EpochReport};
use zones::parse::parse_timeformat;

mod args;

/// Print one epoch conversion report.
///
/// The current-time echo and the selected-zone rendering only appear when the report carries
/// them; the three fixed-zone lines always print.
fn print_epoch(report: &EpochReport) {
	if report.current {
		println!("(epoch:{})", report.epoch as i64);
	}

	if let Some((zone, line)) = &report.selected {
		println!("Selected Timezone: {}", zone.name());
		println!("{}", line);
		println!("-------------------------");
	}

	for line in &report.fixed {
		println!("{}", line);
	}
}

/// Run the selected operation and print its report.
///
/// Listing takes precedence over `-t`, which takes precedence over `-e`; with no flags the
/// current time is converted. Only the timestamp parser can fail here, everything else falls
/// back to defaults rather than erroring.
fn run(args: Arguments) -> ExitCode {
	let catalog = Catalog::system();

	if args.list {
		for name in catalog.matching(args.zone.as_deref().unwrap_or("US")) {
			println!("{}", name);
		}
	} else if let Some(text) = &args.timestamp {
		let report = match parse_timeformat(&catalog, text, args.zone.as_deref()) {
			Ok(r) => r,
			Err(e) => {
				eprintln!("{}", e);
				return ExitCode::FAILURE;
			}
		};

		if report.fallback {
			println!("Couldn't parse the timestamp. Showing epoch time zero.");
		}
		println!("Selected Timezone: {}", report.zone.name());
		println!("{} (epoch:{})", report.localized, report.epoch);
		println!("-------------------------");
		print_epoch(&report.conversion);
	} else {
		print_epoch(&convert_epoch(&catalog, args.epoch, args.zone.as_deref()));
	}

	ExitCode::SUCCESS
}

/// Main program entry point.
///
/// Parses input arguments and reports the converted timestamps. See [`crate`] documentation for
/// details.
fn main() -> ExitCode {
	let args = match Arguments::parse(std::env::args_os().skip(1)) {
		Ok(a) => a,
		Err(e) => {
			return match e {
				ArgumentsError::Help => {
					println!("\
Convert epoch time to multiple timezone timestamps.

Usage: convtz [OPTIONS]

Options:
  -e, --epoch [EPOCH]         an epoch time to convert, defaults to the current time
  -t, --timestamp [TIMESTAMP] a date time string to parse and convert
  -l, --list_timezone         print available timezones; without -z this lists US timezones
  -z, --zone <FILTER>         a substring to pick a timezone for -e, -t, or -l. Not regex
  -D, --DEBUG                 print parsed arguments
  -v, --version               print the version
  -h                          print this help

Examples:
  convtz -e 1514821432 -z Tokyo
  convtz -t \"2018-01-01 15:43:52\" -z New_York
  convtz -l -z Europe\n");
					ExitCode::SUCCESS
				},
				ArgumentsError::Version => {
					println!("convtz {}", env!("CARGO_PKG_VERSION"));
					ExitCode::SUCCESS
				},
				_ => {
					eprintln!("{}", e);
					ExitCode::FAILURE
				}
			}
		}
	};

	if args.debug {
		println!("Parsed Args: {:?}", args);
	}

	run(args)
}
