//! Conversion of epoch timestamps to rendered wall-clock lines.
//!
//! [`convert_epoch`] is the reporting core: given an optional epoch value and an optional
//! timezone filter, it renders the timestamp in the zone picked from the filter and in the three
//! fixed reference zones. [`parse_epoch`] validates numeric epoch input at the command-line
//! boundary.

use std::{error, fmt};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::catalog::Catalog;

/// The zones every conversion is rendered in, in output order.
pub const FIXED_ZONES: [Tz; 3] = [Tz::UTC, Tz::America__New_York, Tz::US__Pacific];

/// Rendering format: date, time, zone abbreviation, numeric UTC offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z%z";

/// The error type for invalid numeric epoch input. The rejected text is returned as the payload.
#[derive(PartialEq)]
pub struct InvalidNumber(pub String);

impl fmt::Display for InvalidNumber {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} is not integer or floating", self.0)
	}
}

impl fmt::Debug for InvalidNumber {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl error::Error for InvalidNumber {}

/// Current UTC time as fractional epoch seconds.
pub fn current_epoch() -> f64 {
	let now = Utc::now();
	now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1e9
}

/// Validate a numeric epoch argument.
///
/// Accepts anything that parses as `f64`, plus the literal `"Zero"`: a dual-purpose sentinel
/// meaning "use the current time", kept for compatibility with existing callers rather than
/// redesigned away.
///
/// # Errors
///
/// Returns [`InvalidNumber`] when the text is neither the sentinel nor a floating-point value.
///
/// # Examples
///
/// ```
/// # use zones::convert::parse_epoch;
/// assert_eq!(parse_epoch("123.45").unwrap(), 123.45);
/// assert!(parse_epoch("Zero").unwrap() > 0.0);
/// assert!(parse_epoch("abc").is_err());
/// ```
pub fn parse_epoch(text: &str) -> Result<f64, InvalidNumber> {
	if text == "Zero" {
		return Ok(current_epoch());
	}
	text.parse().map_err(|_| InvalidNumber(text.to_string()))
}

/// Render `epoch` as a wall-clock line in `zone`.
///
/// Fractional seconds are kept for the conversion but truncated in display. Values outside the
/// representable range render as the epoch origin rather than failing.
///
/// # Examples
///
/// ```
/// # use chrono_tz::Tz;
/// # use zones::convert::render;
/// assert_eq!(render(1514821432.0, Tz::UTC), "2018-01-01 15:43:52 UTC+0000");
/// ```
pub fn render(epoch: f64, zone: Tz) -> String {
	let secs = epoch.floor();
	let nanos = ((epoch - secs) * 1e9) as u32;
	DateTime::from_timestamp(secs as i64, nanos)
		.unwrap_or_default()
		.with_timezone(&zone)
		.format(TIMESTAMP_FORMAT)
		.to_string()
}

/// The result of one epoch conversion.
pub struct EpochReport {
	/// The epoch seconds that were rendered.
	pub epoch: f64,
	/// Whether the epoch was read from the system clock rather than supplied.
	pub current: bool,
	/// The rendering in the zone picked from the filter, when a filter was given.
	pub selected: Option<(Tz, String)>,
	/// The renderings in [`FIXED_ZONES`], in the same order.
	pub fixed: [String; 3]
}

/// Convert an epoch value for reporting across timezones.
///
/// If `epoch` is absent the current time is used and flagged in the report. If `filter` is given
/// the catalog picks a zone for an additional rendering. The three [`FIXED_ZONES`] renderings
/// are always produced, so every report carries at least three lines and a fourth when a filter
/// was supplied.
pub fn convert_epoch(catalog: &Catalog, epoch: Option<f64>, filter: Option<&str>) -> EpochReport {
	let (epoch, current) = match epoch {
		Some(e) => (e, false),
		None => (current_epoch(), true)
	};

	let selected = filter.map(|f| {
		let zone = catalog.pick(Some(f));
		(zone, render(epoch, zone))
	});

	EpochReport {
		epoch,
		current,
		selected,
		fixed: FIXED_ZONES.map(|zone| render(epoch, zone))
	}
}
