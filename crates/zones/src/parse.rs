//! Detection and parsing of loosely-formatted date-time strings.
//!
//! Free-form input is matched against a fixed, ordered table of timestamp formats
//! ([`TIME_FORMATS`]); the first matching entry wins. Each detector matches only a prefix of the
//! input, so trailing fractional seconds or log noise are ignored. Input matching no entry is
//! substituted with the epoch origin rather than rejected.
//!
//! # Examples
//!
//! ```
//! # use zones::catalog::Catalog;
//! # use zones::parse::parse_timeformat;
//! let catalog = Catalog::system();
//! let report = parse_timeformat(&catalog, "2018-01-01 15:43:52", None).unwrap();
//! assert_eq!(report.epoch, 1514821432);
//! assert_eq!(report.localized, "2018-01-01 15:43:52 UTC+0000");
//! ```

use std::{error, fmt};
use std::sync::LazyLock;
use chrono::{LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use regex::Regex;

use crate::catalog::Catalog;
use crate::convert::{self, EpochReport, TIMESTAMP_FORMAT};

/// One accepted textual timestamp format: a detection pattern and its parse template.
pub struct TimeFormat {
	/// Anchored regex matching a prefix of the input; group 1 is the parseable text.
	pub pattern: &'static str,
	/// strftime template used to parse the captured text.
	pub template: &'static str
}

/// The accepted timestamp formats, checked top to bottom. First match wins.
///
/// Month abbreviations (`%b`) are the fixed English table (Jan, Feb, ...), independent of
/// locale.
pub const TIME_FORMATS: [TimeFormat; 7] = [
	// Dec 18, 2018 15:43:52
	TimeFormat {
		pattern: r"^(\w{3}\s\d{2},\s\d{4}\s\d{1,2}:\d{1,2}:\d{1,2})",
		template: "%b %d, %Y %H:%M:%S"
	},
	// 2018-01-01 15:43:52
	TimeFormat {
		pattern: r"^(\d{4}-\d{2}-\d{2}\s\d{1,2}:\d{1,2}:\d{1,2})",
		template: "%Y-%m-%d %H:%M:%S"
	},
	// 2018-01-01:15:43:52
	TimeFormat {
		pattern: r"^(\d{4}-\d{2}-\d{2}:\d{1,2}:\d{1,2}:\d{1,2})",
		template: "%Y-%m-%d:%H:%M:%S"
	},
	// 2018-01-01T15:43:52
	TimeFormat {
		pattern: r"^(\d{4}-\d{2}-\d{2}T\d{1,2}:\d{1,2}:\d{1,2})",
		template: "%Y-%m-%dT%H:%M:%S"
	},
	// 2018/01/01 15:43:52
	TimeFormat {
		pattern: r"^(\d{4}/\d{2}/\d{2}\s\d{1,2}:\d{1,2}:\d{1,2})",
		template: "%Y/%m/%d %H:%M:%S"
	},
	// 01/31/2018 15:43:52
	TimeFormat {
		pattern: r"^(\d{2}/\d{2}/\d{4}\s\d{1,2}:\d{1,2}:\d{1,2})",
		template: "%m/%d/%Y %H:%M:%S"
	},
	// 02/May/2016:14:59:39 (Apache access log)
	TimeFormat {
		pattern: r"^(\d{2}/\w{3}/\d{4}:\d{1,2}:\d{1,2}:\d{1,2})",
		template: "%d/%b/%Y:%H:%M:%S"
	}
];

/// Substitute timestamp when no format matches: the epoch origin.
pub const FALLBACK_TIMESTAMP: &str = "1970-01-01 00:00:00";

/// Template for [`FALLBACK_TIMESTAMP`].
const FALLBACK_TEMPLATE: &str = "%Y-%m-%d %H:%M:%S";

/// Compiled detection patterns, in [`TIME_FORMATS`] order.
static DETECTORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
	// The patterns are fixed literals, so compilation cannot fail
	TIME_FORMATS.iter().map(|f| Regex::new(f.pattern).unwrap()).collect()
});

/// The error type for parsing date-time strings.
#[derive(PartialEq)]
pub enum ParseError {
	/// A format matched but its fields do not form a valid calendar date-time. The underlying
	/// error is returned as the payload of this variant.
	InvalidFields(chrono::ParseError),
	/// The wall-clock time falls in a daylight savings gap and does not exist in the resolved
	/// timezone.
	SkippedTime
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ParseError::InvalidFields(e) => write!(f, "Invalid date time fields: {}", e),
			ParseError::SkippedTime => write!(f, "Time does not exist in the selected timezone")
		}
	}
}

impl fmt::Debug for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl error::Error for ParseError {}

/// Detect which format a date-time string uses.
///
/// Checks [`TIME_FORMATS`] in order and returns the first match: the captured prefix of `text`
/// and the template to parse it with. Returns `None` when no format matches.
///
/// # Examples
///
/// ```
/// # use zones::parse::detect_format;
/// let (text, template) = detect_format("Dec 18, 2018 15:43:52.504364000").unwrap();
/// assert_eq!(text, "Dec 18, 2018 15:43:52");
/// assert_eq!(template, "%b %d, %Y %H:%M:%S");
/// assert_eq!(detect_format("not a date"), None);
/// ```
pub fn detect_format(text: &str) -> Option<(&str, &'static str)> {
	for (format, detector) in TIME_FORMATS.iter().zip(DETECTORS.iter()) {
		if let Some(found) = detector.captures(text).and_then(|c| c.get(1)) {
			return Some((found.as_str(), format.template));
		}
	}
	None
}

/// The result of parsing one date-time string.
pub struct ParseReport {
	/// The zone the input was interpreted in.
	pub zone: Tz,
	/// Whether no format matched and the epoch-origin fallback was substituted.
	pub fallback: bool,
	/// The localized input rendered with zone abbreviation and offset.
	pub localized: String,
	/// Epoch seconds for the parsed time.
	pub epoch: i64,
	/// The parsed time rendered across the fixed zones.
	pub conversion: EpochReport
}

/// Parse a free-form date-time string and convert it to epoch time.
///
/// The input is matched against [`TIME_FORMATS`]. Input matching no format is substituted with
/// [`FALLBACK_TIMESTAMP`] and flagged in the report instead of rejected. The parsed wall-clock
/// time is interpreted in the zone picked from `filter` (UTC when absent or unmatched),
/// converted to epoch seconds, and additionally rendered across the fixed zones.
///
/// Wall-clock times that are ambiguous in the resolved zone (daylight savings fall-back) read as
/// standard time.
///
/// # Errors
///
/// Returns [`ParseError::InvalidFields`] if a format matched but the fields are not a real
/// date-time (for example a 99th day of the month), and [`ParseError::SkippedTime`] if the
/// wall-clock time falls in a daylight savings gap of the resolved zone.
///
/// # Examples
///
/// ```
/// # use zones::catalog::Catalog;
/// # use zones::parse::parse_timeformat;
/// let catalog = Catalog::system();
/// let report = parse_timeformat(&catalog, "2018-01-01 15:43:52", Some("New_York")).unwrap();
/// assert_eq!(report.zone.name(), "America/New_York");
/// assert_eq!(report.localized, "2018-01-01 15:43:52 EST-0500");
/// assert_eq!(report.epoch, 1514839432);
/// ```
pub fn parse_timeformat(catalog: &Catalog, text: &str, filter: Option<&str>)
	-> Result<ParseReport, ParseError>
{
	let (datetime, template, fallback) = match detect_format(text) {
		Some((t, f)) => (t, f, false),
		None => (FALLBACK_TIMESTAMP, FALLBACK_TEMPLATE, true)
	};

	let zone = catalog.pick(filter);
	let naive = NaiveDateTime::parse_from_str(datetime, template)
		.map_err(ParseError::InvalidFields)?;

	let localized = match zone.from_local_datetime(&naive) {
		LocalResult::Single(dt) => dt,
		// Ambiguous wall times read as standard time
		LocalResult::Ambiguous(_, standard) => standard,
		LocalResult::None => return Err(ParseError::SkippedTime)
	};

	let epoch = localized.timestamp();
	Ok(ParseReport {
		zone,
		fallback,
		localized: localized.format(TIMESTAMP_FORMAT).to_string(),
		epoch,
		conversion: convert::convert_epoch(catalog, Some(epoch as f64), None)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::convert::render;

	#[test]
	fn detect_format_test() {
		// Each format, in table order
		assert_eq!(
			detect_format("Dec 18, 2018 15:43:52.504364000"),
			Some(("Dec 18, 2018 15:43:52", "%b %d, %Y %H:%M:%S"))
		);
		assert_eq!(
			detect_format("2018-01-01 15:43:52"),
			Some(("2018-01-01 15:43:52", "%Y-%m-%d %H:%M:%S"))
		);
		assert_eq!(
			detect_format("2018-01-01:15:43:52"),
			Some(("2018-01-01:15:43:52", "%Y-%m-%d:%H:%M:%S"))
		);
		assert_eq!(
			detect_format("2018-01-01T15:43:52"),
			Some(("2018-01-01T15:43:52", "%Y-%m-%dT%H:%M:%S"))
		);
		assert_eq!(
			detect_format("2018/01/01 15:43:52"),
			Some(("2018/01/01 15:43:52", "%Y/%m/%d %H:%M:%S"))
		);
		assert_eq!(
			detect_format("02/01/2018 15:43:52"),
			Some(("02/01/2018 15:43:52", "%m/%d/%Y %H:%M:%S"))
		);
		assert_eq!(
			detect_format("02/May/2016:14:59:39 -0700"),
			Some(("02/May/2016:14:59:39", "%d/%b/%Y:%H:%M:%S"))
		);

		// Trailing text is ignored, a missing time of day is not
		assert_eq!(
			detect_format("2018-01-01 15:43:52 and then some"),
			Some(("2018-01-01 15:43:52", "%Y-%m-%d %H:%M:%S"))
		);
		assert_eq!(detect_format("2018-01-01"), None);
		assert_eq!(detect_format("not a date"), None);
		assert_eq!(detect_format(""), None);
	}

	#[test]
	fn parse_timeformat_test() {
		let catalog = Catalog::system();
		// One exact epoch per format, all read as UTC
		for (text, epoch) in [
			("Dec 18, 2018 15:43:52.504364000", 1545147832),
			("2018-01-01 15:43:52", 1514821432),
			("2018-01-01:15:43:52", 1514821432),
			("2018-01-01T15:43:52", 1514821432),
			("2018/01/01 15:43:52", 1514821432),
			("01/01/2018 15:43:52", 1514821432),
			("02/May/2016:14:59:39", 1462201179)
		] {
			let report = parse_timeformat(&catalog, text, None).unwrap();
			assert_eq!(report.epoch, epoch, "input: {}", text);
			assert_eq!(report.zone, Tz::UTC);
			assert!(!report.fallback);
		}
	}

	#[test]
	fn parse_timeformat_zones_test() {
		let catalog = Catalog::system();
		let report = parse_timeformat(&catalog, "2018-01-01 15:43:52", Some("New_York")).unwrap();
		assert_eq!(report.zone, Tz::America__New_York);
		assert_eq!(report.epoch, 1514839432);
		assert_eq!(report.localized, "2018-01-01 15:43:52 EST-0500");
		// The follow-on conversion reuses the computed epoch with no filter
		assert_eq!(report.conversion.epoch, 1514839432.0);
		assert!(report.conversion.selected.is_none());
		assert!(!report.conversion.current);
		assert_eq!(report.conversion.fixed[0], "2018-01-01 20:43:52 UTC+0000");

		// Unresolvable filters read the input as UTC
		let report = parse_timeformat(&catalog, "2018-01-01 15:43:52", Some("Mars")).unwrap();
		assert_eq!(report.zone, Tz::UTC);
		assert_eq!(report.epoch, 1514821432);
	}

	#[test]
	fn parse_timeformat_fallback_test() {
		let catalog = Catalog::system();
		let report = parse_timeformat(&catalog, "not a date", None).unwrap();
		assert!(report.fallback);
		assert_eq!(report.epoch, 0);
		assert_eq!(report.localized, "1970-01-01 00:00:00 UTC+0000");

		// The substitute timestamp is still localized in the resolved zone
		let report = parse_timeformat(&catalog, "not a date", Some("New_York")).unwrap();
		assert!(report.fallback);
		assert_eq!(report.epoch, 18000);
		assert_eq!(report.localized, "1970-01-01 00:00:00 EST-0500");
	}

	#[test]
	fn parse_timeformat_error_test() {
		let catalog = Catalog::system();
		// A matched format with impossible fields is a hard error, not a fallback
		assert!(matches!(
			parse_timeformat(&catalog, "2018-02-99 10:00:00", None),
			Err(ParseError::InvalidFields(_))
		));

		// Spring-forward skips 02:30 entirely
		assert!(matches!(
			parse_timeformat(&catalog, "2018-03-11 02:30:00", Some("New_York")),
			Err(ParseError::SkippedTime)
		));
	}

	#[test]
	fn parse_timeformat_ambiguous_test() {
		let catalog = Catalog::system();
		// Fall-back makes 01:30 occur twice; it reads as standard time
		let report = parse_timeformat(&catalog, "2018-11-04 01:30:00", Some("New_York")).unwrap();
		assert_eq!(report.epoch, 1541313000);
		assert_eq!(report.localized, "2018-11-04 01:30:00 EST-0500");
	}

	#[test]
	fn round_trip_test() {
		let catalog = Catalog::system();
		// Formatting in a zone and parsing the result back reproduces the epoch
		for (epoch, filter) in [
			(1514821432.0, "UTC"),
			(1545147832.0, "New_York"),
			(1530459832.0, "US/Pacific"),
			(1462201179.0, "Tokyo")
		] {
			let zone = catalog.pick(Some(filter));
			let formatted = render(epoch, zone);
			let report = parse_timeformat(&catalog, &formatted, Some(filter)).unwrap();
			assert_eq!(report.epoch as f64, epoch, "zone: {}", zone.name());
		}
	}
}
