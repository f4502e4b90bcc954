//! Support for command line argument parsing.
//!
//! See [crate] documentation for details on command line arguments and examples.

use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Debug};
use std::iter::Peekable;
use zones::convert::{parse_epoch, InvalidNumber};

/// The error type for parsing command line arguments.
#[cfg_attr(test, derive(PartialEq))]
pub enum ArgumentsError {
	/// The option was unrecognized. The option is returned as the payload of this variant.
	UnrecognizedOption(String),
	/// Error converting an option or parameter to UTF-8. The argument index and original
	/// [`OsString`] that could not be converted are returned as the payload of this variant.
	InvalidUTF8(usize, OsString),
	/// The parameter for an option was not supplied. The option is returned as the payload for
	/// this variant.
	MissingParameter(String),
	/// The parameter for `-e` was not a number. The underlying validation error is returned as
	/// the payload for this variant.
	InvalidEpoch(InvalidNumber),
	/// Help option (-h) was included, so print help details and exit.
	Help,
	/// Version option (-v) was included, so print the version and exit.
	Version
}

impl Display for ArgumentsError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ArgumentsError::UnrecognizedOption(s) => write!(f, "Unrecognized option: {}", s),
			ArgumentsError::InvalidUTF8(i, v) => write!(f, "Invalid UTF-8 in argument {}: {:?}", i, v),
			ArgumentsError::MissingParameter(s) => write!(f, "Missing parameter for option {}", s),
			ArgumentsError::InvalidEpoch(e) => write!(f, "Invalid epoch: {}", e),
			ArgumentsError::Help => write!(f, "Help requested"),
			ArgumentsError::Version => write!(f, "Version requested")
		}
	}
}

impl Debug for ArgumentsError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		Display::fmt(self, f)
	}
}

impl Error for ArgumentsError {}

/// Take the next argument as an option's parameter, unless it looks like another option.
///
/// Returns `Ok(None)` if the iterator is exhausted or the next argument begins with `-`.
///
/// # Errors
///
/// Returns [`ArgumentsError::InvalidUTF8`] if the consumed parameter could not be converted to
/// UTF-8.
fn optional_param(args: &mut Peekable<impl Iterator<Item = OsString>>, i: &mut usize)
	-> Result<Option<String>, ArgumentsError>
{
	let take = match args.peek() {
		Some(v) => !v.as_encoded_bytes().starts_with(b"-"),
		None => false
	};
	if !take {
		return Ok(None);
	}

	// Unwrap can't fail, peek above returned Some
	let v = args.next().unwrap();
	*i += 1;
	match v.to_str() {
		Some(s) => Ok(Some(s.to_string())),
		None => Err(ArgumentsError::InvalidUTF8(*i, v))
	}
}

/// Parsed command line arguments.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Arguments {
	/// The epoch value to convert (`-e`), resolved to the current time when given bare.
	pub epoch: Option<f64>,
	/// The date time string to parse (`-t`), `"Zero"` when given bare.
	pub timestamp: Option<String>,
	/// Whether to list timezones (`-l`).
	pub list: bool,
	/// The timezone substring filter (`-z`).
	pub zone: Option<String>,
	/// Whether to print the parsed arguments before dispatching (`-D`).
	pub debug: bool
}

impl Arguments {
	/// Parse command line arguments.
	///
	/// The input can be any type that implements [`Iterator`] that yields [`OsString`], though
	/// typically this would be [`std::env::args_os`]. This function assumes that the application
	/// name is **not** supplied as the first item yielded by `args`.
	///
	/// The parameters to `-e` and `-t` are optional: a following token is only consumed when it
	/// does not begin with `-`. A bare `-e` converts the current time; a bare `-t` passes the
	/// literal string "Zero" through the timestamp parser.
	///
	/// # Errors
	///
	/// This function can return any of the variants in [`ArgumentsError`]. See that
	/// documentation for more details.
	///
	/// # Examples
	///
	/// ```
	/// let args = match Arguments::parse(std::env::args_os().skip(1)) {
	/// 	Ok(a) => a,
	/// 	Err(e) => {
	/// 		// Handle error
	/// 		panic!("{}", e);
	/// 	}
	/// };
	/// ```
	pub fn parse(args: impl Iterator<Item = OsString>) -> Result<Arguments, ArgumentsError> {
		let mut args = args.peekable();
		let mut parsed = Arguments {
			epoch: None,
			timestamp: None,
			list: false,
			zone: None,
			debug: false
		};
		let mut i = 0;
		while let Some(arg) = args.next() {
			match arg.to_str().ok_or_else(|| ArgumentsError::InvalidUTF8(i, arg.clone()))? {
				"-e" | "--epoch" => {
					let value = optional_param(&mut args, &mut i)?;
					parsed.epoch = Some(
						parse_epoch(value.as_deref().unwrap_or("Zero"))
							.map_err(ArgumentsError::InvalidEpoch)?
					);
				},
				"-t" | "--timestamp" => {
					let value = optional_param(&mut args, &mut i)?;
					parsed.timestamp = Some(value.unwrap_or_else(|| String::from("Zero")));
				},
				"-l" | "--list_timezone" => parsed.list = true,
				z @ ("-z" | "--zone") => {
					match optional_param(&mut args, &mut i)? {
						Some(v) => parsed.zone = Some(v),
						None => return Err(ArgumentsError::MissingParameter(z.to_string()))
					}
				},
				"-D" | "--DEBUG" => parsed.debug = true,
				"-v" | "--version" => return Err(ArgumentsError::Version),
				"-h" => return Err(ArgumentsError::Help),
				v => return Err(ArgumentsError::UnrecognizedOption(v.to_string()))
			}
			i += 1;
		}

		Ok(parsed)
	}
}
