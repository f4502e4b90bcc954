//! Core library for convtz: timezone lookup, epoch conversion, and timestamp parsing.
//!
//! This crate is divided into three modules: [`catalog`] resolves and lists timezones from an
//! immutable table of identifiers; [`convert`] renders epoch timestamps across timezones; and
//! [`parse`] detects and parses loosely-formatted date-time strings using an ordered table of
//! known formats.
//!
//! All functions return data; nothing in this crate prints. The timezone table is built once
//! with [`Catalog::system`] and passed by reference into whatever needs it, so tests can swap in
//! a fixed catalog with [`Catalog::with_zones`].
//!
//! # Examples
//!
//! ```
//! use zones::{Catalog, convert_epoch, parse_timeformat};
//!
//! let catalog = Catalog::system();
//!
//! // Epoch to wall-clock lines
//! let report = convert_epoch(&catalog, Some(1514821432.0), Some("Tokyo"));
//! assert_eq!(report.fixed[0], "2018-01-01 15:43:52 UTC+0000");
//!
//! // Wall-clock text to epoch
//! let report = parse_timeformat(&catalog, "2018-01-01 15:43:52", None).unwrap();
//! assert_eq!(report.epoch, 1514821432);
//! ```

pub mod catalog;
pub mod convert;
pub mod parse;

pub use catalog::*;
pub use convert::*;
pub use parse::*;
