//! Lookup and listing of timezone identifiers.
//!
//! A [`Catalog`] is an immutable table of timezones scanned in enumeration order. Selection is
//! by plain substring over the identifier, first hit wins, and a filter that matches nothing
//! falls back to UTC rather than erroring.

use chrono_tz::Tz;

/// An immutable table of known timezones.
///
/// The process-wide catalog is created once at startup with [`Catalog::system`] and passed by
/// reference into whatever needs to resolve or list zones. Tests can substitute a fixed table
/// with [`Catalog::with_zones`].
///
/// # Examples
///
/// ```
/// # use zones::catalog::Catalog;
/// let catalog = Catalog::system();
/// assert_eq!(catalog.pick(Some("New_York")).name(), "America/New_York");
/// assert_eq!(catalog.pick(Some("Mars")).name(), "UTC");
/// assert_eq!(catalog.pick(None).name(), "UTC");
/// ```
pub struct Catalog {
	/// The known zones, in enumeration order.
	zones: &'static [Tz]
}

impl Catalog {
	/// Create a catalog over the full IANA timezone table.
	pub fn system() -> Catalog {
		Catalog { zones: &chrono_tz::TZ_VARIANTS }
	}

	/// Create a catalog over a fixed set of zones.
	///
	/// Lookup order follows the order of `zones`.
	pub fn with_zones(zones: &'static [Tz]) -> Catalog {
		Catalog { zones }
	}

	/// Select a timezone by substring filter.
	///
	/// With no filter this returns UTC. With a filter, the catalog is scanned in enumeration
	/// order and the first zone whose identifier contains `filter` wins (case-sensitive
	/// substring, not a regex). A filter matching nothing falls back to UTC silently.
	pub fn pick(&self, filter: Option<&str>) -> Tz {
		match filter {
			Some(f) => self.zones.iter()
				.find(|z| z.name().contains(f))
				.copied()
				.unwrap_or(Tz::UTC),
			None => Tz::UTC
		}
	}

	/// All zone identifiers containing `filter`, in enumeration order.
	///
	/// A filter matching nothing yields an empty iterator, not an error.
	///
	/// # Examples
	///
	/// ```
	/// # use zones::catalog::Catalog;
	/// let catalog = Catalog::system();
	/// assert!(catalog.matching("US").all(|name| name.contains("US")));
	/// assert_eq!(catalog.matching("XYZ123").count(), 0);
	/// ```
	pub fn matching<'a>(&'a self, filter: &'a str) -> impl Iterator<Item = &'static str> + 'a {
		self.zones.iter()
			.map(|z| z.name())
			.filter(move |name| name.contains(filter))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const FIXTURE: [Tz; 4] = [
		Tz::America__Chicago,
		Tz::America__New_York,
		Tz::Europe__London,
		Tz::US__Pacific
	];

	#[test]
	fn pick_test() {
		let catalog = Catalog::system();
		assert_eq!(catalog.pick(None), Tz::UTC);
		assert_eq!(catalog.pick(Some("New_York")), Tz::America__New_York);
		assert_eq!(catalog.pick(Some("US/Pacific")), Tz::US__Pacific);
		assert_eq!(catalog.pick(Some("Mars")), Tz::UTC);
		// Matching is case-sensitive
		assert_eq!(catalog.pick(Some("new_york")), Tz::UTC);

		// Enumeration order decides between multiple hits
		let fixture = Catalog::with_zones(&FIXTURE);
		assert_eq!(fixture.pick(Some("America")), Tz::America__Chicago);
		assert_eq!(fixture.pick(Some("London")), Tz::Europe__London);
		assert_eq!(fixture.pick(Some("Tokyo")), Tz::UTC);
	}

	#[test]
	fn matching_test() {
		let catalog = Catalog::system();
		let us: Vec<_> = catalog.matching("US").collect();
		assert!(us.len() > 0);
		assert!(us.iter().all(|name| name.contains("US")));
		assert!(us.contains(&"US/Pacific"));
		assert_eq!(catalog.matching("XYZ123").count(), 0);

		let fixture = Catalog::with_zones(&FIXTURE);
		assert_eq!(
			fixture.matching("America").collect::<Vec<_>>(),
			vec!["America/Chicago", "America/New_York"]
		);
	}
}
