//! Ordered precondition pipeline shared by provider request builders.
//!
//! Builders call [`endpoint`] and [`present`] in the order operators should see failures.
//! Each check stops at the first violation, reports its property key, and otherwise
//! hands back the value it accepted.

// self
use crate::{_prelude::*, error::ConfigError};

/// Shape rules an endpoint URL must satisfy once it is known to be present.
pub const ENDPOINT_SHAPE: [Rule; 2] = [Rule::NoQuery, Rule::NoTrailingSlash];

/// Shape rule applied to a configuration value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
	/// Value must be present and non-blank.
	Present,
	/// Value must not contain `?`.
	NoQuery,
	/// Value must not end with `/`.
	NoTrailingSlash,
}
impl Rule {
	/// Evaluates the rule. Shape rules pass vacuously on absent values; presence is its
	/// own rule.
	pub fn holds(self, value: Option<&str>) -> bool {
		match (self, value) {
			(Rule::Present, value) => value.is_some_and(|value| !value.trim().is_empty()),
			(_, None) => true,
			(Rule::NoQuery, Some(value)) => !value.contains('?'),
			(Rule::NoTrailingSlash, Some(value)) => !value.ends_with('/'),
		}
	}

	/// Error reported when the rule fails for `key`.
	pub fn violation(self, key: &str) -> ConfigError {
		let key = key.to_owned();

		match self {
			Rule::Present => ConfigError::MissingProperty { key },
			Rule::NoQuery => ConfigError::ContainsQuery { key },
			Rule::NoTrailingSlash => ConfigError::TrailingSlash { key },
		}
	}
}

/// A rule bound to one property key and the value read for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precondition<'a> {
	/// Property key reported on failure.
	pub key: &'a str,
	/// Value read from settings, if any.
	pub value: Option<&'a str>,
	/// Rule to evaluate.
	pub rule: Rule,
}
impl<'a> Precondition<'a> {
	/// Binds `rule` to a property.
	pub fn new(key: &'a str, value: Option<&'a str>, rule: Rule) -> Self {
		Self { key, value, rule }
	}

	/// Evaluates the precondition.
	pub fn check(&self) -> Result<(), ConfigError> {
		if self.rule.holds(self.value) { Ok(()) } else { Err(self.rule.violation(self.key)) }
	}
}

/// Evaluates `preconditions` in order, returning the first violation.
pub fn check_in_order<'a, I>(preconditions: I) -> Result<(), ConfigError>
where
	I: IntoIterator<Item = Precondition<'a>>,
{
	preconditions.into_iter().try_for_each(|precondition| precondition.check())
}

/// Presence check that hands back the accepted value.
pub fn present(key: &str, value: Option<String>) -> Result<String, ConfigError> {
	match value {
		Some(value) if Rule::Present.holds(Some(value.as_str())) => Ok(value),
		_ => Err(Rule::Present.violation(key)),
	}
}

/// Endpoint URL checks: present, then no `?`, then no trailing `/`.
pub fn endpoint(key: &str, value: Option<String>) -> Result<String, ConfigError> {
	let value = present(key, value)?;

	check_in_order(ENDPOINT_SHAPE.map(|rule| Precondition::new(key, Some(value.as_str()), rule)))?;

	Ok(value)
}
