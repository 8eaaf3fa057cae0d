//! Ordered OAuth query parameters and their builder.

// crates.io
use oauth2::{ClientId, ClientSecret};
use url::form_urlencoded::Serializer;
// self
use crate::_prelude::*;

/// `client_id` parameter name.
pub const CLIENT_ID: &str = "client_id";
/// `client_secret` parameter name.
pub const CLIENT_SECRET: &str = "client_secret";
/// `scope` parameter name.
pub const SCOPE: &str = "scope";

/// Single query parameter. Sensitive values are redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct QueryParam {
	name: String,
	value: String,
	sensitive: bool,
}
impl QueryParam {
	/// Parameter name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Parameter value. Callers must avoid logging it when [`Self::is_sensitive`] is true.
	pub fn value(&self) -> &str {
		&self.value
	}

	/// Returns true for credentials (`client_id`, `client_secret`).
	pub fn is_sensitive(&self) -> bool {
		self.sensitive
	}
}
impl Debug for QueryParam {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let value = if self.sensitive { "<redacted>" } else { self.value.as_str() };

		f.debug_tuple("QueryParam").field(&self.name).field(&value).finish()
	}
}

/// Ordered set of query parameters; names are unique and keep first-insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QueryParams(Vec<QueryParam>);
impl QueryParams {
	/// Starts a new builder.
	pub fn builder() -> QueryParamsBuilder {
		QueryParamsBuilder::default()
	}

	/// Looks up a parameter value by name.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.iter().find(|param| param.name == name).map(QueryParam::value)
	}

	/// Returns true if a parameter with `name` is present.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Iterator over parameters in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &QueryParam> {
		self.0.iter()
	}

	/// Iterator over parameter names in insertion order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(QueryParam::name)
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no parameters are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Canonical `application/x-www-form-urlencoded` rendering, in insertion order.
	pub fn to_query_string(&self) -> String {
		let mut serializer = Serializer::new(String::new());

		for param in &self.0 {
			serializer.append_pair(&param.name, &param.value);
		}

		serializer.finish()
	}
}
impl<'a> IntoIterator for &'a QueryParams {
	type IntoIter = std::slice::Iter<'a, QueryParam>;
	type Item = &'a QueryParam;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// Builder for [`QueryParams`].
///
/// Optional fields with blank values are skipped. Setting a name twice replaces the
/// earlier value in place.
#[derive(Debug, Default)]
pub struct QueryParamsBuilder {
	params: Vec<QueryParam>,
}
impl QueryParamsBuilder {
	/// Adds `client_id` as a sensitive parameter; callers validate presence.
	pub fn with_client_id(self, client_id: &ClientId) -> Self {
		self.push(CLIENT_ID, client_id.as_str(), true)
	}

	/// Adds `client_secret` as a sensitive parameter.
	pub fn with_client_secret(self, client_secret: &ClientSecret) -> Self {
		self.push(CLIENT_SECRET, client_secret.secret(), true)
	}

	/// Adds `scope` unless it is absent or blank.
	pub fn with_scope(self, scope: Option<&str>) -> Self {
		match scope {
			Some(scope) if !scope.trim().is_empty() => self.push(SCOPE, scope, false),
			_ => self,
		}
	}

	/// Adds an arbitrary parameter unless its value is blank.
	pub fn with_param(self, name: impl Into<String>, value: impl Into<String>) -> Self {
		let value = value.into();

		if value.trim().is_empty() { self } else { self.push(name, value, false) }
	}

	/// Finalizes the ordered parameter set.
	pub fn build(self) -> QueryParams {
		QueryParams(self.params)
	}

	fn push(mut self, name: impl Into<String>, value: impl Into<String>, sensitive: bool) -> Self {
		let param = QueryParam { name: name.into(), value: value.into(), sensitive };

		match self.params.iter_mut().find(|existing| existing.name == param.name) {
			Some(existing) => *existing = param,
			None => self.params.push(param),
		}

		self
	}
}
