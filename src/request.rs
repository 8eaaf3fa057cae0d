//! Outbound request values produced by provider adapters.
//!
//! An [`OutboundRequest`] describes an HTTP request target (base URL plus ordered
//! [`QueryParams`]) without performing any I/O. Whether the parameters travel in the
//! query string or a form body is a transport decision driven by the provider's
//! access-token method.

pub mod query;

pub use query::*;

// self
use crate::_prelude::*;

/// Violations of the [`OutboundRequest`] base URL invariant.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum OutboundRequestError {
	/// Base URL is empty or whitespace.
	#[error("Outbound request base URL cannot be empty.")]
	EmptyBaseUrl,
	/// Base URL already carries a query string.
	#[error("Outbound request base URL must not contain `?`: {url}.")]
	ContainsQuery {
		/// Rejected base URL.
		url: String,
	},
	/// Base URL ends with `/`.
	#[error("Outbound request base URL must not end with `/`: {url}.")]
	TrailingSlash {
		/// Rejected base URL.
		url: String,
	},
}

/// Immutable `(base URL, query parameters)` pair.
///
/// The base URL is guaranteed non-empty, free of `?`, and without a trailing `/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OutboundRequest {
	base_url: String,
	params: QueryParams,
}
impl OutboundRequest {
	/// Creates a request after checking the base URL invariant.
	pub fn new(
		base_url: impl Into<String>,
		params: QueryParams,
	) -> Result<Self, OutboundRequestError> {
		let base_url = base_url.into();

		if base_url.trim().is_empty() {
			return Err(OutboundRequestError::EmptyBaseUrl);
		}
		if base_url.contains('?') {
			return Err(OutboundRequestError::ContainsQuery { url: base_url });
		}
		if base_url.ends_with('/') {
			return Err(OutboundRequestError::TrailingSlash { url: base_url });
		}

		Ok(Self { base_url, params })
	}

	/// Base URL without query string.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Ordered query parameters.
	pub fn params(&self) -> &QueryParams {
		&self.params
	}

	/// Renders `base_url?query`, or the bare base URL when there are no parameters.
	///
	/// The result contains credentials for token requests; never log it.
	pub fn to_url_string(&self) -> String {
		if self.params.is_empty() {
			self.base_url.clone()
		} else {
			format!("{}?{}", self.base_url, self.params.to_query_string())
		}
	}

	/// Parses [`Self::to_url_string`] into a [`Url`].
	pub fn to_url(&self) -> Result<Url, url::ParseError> {
		Url::parse(&self.to_url_string())
	}
}
