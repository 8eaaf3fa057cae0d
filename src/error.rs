//! Adapter-level error types shared across settings, request builders, profile mapping, and
//! the remote team client.

// self
use crate::_prelude::*;

/// Adapter-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical adapter error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Settings backend failure.
	#[error(transparent)]
	Settings(#[from] crate::settings::SettingsError),
	/// Missing or malformed provider configuration.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider profile payload could not be normalized.
	#[error(transparent)]
	ProfileMapping(#[from] ProfileMappingError),
	/// Remote call to the identity provider failed.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Configuration and validation failures raised while building outbound requests.
///
/// Variants carry property keys only. Values are never echoed because two of the keys
/// (client id, client secret) hold credentials.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required property is absent or blank.
	#[error("Property is missing: `{key}`.")]
	MissingProperty {
		/// Offending property key.
		key: String,
	},
	/// An endpoint property embeds a query string.
	#[error("Property must not contain the character `?`: `{key}`.")]
	ContainsQuery {
		/// Offending property key.
		key: String,
	},
	/// An endpoint property ends with a slash.
	#[error("Property must not end with a slash `/`: `{key}`.")]
	TrailingSlash {
		/// Offending property key.
		key: String,
	},
	/// Outbound request value rejected its base URL.
	#[error(transparent)]
	InvalidRequest(#[from] crate::request::OutboundRequestError),
	/// No provider is registered under the requested name.
	#[error("No identity provider is registered as `{name}`.")]
	UnknownProvider {
		/// Requested provider name.
		name: String,
	},
	/// Provider name failed identifier validation.
	#[error(transparent)]
	InvalidProviderId(#[from] crate::auth::IdentifierError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Returns the property key named by the error, when the failure concerns one.
	pub fn key(&self) -> Option<&str> {
		match self {
			Self::MissingProperty { key }
			| Self::ContainsQuery { key }
			| Self::TrailingSlash { key } => Some(key),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while normalizing a provider user profile.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProfileMappingError {
	/// Payload is not a JSON object.
	#[error("User profile payload must be a JSON object, found {found}.")]
	NotAnObject {
		/// JSON type that was supplied instead.
		found: &'static str,
	},
	/// Mandatory login field is absent or null.
	#[error("User profile is missing the `{field}` field.")]
	MissingLogin {
		/// Field name looked up in the payload.
		field: &'static str,
	},
	/// Mandatory login field is not a string.
	#[error("User profile field `{field}` must be a string, found {found}.")]
	InvalidLogin {
		/// Field name looked up in the payload.
		field: &'static str,
		/// JSON type that was supplied instead.
		found: &'static str,
	},
	/// Mandatory login field is an empty or whitespace-only string.
	#[error("User profile field `{field}` is blank.")]
	BlankLogin {
		/// Field name looked up in the payload.
		field: &'static str,
	},
}

/// Failures reaching or decoding the identity provider's API.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the identity provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Provider answered with a non-success HTTP status.
	#[error("Identity provider returned HTTP {status}: {message}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Provider-supplied message or a body preview.
		message: String,
	},
	/// Provider responded with JSON that does not match the expected shape.
	#[error("Identity provider returned malformed JSON.")]
	Decode {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Pagination pointed outside the API origin; the token is never sent there.
	#[error("Pagination link `{url}` leaves the API origin.")]
	ForeignLink {
		/// Rejected link target.
		url: String,
	},
	/// Endpoint URL could not be parsed.
	#[error("Endpoint URL `{url}` is invalid.")]
	InvalidUrl {
		/// Raw URL that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn config_errors_name_the_key_only() {
		let err = ConfigError::MissingProperty { key: "github.clientSecret.secured".into() };

		assert_eq!(err.to_string(), "Property is missing: `github.clientSecret.secured`.");
		assert_eq!(err.key(), Some("github.clientSecret.secured"));
		assert_eq!(ConfigError::UnknownProvider { name: "gitlab".into() }.key(), None);
	}

	#[test]
	fn config_errors_fold_into_adapter_error() {
		let err: Error = ConfigError::TrailingSlash { key: "github.accessTokenUrl".into() }.into();

		assert!(matches!(err, Error::Config(ConfigError::TrailingSlash { .. })));
		assert_eq!(
			err.to_string(),
			"Property must not end with a slash `/`: `github.accessTokenUrl`."
		);
	}
}
