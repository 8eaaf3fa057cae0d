//! Canonical user identity and the JSON profile mapping shared by providers.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, error::ProfileMappingError};

/// Address used when a provider hides or omits the user's email.
pub const PLACEHOLDER_EMAIL: &str = "no-reply@example.com";

/// Normalized identity produced from a provider profile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
	/// Provider login; never blank.
	pub login: String,
	/// Display name; equals `login` when the provider had none.
	pub display_name: String,
	/// Email address; [`PLACEHOLDER_EMAIL`] when the provider had none.
	pub email: String,
}
impl UserIdentity {
	/// Returns true when the email is the placeholder rather than a provider value.
	pub fn has_placeholder_email(&self) -> bool {
		self.email == PLACEHOLDER_EMAIL
	}
}

/// Field names a provider uses for the identity attributes in its profile payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfileFields {
	/// Mandatory login field.
	pub login: &'static str,
	/// Optional display-name field.
	pub display_name: &'static str,
	/// Optional email field.
	pub email: &'static str,
}
impl ProfileFields {
	/// GitHub `/user` payload layout.
	pub const GITHUB: Self = Self { login: "login", display_name: "name", email: "email" };
}
impl Default for ProfileFields {
	fn default() -> Self {
		Self::GITHUB
	}
}

/// Maps a raw JSON profile into a [`UserIdentity`].
///
/// - the login field must be a non-blank string;
/// - a missing, null, non-string, or blank display name falls back to the login;
/// - a missing, null, or non-string email falls back to [`PLACEHOLDER_EMAIL`].
pub fn map_profile(
	profile: &Value,
	fields: &ProfileFields,
) -> Result<UserIdentity, ProfileMappingError> {
	let object =
		profile.as_object().ok_or(ProfileMappingError::NotAnObject { found: json_type(profile) })?;
	let login = required_string(object, fields.login)?;
	let display_name = optional_string(object, fields.display_name)
		.filter(|name| !name.trim().is_empty())
		.unwrap_or(login);
	let email = optional_string(object, fields.email).unwrap_or(PLACEHOLDER_EMAIL);

	Ok(UserIdentity {
		login: login.to_owned(),
		display_name: display_name.to_owned(),
		email: email.to_owned(),
	})
}

fn required_string<'a>(
	object: &'a Map<String, Value>,
	field: &'static str,
) -> Result<&'a str, ProfileMappingError> {
	match object.get(field) {
		None | Some(Value::Null) => Err(ProfileMappingError::MissingLogin { field }),
		Some(Value::String(value)) if value.trim().is_empty() =>
			Err(ProfileMappingError::BlankLogin { field }),
		Some(Value::String(value)) => Ok(value),
		Some(other) => Err(ProfileMappingError::InvalidLogin { field, found: json_type(other) }),
	}
}

fn optional_string<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
	object.get(field).and_then(Value::as_str)
}

fn json_type(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
