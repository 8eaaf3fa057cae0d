//! Configuration accessor contract and the built-in settings backends.
//!
//! The adapter never owns configuration. It reads string-keyed properties through
//! [`Settings`] on every call and applies the defaults declared by its
//! [`PropertyDefinition`] table when a key is absent.

pub mod file;
pub mod memory;

pub use file::FileSettings;
pub use memory::MemorySettings;

// self
use crate::_prelude::*;

/// Read-only, string-keyed configuration store supplied by the host.
///
/// Implementations must tolerate concurrent reads; the adapter holds them behind
/// `Arc<dyn Settings>` and shares them across threads.
pub trait Settings
where
	Self: Send + Sync,
{
	/// Returns the stored value for `key`, or `None` when the key is not set.
	fn get(&self, key: &str) -> Option<String>;
}
impl Settings for HashMap<String, String> {
	fn get(&self, key: &str) -> Option<String> {
		HashMap::get(self, key).cloned()
	}
}
impl Settings for BTreeMap<String, String> {
	fn get(&self, key: &str) -> Option<String> {
		BTreeMap::get(self, key).cloned()
	}
}

/// Declared configuration property: key, display name, default, and secrecy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyDefinition {
	/// Fully namespaced property key.
	pub key: &'static str,
	/// Human-readable label shown to operators.
	pub name: &'static str,
	/// Value applied when the key is absent.
	pub default: Option<&'static str>,
	/// Marks credentials that must never be logged or echoed.
	pub secret: bool,
}
impl PropertyDefinition {
	/// Declares a property without a default.
	pub const fn new(key: &'static str, name: &'static str) -> Self {
		Self { key, name, default: None, secret: false }
	}

	/// Attaches a default value.
	pub const fn with_default(mut self, default: &'static str) -> Self {
		self.default = Some(default);

		self
	}

	/// Flags the property as a secret.
	pub const fn secret(mut self) -> Self {
		self.secret = true;

		self
	}

	/// Reads the property, falling back to the declared default when the key is absent.
	///
	/// A key that is present but blank is returned as-is; presence checks belong to the
	/// caller.
	pub fn read(&self, settings: &dyn Settings) -> Option<String> {
		settings.get(self.key).or_else(|| self.default.map(str::to_owned))
	}
}

/// Error type produced by [`Settings`] backends that load from external sources.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SettingsError {
	/// Source contents could not be parsed.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Source could not be read.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
