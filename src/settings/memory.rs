//! Thread-safe in-memory [`Settings`] backend.

// self
use crate::{_prelude::*, settings::Settings};

/// In-memory key/value settings that can be updated while the adapter is live.
///
/// Clones share the same underlying map, so a handle kept by the host observes and
/// publishes the same values the adapter reads.
#[derive(Clone, Debug, Default)]
pub struct MemorySettings(Arc<RwLock<HashMap<String, String>>>);
impl MemorySettings {
	/// Seeds the settings with the provided pairs.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let map = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

		Self(Arc::new(RwLock::new(map)))
	}

	/// Builder-style variant of [`MemorySettings::set`].
	pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.set(key, value);

		self
	}

	/// Stores or replaces a value, returning the previous one.
	pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.0.write().insert(key.into(), value.into())
	}

	/// Removes a key so the declared default applies again.
	pub fn remove(&self, key: &str) -> Option<String> {
		self.0.write().remove(key)
	}

	/// Number of stored keys.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when no keys are stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl Settings for MemorySettings {
	fn get(&self, key: &str) -> Option<String> {
		self.0.read().get(key).cloned()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn clones_share_updates() {
		let settings = MemorySettings::from_pairs([("github.scope", "repo")]);
		let view = settings.clone();

		assert_eq!(view.get("github.scope").as_deref(), Some("repo"));
		assert_eq!(settings.set("github.scope", "read:org"), Some("repo".to_owned()));
		assert_eq!(view.get("github.scope").as_deref(), Some("read:org"));
		assert_eq!(view.remove("github.scope"), Some("read:org".to_owned()));
		assert!(settings.is_empty());
	}
}
