//! JSON-file-backed [`Settings`] for deployments that keep provider configuration on disk.

// std
use std::{
	fs,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	settings::{Settings, SettingsError},
};

/// Reads a flat JSON object (`{"github.clientId.secured": "…"}`) into memory.
///
/// The snapshot is loaded eagerly; [`FileSettings::reload`] swaps in fresh contents
/// without disturbing concurrent readers.
#[derive(Clone, Debug)]
pub struct FileSettings {
	path: PathBuf,
	inner: Arc<RwLock<HashMap<String, String>>>,
}
impl FileSettings {
	/// Opens the settings file, eagerly loading its contents.
	///
	/// A missing or empty file yields empty settings so declared defaults apply.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Path the settings were loaded from.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Re-reads the file and replaces the in-memory snapshot.
	pub fn reload(&self) -> Result<(), SettingsError> {
		let snapshot = Self::load_snapshot(&self.path)?;

		*self.inner.write() = snapshot;

		Ok(())
	}

	fn load_snapshot(path: &Path) -> Result<HashMap<String, String>, SettingsError> {
		if !path.exists() {
			return Ok(HashMap::new());
		}

		let bytes = fs::read(path).map_err(|e| SettingsError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.iter().all(u8::is_ascii_whitespace) {
			return Ok(HashMap::new());
		}

		serde_json::from_slice(&bytes).map_err(|e| SettingsError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}
}
impl Settings for FileSettings {
	fn get(&self, key: &str) -> Option<String> {
		self.inner.read().get(key).cloned()
	}
}
