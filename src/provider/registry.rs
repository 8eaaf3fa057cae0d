//! Name-keyed registry used to select a provider adapter at setup time.

// self
use crate::{_prelude::*, auth::ProviderId, error::ConfigError, provider::IdentityProvider};

/// Maps provider names to their adapters.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
	providers: BTreeMap<ProviderId, Arc<dyn IdentityProvider>>,
}
impl ProviderRegistry {
	/// Registers `provider` under its [`IdentityProvider::name`], returning any adapter
	/// it replaced.
	pub fn register(
		&mut self,
		provider: Arc<dyn IdentityProvider>,
	) -> Result<Option<Arc<dyn IdentityProvider>>, ConfigError> {
		let id = ProviderId::new(provider.name())?;

		tracing::debug!(provider = %id, "registering identity provider");

		Ok(self.providers.insert(id, provider))
	}

	/// Builder-style variant of [`ProviderRegistry::register`].
	pub fn with(mut self, provider: Arc<dyn IdentityProvider>) -> Result<Self, ConfigError> {
		self.register(provider)?;

		Ok(self)
	}

	/// Looks up the adapter registered as `name`.
	pub fn get(&self, name: &str) -> Result<Arc<dyn IdentityProvider>, ConfigError> {
		self.providers
			.get(name)
			.cloned()
			.ok_or_else(|| ConfigError::UnknownProvider { name: name.to_owned() })
	}

	/// Registered provider names in lexical order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.providers.keys().map(|id| &**id)
	}

	/// Number of registered providers.
	pub fn len(&self) -> usize {
		self.providers.len()
	}

	/// Returns true when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}
}
impl Debug for ProviderRegistry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_set().entries(self.names()).finish()
	}
}
