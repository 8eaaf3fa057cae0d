//! Provider adapter contract, the GitHub implementation, and shared helpers.
//!
//! [`IdentityProvider`] is what a generic OAuth orchestrator calls into: request shapes
//! for the authorization redirect and token exchange, the user-info endpoint, profile
//! normalization, and group resolution. `validate` holds the ordered precondition
//! pipeline the request builders share; `registry` selects an adapter by name.

pub mod github;
pub mod registry;
pub mod validate;

pub use github::GithubProvider;
pub use registry::ProviderRegistry;

// crates.io
use oauth2::AccessToken;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{GroupResolution, GroupSet, UserIdentity},
	error::{ConfigError, ProfileMappingError},
	request::OutboundRequest,
	settings::PropertyDefinition,
};

/// Boxed future returned by [`IdentityProvider::resolve_group_memberships`].
pub type ResolutionFuture<'a> = Pin<Box<dyn Future<Output = GroupResolution> + 'a + Send>>;
/// Boxed future returned by [`IdentityProvider::resolve_groups`].
pub type GroupsFuture<'a> = Pin<Box<dyn Future<Output = GroupSet> + 'a + Send>>;

/// Provider-specific hooks consumed by a generic OAuth authorization-code flow.
///
/// Implementations hold no per-call state. Request builders and profile mapping are
/// pure functions of current settings and input; group resolution performs one remote
/// lookup per call.
pub trait IdentityProvider
where
	Self: Debug + Send + Sync,
{
	/// Stable provider identifier used for routing and configuration namespacing.
	fn name(&self) -> &str;

	/// Properties the provider reads, with their defaults.
	fn property_definitions(&self) -> &'static [PropertyDefinition];

	/// HTTP verb for the code-for-token exchange.
	fn access_token_method(&self) -> String;

	/// Validates settings and builds the authorization-redirect request.
	fn build_authorization_request(&self) -> Result<OutboundRequest, ConfigError>;

	/// Validates settings and builds the access-token exchange request.
	fn build_access_token_request(&self) -> Result<OutboundRequest, ConfigError>;

	/// Endpoint serving the authenticated user's profile.
	fn user_info_url(&self) -> String;

	/// Normalizes the JSON served by [`Self::user_info_url`].
	fn map_user_profile(&self, profile: &Value) -> Result<UserIdentity, ProfileMappingError>;

	/// Resolves group memberships, keeping the failure cause when the lookup fails.
	fn resolve_group_memberships<'a>(&'a self, access_token: &'a AccessToken)
	-> ResolutionFuture<'a>;

	/// Resolves group memberships, never failing.
	///
	/// A failed lookup is logged at `warn` with its cause and yields an empty set, so a
	/// login proceeds without group-scoped authorization.
	fn resolve_groups<'a>(&'a self, access_token: &'a AccessToken) -> GroupsFuture<'a> {
		Box::pin(async move {
			match self.resolve_group_memberships(access_token).await {
				GroupResolution::Resolved(groups) => groups,
				GroupResolution::Failed(err) => {
					tracing::warn!(
						provider = self.name(),
						error = %err,
						cause = ?err,
						"group resolution failed, continuing without groups"
					);

					GroupSet::default()
				},
			}
		})
	}
}
