//! GitHub identity provider.
//!
//! Reads its endpoints and credentials from `github.*` properties, validates them
//! before any request is built, maps GitHub `/user` payloads, and derives groups from
//! `/user/teams`.

// crates.io
use oauth2::{AccessToken, ClientId, ClientSecret};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{self, GroupResolution, ProfileFields, UserIdentity},
	error::{ConfigError, ProfileMappingError},
	http::TeamClient,
	obs::{self, Operation, OperationSpan, Outcome},
	provider::{IdentityProvider, ResolutionFuture, validate},
	request::{OutboundRequest, QueryParams},
	settings::{PropertyDefinition, Settings},
};

/// Provider name used for routing and key namespacing.
pub const NAME: &str = "github";

/// Property keys owned by the GitHub provider.
pub mod keys {
	/// Authorization redirect endpoint.
	pub const AUTHORIZATION_URL: &str = "github.authorizationUrl";
	/// Token exchange endpoint.
	pub const ACCESS_TOKEN_URL: &str = "github.accessTokenUrl";
	/// HTTP verb used for the token exchange.
	pub const ACCESS_TOKEN_METHOD: &str = "github.accessTokenMethod";
	/// OAuth client identifier (secret).
	pub const CLIENT_ID: &str = "github.clientId.secured";
	/// OAuth client secret (secret).
	pub const CLIENT_SECRET: &str = "github.clientSecret.secured";
	/// Requested scopes.
	pub const SCOPE: &str = "github.scope";
	/// Profile endpoint.
	pub const USER_INFO_URL: &str = "github.userInfoUrl";
}

/// Default access-token HTTP method.
pub const DEFAULT_ACCESS_TOKEN_METHOD: &str = "GET";
/// Default scopes: organization membership plus email access.
pub const DEFAULT_SCOPE: &str = "read:org,user:email";

const AUTHORIZATION_URL: PropertyDefinition =
	PropertyDefinition::new(keys::AUTHORIZATION_URL, "Authorization URL")
		.with_default("https://github.com/login/oauth/authorize");
const ACCESS_TOKEN_URL: PropertyDefinition =
	PropertyDefinition::new(keys::ACCESS_TOKEN_URL, "Access Token URL")
		.with_default("https://github.com/login/oauth/access_token");
const ACCESS_TOKEN_METHOD: PropertyDefinition =
	PropertyDefinition::new(keys::ACCESS_TOKEN_METHOD, "Access Token HTTP Method")
		.with_default(DEFAULT_ACCESS_TOKEN_METHOD);
const CLIENT_ID: PropertyDefinition =
	PropertyDefinition::new(keys::CLIENT_ID, "Client ID").secret();
const CLIENT_SECRET: PropertyDefinition =
	PropertyDefinition::new(keys::CLIENT_SECRET, "Client Secret").secret();
const SCOPE: PropertyDefinition =
	PropertyDefinition::new(keys::SCOPE, "Scope").with_default(DEFAULT_SCOPE);
const USER_INFO_URL: PropertyDefinition =
	PropertyDefinition::new(keys::USER_INFO_URL, "User Information URL")
		.with_default("https://api.github.com/user");

/// Every property the GitHub provider reads, in declaration order.
pub static PROPERTIES: [PropertyDefinition; 7] = [
	AUTHORIZATION_URL,
	ACCESS_TOKEN_URL,
	ACCESS_TOKEN_METHOD,
	CLIENT_ID,
	CLIENT_SECRET,
	SCOPE,
	USER_INFO_URL,
];

/// GitHub implementation of [`IdentityProvider`].
///
/// Holds shared handles only; every call reads settings afresh, so the provider can be
/// cloned and used from many threads at once.
#[derive(Clone)]
pub struct GithubProvider {
	settings: Arc<dyn Settings>,
	teams: Arc<dyn TeamClient>,
}
impl GithubProvider {
	/// Creates a provider over the given settings and team client.
	pub fn new(settings: Arc<dyn Settings>, teams: Arc<dyn TeamClient>) -> Self {
		Self { settings, teams }
	}

	/// Creates a provider backed by [`crate::http::ReqwestGithubClient`].
	#[cfg(feature = "reqwest")]
	pub fn with_reqwest(settings: Arc<dyn Settings>) -> Result<Self, ConfigError> {
		let teams = crate::http::ReqwestGithubClient::new()?;

		Ok(Self::new(settings, Arc::new(teams)))
	}

	fn read(&self, property: &PropertyDefinition) -> Option<String> {
		property.read(self.settings.as_ref())
	}

	fn authorization_request(&self) -> Result<OutboundRequest, ConfigError> {
		let authorization_url =
			validate::endpoint(keys::AUTHORIZATION_URL, self.read(&AUTHORIZATION_URL))?;
		let client_id = ClientId::new(validate::present(keys::CLIENT_ID, self.read(&CLIENT_ID))?);
		let scope = self.read(&SCOPE);
		let params =
			QueryParams::builder().with_client_id(&client_id).with_scope(scope.as_deref()).build();

		Ok(OutboundRequest::new(authorization_url, params)?)
	}

	fn access_token_request(&self) -> Result<OutboundRequest, ConfigError> {
		let access_token_url =
			validate::endpoint(keys::ACCESS_TOKEN_URL, self.read(&ACCESS_TOKEN_URL))?;
		let client_id = ClientId::new(validate::present(keys::CLIENT_ID, self.read(&CLIENT_ID))?);
		let client_secret =
			ClientSecret::new(validate::present(keys::CLIENT_SECRET, self.read(&CLIENT_SECRET))?);
		let params = QueryParams::builder()
			.with_client_id(&client_id)
			.with_client_secret(&client_secret)
			.build();

		Ok(OutboundRequest::new(access_token_url, params)?)
	}
}
impl Debug for GithubProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GithubProvider").field("name", &NAME).finish_non_exhaustive()
	}
}
impl IdentityProvider for GithubProvider {
	fn name(&self) -> &str {
		NAME
	}

	fn property_definitions(&self) -> &'static [PropertyDefinition] {
		&PROPERTIES
	}

	fn access_token_method(&self) -> String {
		self.read(&ACCESS_TOKEN_METHOD)
			.filter(|method| !method.trim().is_empty())
			.unwrap_or_else(|| DEFAULT_ACCESS_TOKEN_METHOD.to_owned())
	}

	fn build_authorization_request(&self) -> Result<OutboundRequest, ConfigError> {
		const OP: Operation = Operation::AuthorizationRequest;

		let _span = OperationSpan::new(NAME, OP).entered();

		obs::record_outcome(NAME, OP, Outcome::Attempt);
		obs::record_result(NAME, OP, self.authorization_request())
	}

	fn build_access_token_request(&self) -> Result<OutboundRequest, ConfigError> {
		const OP: Operation = Operation::AccessTokenRequest;

		let _span = OperationSpan::new(NAME, OP).entered();

		obs::record_outcome(NAME, OP, Outcome::Attempt);
		obs::record_result(NAME, OP, self.access_token_request())
	}

	fn user_info_url(&self) -> String {
		self.read(&USER_INFO_URL).unwrap_or_default()
	}

	fn map_user_profile(&self, profile: &Value) -> Result<UserIdentity, ProfileMappingError> {
		const OP: Operation = Operation::ProfileMapping;

		let _span = OperationSpan::new(NAME, OP).entered();

		obs::record_outcome(NAME, OP, Outcome::Attempt);
		obs::record_result(NAME, OP, auth::map_profile(profile, &ProfileFields::GITHUB))
	}

	fn resolve_group_memberships<'a>(
		&'a self,
		access_token: &'a AccessToken,
	) -> ResolutionFuture<'a> {
		const OP: Operation = Operation::GroupResolution;

		let span = OperationSpan::new(NAME, OP);

		obs::record_outcome(NAME, OP, Outcome::Attempt);

		Box::pin(span.instrument(async move {
			let resolution = GroupResolution::from(self.teams.list_teams(access_token).await);

			match &resolution {
				GroupResolution::Resolved(groups) => {
					tracing::debug!(groups = groups.len(), "resolved group memberships");
					obs::record_outcome(NAME, OP, Outcome::Success);
				},
				GroupResolution::Failed(_) => obs::record_outcome(NAME, OP, Outcome::Failure),
			}

			resolution
		}))
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::{
		_preludet::{
			FailingTeamClient, StaticTeamClient, TEST_CLIENT_ID, TEST_CLIENT_SECRET,
			github_settings,
		},
		auth::{GroupSet, PLACEHOLDER_EMAIL, TeamListing},
		request::{
			CLIENT_ID as CLIENT_ID_PARAM, CLIENT_SECRET as CLIENT_SECRET_PARAM,
			SCOPE as SCOPE_PARAM,
		},
		settings::MemorySettings,
	};

	fn provider(settings: &MemorySettings) -> GithubProvider {
		GithubProvider::new(Arc::new(settings.clone()), Arc::new(StaticTeamClient::default()))
	}

	#[test]
	fn authorization_request_uses_defaults() {
		let settings = github_settings();
		let request = provider(&settings)
			.build_authorization_request()
			.expect("Authorization request should build with defaults.");

		assert_eq!(request.base_url(), "https://github.com/login/oauth/authorize");
		assert_eq!(
			request.params().names().collect::<Vec<_>>(),
			vec![CLIENT_ID_PARAM, SCOPE_PARAM]
		);
		assert_eq!(request.params().get(SCOPE_PARAM), Some(DEFAULT_SCOPE));
		assert!(!request.params().contains(CLIENT_SECRET_PARAM));
	}

	#[test]
	fn blank_scope_is_omitted() {
		let settings = github_settings().with(keys::SCOPE, "");
		let request = provider(&settings)
			.build_authorization_request()
			.expect("Blank scope should not block the request.");

		assert_eq!(request.params().names().collect::<Vec<_>>(), vec![CLIENT_ID_PARAM]);
	}

	#[test]
	fn access_token_request_carries_credentials() {
		let settings = github_settings();
		let request = provider(&settings)
			.build_access_token_request()
			.expect("Access token request should build with defaults.");

		assert_eq!(request.base_url(), "https://github.com/login/oauth/access_token");
		assert_eq!(
			request.params().names().collect::<Vec<_>>(),
			vec![CLIENT_ID_PARAM, CLIENT_SECRET_PARAM]
		);
		assert!(!format!("{request:?}").contains(TEST_CLIENT_SECRET));
	}

	#[test]
	fn request_debug_output_hides_credentials() {
		let settings = github_settings();
		let provider = provider(&settings);
		let requests = [
			provider.build_authorization_request().expect("Authorization request should build."),
			provider.build_access_token_request().expect("Access token request should build."),
		];

		for request in requests {
			let rendered = format!("{request:?}");

			assert!(rendered.contains(CLIENT_ID_PARAM));
			assert!(!rendered.contains(TEST_CLIENT_ID), "Client id leaked: {rendered}.");
			assert!(!rendered.contains(TEST_CLIENT_SECRET), "Client secret leaked: {rendered}.");
			assert_eq!(request.params().get(CLIENT_ID_PARAM), Some(TEST_CLIENT_ID));
		}
	}

	#[test]
	fn access_token_method_defaults_to_get() {
		let settings = github_settings();
		let provider = provider(&settings);

		assert_eq!(provider.access_token_method(), "GET");

		settings.set(keys::ACCESS_TOKEN_METHOD, "POST");

		assert_eq!(provider.access_token_method(), "POST");
	}

	#[test]
	fn settings_are_read_on_every_call() {
		let settings = github_settings();
		let provider = provider(&settings);

		provider.build_authorization_request().expect("Initial settings should be valid.");
		settings.remove(keys::CLIENT_ID);

		let err = provider
			.build_authorization_request()
			.expect_err("Removing the client id must fail the next build.");

		assert_eq!(err.key(), Some(keys::CLIENT_ID));
	}

	#[test]
	fn profile_mapping_uses_github_fields() {
		let settings = github_settings();
		let identity = provider(&settings)
			.map_user_profile(&json!({ "login": "alice", "id": 1, "email": null }))
			.expect("GitHub profile should map.");

		assert_eq!(identity.display_name, "alice");
		assert_eq!(identity.email, PLACEHOLDER_EMAIL);
	}

	#[test]
	fn property_table_matches_keys() {
		let settings = github_settings();
		let provider = provider(&settings);
		let secrets = provider
			.property_definitions()
			.iter()
			.filter(|property| property.secret)
			.map(|property| property.key)
			.collect::<Vec<_>>();

		assert_eq!(provider.property_definitions().len(), 7);
		assert_eq!(secrets, vec![keys::CLIENT_ID, keys::CLIENT_SECRET]);
		assert_eq!(provider.user_info_url(), "https://api.github.com/user");
	}

	#[tokio::test]
	async fn groups_resolve_from_listing() {
		let listing = TeamListing::from_iter([("acme", ["core", "infra"])]);
		let provider = GithubProvider::new(
			Arc::new(github_settings()),
			Arc::new(StaticTeamClient::new(listing)),
		);
		let groups = provider.resolve_groups(&AccessToken::new("token".into())).await;

		assert_eq!(groups, GroupSet::from_iter(["acme", "acme*core", "acme*infra"]));
	}

	#[tokio::test]
	async fn failed_lookup_collapses_to_empty_set() {
		let provider =
			GithubProvider::new(Arc::new(github_settings()), Arc::new(FailingTeamClient));
		let token = AccessToken::new("token".into());

		assert!(provider.resolve_group_memberships(&token).await.is_failed());
		assert!(provider.resolve_groups(&token).await.is_empty());
	}
}
