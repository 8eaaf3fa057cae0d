// std
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
// crates.io
use oauth2::AccessToken;
use serde_json::json;
// self
use oauth2_github_adapter::{
	auth::{GroupSet, PLACEHOLDER_EMAIL, TeamListing, UserIdentity},
	error::{ConfigError, ProfileMappingError, TransportError},
	http::{TeamClient, TeamFuture},
	provider::{GithubProvider, IdentityProvider, ProviderRegistry, github::keys},
	settings::MemorySettings,
};

const CLIENT_ID: &str = "client-it";
const CLIENT_SECRET: &str = "secret-it";

#[derive(Default)]
struct CountingTeamClient {
	calls: AtomicUsize,
	listing: TeamListing,
	fail: bool,
}
impl TeamClient for CountingTeamClient {
	fn list_teams<'a>(&'a self, _access_token: &'a AccessToken) -> TeamFuture<'a> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			if self.fail {
				Err(TransportError::Status { status: 502, message: "Bad gateway".into() })
			} else {
				Ok(self.listing.clone())
			}
		})
	}
}

fn base_settings() -> MemorySettings {
	MemorySettings::from_pairs([(keys::CLIENT_ID, CLIENT_ID), (keys::CLIENT_SECRET, CLIENT_SECRET)])
}

fn provider_with(settings: &MemorySettings, teams: Arc<CountingTeamClient>) -> GithubProvider {
	GithubProvider::new(Arc::new(settings.clone()), teams)
}

fn assert_key(err: ConfigError, key: &str) {
	assert_eq!(err.key(), Some(key), "Unexpected error: {err}.");
	assert!(err.to_string().contains(key), "Message should name the key: {err}.");
}

#[test]
fn missing_required_properties_name_their_key() {
	let teams = Arc::new(CountingTeamClient::default());

	for (key, value) in [(keys::AUTHORIZATION_URL, ""), (keys::CLIENT_ID, "  ")] {
		let settings = base_settings().with(key, value);
		let err = provider_with(&settings, teams.clone())
			.build_authorization_request()
			.expect_err("Blank required property must be rejected.");

		assert!(matches!(err, ConfigError::MissingProperty { .. }));
		assert_key(err, key);
	}

	for (key, value) in
		[(keys::ACCESS_TOKEN_URL, ""), (keys::CLIENT_ID, ""), (keys::CLIENT_SECRET, "\t")]
	{
		let settings = base_settings().with(key, value);
		let err = provider_with(&settings, teams.clone())
			.build_access_token_request()
			.expect_err("Blank required property must be rejected.");

		assert!(matches!(err, ConfigError::MissingProperty { .. }));
		assert_key(err, key);
	}

	let settings = base_settings();

	settings.remove(keys::CLIENT_SECRET);

	assert_key(
		provider_with(&settings, teams.clone())
			.build_access_token_request()
			.expect_err("Absent client secret must be rejected."),
		keys::CLIENT_SECRET,
	);
	assert_eq!(teams.calls.load(Ordering::SeqCst), 0, "Builders must not touch the network.");
}

#[test]
fn malformed_endpoints_are_rejected() {
	let teams = Arc::new(CountingTeamClient::default());
	let cases = [
		("https://github.com/login/oauth/authorize?x=1", "query"),
		("https://github.com/login/oauth/authorize/", "slash"),
	];

	for (url, shape) in cases {
		let settings = base_settings().with(keys::AUTHORIZATION_URL, url);
		let err = provider_with(&settings, teams.clone())
			.build_authorization_request()
			.expect_err("Malformed authorization URL must be rejected.");

		match shape {
			"query" => assert!(matches!(err, ConfigError::ContainsQuery { .. })),
			_ => assert!(matches!(err, ConfigError::TrailingSlash { .. })),
		}
		assert_key(err, keys::AUTHORIZATION_URL);

		let token_url = url.replace("authorize", "token");
		let settings = base_settings().with(keys::ACCESS_TOKEN_URL, token_url);
		let err = provider_with(&settings, teams.clone())
			.build_access_token_request()
			.expect_err("Malformed access token URL must be rejected.");

		assert_key(err, keys::ACCESS_TOKEN_URL);
	}

	let settings = base_settings()
		.with(keys::AUTHORIZATION_URL, "https://ghe.example.com/login/oauth/authorize")
		.with(keys::ACCESS_TOKEN_URL, "https://ghe.example.com/login/oauth/access_token");
	let provider = provider_with(&settings, teams);

	assert_eq!(
		provider.build_authorization_request().expect("Well-formed URL should pass.").base_url(),
		"https://ghe.example.com/login/oauth/authorize"
	);
	assert_eq!(
		provider.build_access_token_request().expect("Well-formed URL should pass.").base_url(),
		"https://ghe.example.com/login/oauth/access_token"
	);
}

#[test]
fn access_token_checks_run_in_declared_order() {
	let teams = Arc::new(CountingTeamClient::default());
	let settings = MemorySettings::default()
		.with(keys::ACCESS_TOKEN_URL, "https://github.com/token?x=1/")
		.with(keys::CLIENT_ID, "");

	assert!(matches!(
		provider_with(&settings, teams.clone()).build_access_token_request(),
		Err(ConfigError::ContainsQuery { .. })
	));

	settings.set(keys::ACCESS_TOKEN_URL, "https://github.com/token/");

	assert!(matches!(
		provider_with(&settings, teams.clone()).build_access_token_request(),
		Err(ConfigError::TrailingSlash { .. })
	));

	settings.set(keys::ACCESS_TOKEN_URL, "https://github.com/token");

	assert_key(
		provider_with(&settings, teams.clone())
			.build_access_token_request()
			.expect_err("Client id is checked before the secret."),
		keys::CLIENT_ID,
	);

	settings.set(keys::CLIENT_ID, CLIENT_ID);

	assert_key(
		provider_with(&settings, teams)
			.build_access_token_request()
			.expect_err("Client secret is checked last."),
		keys::CLIENT_SECRET,
	);
}

#[test]
fn builders_are_idempotent() {
	let settings = base_settings();
	let provider = provider_with(&settings, Arc::new(CountingTeamClient::default()));

	assert_eq!(
		provider.build_authorization_request().expect("First build should pass."),
		provider.build_authorization_request().expect("Second build should pass.")
	);
	assert_eq!(
		provider.build_access_token_request().expect("First build should pass."),
		provider.build_access_token_request().expect("Second build should pass.")
	);
}

#[test]
fn token_request_renders_credentials_in_order() {
	let settings = base_settings();
	let request = provider_with(&settings, Arc::new(CountingTeamClient::default()))
		.build_access_token_request()
		.expect("Token request should build.");
	let rendered = format!("{request:?}");

	assert_eq!(
		request.to_url_string(),
		"https://github.com/login/oauth/access_token?client_id=client-it&client_secret=secret-it"
	);
	assert!(!rendered.contains(CLIENT_ID));
	assert!(!rendered.contains(CLIENT_SECRET));
}

#[test]
fn profiles_map_per_contract() {
	let settings = base_settings();
	let provider = provider_with(&settings, Arc::new(CountingTeamClient::default()));

	assert_eq!(
		provider.map_user_profile(&json!({ "login": "alice" })).expect("Login-only should map."),
		UserIdentity {
			login: "alice".into(),
			display_name: "alice".into(),
			email: PLACEHOLDER_EMAIL.into(),
		}
	);
	assert_eq!(
		provider
			.map_user_profile(&json!({ "login": "bob", "name": "Bob Smith", "email": "bob@x.com" }))
			.expect("Full profile should map."),
		UserIdentity {
			login: "bob".into(),
			display_name: "Bob Smith".into(),
			email: "bob@x.com".into(),
		}
	);
	assert!(matches!(
		provider.map_user_profile(&json!({})),
		Err(ProfileMappingError::MissingLogin { .. })
	));
}

#[tokio::test]
async fn groups_follow_the_organization_team_scheme() {
	let teams = Arc::new(CountingTeamClient {
		listing: TeamListing::from_iter([("acme", ["core", "infra"])]),
		..Default::default()
	});
	let provider = provider_with(&base_settings(), teams.clone());
	let groups = provider.resolve_groups(&AccessToken::new("gho_token".into())).await;

	assert_eq!(groups, GroupSet::from_iter(["acme", "acme*core", "acme*infra"]));
	assert_eq!(teams.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_listing_and_failures_yield_no_groups() {
	let token = AccessToken::new("gho_token".into());
	let empty = provider_with(&base_settings(), Arc::new(CountingTeamClient::default()));

	assert!(empty.resolve_groups(&token).await.is_empty());

	let failing = provider_with(
		&base_settings(),
		Arc::new(CountingTeamClient { fail: true, ..Default::default() }),
	);

	assert!(failing.resolve_groups(&token).await.is_empty());
	assert!(matches!(
		failing.resolve_group_memberships(&token).await.into_result(),
		Err(TransportError::Status { status: 502, .. })
	));
}

#[test]
fn registry_selects_github_by_name() {
	let provider: Arc<dyn IdentityProvider> =
		Arc::new(provider_with(&base_settings(), Arc::new(CountingTeamClient::default())));
	let registry = ProviderRegistry::default().with(provider).expect("GitHub should register.");
	let github = registry.get("github").expect("GitHub should resolve by name.");

	assert_eq!(github.access_token_method(), "GET");
	assert_eq!(github.user_info_url(), "https://api.github.com/user");
	assert!(registry.get("bitbucket").is_err());
}
