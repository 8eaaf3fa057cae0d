//! Remote team client contract and the reqwest-backed GitHub implementation.
//!
//! [`TeamClient`] is the adapter's only dependency on an HTTP stack for group
//! resolution. It is object safe (futures are boxed) so providers can hold it behind
//! `Arc<dyn TeamClient>` and tests can substitute in-memory fakes.

// crates.io
use oauth2::AccessToken;
#[cfg(feature = "reqwest")]
use reqwest::{
	Response,
	header::{ACCEPT, AUTHORIZATION, HeaderMap, LINK, USER_AGENT},
};
#[cfg(feature = "reqwest")] use serde_json::Value;
#[cfg(feature = "reqwest")] use url::Origin;
// self
use crate::{_prelude::*, auth::TeamListing, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`TeamClient::list_teams`].
pub type TeamFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TeamListing, TransportError>> + 'a + Send>>;

/// Authenticated lookup of the current user's organization/team memberships.
///
/// Implementations must be `Send + Sync`; the adapter shares them across concurrent
/// logins.
pub trait TeamClient
where
	Self: Send + Sync,
{
	/// Lists the teams visible to `access_token`, grouped by organization.
	fn list_teams<'a>(&'a self, access_token: &'a AccessToken) -> TeamFuture<'a>;
}

const BODY_PREVIEW_LIMIT: usize = 256;

#[derive(Deserialize)]
struct TeamPayload {
	name: String,
	organization: OrganizationPayload,
}

#[derive(Deserialize)]
struct OrganizationPayload {
	login: String,
}

#[derive(Deserialize)]
struct ErrorPayload {
	message: String,
}

/// Parses one page of GitHub's `GET /user/teams` response into `listing`.
pub fn parse_team_page(bytes: &[u8], listing: &mut TeamListing) -> Result<(), TransportError> {
	let teams: Vec<TeamPayload> = decode(bytes)?;

	for team in teams {
		listing.insert_team(team.organization.login, team.name);
	}

	Ok(())
}

/// Extracts the `rel="next"` target from an RFC 8288 `Link` header value.
pub fn next_link(header: &str) -> Option<&str> {
	header.split(',').find_map(|entry| {
		let mut segments = entry.split(';');
		let target = segments.next()?.trim().strip_prefix('<')?.strip_suffix('>')?;

		segments.any(|param| param.trim() == "rel=\"next\"").then_some(target)
	})
}

fn decode<T>(bytes: &[u8]) -> Result<T, TransportError>
where
	T: for<'de> Deserialize<'de>,
{
	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| TransportError::Decode { source })
}

fn error_message(body: &str) -> String {
	if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
		return payload.message;
	}

	truncate_preview(body.trim())
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = body.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

fn parse_url(raw: &str) -> Result<Url, TransportError> {
	Url::parse(raw).map_err(|source| TransportError::InvalidUrl { url: raw.to_owned(), source })
}

/// GitHub REST client used for team listings and profile lookups.
///
/// Requests carry `Authorization: token …`, the GitHub JSON media type, and a
/// `User-Agent` (GitHub rejects anonymous agents). Team listings request 100 entries
/// per page and follow `Link: rel="next"` until exhausted.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestGithubClient {
	client: ReqwestClient,
	api_base: String,
}
#[cfg(feature = "reqwest")]
impl ReqwestGithubClient {
	/// Public GitHub API root.
	pub const DEFAULT_API_BASE: &'static str = "https://api.github.com";
	/// Upper bound on followed pagination links.
	pub const MAX_PAGES: usize = 100;

	const MEDIA_TYPE: &'static str = "application/vnd.github+json";
	const AGENT: &'static str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

	/// Builds a client against the public GitHub API.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().build()?;

		Ok(Self::with_client(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { client, api_base: Self::DEFAULT_API_BASE.to_owned() }
	}

	/// Points the client at another API root (GitHub Enterprise, test servers).
	pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
		self.api_base = api_base.into().trim_end_matches('/').to_owned();

		self
	}

	/// API root requests are issued against.
	pub fn api_base(&self) -> &str {
		&self.api_base
	}

	/// First page of the team listing endpoint.
	pub fn teams_url(&self) -> Result<Url, TransportError> {
		let mut url = parse_url(&format!("{}/user/teams", self.api_base))?;

		url.query_pairs_mut().append_pair("per_page", "100");

		Ok(url)
	}

	/// Fetches the raw JSON profile served at `user_info_url`.
	pub async fn fetch_profile(
		&self,
		user_info_url: &str,
		access_token: &AccessToken,
	) -> Result<Value, TransportError> {
		let url = parse_url(user_info_url)?;
		let response = self.get(url, access_token).await?;
		let bytes = response.bytes().await?;

		decode(&bytes)
	}

	async fn get(&self, url: Url, access_token: &AccessToken) -> Result<Response, TransportError> {
		tracing::debug!(url = %url, "calling GitHub API");

		let response = self
			.client
			.get(url)
			.header(ACCEPT, Self::MEDIA_TYPE)
			.header(USER_AGENT, Self::AGENT)
			.header(AUTHORIZATION, format!("token {}", access_token.secret()))
			.send()
			.await?;
		let status = response.status();

		if status.is_success() {
			return Ok(response);
		}

		let body = response.text().await.unwrap_or_default();

		Err(TransportError::Status { status: status.as_u16(), message: error_message(&body) })
	}

	async fn collect_teams(
		&self,
		access_token: &AccessToken,
	) -> Result<TeamListing, TransportError> {
		let first = self.teams_url()?;
		let origin = first.origin();
		let mut listing = TeamListing::default();
		let mut next = Some(first);
		let mut pages = 0;

		while let Some(url) = next.take() {
			if pages == Self::MAX_PAGES {
				tracing::warn!(pages, "team listing pagination truncated");

				break;
			}

			let response = self.get(url, access_token).await?;

			next = next_page(response.headers(), &origin)?;

			let bytes = response.bytes().await?;

			parse_team_page(&bytes, &mut listing)?;
			pages += 1;
		}

		tracing::debug!(pages, organizations = listing.len(), "team listing collected");

		Ok(listing)
	}
}
#[cfg(feature = "reqwest")]
impl TeamClient for ReqwestGithubClient {
	fn list_teams<'a>(&'a self, access_token: &'a AccessToken) -> TeamFuture<'a> {
		Box::pin(self.collect_teams(access_token))
	}
}

#[cfg(feature = "reqwest")]
fn next_page(headers: &HeaderMap, origin: &Origin) -> Result<Option<Url>, TransportError> {
	let Some(raw) = headers.get(LINK).and_then(|value| value.to_str().ok()) else {
		return Ok(None);
	};
	let Some(url) = next_link(raw).map(parse_url).transpose()? else {
		return Ok(None);
	};

	if &url.origin() != origin {
		return Err(TransportError::ForeignLink { url: url.into() });
	}

	Ok(Some(url))
}
