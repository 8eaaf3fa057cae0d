//! Builds the GitHub authorization and token-exchange requests from in-memory settings,
//! then, when `GITHUB_TOKEN` is set, fetches the caller's profile and team-derived groups.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
use oauth2::AccessToken;
// self
use oauth2_github_adapter::{
	http::ReqwestGithubClient,
	provider::{GithubProvider, IdentityProvider, ProviderRegistry, github::keys},
	settings::MemorySettings,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let settings = MemorySettings::default()
		.with(
			keys::CLIENT_ID,
			env::var("GITHUB_CLIENT_ID").unwrap_or_else(|_| "demo-client".into()),
		)
		.with(
			keys::CLIENT_SECRET,
			env::var("GITHUB_CLIENT_SECRET").unwrap_or_else(|_| "demo-secret".into()),
		);
	let client = ReqwestGithubClient::new()?;
	let provider: Arc<dyn IdentityProvider> =
		Arc::new(GithubProvider::new(Arc::new(settings), Arc::new(client.clone())));
	let registry = ProviderRegistry::default().with(provider)?;
	let github = registry.get("github")?;
	let authorize = github.build_authorization_request()?;
	let exchange = github.build_access_token_request()?;

	println!("Send your user to {}.", authorize.to_url()?);
	println!(
		"Exchange the code with {} {} (parameters: {:?}).",
		github.access_token_method(),
		exchange.base_url(),
		exchange.params().names().collect::<Vec<_>>()
	);

	let Ok(token) = env::var("GITHUB_TOKEN") else {
		println!("Set `GITHUB_TOKEN` to resolve a profile and its groups.");

		return Ok(());
	};
	let token = AccessToken::new(token);
	let profile = client.fetch_profile(&github.user_info_url(), &token).await?;
	let identity = github.map_user_profile(&profile)?;
	let groups = github.resolve_groups(&token).await;

	println!("Signed in as {} <{}> ({}).", identity.display_name, identity.email, identity.login);

	for group in groups.iter() {
		println!("Member of `{group}`.");
	}

	Ok(())
}
