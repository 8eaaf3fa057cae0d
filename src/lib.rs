//! GitHub identity-provider adapter for OAuth 2.0 logins: validated authorization and
//! token request shapes, profile normalization, and organization/team group resolution.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod http;
pub mod obs;
pub mod provider;
pub mod request;
pub mod settings;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and fakes for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// crates.io
	use oauth2::AccessToken;
	// self
	use crate::{
		auth::TeamListing,
		error::TransportError,
		http::{TeamClient, TeamFuture},
		provider::github::keys,
		settings::MemorySettings,
	};

	/// Client id used by [`github_settings`].
	pub const TEST_CLIENT_ID: &str = "test-client-id";
	/// Client secret used by [`github_settings`].
	pub const TEST_CLIENT_SECRET: &str = "test-client-secret";

	/// GitHub settings with credentials set and every other property on its default.
	pub fn github_settings() -> MemorySettings {
		MemorySettings::from_pairs([
			(keys::CLIENT_ID, TEST_CLIENT_ID),
			(keys::CLIENT_SECRET, TEST_CLIENT_SECRET),
		])
	}

	/// Team client that always answers with a fixed listing.
	#[derive(Clone, Debug, Default)]
	pub struct StaticTeamClient(pub TeamListing);
	impl StaticTeamClient {
		/// Wraps `listing`.
		pub fn new(listing: TeamListing) -> Self {
			Self(listing)
		}
	}
	impl TeamClient for StaticTeamClient {
		fn list_teams<'a>(&'a self, _access_token: &'a AccessToken) -> TeamFuture<'a> {
			let listing = self.0.clone();

			Box::pin(async move { Ok(listing) })
		}
	}

	/// Team client that always fails as if GitHub rejected the token.
	#[derive(Clone, Copy, Debug, Default)]
	pub struct FailingTeamClient;
	impl TeamClient for FailingTeamClient {
		fn list_teams<'a>(&'a self, _access_token: &'a AccessToken) -> TeamFuture<'a> {
			Box::pin(async {
				Err(TransportError::Status { status: 401, message: "Bad credentials".into() })
			})
		}
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
