//! Poniverse provider: endpoint defaults and profile normalization.
//!
//! ```no_run
//! use oauth2_poniverse::{auth::TokenSet, error::BoxError, poniverse, profile::NormalizedProfile};
//!
//! # fn main() -> Result<(), oauth2_poniverse::error::ConfigError> {
//! let options = poniverse::options()
//! 	.client_id("123-456-789")
//! 	.client_secret("shhh-its-a-secret")
//! 	.callback_url("https://www.example.net/auth/poniverse/callback")
//! 	.scope(["basic"]);
//! let strategy =
//! 	poniverse::strategy(options, |_tokens: TokenSet, profile: NormalizedProfile| async move {
//! 		Ok::<_, BoxError>(Some(profile))
//! 	})?;
//!
//! assert_eq!(strategy.name(), "poniverse");
//! # Ok(())
//! # }
//! ```

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	config::{StrategyConfig, StrategyOptions},
	error::ProfileError,
	http::{AuthorizedGet, TokenPlacement},
	obs::{self, FlowKind},
	profile::{self, NormalizedProfile, ProfileFields},
	provider::{ProfileFetcher, ProfileFuture, ProviderDefaults},
};
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, http::ReqwestHttpClient, strategy::{Strategy, Verify}};

/// Canonical provider name.
pub const PROVIDER_NAME: &str = "poniverse";

/// Poniverse endpoint defaults.
///
/// Poniverse expects the access token as a query parameter on API GETs rather than in the
/// `Authorization` header.
pub const DEFAULTS: ProviderDefaults = ProviderDefaults {
	authorization_url: "https://poniverse.net/oauth/authorize",
	token_url: "https://poniverse.net/oauth/access_token",
	profile_url: "https://api.poniverse.net/v1/users/me",
	scope_separator: " ",
	token_placement: TokenPlacement::Query,
};

/// Member names of the `users/me` payload.
pub const PROFILE_FIELDS: ProfileFields =
	ProfileFields { id: "id", username: "username", display_name: "display_name", email: "email" };

/// Strategy wired to the reqwest transport.
#[cfg(feature = "reqwest")]
pub type PoniverseStrategy<V> = Strategy<V, ReqwestHttpClient>;

/// Starts an empty set of options; pass the result to [`strategy`] or
/// [`StrategyOptions::build`] with [`DEFAULTS`].
pub fn options() -> StrategyOptions {
	StrategyOptions::default()
}

/// Validates `options` against the Poniverse defaults and assembles a strategy.
#[cfg(feature = "reqwest")]
pub fn strategy<V>(options: StrategyOptions, verify: V) -> Result<PoniverseStrategy<V>, ConfigError>
where
	V: Verify,
{
	let config = options.build(&DEFAULTS)?;
	let profile = PoniverseProfile::from_config(&config);

	Strategy::new(config, Arc::new(profile), verify)
}

/// Fetches `users/me` and maps it onto a [`NormalizedProfile`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoniverseProfile {
	profile_url: Url,
	token_placement: TokenPlacement,
}
impl PoniverseProfile {
	/// Creates a fetcher for an explicit endpoint.
	pub fn new(profile_url: Url, token_placement: TokenPlacement) -> Self {
		Self { profile_url, token_placement }
	}

	/// Creates a fetcher from the configured profile endpoint and token placement.
	pub fn from_config(config: &StrategyConfig) -> Self {
		Self::new(config.profile_url().clone(), config.token_placement())
	}

	/// Endpoint queried by [`ProfileFetcher::fetch_profile`].
	pub fn profile_url(&self) -> &Url {
		&self.profile_url
	}
}
impl ProfileFetcher for PoniverseProfile {
	fn provider(&self) -> &'static str {
		PROVIDER_NAME
	}

	fn fetch_profile<'a>(
		&'a self,
		client: &'a dyn AuthorizedGet,
		access_token: &'a AccessToken,
	) -> ProfileFuture<'a> {
		Box::pin(obs::observe(PROVIDER_NAME, FlowKind::Profile, async move {
			let body = client
				.authorized_get(&self.profile_url, access_token, self.token_placement)
				.await
				.map_err(profile::classify_get_error)?;
			let parsed = profile::parse_profile_body(&body)?;

			Ok::<_, ProfileError>(NormalizedProfile::from_json(
				PROVIDER_NAME,
				&PROFILE_FIELDS,
				body,
				parsed,
			))
		}))
	}
}
