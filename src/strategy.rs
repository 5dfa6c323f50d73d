//! Generic OAuth 2.0 strategy assembled from a configuration, a profile fetcher, and a verify
//! callback.
//!
//! The strategy owns no provider knowledge: endpoints come from [`StrategyConfig`], profile
//! normalization from the plugged-in [`ProfileFetcher`], and the decision about who the user is
//! from the application's [`Verify`] implementation. The `oauth2` crate performs the redirect
//! construction and code exchange.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenSet},
	config::StrategyConfig,
	error::{BoxError, ConfigError, ProfileError},
	http::{AuthorizedGet, TokenHttpClient},
	oauth::{AuthorizationRequest, OAuthFacade},
	obs::{self, FlowKind},
	profile::NormalizedProfile,
	provider::ProfileFetcher,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Boxed future returned by [`Verify::verify`].
pub type VerifyFuture<'a, U> =
	Pin<Box<dyn Future<Output = Result<Option<U>, BoxError>> + 'a + Send>>;

/// Application hook that maps provider tokens and profile onto a local user.
///
/// Returning `Ok(None)` declines the login without raising an error. Closures of the shape
/// `Fn(TokenSet, NormalizedProfile) -> impl Future<Output = Result<Option<U>, BoxError>>`
/// implement this trait.
pub trait Verify: Send + Sync {
	/// Application user type produced on success.
	type User: Send;

	/// Resolves the user behind `tokens` and `profile`.
	fn verify(&self, tokens: TokenSet, profile: NormalizedProfile) -> VerifyFuture<'_, Self::User>;
}
impl<F, Fut, U> Verify for F
where
	F: Send + Sync + Fn(TokenSet, NormalizedProfile) -> Fut,
	Fut: 'static + Send + Future<Output = Result<Option<U>, BoxError>>,
	U: Send,
{
	type User = U;

	fn verify(&self, tokens: TokenSet, profile: NormalizedProfile) -> VerifyFuture<'_, U> {
		Box::pin(self(tokens, profile))
	}
}

/// OAuth 2.0 authorization-code strategy.
pub struct Strategy<V, C>
where
	C: AuthorizedGet + TokenHttpClient,
{
	config: Arc<StrategyConfig>,
	profile: Arc<dyn ProfileFetcher>,
	verify: V,
	http_client: Arc<C>,
	oauth: OAuthFacade,
}
impl<V, C> Strategy<V, C>
where
	V: Verify,
	C: AuthorizedGet + TokenHttpClient,
{
	/// Creates a strategy that reuses the caller-provided transport.
	pub fn with_http_client(
		config: StrategyConfig,
		profile: Arc<dyn ProfileFetcher>,
		verify: V,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self, ConfigError> {
		let oauth = OAuthFacade::from_config(&config)?;

		Ok(Self {
			config: Arc::new(config),
			profile,
			verify,
			http_client: http_client.into(),
			oauth,
		})
	}

	/// Strategy name, taken from the profile fetcher's provider.
	pub fn name(&self) -> &'static str {
		self.profile.provider()
	}

	/// Shared, immutable configuration.
	pub fn config(&self) -> &Arc<StrategyConfig> {
		&self.config
	}

	/// Builds the authorization redirect and a fresh `state` value.
	///
	/// The caller must store `state` and compare it with the value returned on the callback.
	pub fn authorization_url(&self) -> Result<AuthorizationRequest> {
		obs::observe_sync(self.name(), FlowKind::AuthorizationUrl, || {
			self.oauth.authorize_url().map_err(Error::from)
		})
	}

	/// Exchanges an authorization code for tokens at the configured token endpoint.
	pub async fn exchange_code(&self, code: &str) -> Result<TokenSet> {
		obs::observe(self.name(), FlowKind::TokenExchange, async {
			self.oauth.exchange_code(&*self.http_client, code).await.map_err(Error::from)
		})
		.await
	}

	/// Loads the normalized profile for `access_token`.
	pub async fn user_profile(
		&self,
		access_token: &AccessToken,
	) -> Result<NormalizedProfile, ProfileError> {
		let client: &dyn AuthorizedGet = &*self.http_client;

		self.profile.fetch_profile(client, access_token).await
	}

	/// Runs the callback leg: code exchange, profile fetch, then the verify callback.
	///
	/// Returns `Ok(None)` when the verify callback declines the user.
	pub async fn authenticate(&self, code: &str) -> Result<Option<V::User>> {
		let tokens = self.exchange_code(code).await?;
		let profile = self.user_profile(&tokens.access_token).await?;

		self.verify.verify(tokens, profile).await.map_err(|source| Error::Verify { source })
	}
}
#[cfg(feature = "reqwest")]
impl<V> Strategy<V, ReqwestHttpClient>
where
	V: Verify,
{
	/// Creates a strategy backed by a default reqwest transport.
	pub fn new(
		config: StrategyConfig,
		profile: Arc<dyn ProfileFetcher>,
		verify: V,
	) -> Result<Self, ConfigError> {
		Self::with_http_client(config, profile, verify, ReqwestHttpClient::default())
	}
}
impl<V, C> Debug for Strategy<V, C>
where
	C: AuthorizedGet + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Strategy")
			.field("name", &self.profile.provider())
			.field("config", &self.config)
			.finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::{poniverse, profile::ProfileFields};

	fn options() -> crate::config::StrategyOptions {
		poniverse::options()
			.client_id("ABC123")
			.client_secret("secret")
			.callback_url("https://passport-poniverse.poni/auth/callback")
	}

	#[test]
	fn strategy_is_named_after_provider() {
		let strategy = poniverse::strategy(
			options(),
			|_tokens: TokenSet, profile: NormalizedProfile| async move {
				Ok::<_, BoxError>(Some(profile))
			},
		)
		.expect("Strategy should build from complete options.");

		assert_eq!(strategy.name(), "poniverse");
		assert_eq!(strategy.config().profile_url().as_str(), poniverse::DEFAULTS.profile_url);
	}

	#[test]
	fn construction_without_options_fails() {
		let err = poniverse::strategy(
			poniverse::options(),
			|_tokens: TokenSet, _profile: NormalizedProfile| async move {
				Ok::<Option<()>, BoxError>(None)
			},
		)
		.expect_err("Empty options must fail.");

		assert!(matches!(err, ConfigError::MissingClientId));
	}

	#[tokio::test]
	async fn closures_implement_verify() {
		let verify = |tokens: TokenSet, profile: NormalizedProfile| async move {
			Ok::<_, BoxError>(Some((tokens.access_token.expose().to_owned(), profile.id)))
		};
		let fields = ProfileFields { id: "id", username: "u", display_name: "d", email: "e" };
		let profile = NormalizedProfile::from_json(
			"poniverse",
			&fields,
			"{\"id\":\"1\"}",
			serde_json::json!({ "id": "1" }),
		);
		let user = Verify::verify(&verify, TokenSet::new("tok"), profile)
			.await
			.expect("Closure verify should succeed.");

		assert_eq!(user, Some(("tok".to_owned(), Some(serde_json::json!("1")))));
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let strategy = poniverse::strategy(
			options(),
			|_tokens: TokenSet, profile: NormalizedProfile| async move {
				Ok::<_, BoxError>(Some(profile))
			},
		)
		.expect("Strategy should build from complete options.");
		let rendered = format!("{strategy:?}");

		assert!(rendered.contains("poniverse"));
		assert!(!rendered.contains("\"secret\""));
	}
}
