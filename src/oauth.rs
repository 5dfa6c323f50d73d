//! Thin facade over the `oauth2` crate: redirect construction and the code exchange.

pub use oauth2;

// crates.io
use oauth2::{
	AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
	HttpClientError, RedirectUrl, RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicRequestTokenError, BasicTokenResponse},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, RefreshToken, ScopeList, TokenSet},
	config::StrategyConfig,
	error::{ConfigError, TokenError},
	http::{ResponseMetadata, ResponseMetadataSlot, TokenHttpClient},
};

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Authorization redirect plus the `state` the application must persist and compare.
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
	/// URL the user agent should be sent to.
	pub url: Url,
	/// Opaque state value echoed back on the callback.
	pub state: String,
}

/// `oauth2` client configured from a [`StrategyConfig`].
pub(crate) struct OAuthFacade {
	client: ConfiguredBasicClient,
	scope: Option<String>,
}
impl OAuthFacade {
	pub(crate) fn from_config(config: &StrategyConfig) -> Result<Self, ConfigError> {
		let auth_url = AuthUrl::new(config.authorization_url().to_string())
			.map_err(|source| ConfigError::InvalidUrl { field: "authorization_url", source })?;
		let token_url = TokenUrl::new(config.token_url().to_string())
			.map_err(|source| ConfigError::InvalidUrl { field: "token_url", source })?;
		let redirect_url = RedirectUrl::new(config.callback_url().to_string())
			.map_err(|source| ConfigError::InvalidUrl { field: "callback_url", source })?;
		let client = BasicClient::new(ClientId::new(config.client_id().to_owned()))
			.set_client_secret(ClientSecret::new(config.client_secret().to_owned()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_redirect_uri(redirect_url);

		Ok(Self { client, scope: config.joined_scope() })
	}

	/// Builds the authorization redirect with a fresh random state.
	///
	/// The scope goes out as one pre-joined parameter because providers disagree on the
	/// separator and `oauth2` always joins with a space.
	pub(crate) fn authorize_url(&self) -> Result<AuthorizationRequest, ConfigError> {
		let mut request = self.client.authorize_url(CsrfToken::new_random);

		if let Some(scope) = &self.scope {
			request = request.add_extra_param("scope", scope.clone());
		}

		let (url, state) = request.url();
		let url = Url::parse(url.as_str())
			.map_err(|source| ConfigError::InvalidUrl { field: "authorization_url", source })?;

		Ok(AuthorizationRequest { url, state: state.secret().to_owned() })
	}

	/// Exchanges an authorization code for tokens.
	pub(crate) async fn exchange_code<C>(
		&self,
		http_client: &C,
		code: &str,
	) -> Result<TokenSet, TokenError>
	where
		C: ?Sized + TokenHttpClient,
	{
		let meta = ResponseMetadataSlot::default();
		let instrumented = http_client.with_metadata(meta.clone());
		let response = self
			.client
			.exchange_code(AuthorizationCode::new(code.to_owned()))
			.request_async(&instrumented)
			.await
			.map_err(|err| map_request_error(meta.take(), err))?;

		Ok(map_token_response(response))
	}
}

fn map_token_response(response: BasicTokenResponse) -> TokenSet {
	let issued_at = OffsetDateTime::now_utc();
	let expires_at = response
		.expires_in()
		.and_then(|lifetime| i64::try_from(lifetime.as_secs()).ok())
		.map(|secs| issued_at + Duration::seconds(secs));
	let scope = response
		.scopes()
		.map(|scopes| ScopeList::new(scopes.iter().map(|scope| scope.as_str())));

	TokenSet {
		access_token: AccessToken::new(response.access_token().secret().to_owned()),
		refresh_token: response
			.refresh_token()
			.map(|token| RefreshToken::new(token.secret().to_owned())),
		scope,
		issued_at,
		expires_at,
	}
}

fn map_request_error<E>(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
) -> TokenError
where
	E: 'static + Send + Sync + StdError,
{
	let status = meta.and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) => {
			let code = response.error().as_ref().to_owned();
			let message = response.error_description().cloned().unwrap_or_else(|| code.clone());

			TokenError::Rejected { code, message, status }
		},
		RequestTokenError::Request(error) =>
			TokenError::Transport { source: Box::new(error), status },
		RequestTokenError::Parse(source, _body) => TokenError::Parse { source, status },
		RequestTokenError::Other(message) => TokenError::Unexpected { message, status },
	}
}
