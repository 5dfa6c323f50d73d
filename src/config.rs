//! Strategy options (what the application supplies) and the validated configuration.

// self
use crate::{
	_prelude::*,
	auth::ScopeList,
	error::ConfigError,
	http::TokenPlacement,
	provider::ProviderDefaults,
};

/// Options accepted when constructing a strategy.
///
/// Every field is optional so the struct can be deserialized from partial configuration.
/// [`build`](Self::build) enforces the required credentials and fills the rest from
/// [`ProviderDefaults`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyOptions {
	/// OAuth 2.0 client identifier.
	pub client_id: Option<String>,
	/// OAuth 2.0 client secret.
	pub client_secret: Option<String>,
	/// Redirect URI registered with the provider.
	pub callback_url: Option<String>,
	/// Scopes requested during authorization, as a single string or a list.
	pub scope: ScopeList,
	/// Overrides the provider's authorization endpoint.
	pub authorization_url: Option<String>,
	/// Overrides the provider's token endpoint.
	pub token_url: Option<String>,
	/// Overrides the provider's profile endpoint.
	pub profile_url: Option<String>,
	/// Overrides the string used to join scopes.
	pub scope_separator: Option<String>,
	/// Overrides how the access token is attached to profile requests.
	pub token_placement: Option<TokenPlacement>,
}
impl StrategyOptions {
	/// Sets the client identifier.
	pub fn client_id(mut self, value: impl Into<String>) -> Self {
		self.client_id = Some(value.into());

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, value: impl Into<String>) -> Self {
		self.client_secret = Some(value.into());

		self
	}

	/// Sets the callback URL.
	pub fn callback_url(mut self, value: impl Into<String>) -> Self {
		self.callback_url = Some(value.into());

		self
	}

	/// Replaces the requested scopes with a pre-joined string or a list.
	pub fn scope(mut self, scope: impl Into<ScopeList>) -> Self {
		self.scope = scope.into();

		self
	}

	/// Sets the authorization endpoint.
	pub fn authorization_url(mut self, value: impl Into<String>) -> Self {
		self.authorization_url = Some(value.into());

		self
	}

	/// Sets the token endpoint.
	pub fn token_url(mut self, value: impl Into<String>) -> Self {
		self.token_url = Some(value.into());

		self
	}

	/// Sets the profile endpoint.
	pub fn profile_url(mut self, value: impl Into<String>) -> Self {
		self.profile_url = Some(value.into());

		self
	}

	/// Sets the scope separator.
	pub fn scope_separator(mut self, value: impl Into<String>) -> Self {
		self.scope_separator = Some(value.into());

		self
	}

	/// Sets the access-token placement for profile requests.
	pub fn token_placement(mut self, placement: TokenPlacement) -> Self {
		self.token_placement = Some(placement);

		self
	}

	/// Validates the options and fills unset values from `defaults`.
	pub fn build(self, defaults: &ProviderDefaults) -> Result<StrategyConfig, ConfigError> {
		let client_id = required(self.client_id).ok_or(ConfigError::MissingClientId)?;
		let client_secret = required(self.client_secret).ok_or(ConfigError::MissingClientSecret)?;
		let callback_url = required(self.callback_url).ok_or(ConfigError::MissingCallbackUrl)?;
		let callback_url = parse_url("callback_url", &callback_url)?;
		let authorization_url = parse_url(
			"authorization_url",
			&required(self.authorization_url).unwrap_or_else(|| defaults.authorization_url.into()),
		)?;
		let token_url = parse_url(
			"token_url",
			&required(self.token_url).unwrap_or_else(|| defaults.token_url.into()),
		)?;
		let profile_url = parse_url(
			"profile_url",
			&required(self.profile_url).unwrap_or_else(|| defaults.profile_url.into()),
		)?;
		let scope_separator =
			required(self.scope_separator).unwrap_or_else(|| defaults.scope_separator.into());
		let scope = self.scope;
		let token_placement = self.token_placement.unwrap_or(defaults.token_placement);

		Ok(StrategyConfig {
			client_id,
			client_secret,
			callback_url,
			scope,
			authorization_url,
			token_url,
			profile_url,
			scope_separator,
			token_placement,
		})
	}
}

/// Validated, immutable strategy configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct StrategyConfig {
	client_id: String,
	client_secret: String,
	callback_url: Url,
	scope: ScopeList,
	authorization_url: Url,
	token_url: Url,
	profile_url: Url,
	scope_separator: String,
	token_placement: TokenPlacement,
}
impl StrategyConfig {
	/// OAuth 2.0 client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// OAuth 2.0 client secret. Callers must avoid logging this string.
	pub fn client_secret(&self) -> &str {
		&self.client_secret
	}

	/// Redirect URI sent with authorization and token requests.
	pub fn callback_url(&self) -> &Url {
		&self.callback_url
	}

	/// Scopes requested during authorization.
	pub fn scope(&self) -> &ScopeList {
		&self.scope
	}

	/// Authorization endpoint.
	pub fn authorization_url(&self) -> &Url {
		&self.authorization_url
	}

	/// Token endpoint.
	pub fn token_url(&self) -> &Url {
		&self.token_url
	}

	/// Profile endpoint.
	pub fn profile_url(&self) -> &Url {
		&self.profile_url
	}

	/// String used to join scopes.
	pub fn scope_separator(&self) -> &str {
		&self.scope_separator
	}

	/// Access-token placement for profile requests.
	pub fn token_placement(&self) -> TokenPlacement {
		self.token_placement
	}

	/// Requested scopes joined with the configured separator.
	pub fn joined_scope(&self) -> Option<String> {
		self.scope.join(&self.scope_separator)
	}
}
impl Debug for StrategyConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyConfig")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("callback_url", &self.callback_url.as_str())
			.field("scope", &self.scope)
			.field("authorization_url", &self.authorization_url.as_str())
			.field("token_url", &self.token_url.as_str())
			.field("profile_url", &self.profile_url.as_str())
			.field("scope_separator", &self.scope_separator)
			.field("token_placement", &self.token_placement)
			.finish()
	}
}

fn required(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.is_empty())
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
	Url::parse(value).map_err(|source| ConfigError::InvalidUrl { field, source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const DEFAULTS: ProviderDefaults = ProviderDefaults {
		authorization_url: "https://example.com/oauth/authorize",
		token_url: "https://example.com/oauth/token",
		profile_url: "https://api.example.com/me",
		scope_separator: " ",
		token_placement: TokenPlacement::Header,
	};

	fn complete() -> StrategyOptions {
		StrategyOptions::default()
			.client_id("ABC123")
			.client_secret("secret")
			.callback_url("https://app.example.com/auth/callback")
	}

	#[test]
	fn defaults_fill_unset_options() {
		let config = complete().build(&DEFAULTS).expect("Complete options should build.");

		assert_eq!(config.authorization_url().as_str(), DEFAULTS.authorization_url);
		assert_eq!(config.token_url().as_str(), DEFAULTS.token_url);
		assert_eq!(config.profile_url().as_str(), DEFAULTS.profile_url);
		assert_eq!(config.scope_separator(), " ");
		assert_eq!(config.token_placement(), TokenPlacement::Header);
		assert_eq!(config.joined_scope(), None);
	}

	#[test]
	fn explicit_options_override_defaults() {
		let config = complete()
			.authorization_url("https://auth.test/authorize")
			.token_url("https://auth.test/token")
			.profile_url("https://auth.test/me")
			.scope_separator(",")
			.scope(["basic", "ponyfm:tracks:upload"])
			.token_placement(TokenPlacement::Query)
			.build(&DEFAULTS)
			.expect("Overridden options should build.");

		assert_eq!(config.authorization_url().as_str(), "https://auth.test/authorize");
		assert_eq!(config.token_url().as_str(), "https://auth.test/token");
		assert_eq!(config.profile_url().as_str(), "https://auth.test/me");
		assert_eq!(config.joined_scope(), Some("basic,ponyfm:tracks:upload".into()));
		assert_eq!(config.token_placement(), TokenPlacement::Query);
	}

	#[test]
	fn missing_credentials_fail_construction() {
		let err = StrategyOptions { client_id: None, ..complete() }
			.build(&DEFAULTS)
			.expect_err("Missing client_id must fail.");

		assert!(matches!(err, ConfigError::MissingClientId));

		let err = StrategyOptions { client_secret: Some(String::new()), ..complete() }
			.build(&DEFAULTS)
			.expect_err("Empty client_secret must fail.");

		assert!(matches!(err, ConfigError::MissingClientSecret));

		let err = StrategyOptions { callback_url: None, ..complete() }
			.build(&DEFAULTS)
			.expect_err("Missing callback_url must fail.");

		assert!(matches!(err, ConfigError::MissingCallbackUrl));
		assert!(matches!(
			StrategyOptions::default().build(&DEFAULTS),
			Err(ConfigError::MissingClientId)
		));
	}

	#[test]
	fn empty_separator_falls_back_to_default() {
		let config = complete()
			.scope_separator("")
			.build(&DEFAULTS)
			.expect("Empty separator should fall back to the default.");

		assert_eq!(config.scope_separator(), " ");
	}

	#[test]
	fn invalid_urls_are_rejected() {
		let err = complete()
			.profile_url("not a url")
			.build(&DEFAULTS)
			.expect_err("Relative profile URL must fail.");

		assert!(matches!(err, ConfigError::InvalidUrl { field: "profile_url", .. }));
	}

	#[test]
	fn pre_joined_scope_string_is_sent_unsplit() {
		let config = complete()
			.scope("basic ponyfm:tracks:upload")
			.scope_separator(",")
			.build(&DEFAULTS)
			.expect("A pre-joined scope string should build.");

		assert_eq!(config.joined_scope(), Some("basic ponyfm:tracks:upload".into()));
	}

	#[test]
	fn options_deserialize_from_partial_json() {
		let options: StrategyOptions = serde_json::from_str(
			r#"{"client_id":"ABC123","client_secret":"secret","callback_url":"https://app.example.com/cb","token_placement":"query"}"#,
		)
		.expect("Partial options should deserialize.");

		assert_eq!(options.token_placement, Some(TokenPlacement::Query));
		assert_eq!(options.scope, ScopeList::default());
		assert!(options.build(&DEFAULTS).is_ok());

		let options: StrategyOptions = serde_json::from_str(
			r#"{"client_id":"ABC123","client_secret":"secret","callback_url":"https://app.example.com/cb","scope":"basic"}"#,
		)
		.expect("A scope string should deserialize.");
		let config = options.build(&DEFAULTS).expect("String scope options should build.");

		assert_eq!(config.joined_scope(), Some("basic".into()));
	}

	#[test]
	fn debug_redacts_client_secret() {
		let config = complete().build(&DEFAULTS).expect("Complete options should build.");
		let rendered = format!("{config:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("\"secret\""));
	}
}
