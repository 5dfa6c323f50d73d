//! Redacted token secrets and the token set returned by a code exchange.

// self
use crate::{_prelude::*, auth::ScopeList};

macro_rules! def_secret {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);
		impl $name {
			/// Wraps a new secret string.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Returns the inner token value. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret! { AccessToken, "Bearer credential used to authorize provider API calls." }
def_secret! { RefreshToken, "Long-lived credential the provider may issue next to an access token." }

/// Tokens issued by the provider's token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
	/// Access token secret; callers must avoid logging it.
	pub access_token: AccessToken,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<RefreshToken>,
	/// Scopes the provider reported as granted, if it reported any.
	pub scope: Option<ScopeList>,
	/// Instant the token response was received.
	pub issued_at: OffsetDateTime,
	/// Expiry instant derived from `expires_in`, when supplied.
	pub expires_at: Option<OffsetDateTime>,
}
impl TokenSet {
	/// Creates a token set issued now without refresh token, scope, or expiry.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: AccessToken::new(access_token),
			refresh_token: None,
			scope: None,
			issued_at: OffsetDateTime::now_utc(),
			expires_at: None,
		}
	}
}
