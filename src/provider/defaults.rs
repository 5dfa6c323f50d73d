//! Per-provider fallbacks for options the application leaves unset.

// self
use crate::http::TokenPlacement;

/// Fallback values a provider supplies for options the application leaves unset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProviderDefaults {
	/// Authorization endpoint the user is redirected to.
	pub authorization_url: &'static str,
	/// Token endpoint used for the code exchange.
	pub token_url: &'static str,
	/// Endpoint returning the authenticated user's profile.
	pub profile_url: &'static str,
	/// String used to join requested scopes.
	pub scope_separator: &'static str,
	/// How the access token is attached to profile requests.
	pub token_placement: TokenPlacement,
}
