//! Profile fetch hook plugged into the generic strategy.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::ProfileError,
	http::AuthorizedGet,
	profile::NormalizedProfile,
};

/// Boxed future returned by [`ProfileFetcher::fetch_profile`].
pub type ProfileFuture<'a> =
	Pin<Box<dyn Future<Output = Result<NormalizedProfile, ProfileError>> + 'a + Send>>;

/// Provider-specific capability that loads and normalizes the authenticated user's profile.
///
/// Implementations receive the HTTP collaborator per call instead of owning one, so the same
/// fetcher works with any [`AuthorizedGet`] and keeps no per-call state.
pub trait ProfileFetcher: Send + Sync {
	/// Canonical provider name stamped onto every profile.
	fn provider(&self) -> &'static str;

	/// Issues one authorized request and normalizes the response.
	fn fetch_profile<'a>(
		&'a self,
		client: &'a dyn AuthorizedGet,
		access_token: &'a AccessToken,
	) -> ProfileFuture<'a>;
}
