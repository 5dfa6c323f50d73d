//! Strategy-level error types shared across configuration, token exchange, and profile fetches.

// self
use crate::{_prelude::*, http::GetError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used wherever a collaborator supplies its own error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Profile fetch failed.
	#[error(transparent)]
	Profile(#[from] ProfileError),
	/// Authorization code could not be exchanged for an access token.
	#[error(transparent)]
	Token(#[from] TokenError),
	/// Application verify callback reported an error.
	#[error("Verify callback failed.")]
	Verify {
		/// Error returned by the callback.
		#[source]
		source: BoxError,
	},
}

/// Configuration and validation failures raised while constructing a strategy.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// `client_id` was absent or empty.
	#[error("Strategy requires a client_id option.")]
	MissingClientId,
	/// `client_secret` was absent or empty.
	#[error("Strategy requires a client_secret option.")]
	MissingClientSecret,
	/// `callback_url` was absent or empty.
	#[error("Strategy requires a callback_url option.")]
	MissingCallbackUrl,
	/// A configured endpoint is not an absolute URL.
	#[error("The {field} option is not a valid URL.")]
	InvalidUrl {
		/// Option name that failed to parse.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Discriminant of a [`ProfileError`], handy for matching without destructuring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProfileErrorKind {
	/// Provider answered with an OAuth error payload.
	ProviderRejected,
	/// Transport failed or the error payload carried no OAuth error.
	TransportFailure,
	/// Successful response whose body was not JSON.
	MalformedResponse,
}

/// Exactly one of these is produced by a failed profile fetch.
#[derive(Debug, ThisError)]
pub enum ProfileError {
	/// Provider rejected the request; the message is its `error_description` verbatim.
	#[error("{message}")]
	ProviderRejected {
		/// Provider-supplied description.
		message: String,
	},
	/// Request-level failure without a usable provider error payload.
	#[error("Failed to fetch user profile")]
	TransportFailure {
		/// Error reported by the HTTP collaborator.
		#[source]
		source: GetError,
	},
	/// Response body was not valid JSON.
	#[error("Failed to parse user profile")]
	MalformedResponse,
}
impl ProfileError {
	/// Returns the variant tag.
	pub fn kind(&self) -> ProfileErrorKind {
		match self {
			Self::ProviderRejected { .. } => ProfileErrorKind::ProviderRejected,
			Self::TransportFailure { .. } => ProfileErrorKind::TransportFailure,
			Self::MalformedResponse => ProfileErrorKind::MalformedResponse,
		}
	}
}

/// Token endpoint failures surfaced by [`crate::strategy::Strategy::exchange_code`].
#[derive(Debug, ThisError)]
pub enum TokenError {
	/// Provider returned an OAuth error response.
	#[error("{message}")]
	Rejected {
		/// OAuth `error` code.
		code: String,
		/// `error_description` when supplied, otherwise the code.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Transport failed before a token response was received.
	#[error("Failed to obtain access token")]
	Transport {
		/// Transport-specific failure.
		#[source]
		source: BoxError,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint responded with JSON that does not describe a token.
	#[error("Token endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Any other unexpected token endpoint response.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	Unexpected {
		/// Summary of the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
