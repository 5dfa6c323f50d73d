//! Transport primitives for token exchanges and authorized provider GETs.
//!
//! Two seams live here. [`AuthorizedGet`] is the single capability a profile fetcher needs:
//! issue one GET carrying an access token and hand back either the body or a [`GetError`]
//! that keeps the provider's raw payload. [`TokenHttpClient`] produces `oauth2`
//! [`AsyncHttpClient`] handles so the `oauth2` crate can run the code exchange while the
//! strategy still learns the HTTP status through a [`ResponseMetadataSlot`].

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError};
#[cfg(feature = "reqwest")] use oauth2::{HttpRequest, HttpResponse};
// self
use crate::{_prelude::*, auth::AccessToken, error::BoxError};

/// Boxed future returned by [`AuthorizedGet::authorized_get`].
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, GetError>> + 'a + Send>>;

/// Where the access token travels on an authorized GET.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPlacement {
	/// `Authorization: Bearer <token>` header.
	#[default]
	Header,
	/// `access_token=<token>` query parameter.
	Query,
}

/// Capability to perform one authenticated GET against a provider endpoint.
///
/// Implementations issue exactly one request per call and never retry. Non-success HTTP
/// statuses must be reported as a [`GetError`] carrying the status and the response body
/// so callers can inspect provider error payloads.
pub trait AuthorizedGet
where
	Self: 'static + Send + Sync,
{
	/// Fetches `url` with `access_token` attached according to `placement`.
	fn authorized_get<'a>(
		&'a self,
		url: &'a Url,
		access_token: &'a AccessToken,
		placement: TokenPlacement,
	) -> HttpFuture<'a, String>;
}

/// Request-level failure reported by an [`AuthorizedGet`] implementation.
#[derive(Debug, ThisError)]
#[error("{}", describe_get_error(.status.as_ref(), .source.is_some()))]
pub struct GetError {
	/// HTTP status code, when a response was received.
	pub status: Option<u16>,
	/// Raw response payload, when a response was received.
	pub data: Option<String>,
	/// Underlying transport failure, if any.
	#[source]
	pub source: Option<BoxError>,
}
impl GetError {
	/// Failure with neither a response nor an underlying cause.
	pub fn without_payload() -> Self {
		Self { status: None, data: None, source: None }
	}

	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self { status: None, data: None, source: Some(Box::new(src)) }
	}

	/// Non-success HTTP response with its body.
	pub fn http_status(status: u16, data: impl Into<String>) -> Self {
		Self { status: Some(status), data: Some(data.into()), source: None }
	}

	/// Attaches an HTTP status code.
	pub fn with_status(mut self, status: u16) -> Self {
		self.status = Some(status);

		self
	}
}

fn describe_get_error(status: Option<&u16>, has_source: bool) -> String {
	match status {
		Some(code) => format!("Provider responded with HTTP status {code}."),
		None if has_source => "Network error occurred while calling the provider.".into(),
		None => "Request to the provider failed.".into(),
	}
}

/// Abstraction over HTTP transports capable of executing `oauth2` token exchanges while
/// publishing response metadata.
///
/// Implementations must be `Send + Sync + 'static`, and the handles they return must own
/// whatever state is required so their request futures remain `Send`.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle tied to a [`ResponseMetadataSlot`].
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds an [`AsyncHttpClient`] handle that records outcomes in `slot`.
	///
	/// Call [`ResponseMetadataSlot::take`] before submitting the request and
	/// [`ResponseMetadataSlot::store`] once a status is known.
	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle;
}

/// Metadata from the most recent token endpoint response.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadata {
	/// HTTP status code returned by the token endpoint, if available.
	pub status: Option<u16>,
}

/// Thread-safe slot for sharing [`ResponseMetadata`] between transport and error layers.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata for the current request.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// Thin wrapper around [`ReqwestClient`] used for both the token exchange and profile GETs.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AuthorizedGet for ReqwestHttpClient {
	fn authorized_get<'a>(
		&'a self,
		url: &'a Url,
		access_token: &'a AccessToken,
		placement: TokenPlacement,
	) -> HttpFuture<'a, String> {
		Box::pin(async move {
			let request = match placement {
				TokenPlacement::Header => self.0.get(url.clone()).bearer_auth(access_token.expose()),
				TokenPlacement::Query => {
					let mut target = url.clone();

					target.query_pairs_mut().append_pair("access_token", access_token.expose());

					self.0.get(target)
				},
			};
			let response = request.send().await.map_err(GetError::network)?;
			let status = response.status();
			let body = response
				.text()
				.await
				.map_err(|e| GetError::network(e).with_status(status.as_u16()))?;

			if status.is_success() {
				Ok(body)
			} else {
				Err(GetError::http_status(status.as_u16(), body))
			}
		})
	}
}

#[cfg(feature = "reqwest")]
/// Instrumented adapter that implements [`AsyncHttpClient`] for reqwest.
pub(crate) struct InstrumentedHttpClient {
	client: ReqwestClient,
	slot: ResponseMetadataSlot,
}

#[cfg(feature = "reqwest")]
/// Handle returned by [`ReqwestHttpClient`] that satisfies [`TokenHttpClient`].
#[derive(Clone)]
pub struct InstrumentedHandle(Arc<InstrumentedHttpClient>);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for InstrumentedHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = Arc::clone(&self.0);

		Box::pin(async move {
			client.slot.take();

			let response = client
				.client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();

			client.slot.store(ResponseMetadata { status: Some(status.as_u16()) });

			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type Handle = InstrumentedHandle;
	type TransportError = ReqwestError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		InstrumentedHandle(Arc::new(InstrumentedHttpClient { client: self.0.clone(), slot }))
	}
}
