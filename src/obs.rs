//! Optional observability for strategy operations.
//!
//! # Feature Flags
//!
//! - `tracing`: every operation runs inside an `oauth2_poniverse.flow` span carrying the
//!   `provider` and `flow` fields.
//! - `metrics`: every attempt, success, and failure increments `oauth2_poniverse_flow_total`,
//!   labeled by `provider`, `flow`, and `outcome`.
//!
//! Without either feature the helpers compile down to plain calls.

// self
use crate::_prelude::*;

/// Future returned by [`FlowSpan::instrument`].
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`FlowSpan::instrument`].
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// Strategy operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization redirect construction.
	AuthorizationUrl,
	/// Authorization code exchange at the token endpoint.
	TokenExchange,
	/// Profile fetch and normalization.
	Profile,
}
impl FlowKind {
	/// Stable label used for span fields and metric labels.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::AuthorizationUrl => "authorization_url",
			FlowKind::TokenExchange => "token_exchange",
			FlowKind::Profile => "profile",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Stable label used for metric labels.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}

	/// Maps a result onto the matching terminal outcome.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure }
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Span covering one operation for one provider.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Opens a span for `kind` on `provider`.
	pub fn new(provider: &'static str, kind: FlowKind) -> Self {
		#[cfg(feature = "tracing")]
		{
			Self {
				span: tracing::info_span!(
					"oauth2_poniverse.flow",
					provider,
					flow = kind.as_str()
				),
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (provider, kind);

			Self {}
		}
	}

	/// Runs a synchronous section inside the span.
	pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Attaches the span to `fut` without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Increments the flow counter when the `metrics` feature is enabled.
pub fn record_flow_outcome(provider: &'static str, kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_poniverse_flow_total",
			"provider" => provider,
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (provider, kind, outcome);
	}
}

/// Runs a synchronous operation inside its span and records attempt plus outcome.
pub fn observe_sync<T, E>(
	provider: &'static str,
	kind: FlowKind,
	op: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
	record_flow_outcome(provider, kind, FlowOutcome::Attempt);

	let result = FlowSpan::new(provider, kind).in_scope(op);

	record_flow_outcome(provider, kind, FlowOutcome::of(&result));

	result
}

/// Async counterpart of [`observe_sync`].
pub async fn observe<T, E, Fut>(provider: &'static str, kind: FlowKind, fut: Fut) -> Result<T, E>
where
	Fut: Future<Output = Result<T, E>>,
{
	record_flow_outcome(provider, kind, FlowOutcome::Attempt);

	let result = FlowSpan::new(provider, kind).instrument(fut).await;

	record_flow_outcome(provider, kind, FlowOutcome::of(&result));

	result
}
