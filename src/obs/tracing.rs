// self
use crate::{_prelude::*, obs::Operation};

/// Future instrumented with an [`OperationSpan`].
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;

/// A span builder used by adapter operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provider and operation.
	pub fn new(provider: &str, operation: Operation) -> Self {
		let span = tracing::info_span!(
			"oauth2_github_adapter.operation",
			provider,
			operation = operation.as_str()
		);

		Self { span }
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> OperationSpanGuard {
		OperationSpanGuard { _guard: self.span.entered() }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		use tracing::Instrument;

		fut.instrument(self.span.clone())
	}
}

/// RAII guard returned by [`OperationSpan::entered`].
pub struct OperationSpanGuard {
	_guard: tracing::span::EnteredSpan,
}
impl Debug for OperationSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("OperationSpanGuard(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn span_guard_without_subscriber() {
		let guard = OperationSpan::new("github", Operation::AuthorizationRequest).entered();

		assert_eq!(format!("{guard:?}"), "OperationSpanGuard(..)");
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OperationSpan::new("github", Operation::GroupResolution);
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
