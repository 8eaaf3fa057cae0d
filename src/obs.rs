//! Observability helpers for adapter operations.
//!
//! # Feature Flags
//!
//! - Spans named `oauth2_github_adapter.operation` carry the `provider` and `operation`
//!   fields for every adapter hook. Diagnostics (for example a failed team lookup) are
//!   emitted as `tracing` events on the same span.
//! - Enable `metrics` to increment the `oauth2_github_adapter_operation_total` counter for
//!   every attempt/success/failure, labeled by `provider`, `operation`, and `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Adapter operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Authorization-redirect request construction.
	AuthorizationRequest,
	/// Access-token exchange request construction.
	AccessTokenRequest,
	/// User profile normalization.
	ProfileMapping,
	/// Organization/team group resolution.
	GroupResolution,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::AuthorizationRequest => "authorization_request",
			Operation::AccessTokenRequest => "access_token_request",
			Operation::ProfileMapping => "profile_mapping",
			Operation::GroupResolution => "group_resolution",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to an adapter hook.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure, whether propagated or contained.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the terminal outcome of `result` and hands it back unchanged.
pub fn record_result<T, E>(
	provider: &str,
	operation: Operation,
	result: Result<T, E>,
) -> Result<T, E>
where
	E: Display,
{
	match &result {
		Ok(_) => record_outcome(provider, operation, Outcome::Success),
		Err(err) => {
			::tracing::debug!(
				provider,
				operation = operation.as_str(),
				error = %err,
				"operation failed"
			);
			record_outcome(provider, operation, Outcome::Failure);
		},
	}

	result
}
