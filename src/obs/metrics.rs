// self
use crate::{obs::Outcome, trust::RequestType};

/// Records a dispatch outcome via the global metrics recorder (when enabled).
pub fn record_outcome(operation: RequestType, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"wstrust_engine_request_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}
