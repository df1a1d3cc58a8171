// self
use crate::{_prelude::*, trust::RequestType};

/// A span builder used by dispatch operations.
#[derive(Clone, Debug)]
pub struct DispatchSpan {
	span: tracing::Span,
}
impl DispatchSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(operation: RequestType, stage: &'static str) -> Self {
		let span = tracing::info_span!("wstrust_engine.dispatch", operation = operation.as_str(), stage);

		Self { span }
	}

	/// Enters the span for the remainder of the synchronous call.
	pub fn entered(self) -> DispatchSpanGuard {
		DispatchSpanGuard { guard: self.span.entered() }
	}
}

/// RAII guard returned by [`DispatchSpan::entered`].
pub struct DispatchSpanGuard {
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for DispatchSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("DispatchSpanGuard(..)")
	}
}
