// Interceptors around host-invoked validation

use crate::{RequestContext, ValidationContext, ValidationResult};
use tracing::debug;

/// Hooks that run before and after a host-invoked validator.
///
/// Returning `None` from either hook keeps the original value; it never
/// means "empty".
pub trait ValidatorInterceptor: Send + Sync {
    /// Optionally replace the context the validator runs with
    fn before_validation(
        &self,
        _request: &RequestContext,
        _context: &ValidationContext,
    ) -> Option<ValidationContext> {
        None
    }

    /// Optionally replace the validator's result
    fn after_validation(
        &self,
        _request: &RequestContext,
        _context: &ValidationContext,
        _result: &ValidationResult,
    ) -> Option<ValidationResult> {
        None
    }
}

/// Logs each host-invoked validation
pub struct LoggingInterceptor;

impl ValidatorInterceptor for LoggingInterceptor {
    fn before_validation(
        &self,
        request: &RequestContext,
        context: &ValidationContext,
    ) -> Option<ValidationContext> {
        debug!(
            request_id = %request.request_id(),
            selector = ?context.selector(),
            "→ validating"
        );
        None
    }

    fn after_validation(
        &self,
        request: &RequestContext,
        _context: &ValidationContext,
        result: &ValidationResult,
    ) -> Option<ValidationResult> {
        debug!(
            request_id = %request.request_id(),
            failures = result.len(),
            "← validated"
        );
        None
    }
}

/// Rewrites every result with a closure
pub struct TransformInterceptor<F>
where
    F: Fn(&ValidationResult) -> ValidationResult + Send + Sync,
{
    transform: F,
}

impl<F> TransformInterceptor<F>
where
    F: Fn(&ValidationResult) -> ValidationResult + Send + Sync,
{
    pub fn new(transform: F) -> Self {
        Self { transform }
    }
}

impl<F> ValidatorInterceptor for TransformInterceptor<F>
where
    F: Fn(&ValidationResult) -> ValidationResult + Send + Sync,
{
    fn after_validation(
        &self,
        _request: &RequestContext,
        _context: &ValidationContext,
        result: &ValidationResult,
    ) -> Option<ValidationResult> {
        Some((self.transform)(result))
    }
}
