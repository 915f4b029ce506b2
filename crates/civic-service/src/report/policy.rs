//! Status transition policy enforcement.

use civic_core::config::TransitionPolicy;
use civic_core::error::AppError;
use civic_entity::report::ReportStatus;

/// Applies the configured [`TransitionPolicy`] to a status change.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionGuard {
    policy: TransitionPolicy,
}

impl TransitionGuard {
    /// Creates a guard for a policy.
    pub fn new(policy: TransitionPolicy) -> Self {
        Self { policy }
    }

    /// The policy in force.
    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Checks a move from `from` to `to`.
    pub fn check(&self, from: ReportStatus, to: ReportStatus) -> Result<(), AppError> {
        match self.policy {
            TransitionPolicy::Any => Ok(()),
            TransitionPolicy::ForwardOnly if to.is_backward_from(from) => {
                Err(AppError::validation(format!(
                    "Cannot move a report from {} back to {}",
                    from.label(),
                    to.label()
                )))
            }
            TransitionPolicy::ForwardOnly => Ok(()),
        }
    }
}
