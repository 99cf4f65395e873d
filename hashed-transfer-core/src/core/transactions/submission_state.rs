use crate::domain::entities::TransferRecord;
use crate::shared::error::TransferError;
use std::fmt;

/// Where a transfer submission currently is.
///
/// `Idle -> Hashing -> Submitting -> Persisting -> Completed`, with `Failed`
/// reachable from every non-terminal state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Hashing,
    Submitting,
    Persisting,
    Completed(TransferRecord),
    Failed(TransferError),
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Completed(_) | SubmissionState::Failed(_))
    }

    /// A collaborator call was started and never resolved
    pub fn is_awaiting_collaborator(&self) -> bool {
        matches!(self, SubmissionState::Submitting | SubmissionState::Persisting)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Hashing => "hashing",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Persisting => "persisting",
            SubmissionState::Completed(_) => "completed",
            SubmissionState::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
