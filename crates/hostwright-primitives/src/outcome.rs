//! Outcome of a state-changing operation

use hostwright_proto::ExecOutcome;

/// What a package or service operation did.
///
/// `NoOp` means the desired end state already held and nothing was
/// executed. It is deliberately distinct from `Changed` with an exit
/// code of zero, so callers can tell "nothing to do" apart from "ran
/// and succeeded quietly".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The target state already held.
    NoOp,
    /// The backend ran; inspect the outcome for success.
    Changed(ExecOutcome),
}

impl ApplyOutcome {
    /// Check whether nothing had to be done.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, ApplyOutcome::NoOp)
    }

    /// The execution outcome, if the backend ran.
    #[must_use]
    pub fn changed(&self) -> Option<&ExecOutcome> {
        match self {
            ApplyOutcome::Changed(outcome) => Some(outcome),
            ApplyOutcome::NoOp => None,
        }
    }
}
