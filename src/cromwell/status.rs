use std::fmt;

/// Lifecycle state the server reports for one workflow run.
///
/// Only `Submitted` and `Running` are non-terminal; every other value ends
/// the wait loop. States this client has no special handling for
/// (`Aborting`, `On Hold`, ...) are carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Submitted,
    Running,
    Succeeded,
    Failed,
    Aborted,
    Other(String),
}

impl RunStatus {
    pub fn parse(status: &str) -> RunStatus {
        match status {
            "Submitted" => RunStatus::Submitted,
            "Running" => RunStatus::Running,
            "Succeeded" => RunStatus::Succeeded,
            "Failed" => RunStatus::Failed,
            "Aborted" => RunStatus::Aborted,
            other => RunStatus::Other(other.to_owned()),
        }
    }

    /// A terminal status ends the wait loop.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Submitted | RunStatus::Running)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunStatus::Submitted => write!(f, "Submitted"),
            RunStatus::Running => write!(f, "Running"),
            RunStatus::Succeeded => write!(f, "Succeeded"),
            RunStatus::Failed => write!(f, "Failed"),
            RunStatus::Aborted => write!(f, "Aborted"),
            RunStatus::Other(other) => write!(f, "{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_submitted_and_running_are_non_terminal() {
        assert!(!RunStatus::Submitted.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        assert!(RunStatus::Succeeded.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Aborted.is_terminal());
        assert!(RunStatus::Other("Aborting".to_string()).is_terminal());
    }

    #[test]
    fn unknown_states_round_trip_through_other() {
        let status = RunStatus::parse("On Hold");
        assert_eq!(status, RunStatus::Other("On Hold".to_string()));
        assert_eq!(status.to_string(), "On Hold");
    }
}
