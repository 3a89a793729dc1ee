use std::collections::HashSet;

use crate::error::ApiError;
use crate::models::RemoteEntry;

/// A backup the app layer has been cleared to send. Exists only for the one
/// in-flight request; the marker for `target_path` is held until
/// [`BackupDispatcher::finish`] runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupJob {
    pub target_path: String,
    pub display_name: String,
}

/// What `finish` tells the app to do next.
#[derive(Debug, PartialEq, Eq)]
pub enum BackupOutcome {
    /// Report success and refresh the vault (`BackupCompleted`).
    Completed { display_name: String },
    /// Report the message; no completion signal, no vault refresh.
    Failed { message: String },
}

/// Issues per-item backup requests with an explicit in-flight key set.
///
/// The set, not any disabled button, is what guarantees at most one request
/// per path: a second `begin` for a marked path is rejected locally without
/// touching the network. `finish` removes the marker unconditionally so a
/// failed request can always be retried.
#[derive(Debug, Default)]
pub struct BackupDispatcher {
    in_flight: HashSet<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum BackupRejected {
    /// A request for this path is already outstanding.
    AlreadyInFlight,
}

impl BackupDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self, path: &str) -> bool {
        self.in_flight.contains(path)
    }

    pub fn any_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Claim the in-flight marker for `entry` and hand back the job to send.
    pub fn begin(&mut self, entry: &RemoteEntry) -> Result<BackupJob, BackupRejected> {
        if !self.in_flight.insert(entry.path.clone()) {
            tracing::debug!(path = %entry.path, "Backup already in flight, rejecting");
            return Err(BackupRejected::AlreadyInFlight);
        }
        Ok(BackupJob {
            target_path: entry.path.clone(),
            display_name: entry.name.clone(),
        })
    }

    /// Release the marker for `job` and classify the result. The marker is
    /// dropped on both arms; a failure must never leave the path stuck.
    pub fn finish(&mut self, job: &BackupJob, result: Result<(), ApiError>) -> BackupOutcome {
        self.in_flight.remove(&job.target_path);
        match result {
            Ok(()) => BackupOutcome::Completed {
                display_name: job.display_name.clone(),
            },
            Err(err) => BackupOutcome::Failed {
                message: err.user_message("Backup failed"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;

    fn entry(path: &str) -> RemoteEntry {
        RemoteEntry {
            name: path.rsplit('/').next().unwrap().to_string(),
            path: path.to_string(),
            kind: EntryKind::File,
            size: None,
        }
    }

    #[test]
    fn duplicate_dispatch_is_rejected() {
        let mut dispatcher = BackupDispatcher::new();
        let target = entry("/home/u/big.zip");

        assert!(dispatcher.begin(&target).is_ok());
        // Second rapid invocation before the first resolves: no second job.
        assert_eq!(
            dispatcher.begin(&target),
            Err(BackupRejected::AlreadyInFlight)
        );
    }

    #[test]
    fn success_clears_marker_and_signals_completion() {
        let mut dispatcher = BackupDispatcher::new();
        let target = entry("/home/u/notes.txt");
        let job = dispatcher.begin(&target).unwrap();

        let outcome = dispatcher.finish(&job, Ok(()));
        assert_eq!(
            outcome,
            BackupOutcome::Completed {
                display_name: "notes.txt".into()
            }
        );
        assert!(!dispatcher.is_in_flight("/home/u/notes.txt"));
        // Path is free for a new request.
        assert!(dispatcher.begin(&target).is_ok());
    }

    #[test]
    fn failure_clears_marker_and_prefers_backend_message() {
        let mut dispatcher = BackupDispatcher::new();
        let target = entry("/home/u/notes.txt");
        let job = dispatcher.begin(&target).unwrap();

        let outcome = dispatcher.finish(
            &job,
            Err(ApiError::Backend {
                status: 507,
                message: Some("quota exceeded".into()),
            }),
        );
        assert_eq!(
            outcome,
            BackupOutcome::Failed {
                message: "quota exceeded".into()
            }
        );
        assert!(!dispatcher.is_in_flight("/home/u/notes.txt"));
    }

    #[test]
    fn connectivity_failure_uses_generic_message() {
        let mut dispatcher = BackupDispatcher::new();
        let job = dispatcher.begin(&entry("/a")).unwrap();
        let outcome = dispatcher.finish(&job, Err(ApiError::Connectivity));
        assert_eq!(
            outcome,
            BackupOutcome::Failed {
                message: "Failed to connect to server".into()
            }
        );
    }

    #[test]
    fn paths_are_isolated() {
        let mut dispatcher = BackupDispatcher::new();
        let a = dispatcher.begin(&entry("/a")).unwrap();
        let _b = dispatcher.begin(&entry("/b")).unwrap();

        dispatcher.finish(&a, Err(ApiError::Connectivity));
        // /a's failure must not release or disturb /b.
        assert!(!dispatcher.is_in_flight("/a"));
        assert!(dispatcher.is_in_flight("/b"));
    }
}
