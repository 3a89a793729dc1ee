use serde_json::Value;
use zeroize::{Zeroize, Zeroizing};

use crate::error::ApiError;
use crate::models::BackupRecord;

/// The one request body `confirm` produces. The password lives in a
/// [`Zeroizing`] buffer and is wiped when the request is dropped after the
/// call resolves; it exists nowhere else from that point on.
pub struct RestoreRequest {
    pub record_id: i64,
    pub username: String,
    pub password: Zeroizing<String>,
}

impl std::fmt::Debug for RestoreRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestoreRequest")
            .field("record_id", &self.record_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `details` mapping from a successful `POST /api/restore`.
pub type RestoreDetails = serde_json::Map<String, Value>;

#[derive(Debug, PartialEq, Eq)]
pub enum RestoreRejected {
    /// `select` while a prompt is open or a restore is running. Only one
    /// restore may be active system-wide.
    Busy,
    /// `confirm` with an empty password; rejected locally, no network call.
    EmptyPassword,
    /// `confirm`/`cancel` outside the prompt phase.
    NotAwaitingPassword,
}

impl RestoreRejected {
    pub fn user_message(&self) -> &'static str {
        match self {
            RestoreRejected::Busy => "A restore is already in progress",
            RestoreRejected::EmptyPassword => "Password is required",
            RestoreRejected::NotAwaitingPassword => "No restore selected",
        }
    }
}

enum Phase {
    Idle,
    AwaitingPassword {
        record: BackupRecord,
        password: Zeroizing<String>,
    },
    Restoring {
        display_name: String,
    },
}

/// Two-phase restore workflow: pick a record, then supply the password.
///
/// `Idle -> AwaitingPassword -> Restoring -> Idle`. The password buffer is
/// populated only between `select` and `confirm`/`cancel`, and is zeroized on
/// every exit path, failed attempts included.
pub struct RestoreCoordinator {
    phase: Phase,
}

impl Default for RestoreCoordinator {
    fn default() -> Self {
        Self { phase: Phase::Idle }
    }
}

impl RestoreCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_awaiting_password(&self) -> bool {
        matches!(self.phase, Phase::AwaitingPassword { .. })
    }

    pub fn is_restoring(&self) -> bool {
        matches!(self.phase, Phase::Restoring { .. })
    }

    /// Record the prompt is open for, if any.
    pub fn selected_record(&self) -> Option<&BackupRecord> {
        match &self.phase {
            Phase::AwaitingPassword { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Length of the typed password, for masked rendering.
    pub fn password_len(&self) -> usize {
        match &self.phase {
            Phase::AwaitingPassword { password, .. } => password.chars().count(),
            _ => 0,
        }
    }

    /// Open the password prompt for `record`. Rejected unless idle: a second
    /// selection while restoring (or while another prompt is open) would
    /// break the single-restore-slot guarantee.
    pub fn select(&mut self, record: BackupRecord) -> Result<(), RestoreRejected> {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::AwaitingPassword {
                    record,
                    password: Zeroizing::new(String::new()),
                };
                Ok(())
            }
            _ => Err(RestoreRejected::Busy),
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Phase::AwaitingPassword { password, .. } = &mut self.phase {
            password.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Phase::AwaitingPassword { password, .. } = &mut self.phase {
            password.pop();
        }
    }

    /// Close the prompt without issuing anything; password and selection are
    /// wiped.
    pub fn cancel(&mut self) {
        if let Phase::AwaitingPassword { password, .. } = &mut self.phase {
            password.zeroize();
            self.phase = Phase::Idle;
        }
    }

    /// Move to `Restoring` and hand back the single request to send. The
    /// password is moved out of the prompt buffer; an empty password never
    /// leaves this function.
    pub fn confirm(&mut self, username: &str) -> Result<RestoreRequest, RestoreRejected> {
        match &mut self.phase {
            Phase::AwaitingPassword { record, password } => {
                if password.is_empty() {
                    return Err(RestoreRejected::EmptyPassword);
                }
                let display_name = record.name.clone();
                let request = RestoreRequest {
                    record_id: record.id,
                    username: username.to_string(),
                    password: std::mem::replace(password, Zeroizing::new(String::new())),
                };
                self.phase = Phase::Restoring { display_name };
                Ok(request)
            }
            _ => Err(RestoreRejected::NotAwaitingPassword),
        }
    }

    /// Resolve the outstanding restore. Always returns to `Idle`; selection
    /// is gone and no password survives regardless of outcome.
    pub fn finish(&mut self, result: Result<RestoreDetails, ApiError>) -> String {
        let display_name = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Restoring { display_name } => display_name,
            // finish without a restore in flight; nothing to report.
            other => {
                self.phase = other;
                return String::new();
            }
        };
        match result {
            Ok(details) if details.is_empty() => {
                format!("Successfully restored {}", display_name)
            }
            Ok(details) => {
                let summary = details
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, render_value(v)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Successfully restored {} ({})", display_name, summary)
            }
            Err(err) => err.user_message("Restore failed"),
        }
    }
}

fn render_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str) -> BackupRecord {
        BackupRecord {
            id,
            name: name.to_string(),
            size: Some(512),
            saved_at: None,
            stored_path: None,
        }
    }

    #[test]
    fn empty_password_is_rejected_locally() {
        let mut coordinator = RestoreCoordinator::new();
        coordinator.select(record(1, "notes.txt")).unwrap();

        assert_eq!(
            coordinator.confirm("alice").unwrap_err(),
            RestoreRejected::EmptyPassword
        );
        // Still prompting; the user can retype.
        assert!(coordinator.is_awaiting_password());
    }

    #[test]
    fn confirm_issues_one_request_and_clears_password() {
        let mut coordinator = RestoreCoordinator::new();
        coordinator.select(record(7, "notes.txt")).unwrap();
        for c in "hunter2".chars() {
            coordinator.push_char(c);
        }

        let request = coordinator.confirm("alice").unwrap();
        assert_eq!(request.record_id, 7);
        assert_eq!(request.username, "alice");
        assert_eq!(request.password.as_str(), "hunter2");

        // Password field is empty the moment the request exists.
        assert_eq!(coordinator.password_len(), 0);
        assert!(coordinator.is_restoring());
    }

    #[test]
    fn failure_clears_selection_and_reports_backend_message() {
        let mut coordinator = RestoreCoordinator::new();
        coordinator.select(record(7, "notes.txt")).unwrap();
        coordinator.push_char('x');
        coordinator.confirm("alice").unwrap();

        let message = coordinator.finish(Err(ApiError::Backend {
            status: 403,
            message: Some("decryption failed".into()),
        }));
        assert_eq!(message, "decryption failed");
        assert!(!coordinator.is_restoring());
        assert!(coordinator.selected_record().is_none());
        assert_eq!(coordinator.password_len(), 0);
    }

    #[test]
    fn success_reports_details_mapping() {
        let mut coordinator = RestoreCoordinator::new();
        coordinator.select(record(7, "notes.txt")).unwrap();
        coordinator.push_char('x');
        coordinator.confirm("alice").unwrap();

        let mut details = RestoreDetails::new();
        details.insert("outDirectory".into(), Value::String("/restore/7".into()));
        let message = coordinator.finish(Ok(details));
        assert!(message.contains("Successfully restored notes.txt"));
        assert!(message.contains("outDirectory: /restore/7"));
    }

    #[test]
    fn cancel_wipes_and_returns_to_idle() {
        let mut coordinator = RestoreCoordinator::new();
        coordinator.select(record(1, "a")).unwrap();
        coordinator.push_char('s');
        coordinator.cancel();

        assert!(!coordinator.is_awaiting_password());
        assert_eq!(coordinator.password_len(), 0);
        // Idle again, a new selection is allowed.
        assert!(coordinator.select(record(2, "b")).is_ok());
    }

    #[test]
    fn second_select_while_busy_is_rejected() {
        let mut coordinator = RestoreCoordinator::new();
        coordinator.select(record(1, "a")).unwrap();
        assert_eq!(
            coordinator.select(record(2, "b")).unwrap_err(),
            RestoreRejected::Busy
        );

        coordinator.push_char('p');
        coordinator.confirm("alice").unwrap();
        assert_eq!(
            coordinator.select(record(2, "b")).unwrap_err(),
            RestoreRejected::Busy
        );
    }

    #[test]
    fn connectivity_failure_uses_generic_message() {
        let mut coordinator = RestoreCoordinator::new();
        coordinator.select(record(1, "a")).unwrap();
        coordinator.push_char('p');
        coordinator.confirm("alice").unwrap();
        assert_eq!(
            coordinator.finish(Err(ApiError::Connectivity)),
            "Failed to connect to server"
        );
    }
}
