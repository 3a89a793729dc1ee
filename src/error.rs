use thiserror::Error;

/// Failures a backend request can resolve with. Everything is caught at the
/// operation boundary and turned into a status-bar message; nothing here
/// propagates far enough to tear down the event loop.
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection,
    /// transport error). Shown as a generic connectivity message.
    #[error("Failed to connect to server")]
    Connectivity,

    /// Non-2xx response. `message` is the backend's `{message}` payload when
    /// it sent one; callers prefer it verbatim over anything generic.
    #[error("{}", message.as_deref().unwrap_or("Server returned an error"))]
    Backend {
        status: u16,
        message: Option<String>,
    },

    /// The response arrived but its body was not the JSON we expect.
    #[error("Unexpected response from server")]
    Decode,
}

impl ApiError {
    /// Message to surface to the user, preferring backend-supplied text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Backend {
                message: Some(msg), ..
            } => msg.clone(),
            ApiError::Backend { message: None, .. } | ApiError::Decode => {
                fallback.to_string()
            }
            ApiError::Connectivity => "Failed to connect to server".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_wins_over_fallback() {
        let err = ApiError::Backend {
            status: 403,
            message: Some("decryption failed".into()),
        };
        assert_eq!(err.user_message("Restore failed"), "decryption failed");
    }

    #[test]
    fn missing_message_uses_fallback() {
        let err = ApiError::Backend {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Backup failed"), "Backup failed");
    }

    #[test]
    fn connectivity_is_generic() {
        assert_eq!(
            ApiError::Connectivity.user_message("anything"),
            "Failed to connect to server"
        );
    }
}
