use thiserror::Error;

/// Failure of a backend completion call.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response format: {0}")]
    InvalidResponse(String),

    #[error("response blocked by backend: {0}")]
    Blocked(String),
}

impl BackendError {
    /// Whether retrying the same request may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidResponse(_) | Self::Blocked(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(BackendError::Transport("reset".into()).is_transient());
        assert!(
            BackendError::Status {
                status: 429,
                body: String::new()
            }
            .is_transient()
        );
        assert!(
            BackendError::Status {
                status: 503,
                body: String::new()
            }
            .is_transient()
        );
        assert!(
            !BackendError::Status {
                status: 401,
                body: String::new()
            }
            .is_transient()
        );
        assert!(!BackendError::Blocked("SAFETY".into()).is_transient());
    }
}
