//! Access guard for mutating requests: one shared secret, compared in constant time.

use crate::error::AppError;
use std::sync::Arc;
use subtle::ConstantTimeEq;

#[derive(Clone)]
pub struct AccessGuard {
    expected: Arc<str>,
}

impl AccessGuard {
    pub fn new(expected: impl Into<Arc<str>>) -> Self {
        AccessGuard {
            expected: expected.into(),
        }
    }

    /// True iff `credential` equals the configured secret.
    pub fn validate(&self, credential: &str) -> bool {
        credential.as_bytes().ct_eq(self.expected.as_bytes()).into()
    }

    /// Missing credentials are treated like wrong ones.
    pub fn check(&self, credential: Option<&str>) -> Result<(), AppError> {
        match credential {
            Some(c) if self.validate(c) => Ok(()),
            Some(_) => {
                tracing::warn!("rejected request with invalid token");
                Err(AppError::Unauthorized)
            }
            None => {
                tracing::warn!("rejected request without token");
                Err(AppError::Unauthorized)
            }
        }
    }
}

impl std::fmt::Debug for AccessGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGuard").field("expected", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_only_exact_secret() {
        let guard = AccessGuard::new("t0k3n");
        assert!(guard.validate("t0k3n"));
        assert!(!guard.validate("t0k3n "));
        assert!(!guard.validate("T0K3N"));
        assert!(!guard.validate("t0k"));
        assert!(!guard.validate(""));
    }

    #[test]
    fn check_maps_to_unauthorized() {
        let guard = AccessGuard::new("t0k3n");
        assert!(guard.check(Some("t0k3n")).is_ok());
        assert!(matches!(guard.check(Some("nope")), Err(AppError::Unauthorized)));
        assert!(matches!(guard.check(None), Err(AppError::Unauthorized)));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let guard = AccessGuard::new("t0k3n");
        assert!(!format!("{:?}", guard).contains("t0k3n"));
    }
}
