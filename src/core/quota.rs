// src/core/quota.rs — Per-session cap on outbound model calls

use serde::Serialize;

use crate::infra::errors::ToolkitError;

/// Counts model calls issued by one session. There is no reset: a fresh
/// quota comes only with a fresh session.
#[derive(Debug, Clone, Serialize)]
pub struct CallQuota {
    call_count: u32,
    max_calls: u32,
}

impl CallQuota {
    pub fn new(max_calls: u32) -> Self {
        Self {
            call_count: 0,
            max_calls,
        }
    }

    /// Take one call from the quota. Returns false, leaving the count
    /// untouched, once the ceiling is reached.
    pub fn try_consume(&mut self) -> bool {
        if self.call_count >= self.max_calls {
            return false;
        }
        self.call_count += 1;
        true
    }

    /// Like [`try_consume`](Self::try_consume) but as a `Result`.
    pub fn acquire(&mut self) -> Result<(), ToolkitError> {
        if self.try_consume() {
            Ok(())
        } else {
            tracing::warn!(limit = self.max_calls, "AI usage limit reached for session");
            Err(ToolkitError::QuotaExceeded {
                limit: self.max_calls,
            })
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count
    }

    pub fn max_calls(&self) -> u32 {
        self.max_calls
    }

    pub fn remaining(&self) -> u32 {
        self.max_calls.saturating_sub(self.call_count)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_is_min_of_attempts_and_ceiling() {
        for max in [1u32, 5, 8] {
            for attempts in 0..12u32 {
                let mut q = CallQuota::new(max);
                let granted = (0..attempts).filter(|_| q.try_consume()).count() as u32;
                assert_eq!(q.call_count(), attempts.min(max));
                assert_eq!(granted, attempts.min(max));
            }
        }
    }

    #[test]
    fn test_sixth_call_denied_without_increment() {
        let mut q = CallQuota::new(5);
        for _ in 0..5 {
            assert!(q.try_consume());
        }
        assert!(q.is_exhausted());
        assert!(!q.try_consume());
        assert_eq!(q.call_count(), 5);
        assert_eq!(q.remaining(), 0);
    }

    #[test]
    fn test_acquire_reports_limit() {
        let mut q = CallQuota::new(1);
        assert!(q.acquire().is_ok());
        match q.acquire() {
            Err(ToolkitError::QuotaExceeded { limit }) => assert_eq!(limit, 1),
            other => panic!("expected QuotaExceeded, got {other:?}"),
        }
        assert_eq!(q.call_count(), 1);
    }

    #[test]
    fn test_zero_ceiling_denies_everything() {
        let mut q = CallQuota::new(0);
        assert!(!q.try_consume());
        assert_eq!(q.call_count(), 0);
    }
}
