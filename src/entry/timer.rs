//! Single-shot, cancellable deferred commit
//!
//! The controller never sleeps. Arming the timer hands the host a
//! [`TimerRequest`]; the host waits `delay_ms` and reports the token back.
//! Each arm issues a fresh token and forgets the previous one, so a
//! callback scheduled before a cancel can never be honored afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one armed timer
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TimerToken(pub u32);

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ask the host to call back with `token` after `delay_ms`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerRequest {
    pub token: TimerToken,
    pub delay_ms: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingCommit {
    token: TimerToken,
    digit: u8,
}

#[derive(Clone, Debug)]
pub struct DisambiguationTimer {
    window_ms: u32,
    next_token: u32,
    pending: Option<PendingCommit>,
}

impl DisambiguationTimer {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            next_token: 1,
            pending: None,
        }
    }

    /// Arm for `digit`, cancelling whatever was pending
    ///
    /// Returns the cancelled token (if any) and the new request.
    pub fn arm(&mut self, digit: u8) -> (Option<TimerToken>, TimerRequest) {
        let cancelled = self.cancel();
        let token = TimerToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.pending = Some(PendingCommit { token, digit });
        (
            cancelled,
            TimerRequest {
                token,
                delay_ms: self.window_ms,
            },
        )
    }

    /// Drop the pending commit, returning its token so the host can clear it
    pub fn cancel(&mut self) -> Option<TimerToken> {
        self.pending.take().map(|pending| pending.token)
    }

    /// Consume the pending commit if `token` is the one currently armed
    ///
    /// Returns the digit captured when the timer was armed. Stale or
    /// already-consumed tokens yield `None` and leave state untouched.
    pub fn fire(&mut self, token: TimerToken) -> Option<u8> {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                Some(pending.digit)
            }
            _ => None,
        }
    }

    pub fn pending_token(&self) -> Option<TimerToken> {
        self.pending.map(|pending| pending.token)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}
