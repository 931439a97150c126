// ============================
// axelsub-backend-lib/src/auth/rate_limit.rs
// ============================
//! Lockout of repeated failed logins.

use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::warn;

/// Failed attempts before a client is locked out
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default lockout duration (5 minutes)
const DEFAULT_LOCKOUT_DURATION: Duration = Duration::from_secs(5 * 60);

/// Entry in the lockout map
#[derive(Debug, Clone)]
struct LockoutEntry {
    /// Number of failed attempts
    failed_attempts: u32,
    /// Time of the last failed attempt
    last_failure: Instant,
    /// When the lockout expires, once triggered
    lockout_expiry: Option<Instant>,
}

/// Per-client lockout of repeated login failures.
///
/// Keyed by the client key the handlers derive from proxy headers, not a
/// parsed `IpAddr`, so an unattributable request still shares one bucket.
#[derive(Debug, Default)]
pub struct LoginRateLimiter {
    attempts: DashMap<String, LockoutEntry>,
}

impl LoginRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Is this client currently allowed to attempt a login?
    pub fn check(&self, client: &str) -> bool {
        if let Some(entry) = self.attempts.get(client) {
            if let Some(expiry) = entry.lockout_expiry {
                if Instant::now() < expiry {
                    return false;
                }
            }
        }
        true
    }

    /// Record a failed login attempt
    pub fn record_failure(&self, client: &str) {
        let now = Instant::now();

        let mut entry = self
            .attempts
            .entry(client.to_string())
            .or_insert_with(|| LockoutEntry {
                failed_attempts: 0,
                last_failure: now,
                lockout_expiry: None,
            });

        // a lockout that has lapsed resets the count
        if let Some(expiry) = entry.lockout_expiry {
            if now > expiry {
                entry.failed_attempts = 0;
                entry.lockout_expiry = None;
            }
        }

        entry.failed_attempts += 1;
        entry.last_failure = now;

        if entry.failed_attempts >= DEFAULT_MAX_ATTEMPTS {
            entry.lockout_expiry = Some(now + DEFAULT_LOCKOUT_DURATION);
            warn!(client, "login lockout triggered");
        }
    }

    /// Record a successful login, clearing the client's failures
    pub fn record_success(&self, client: &str) {
        self.attempts.remove(client);
    }

    /// Drop lapsed lockouts and stale failure counts
    pub fn cleanup(&self) {
        let now = Instant::now();

        self.attempts.retain(|_, entry| {
            if let Some(expiry) = entry.lockout_expiry {
                return now < expiry;
            }
            now.duration_since(entry.last_failure) < Duration::from_secs(24 * 60 * 60)
        });
    }
}
