//! Comment spam guard
//!
//! Fixed-window counter per client identity. A window opens at the first
//! comment; while it is open at most `max_comments` are accepted. Windows
//! live in memory only and are lost on restart.
//!
//! Each check runs under the map's per-entry lock, with no await point, so
//! concurrent requests from one identity are counted exactly.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use gallery_common::SpamConfig;
use gallery_core::value_objects::ClientIdentity;

/// Thresholds for the guard
#[derive(Debug, Clone, Copy)]
pub struct SpamPolicy {
    pub max_comments: u32,
    pub window: Duration,
    /// Trackers whose window started longer ago than this are swept
    pub retention: Duration,
}

impl Default for SpamPolicy {
    fn default() -> Self {
        Self {
            max_comments: 3,
            window: Duration::seconds(60),
            retention: Duration::hours(1),
        }
    }
}

impl From<&SpamConfig> for SpamPolicy {
    fn from(config: &SpamConfig) -> Self {
        Self {
            max_comments: config.max_comments,
            window: seconds(config.window_secs),
            retention: seconds(config.retention_secs),
        }
    }
}

fn seconds(secs: u64) -> Duration {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

/// Outcome of a spam check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamDecision {
    Allow,
    Reject { retry_after: Duration },
}

impl SpamDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Whole seconds until the window closes, rounded up
    pub fn retry_after_secs(&self) -> i64 {
        match self {
            Self::Allow => 0,
            Self::Reject { retry_after } => {
                let millis = retry_after.num_milliseconds().max(0);
                (millis + 999) / 1000
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SpamWindow {
    count: u32,
    window_start: DateTime<Utc>,
}

/// In-memory per-identity comment rate limiter
#[derive(Debug, Default)]
pub struct SpamGuard {
    windows: DashMap<ClientIdentity, SpamWindow>,
    policy: SpamPolicy,
}

impl SpamGuard {
    pub fn new(policy: SpamPolicy) -> Self {
        Self {
            windows: DashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &SpamPolicy {
        &self.policy
    }

    /// Number of identities currently tracked
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Decide whether `client` may comment at `now`, counting the comment if so.
    ///
    /// A rejection leaves the tracker untouched.
    pub fn check_and_record(&self, client: &ClientIdentity, now: DateTime<Utc>) -> SpamDecision {
        let mut window = self
            .windows
            .entry(client.clone())
            .or_insert(SpamWindow {
                count: 0,
                window_start: now,
            });

        let elapsed = now - window.window_start;
        if elapsed >= self.policy.window {
            *window = SpamWindow {
                count: 1,
                window_start: now,
            };
            return SpamDecision::Allow;
        }

        if window.count >= self.policy.max_comments {
            return SpamDecision::Reject {
                retry_after: self.policy.window - elapsed,
            };
        }

        window.count += 1;
        SpamDecision::Allow
    }

    /// Drop trackers whose window started more than `retention` before `now`.
    ///
    /// Returns how many were removed.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.windows.retain(|_, window| {
            let keep = now - window.window_start <= self.policy.retention;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Sweep on a fixed interval until the returned handle is aborted
    pub fn spawn_sweeper(self: Arc<Self>, every: std::time::Duration) -> JoinHandle<()> {
        // tokio intervals reject a zero period
        let every = every.max(std::time::Duration::from_millis(1));
        info!(interval_secs = every.as_secs(), "Starting spam tracker sweeper");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = self.sweep(Utc::now());
                if removed > 0 {
                    debug!(removed, remaining = self.len(), "Swept spam trackers");
                }
            }
        })
    }
}
