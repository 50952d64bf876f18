use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::debug;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total tries, including the first.
    pub attempts: u32,
    pub pause: Duration,
    pub deadline: Option<Instant>,
}

impl RetryPolicy {
    fn past_deadline(&self, after: Duration) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() + after >= deadline)
    }
}

/// Run `op` up to `policy.attempts` times, returning the last error if every
/// try fails. No further try is started once the deadline would be crossed.
pub fn with_retry<T>(
    policy: &RetryPolicy,
    what: &str,
    mut op: impl FnMut() -> Result<T>,
) -> Result<T> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= attempts || policy.past_deadline(policy.pause) {
                    return Err(err);
                }
                debug!("{what}: attempt {attempt}/{attempts} failed: {err:#}");
                if !policy.pause.is_zero() {
                    thread::sleep(policy.pause);
                }
                attempt += 1;
            }
        }
    }
}
