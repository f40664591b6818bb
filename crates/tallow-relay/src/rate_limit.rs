//! Rate limiting

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Instant;

/// Per-IP sliding-window rate limiter
#[derive(Debug)]
pub struct RateLimiter {
    /// Requests per second limit
    limit: u32,
    /// IP -> (request count, window start)
    state: HashMap<IpAddr, (u32, Instant)>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            state: HashMap::new(),
        }
    }

    /// Check if a request from `ip` should be allowed
    pub fn check(&mut self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let entry = self.state.entry(ip).or_insert((0, now));

        if now.duration_since(entry.1).as_secs() >= 1 {
            *entry = (1, now);
            return true;
        }

        if entry.0 < self.limit {
            entry.0 += 1;
            true
        } else {
            false
        }
    }

    /// Drop tracking state for IPs that haven't made a request recently
    pub fn prune_stale(&mut self, max_idle_secs: u64) {
        let now = Instant::now();
        self.state
            .retain(|_ip, (_, window_start)| now.duration_since(*window_start).as_secs() <= max_idle_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_limit() {
        let mut limiter = RateLimiter::new(3);
        let ip: IpAddr = "127.0.0.1".parse().unwrap();
        assert!(limiter.check(ip));
        assert!(limiter.check(ip));
        assert!(limiter.check(ip));
        assert!(!limiter.check(ip));
    }

    #[test]
    fn test_independent_per_ip() {
        let mut limiter = RateLimiter::new(1);
        let a: IpAddr = "127.0.0.1".parse().unwrap();
        let b: IpAddr = "127.0.0.2".parse().unwrap();
        assert!(limiter.check(a));
        assert!(limiter.check(b));
        assert!(!limiter.check(a));
    }
}
