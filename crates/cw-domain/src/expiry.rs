//! Expiry policy for provisioned caches

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Expiry policy applied to every entry of a cache
///
/// A cache is either eternal or expires its entries a whole number of
/// seconds after write. Sub-second TTL requests map to
/// [`ExpiryPolicy::Eternal`]; a zero or negative duration is never
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryPolicy {
    /// Entries never expire due to elapsed time
    Eternal,
    /// Entries expire this long after they are written
    TimeToLive(Duration),
}

impl ExpiryPolicy {
    /// Derive the policy from a TTL in seconds
    ///
    /// Any value below 1 selects [`ExpiryPolicy::Eternal`]; zero and all
    /// negative inputs are treated identically.
    pub fn from_ttl_seconds(ttl_seconds: i64) -> Self {
        if ttl_seconds < 1 {
            ExpiryPolicy::Eternal
        } else {
            ExpiryPolicy::TimeToLive(Duration::from_secs(ttl_seconds as u64))
        }
    }

    /// The time-to-live duration, if the policy has one
    pub fn time_to_live(&self) -> Option<Duration> {
        match self {
            ExpiryPolicy::Eternal => None,
            ExpiryPolicy::TimeToLive(ttl) => Some(*ttl),
        }
    }

    /// Whether entries under this policy live forever
    pub fn is_eternal(&self) -> bool {
        matches!(self, ExpiryPolicy::Eternal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_second_ttls_map_to_eternal() {
        assert_eq!(ExpiryPolicy::from_ttl_seconds(0), ExpiryPolicy::Eternal);
        assert_eq!(ExpiryPolicy::from_ttl_seconds(-1), ExpiryPolicy::Eternal);
        assert_eq!(ExpiryPolicy::from_ttl_seconds(i64::MIN), ExpiryPolicy::Eternal);
    }

    #[test]
    fn positive_ttls_keep_their_exact_duration() {
        assert_eq!(
            ExpiryPolicy::from_ttl_seconds(1),
            ExpiryPolicy::TimeToLive(Duration::from_secs(1))
        );
        assert_eq!(
            ExpiryPolicy::from_ttl_seconds(1800),
            ExpiryPolicy::TimeToLive(Duration::from_secs(1800))
        );
    }

    #[test]
    fn accessors_reflect_the_variant() {
        assert!(ExpiryPolicy::from_ttl_seconds(0).is_eternal());
        assert_eq!(ExpiryPolicy::from_ttl_seconds(0).time_to_live(), None);
        assert_eq!(
            ExpiryPolicy::from_ttl_seconds(5).time_to_live(),
            Some(Duration::from_secs(5))
        );
    }
}
