//! Artifact id generation
//!
//! Ids are `<kind prefix>_<token>`; the store supplies the prefix and a
//! generator supplies the token. Tokens must never repeat within a store.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};

/// Produces unique id tokens
pub trait IdGenerator: Send + Sync {
    fn next_token(&self) -> String;
}

/// Millisecond timestamps, bumped by one when two ids land in the same millisecond
pub struct TimestampIdGenerator {
    clock: Arc<dyn Clock>,
    last: AtomicI64,
}

impl TimestampIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicI64::new(0),
        }
    }
}

impl Default for TimestampIdGenerator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_token(&self) -> String {
        let now = self.clock.now_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Counter starting at 1; deterministic ids for tests and previews
#[derive(Debug)]
pub struct SequenceIdGenerator {
    next: AtomicU64,
}

impl SequenceIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequenceIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_token(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Random v4 UUIDs without hyphens
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_token(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use std::collections::HashSet;

    #[test]
    fn test_timestamp_ids_are_unique_within_one_millisecond() {
        let generator = TimestampIdGenerator::new(Arc::new(FixedClock::at_millis(1_700_000_000_000)));

        let a = generator.next_token();
        let b = generator.next_token();
        let c = generator.next_token();

        assert_eq!(a, "1700000000000");
        assert_eq!(b, "1700000000001");
        assert_eq!(c, "1700000000002");
    }

    #[test]
    fn test_timestamp_ids_follow_the_clock() {
        let clock = Arc::new(FixedClock::at_millis(5_000));
        let generator = TimestampIdGenerator::new(clock.clone());

        assert_eq!(generator.next_token(), "5000");
        clock.advance(chrono::Duration::seconds(1));
        assert_eq!(generator.next_token(), "6000");
    }

    #[test]
    fn test_sequence_ids() {
        let generator = SequenceIdGenerator::new();
        assert_eq!(generator.next_token(), "1");
        assert_eq!(generator.next_token(), "2");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let ids: HashSet<String> = (0..100).map(|_| UuidIdGenerator.next_token()).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| id.len() == 32));
    }
}
