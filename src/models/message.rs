use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One turn in the conversation log. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Issues timestamp-derived message ids.
///
/// Ids are the creation time in epoch milliseconds, bumped forward when two
/// messages land in the same millisecond, so they stay unique and ordered for
/// the lifetime of one generator.
#[derive(Debug, Default)]
pub struct MessageIdGenerator {
    last: AtomicI64,
}

impl MessageIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = millis.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }

    /// Build a message stamped with the client clock.
    pub fn message(&self, role: Role, content: impl Into<String>) -> Message {
        let timestamp = Utc::now();
        Message {
            id: self.next_id(timestamp),
            role,
            content: content.into(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let ids = MessageIdGenerator::new();
        let now = Utc::now();

        let a = ids.next_id(now);
        let b = ids.next_id(now);
        let c = ids.next_id(now);

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(a, now.timestamp_millis().to_string());
        assert_eq!(b.parse::<i64>().unwrap(), now.timestamp_millis() + 1);
    }

    #[test]
    fn test_ids_follow_clock_when_it_moves_ahead() {
        let ids = MessageIdGenerator::new();
        let now = Utc::now();
        ids.next_id(now);

        let later = now + chrono::Duration::seconds(5);
        assert_eq!(ids.next_id(later), later.timestamp_millis().to_string());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }
}
