//! Collapse a flat timeline into per-sender bursts for display.

use chrono::{DateTime, Utc};

use crate::model::Message;

/// Maximum gap between consecutive same-sender messages of one group.
pub const GROUPING_THRESHOLD_MS: i64 = 30_000;

/// Consecutive messages from one sender, rendered under a single header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageGroup {
    pub sender_id: String,
    /// Timestamp of the latest confirmed message in the group.
    pub last_timestamp: Option<DateTime<Utc>>,
    pub messages: Vec<Message>,
}

impl MessageGroup {
    fn start(message: &Message) -> Self {
        Self {
            sender_id: message.sender_id.clone(),
            last_timestamp: message.timestamp,
            messages: vec![message.clone()],
        }
    }

    fn accepts(&self, message: &Message) -> bool {
        if message.sender_id != self.sender_id {
            return false;
        }
        match (message.timestamp, self.last_timestamp) {
            // Unconfirmed messages extend on sender identity alone
            (None, _) => true,
            (Some(ts), Some(last)) => {
                (ts - last).num_milliseconds().abs() <= GROUPING_THRESHOLD_MS
            }
            (Some(_), None) => false,
        }
    }

    fn push(&mut self, message: &Message) {
        if message.timestamp.is_some() {
            self.last_timestamp = message.timestamp;
        }
        self.messages.push(message.clone());
    }
}

/// Group an ordered message sequence.
pub fn group_messages(messages: &[Message]) -> Vec<MessageGroup> {
    let mut groups: Vec<MessageGroup> = Vec::new();
    for message in messages {
        match groups.last_mut() {
            Some(current) if current.accepts(message) => current.push(message),
            _ => groups.push(MessageGroup::start(message)),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 20, 0, 0).unwrap()
    }

    fn msg(id: &str, sender: &str, offset_ms: i64) -> Message {
        Message::new(id, "party-42", sender, id).at(t0() + Duration::milliseconds(offset_ms))
    }

    fn shape(groups: &[MessageGroup]) -> Vec<(String, Vec<String>)> {
        groups
            .iter()
            .map(|g| {
                (
                    g.sender_id.clone(),
                    g.messages.iter().map(|m| m.id.clone()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_party_scenario() {
        let messages = vec![msg("m1", "A", 0), msg("m2", "A", 5_000), msg("m3", "B", 6_000)];
        let groups = group_messages(&messages);
        assert_eq!(
            shape(&groups),
            vec![
                ("A".to_string(), vec!["m1".to_string(), "m2".to_string()]),
                ("B".to_string(), vec!["m3".to_string()]),
            ]
        );
        assert_eq!(groups[0].last_timestamp, messages[1].timestamp);
    }

    #[test]
    fn test_threshold_boundary() {
        let together = group_messages(&[msg("m1", "A", 0), msg("m2", "A", 30_000)]);
        assert_eq!(together.len(), 1);

        let apart = group_messages(&[msg("m1", "A", 0), msg("m2", "A", 30_001)]);
        assert_eq!(apart.len(), 2);
    }

    #[test]
    fn test_sender_change_always_splits() {
        let groups = group_messages(&[msg("m1", "A", 0), msg("m2", "B", 0), msg("m3", "A", 0)]);
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_gap_is_measured_from_last_message() {
        // Each step is under the threshold even though the burst spans longer
        let groups = group_messages(&[
            msg("m1", "A", 0),
            msg("m2", "A", 25_000),
            msg("m3", "A", 50_000),
        ]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].messages.len(), 3);
    }

    #[test]
    fn test_out_of_order_timestamps_use_absolute_gap() {
        let groups = group_messages(&[msg("m1", "A", 10_000), msg("m2", "A", 0)]);
        assert_eq!(groups.len(), 1);
        let split = group_messages(&[msg("m1", "A", 40_000), msg("m2", "A", 0)]);
        assert_eq!(split.len(), 2);
    }

    #[test]
    fn test_unconfirmed_messages() {
        let pending = Message::new("p1", "party-42", "A", "pending");

        // Pending joins its sender's group without a time check
        let groups = group_messages(&[msg("m1", "A", 0), pending.clone()]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].last_timestamp, Some(t0()));

        // A pending-only group never passes the time check for a confirmed message
        let groups = group_messages(&[pending.clone(), msg("m2", "A", 0)]);
        assert_eq!(groups.len(), 2);

        // Pending from another sender still splits
        let groups = group_messages(&[msg("m1", "B", 0), pending]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_grouping_is_deterministic() {
        let messages = vec![
            msg("m1", "A", 0),
            msg("m2", "A", 1_000),
            msg("m3", "B", 90_000),
            msg("m4", "B", 95_000),
            msg("m5", "A", 200_000),
        ];
        assert_eq!(group_messages(&messages), group_messages(&messages));
        assert!(group_messages(&[]).is_empty());
    }
}
