/// An accepted send the driver must perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendTicket {
    pub generation: u64,
    pub conversation_id: String,
    pub caller_id: String,
    /// Trimmed body as it goes on the wire
    pub content: String,
}

/// Why a send request did not produce a ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendRejection {
    Blank,
    InFlight,
    Invalid(String),
}

/// Outbound gate: one send at a time, confirmed-only append.
#[derive(Debug, Default)]
pub struct MessageSender {
    in_flight: bool,
}

impl MessageSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn begin(
        &mut self,
        generation: u64,
        conversation_id: &str,
        caller_id: &str,
        content: &str,
    ) -> Result<SendTicket, SendRejection> {
        if content.trim().is_empty() {
            return Err(SendRejection::Blank);
        }
        if self.in_flight {
            return Err(SendRejection::InFlight);
        }
        let content = crate::validation::validate_message(content).map_err(SendRejection::Invalid)?;
        self.in_flight = true;
        Ok(SendTicket {
            generation,
            conversation_id: conversation_id.to_string(),
            caller_id: caller_id.to_string(),
            content,
        })
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    /// Forget a pending send, e.g. when the conversation changes.
    pub fn reset(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_rejected() {
        let mut sender = MessageSender::new();
        assert_eq!(sender.begin(1, "c", "u", ""), Err(SendRejection::Blank));
        assert_eq!(sender.begin(1, "c", "u", "   "), Err(SendRejection::Blank));
        assert!(!sender.is_in_flight());
    }

    #[test]
    fn test_single_send_in_flight() {
        let mut sender = MessageSender::new();
        let ticket = sender.begin(1, "party-42", "alice", "  bonsoir ").unwrap();
        assert_eq!(ticket.content, "bonsoir");
        assert_eq!(
            sender.begin(1, "party-42", "alice", "again"),
            Err(SendRejection::InFlight)
        );

        sender.finish();
        assert!(sender.begin(1, "party-42", "alice", "again").is_ok());
    }

    #[test]
    fn test_oversized_content_rejected() {
        let mut sender = MessageSender::new();
        let long = "x".repeat(crate::validation::MAX_MESSAGE_CHARS + 1);
        assert!(matches!(
            sender.begin(1, "c", "u", &long),
            Err(SendRejection::Invalid(_))
        ));
        assert!(!sender.is_in_flight());
    }
}
