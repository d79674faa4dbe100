//! Poll state machine: which fetches may start and which results may land.

use std::time::Duration;

use tracing::debug;

/// Cadence of background reconciliation.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Lifecycle of the poller for one chat view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollerState {
    /// No conversation has been opened yet
    Idle,
    /// Polling the conversation identified by the current generation
    Active,
    /// View closed or switched away; results are dropped
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchKind {
    /// User-visible load on open or manual refresh
    Initial,
    /// Silent background reconciliation
    Poll,
}

/// A fetch the driver must perform, tagged with where it belongs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub seq: u64,
    pub kind: FetchKind,
    pub conversation_id: String,
    pub caller_id: String,
}

#[derive(Debug)]
struct Target {
    conversation_id: String,
    caller_id: String,
}

/// Decides when fetches start and whether their results are still wanted.
///
/// Every activation gets a fresh generation; a ticket from an older
/// generation is stale and its result must not touch the store. At most one
/// fetch occupies the in-flight slot.
#[derive(Debug)]
pub struct Poller {
    state: PollerState,
    generation: u64,
    target: Option<Target>,
    next_seq: u64,
    in_flight: Option<u64>,
    last_accepted: u64,
    suspended: bool,
}

impl Poller {
    pub fn new() -> Self {
        Self {
            state: PollerState::Idle,
            generation: 0,
            target: None,
            next_seq: 0,
            in_flight: None,
            last_accepted: 0,
            suspended: false,
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Start polling a conversation. Any previous activation is stopped first.
    pub fn activate(&mut self, conversation_id: &str, caller_id: &str) -> u64 {
        if self.state == PollerState::Active {
            self.stop();
        }
        self.generation += 1;
        self.state = PollerState::Active;
        self.target = Some(Target {
            conversation_id: conversation_id.to_string(),
            caller_id: caller_id.to_string(),
        });
        self.in_flight = None;
        self.last_accepted = 0;
        self.generation
    }

    pub fn stop(&mut self) {
        if self.state == PollerState::Active {
            debug!(generation = self.generation, "poller stopped");
        }
        self.state = PollerState::Stopped;
        self.target = None;
        self.in_flight = None;
    }

    /// Suspension follows the composer: true while unsent text exists.
    pub fn set_suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
    }

    /// The user-visible load. Ignores suspension and the in-flight slot but
    /// takes the slot over, so ticks stay quiet until it lands.
    pub fn begin_initial(&mut self) -> Option<FetchTicket> {
        self.issue(FetchKind::Initial)
    }

    /// A timer tick for `generation`. Returns a ticket only if a poll may start.
    pub fn on_tick(&mut self, generation: u64) -> Option<FetchTicket> {
        if self.state != PollerState::Active || generation != self.generation {
            return None;
        }
        if self.in_flight.is_some() || self.suspended {
            return None;
        }
        self.issue(FetchKind::Poll)
    }

    /// Settle a ticket. Returns whether its result is still current.
    pub fn complete(&mut self, ticket: &FetchTicket) -> bool {
        if self.state != PollerState::Active || ticket.generation != self.generation {
            return false;
        }
        if self.in_flight == Some(ticket.seq) {
            self.in_flight = None;
        }
        // A result overtaken by a later issued fetch is out of order
        if ticket.seq < self.last_accepted {
            return false;
        }
        self.last_accepted = ticket.seq;
        true
    }

    fn issue(&mut self, kind: FetchKind) -> Option<FetchTicket> {
        if self.state != PollerState::Active {
            return None;
        }
        let target = self.target.as_ref()?;
        self.next_seq += 1;
        self.in_flight = Some(self.next_seq);
        Some(FetchTicket {
            generation: self.generation,
            seq: self.next_seq,
            kind,
            conversation_id: target.conversation_id.clone(),
            caller_id: target.caller_id.clone(),
        })
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> (Poller, u64) {
        let mut poller = Poller::new();
        let generation = poller.activate("party-42", "alice");
        (poller, generation)
    }

    #[test]
    fn test_lifecycle_states() {
        let mut poller = Poller::new();
        assert_eq!(poller.state(), PollerState::Idle);
        assert!(poller.on_tick(0).is_none());

        let first = poller.activate("party-42", "alice");
        assert_eq!(poller.state(), PollerState::Active);

        let second = poller.activate("party-43", "alice");
        assert_ne!(first, second);
        assert_eq!(poller.state(), PollerState::Active);

        poller.stop();
        assert_eq!(poller.state(), PollerState::Stopped);
        assert!(poller.on_tick(second).is_none());
        assert!(poller.begin_initial().is_none());
    }

    #[test]
    fn test_tick_skipped_while_in_flight() {
        let (mut poller, generation) = active();
        let ticket = poller.on_tick(generation).expect("first tick polls");
        assert_eq!(ticket.kind, FetchKind::Poll);
        assert_eq!(ticket.conversation_id, "party-42");

        assert!(poller.on_tick(generation).is_none());
        assert!(poller.on_tick(generation).is_none());

        assert!(poller.complete(&ticket));
        assert!(poller.on_tick(generation).is_some());
    }

    #[test]
    fn test_tick_skipped_while_suspended() {
        let (mut poller, generation) = active();
        poller.set_suspended(true);
        assert!(poller.on_tick(generation).is_none());
        assert!(!poller.is_in_flight());

        poller.set_suspended(false);
        assert!(poller.on_tick(generation).is_some());
    }

    #[test]
    fn test_initial_load_ignores_suspension_and_holds_slot() {
        let (mut poller, generation) = active();
        poller.set_suspended(true);
        let initial = poller.begin_initial().expect("initial load is not suspendable");
        assert_eq!(initial.kind, FetchKind::Initial);

        poller.set_suspended(false);
        assert!(poller.on_tick(generation).is_none());
        assert!(poller.complete(&initial));
        assert!(poller.on_tick(generation).is_some());
    }

    #[test]
    fn test_stale_generation_is_rejected() {
        let (mut poller, old_generation) = active();
        let stale = poller.on_tick(old_generation).unwrap();

        let new_generation = poller.activate("party-43", "alice");
        assert!(poller.on_tick(old_generation).is_none());
        assert!(!poller.complete(&stale));

        // The new activation has a free slot
        let fresh = poller.on_tick(new_generation).unwrap();
        assert_eq!(fresh.conversation_id, "party-43");
        assert!(poller.complete(&fresh));
    }

    #[test]
    fn test_overtaken_poll_is_rejected() {
        let (mut poller, generation) = active();
        let poll = poller.on_tick(generation).unwrap();
        // Manual refresh while the poll is pending
        let refresh = poller.begin_initial().unwrap();

        assert!(poller.complete(&refresh));
        assert!(!poller.complete(&poll));
        assert!(!poller.is_in_flight());
    }
}
