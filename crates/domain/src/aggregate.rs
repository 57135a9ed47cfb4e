//! Core aggregate and domain event traits.

use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events record decisions the customer has made. They are immutable
/// and named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name, used in logs and the session journal.
    fn event_type(&self) -> &'static str;
}

/// Trait for aggregates whose state changes only by applying events.
///
/// Commands validate against the current state and return the events they
/// would cause; `apply` then folds those events into the state. Applying is
/// pure and infallible, since an event describes something already accepted.
pub trait Aggregate: Send + Sync + Sized {
    /// The type of events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// The type of errors its commands can produce.
    type Error: std::error::Error + Send + Sync;

    /// Returns the aggregate type name.
    fn aggregate_type() -> &'static str;

    /// Applies an event to the aggregate, updating its state.
    fn apply(&mut self, event: Self::Event);

    /// Applies multiple events in sequence.
    fn apply_events(&mut self, events: impl IntoIterator<Item = Self::Event>) {
        for event in events {
            self.apply(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    enum TallyEvent {
        Opened,
        Counted { by: i32 },
    }

    impl DomainEvent for TallyEvent {
        fn event_type(&self) -> &'static str {
            match self {
                TallyEvent::Opened => "TallyOpened",
                TallyEvent::Counted { .. } => "TallyCounted",
            }
        }
    }

    #[derive(Debug, Default)]
    struct Tally {
        open: bool,
        value: i32,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("tally error")]
    struct TallyError;

    impl Aggregate for Tally {
        type Event = TallyEvent;
        type Error = TallyError;

        fn aggregate_type() -> &'static str {
            "Tally"
        }

        fn apply(&mut self, event: Self::Event) {
            match event {
                TallyEvent::Opened => self.open = true,
                TallyEvent::Counted { by } => self.value += by,
            }
        }
    }

    #[test]
    fn test_apply_events_in_order() {
        let mut tally = Tally::default();
        tally.apply_events(vec![
            TallyEvent::Opened,
            TallyEvent::Counted { by: 2 },
            TallyEvent::Counted { by: 40 },
        ]);

        assert!(tally.open);
        assert_eq!(tally.value, 42);
        assert_eq!(Tally::aggregate_type(), "Tally");
    }

    #[test]
    fn test_event_type() {
        assert_eq!(TallyEvent::Opened.event_type(), "TallyOpened");
        assert_eq!(TallyEvent::Counted { by: 1 }.event_type(), "TallyCounted");
    }
}
