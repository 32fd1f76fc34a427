use std::sync::atomic::{AtomicU64, Ordering};

/// Generation of a classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassTicket(u64);

/// Tracks the latest pass so results of older passes can be discarded.
///
/// Call `settle` right before applying a result.
/// A slow older pass must never overwrite a newer one.
#[derive(Debug, Default)]
pub struct PassTracker {
    latest: AtomicU64,
}

impl PassTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> PassTicket {
        PassTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: PassTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Returns the result if the ticket is the latest, otherwise drops it.
    pub fn settle<T>(&self, ticket: PassTicket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            tracing::info!("Discard the result of stale pass {:?}.", ticket);
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_latest_ticket_wins() {
        let tracker = PassTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_current(first));

        let second = tracker.begin();
        assert!(first < second);
        assert!(!tracker.is_current(first));
        assert_eq!(tracker.settle(first, "stale"), None);
        assert_eq!(tracker.settle(second, "fresh"), Some("fresh"));
    }

    #[tokio::test]
    async fn test_stale_result_arriving_late_is_discarded() {
        let tracker = Arc::new(PassTracker::new());

        let slow = {
            let tracker = tracker.clone();
            let ticket = tracker.begin();
            tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                tracker.settle(ticket, "previous user")
            })
        };
        let fast = {
            let tracker = tracker.clone();
            let ticket = tracker.begin();
            tokio::spawn(async move { tracker.settle(ticket, "current user") })
        };

        assert_eq!(fast.await.unwrap(), Some("current user"));
        assert_eq!(slow.await.unwrap(), None);
    }
}
