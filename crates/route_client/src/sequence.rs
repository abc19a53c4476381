use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use model::{RouteError, RouteResult};

/// Position of a plan request in the order requests were issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanTicket(u64);

impl PlanTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing tickets. Clones share the counter, so
/// every clone agrees on which ticket is the latest.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> PlanTicket {
        PlanTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: PlanTicket) -> bool {
        ticket.0 == self.latest()
    }

    /// Fails with `StaleResponse` if a newer ticket has been issued.
    pub fn check(&self, ticket: PlanTicket) -> RouteResult<()> {
        let latest = self.latest();
        if ticket.0 == latest {
            Ok(())
        } else {
            Err(RouteError::StaleResponse {
                sequence: ticket.0,
                latest,
            })
        }
    }
}
