//! In-flight guard for form submissions

use std::cell::Cell;
use std::rc::Rc;

/// Label shown on the submit control while a request is pending
pub const BUSY_LABEL: &str = "Analyzing…";

/// Rejects a second submission while one is still pending.
///
/// Clones share the same flag. Single-threaded, like the page it guards.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    in_flight: Rc<Cell<bool>>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Start a submission, or `None` if one is already running.
    /// The flag clears when the returned ticket is dropped.
    pub fn try_begin(&self) -> Option<SubmitTicket> {
        if self.in_flight.replace(true) {
            return None;
        }
        Some(SubmitTicket {
            in_flight: Rc::clone(&self.in_flight),
        })
    }
}

#[derive(Debug)]
#[must_use = "the submission ends when the ticket is dropped"]
pub struct SubmitTicket {
    in_flight: Rc<Cell<bool>>,
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.in_flight.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_submit_rejected_while_pending() {
        let guard = SubmitGuard::new();
        let ticket = guard.try_begin();
        assert!(ticket.is_some());
        assert!(guard.is_in_flight());
        assert!(guard.clone().try_begin().is_none());

        drop(ticket);
        assert!(!guard.is_in_flight());
        assert!(guard.try_begin().is_some());
    }
}
