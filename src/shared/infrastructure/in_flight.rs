// Per-user guard against overlapping state transitions.
//
// Responsibilities
// - Reject a second clock or break transition for a user while one is running.
// - Release the user automatically when the guard is dropped, on every path.
//
// Storage uniqueness stays authoritative; this only stops duplicate submits
// before they reach the store.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct InFlightRequests {
    users: Mutex<HashSet<String>>,
}

impl InFlightRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when a request for `user_id` is already executing.
    pub fn try_begin(&self, user_id: &str) -> Option<InFlightGuard<'_>> {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        if !users.insert(user_id.to_string()) {
            return None;
        }
        Some(InFlightGuard {
            owner: self,
            user_id: user_id.to_string(),
        })
    }

    pub fn is_in_flight(&self, user_id: &str) -> bool {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(user_id)
    }
}

#[must_use]
pub struct InFlightGuard<'a> {
    owner: &'a InFlightRequests,
    user_id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner
            .users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.user_id);
    }
}
