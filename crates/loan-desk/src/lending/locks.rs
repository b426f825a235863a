use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::domain::CustomerId;

type Slot = Arc<Mutex<()>>;

/// One mutex per customer so issuance reads and the following insert are serialized.
///
/// Slots exist only while a lease is out; the last lease to drop removes its entry.
#[derive(Debug, Default)]
pub(crate) struct CustomerLocks {
    slots: Mutex<HashMap<CustomerId, Slot>>,
}

impl CustomerLocks {
    pub(crate) fn lease(&self, customer_id: CustomerId) -> SlotLease<'_> {
        let slot = self.slots().entry(customer_id).or_default().clone();
        SlotLease {
            locks: self,
            customer_id,
            slot,
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> usize {
        self.slots().len()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<CustomerId, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared handle on a customer's slot. Hold the slot with [`SlotLease::hold`].
pub(crate) struct SlotLease<'a> {
    locks: &'a CustomerLocks,
    customer_id: CustomerId,
    slot: Slot,
}

impl SlotLease<'_> {
    /// A poisoned slot only means an earlier issuance panicked; the data it guards is `()`.
    pub(crate) fn hold(&self) -> MutexGuard<'_, ()> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SlotLease<'_> {
    fn drop(&mut self) {
        let mut slots = self.locks.slots();
        // Leases are cloned under the map lock, so two owners means this lease and the map.
        if Arc::strong_count(&self.slot) == 2 {
            slots.remove(&self.customer_id);
        }
    }
}
