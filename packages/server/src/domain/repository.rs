//! Flight store trait
//!
//! The key/value container backing the inventory. The domain layer defines
//! the interface; the infrastructure layer provides implementations.
//!
//! Implementations need not be internally synchronized: every access goes
//! through [`Inventory`](super::Inventory), which is only reachable while the
//! desk lock is held.

use super::value_object::FlightId;

/// Flight id to remaining seat count container
pub trait FlightStore: Send {
    /// Seat count of a flight
    fn get(&self, flight: &FlightId) -> Option<u32>;

    /// Insert or overwrite a flight, returning the previous seat count
    fn put(&mut self, flight: FlightId, seats: u32) -> Option<u32>;

    /// Remove a flight, returning its seat count
    fn remove(&mut self, flight: &FlightId) -> Option<u32>;

    /// Number of flights
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lazy sequence of every `(flight, seats)` pair in the store's own order.
    ///
    /// Bounded iteration is `iter().take(n)`.
    fn iter(&self) -> Box<dyn Iterator<Item = (&FlightId, u32)> + '_>;
}
