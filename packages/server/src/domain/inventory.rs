//! Seat inventory.
//!
//! Wraps a [`FlightStore`] with the seat bounds and the compound
//! reserve/release operations. Each operation is a single read-modify-write
//! on `&mut self`; callers reach the inventory through the desk lock, so no
//! other thread can observe or interleave with a partial update.

use super::{error::InventoryError, repository::FlightStore, value_object::FlightId};

/// Default upper bound on the seats of a flight
pub const DEFAULT_MAX_SEATS: u32 = 40;

pub struct Inventory {
    store: Box<dyn FlightStore>,
    max_seats: u32,
}

impl Inventory {
    pub fn new(store: Box<dyn FlightStore>, max_seats: u32) -> Self {
        Self { store, max_seats }
    }

    pub fn max_seats(&self) -> u32 {
        self.max_seats
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get(&self, flight: &FlightId) -> Result<u32, InventoryError> {
        self.store
            .get(flight)
            .ok_or_else(|| InventoryError::NotFound(flight.to_string()))
    }

    /// Insert or overwrite a flight
    pub fn put(&mut self, flight: FlightId, seats: u32) -> Result<(), InventoryError> {
        if seats > self.max_seats {
            return Err(InventoryError::OverCapacity {
                flight: flight.to_string(),
                seats: 0,
                requested: seats,
                max: self.max_seats,
            });
        }
        self.store.put(flight, seats);
        Ok(())
    }

    /// Every flight, capped to the first `limit` entries when given
    pub fn entries(&self, limit: Option<usize>) -> impl Iterator<Item = (&FlightId, u32)> + '_ {
        self.store.iter().take(limit.unwrap_or(usize::MAX))
    }

    /// Flights with at least one free seat, capped to the first `limit` matches
    pub fn available(&self, limit: Option<usize>) -> impl Iterator<Item = (&FlightId, u32)> + '_ {
        self.store
            .iter()
            .filter(|(_, seats)| *seats > 0)
            .take(limit.unwrap_or(usize::MAX))
    }

    /// Take `seats` from a flight, returning the seats left
    pub fn reserve(&mut self, flight: &FlightId, seats: u32) -> Result<u32, InventoryError> {
        let available = self.get(flight)?;
        let remaining =
            available
                .checked_sub(seats)
                .ok_or_else(|| InventoryError::Exhausted {
                    flight: flight.to_string(),
                    available,
                    requested: seats,
                })?;

        self.store.put(flight.clone(), remaining);
        Ok(remaining)
    }

    /// Give `seats` back to a flight, returning the new total
    pub fn release(&mut self, flight: &FlightId, seats: u32) -> Result<u32, InventoryError> {
        let current = self.get(flight)?;
        let total = current
            .checked_add(seats)
            .filter(|total| *total <= self.max_seats)
            .ok_or_else(|| InventoryError::OverCapacity {
                flight: flight.to_string(),
                seats: current,
                requested: seats,
                max: self.max_seats,
            })?;

        self.store.put(flight.clone(), total);
        Ok(total)
    }
}

/// Render `<flight> <seats>` records joined by newlines, without a total line
pub fn format_listing<'a>(entries: impl Iterator<Item = (&'a FlightId, u32)>) -> String {
    entries
        .map(|(flight, seats)| format!("{} {}", flight, seats))
        .collect::<Vec<_>>()
        .join("\n")
}
