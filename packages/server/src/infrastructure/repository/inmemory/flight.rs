//! In-memory flight store
//!
//! Implements the domain's `FlightStore` over a `BTreeMap`, so listings come
//! out in flight-ID order. It holds no lock of its own; every access goes
//! through the `Desk` lock.

use std::collections::BTreeMap;

use crate::domain::{FlightId, FlightStore};

/// Flight inventory kept in a `BTreeMap`
#[derive(Debug, Default, Clone)]
pub struct BTreeFlightStore {
    flights: BTreeMap<FlightId, u32>,
}

impl BTreeFlightStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlightStore for BTreeFlightStore {
    fn get(&self, flight: &FlightId) -> Option<u32> {
        self.flights.get(flight).copied()
    }

    fn put(&mut self, flight: FlightId, seats: u32) -> Option<u32> {
        self.flights.insert(flight, seats)
    }

    fn remove(&mut self, flight: &FlightId) -> Option<u32> {
        self.flights.remove(flight)
    }

    fn len(&self) -> usize {
        self.flights.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&FlightId, u32)> + '_> {
        Box::new(self.flights.iter().map(|(flight, seats)| (flight, *seats)))
    }
}
