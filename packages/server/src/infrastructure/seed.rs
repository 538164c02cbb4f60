//! Seed file loading.
//!
//! One record per line, `<flightID> <seats>`, whitespace separated. Blank
//! lines are skipped; anything else that does not parse stops the load with
//! the offending line number.

use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::domain::{FlightId, Inventory};

use super::error::SeedError;

/// Load a seed file into `inventory`, returning the number of flights added
pub fn load_seed_file(path: &Path, inventory: &mut Inventory) -> Result<usize, SeedError> {
    let io_error = |source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    let loaded = load_seed(BufReader::new(file), inventory, io_error)?;

    tracing::info!("Loaded {} flights from {}", loaded, path.display());
    Ok(loaded)
}

fn load_seed<R, E>(reader: R, inventory: &mut Inventory, io_error: E) -> Result<usize, SeedError>
where
    R: BufRead,
    E: Fn(std::io::Error) -> SeedError,
{
    let max = inventory.max_seats();
    let mut seen = HashSet::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(&io_error)?;
        let number = number + 1;

        let mut tokens = line.split_whitespace();
        let (flight, seats) = match (tokens.next(), tokens.next(), tokens.next()) {
            (None, _, _) => continue,
            (Some(flight), Some(seats), None) => (flight, seats),
            _ => {
                return Err(SeedError::Malformed {
                    line: number,
                    content: line.clone(),
                });
            }
        };

        let invalid_seats = || SeedError::InvalidSeats {
            line: number,
            value: seats.to_string(),
            max,
        };
        let count: u32 = seats.parse().map_err(|_| invalid_seats())?;
        if count > max {
            return Err(invalid_seats());
        }

        let flight = FlightId::try_from(flight).map_err(|_| SeedError::Malformed {
            line: number,
            content: line.clone(),
        })?;
        if !seen.insert(flight.clone()) {
            return Err(SeedError::Duplicate {
                line: number,
                flight: flight.to_string(),
            });
        }

        tracing::debug!("Seeding flight {} with {} seats", flight, count);
        inventory.put(flight, count).map_err(|_| invalid_seats())?;
    }

    Ok(seen.len())
}
