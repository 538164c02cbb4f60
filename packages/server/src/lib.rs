//! Skydesk flight desk server library.
//!
//! A multi-port TCP server sharing one seat inventory and one session table
//! between its listener threads. Each session switches between a desk mode
//! (reservations and queries) and a chat mode (broadcast messages).

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
