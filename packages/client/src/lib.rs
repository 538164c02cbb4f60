pub mod domain;
pub mod error;
pub mod exchange;
pub mod formatter;
pub mod runner;

pub use error::ClientError;
pub use runner::run_client;
