//! Student marks manager: record validation, grade bands, the collection store, and a typed
//! client with owned views over it.

pub mod client;
pub mod config;
pub mod error;
pub mod records;
pub mod telemetry;
pub mod view;
