//! Service Module
//!
//! Business logic layer of the relay.
//! Services sit between the HTTP handlers and the Apify client.

pub mod backoff;
pub mod resolver;
pub mod run;

// Re-export for convenience
pub use run as run_service;
