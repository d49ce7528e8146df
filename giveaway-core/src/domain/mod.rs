//! Core domain types
//!
//! These types are read-only projections of entities owned by the remote
//! scraping platform. The relay never mutates them; each snapshot is fetched,
//! inspected and discarded.

pub mod account;
pub mod item;
pub mod run;
