//! Data Transfer Objects
//!
//! Bodies exchanged with relay callers and the actor input sent upstream.

pub mod dataset;
pub mod run;
