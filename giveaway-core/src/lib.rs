//! Giveaway Core
//!
//! Core types shared by the Giveaway relay crates.
//!
//! This crate contains:
//! - Domain types: remote entities observed through the Apify API (Run, ResultItem, Account)
//! - DTOs: request and response bodies exchanged with callers and with the actor

pub mod domain;
pub mod dto;
