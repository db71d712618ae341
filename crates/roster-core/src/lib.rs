//! Core types and trait definitions for the Roster record store.
//!
//! This crate is deliberately free of HTTP and storage dependencies. It holds
//! the four entity kinds, the merge and filter engines that operate on them,
//! and the store traits that backends implement.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod address;
pub mod club;
pub mod entity;
pub mod error;
pub mod filter;
pub mod merge;
pub mod person;
pub mod player;
pub mod store;

pub use entity::{Entity, EntityKind};
pub use error::{Error, Result};
