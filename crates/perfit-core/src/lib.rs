//! Core types and the outfit suggestion engine for Perfit.
//!
//! This crate is deliberately free of database and CLI dependencies. The
//! classifiers and the slot assembler are pure functions over closet
//! snapshots; persistence lives behind the traits in [`store`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod assembly;
pub mod calendar;
pub mod category;
pub mod error;
pub mod garment;
pub mod occasion;
pub mod outfit;
pub mod store;
pub mod suggest;
pub mod weather;

pub use error::{Error, Result};
