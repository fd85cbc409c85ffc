//! Core types and trait definitions for the fifty scheduling engine.
//!
//! This crate is deliberately free of database dependencies. The SQLite
//! backend (`fifty-store-sqlite`) and the terminal driver (`fifty-cli`)
//! both depend on it; it depends on nothing heavier than `chrono`.

pub mod error;
pub mod item;
pub mod scheduler;
pub mod states;
pub mod store;

pub use error::Error;
pub use item::{ActiveItem, Item, Mode};
pub use scheduler::Scheduler;
