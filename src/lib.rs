//! Fruity Crush (workspace facade crate).
//!
//! This package exposes `fruity_crush::{core,levels,types}` as one API while the
//! implementation lives in dedicated crates under `crates/`, and hosts the
//! headless autoplay runner's configuration.

pub mod config;

pub use fruity_crush_core as core;
pub use fruity_crush_levels as levels;
pub use fruity_crush_types as types;
