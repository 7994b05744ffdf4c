//! Embedded video players with an optional custom control overlay.
//!
//! The controller only talks to the embed runtime and the page through the
//! traits in [`runtime`] and [`host`]; [`web`] holds the browser
//! implementations and is the one place that picks them.

pub mod controller;
pub mod error;
pub mod gate;
pub mod host;
pub mod options;
pub mod registry;
pub mod runtime;
pub mod state;
pub mod web;

#[cfg(test)]
mod testing;

pub use options::{Dimension, PlayerConfig};
