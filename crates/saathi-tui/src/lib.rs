//! Terminal UI for the Swachh Saathi client.
//!
//! Elm-style architecture: `state` holds the model, `update` is a pure
//! reducer from events to effects, and `runtime` owns the terminal and
//! executes effects.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;
pub mod views;
