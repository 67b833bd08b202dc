//! Core library for Saathi: configuration, external service clients,
//! and the fixed collection data backing the timing and route screens.

pub mod assistant;
pub mod auth;
pub mod config;
pub mod schedule;
