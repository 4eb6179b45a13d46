//! # Sweep Common
//!
//! Shared vocabulary of the `sweep` workspace.
//!
//! Everything here is plain data and pure functions: the scan request and
//! report models, the error taxonomy, the well-known service table and the
//! collaborator [`config::Config`]. Nothing in this crate touches the network.

pub mod config;
pub mod error;
pub mod log;
pub mod network;
pub mod services;
