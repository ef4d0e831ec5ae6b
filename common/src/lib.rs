//! Shared vocabulary of the webdeck workspace.
//!
//! Everything that more than one crate needs to agree on lives here: the
//! service inventory model, the local address sentinel, error types, the
//! collaborator traits the scheduler is wired from, and the fixed engine
//! constants.

pub mod config;
pub mod error;
pub mod http;
pub mod network;
pub mod scanning;
pub mod service;
