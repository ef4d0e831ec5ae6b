//! Discovery engine of webdeck.
//!
//! A [`scheduler::Scheduler`] repeatedly resolves the local address, sweeps
//! its TCP port space with a [`scanner::PortSweep`], probes every open port
//! with a [`probe::ServiceProber`] and publishes the resulting inventory to
//! a shared [`cache::ServiceCache`].

pub mod cache;
pub mod network;
pub mod probe;
pub mod scanner;
pub mod scheduler;
