//! Local disk-space health monitor.
//!
//! Periodically stats the node's data directory, applies the configured
//! free-space thresholds and publishes a snapshot with a node-level alert.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod interface;
pub mod ports;

#[cfg(test)]
mod test_support;

pub use application::LocalMonitor;
pub use domain::{Disk, DiskSpaceAlert, LocalState, Thresholds};
pub use error::{MonitorError, MonitorResult};
