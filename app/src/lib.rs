//! Terminal host for the feed core.
//!
//! # Overview
//! Supplies the pieces the core leaves to its host: configuration, a ureq
//! `Transport`, the `Dashboard` coordinator task, and a line-oriented front
//! end that prints snapshots and turns typed commands into messages.

pub mod config;
pub mod dashboard;
pub mod terminal;
pub mod transport;

pub use config::{load_settings, Cli, PanelMode, Settings};
pub use dashboard::{Dashboard, DashboardHandle, Snapshot};
pub use transport::UreqTransport;
