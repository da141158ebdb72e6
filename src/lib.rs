//! famrelay library
//!
//! Exposes the pipeline pieces for the binary and for integration testing.

pub mod cli;
pub mod config;
pub mod notify;
pub mod paste;
pub mod pipeline;
pub mod routes;

pub use config::Config;
pub use notify::{ConsoleNotifier, NoticeLevel, Notifier};
pub use pipeline::{Pipeline, RunOutcome};
pub use routes::{PageCommand, Route, RouteTable};
