//! Chromium DevTools Protocol bridge.
//!
//! Attaches to the operator's already running browser (started with
//! `--remote-debugging-port`) and exposes the active tab as an
//! [`action_primitives::DomPort`]. The browser is never launched or closed
//! from here.

pub mod config;
pub mod dom;
pub mod error;
mod scripts;
pub mod session;

pub use config::CdpConfig;
pub use dom::ChromiumDom;
pub use error::{AdapterError, AdapterErrorKind};
pub use session::CdpSession;
