//! DOM action primitives for famrelay
//!
//! This crate provides the building blocks the form-fill automaton is made of:
//! - `DomPort`, the single seam through which every page read and write flows
//! - `wait_until`, a suspend-until-predicate loop with an explicit poll budget
//! - value injection that notifies a framework-managed input of the change
//! - single-click selection of radio-style options

pub mod errors;
pub mod port;
mod primitives;
pub mod types;
mod waiting;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use errors::*;
pub use port::DomPort;
pub use primitives::*;
pub use types::*;
pub use waiting::*;
